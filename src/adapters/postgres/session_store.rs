//! PostgreSQL implementation of SessionStore.
//!
//! State guards (session open, feedback absent) are folded into the write
//! statements themselves. Single-row writes are one statement; completion
//! spans two tables and runs in a transaction. When a guarded write touches
//! no row, a follow-up read decides which guard failed.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::assessment::{Assessment, BestPracticeExample, Feedback};
use crate::domain::foundation::{
    DomainError, FeedbackId, MessageId, SessionId, Timestamp, UserId,
};
use crate::domain::session::{
    AnnexChapter, AuditType, Author, Difficulty, IndustryCode, Message, NewMessage,
    SessionConfig, StandardCode, TrainingSession,
};
use crate::ports::{SessionStore, SessionSummary};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
    }

    /// Explains why a guarded write on `id` matched no row.
    async fn guard_failure(&self, id: &SessionId) -> DomainError {
        let row = sqlx::query("SELECT completed_at IS NOT NULL AS completed FROM training_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(None) => DomainError::session_not_found(id),
            Ok(Some(row)) => match row.try_get::<bool, _>("completed") {
                Ok(true) => DomainError::session_completed(id),
                Ok(false) => DomainError::database(format!("Guarded write on open session {} matched no row", id)),
                Err(e) => db_error("read session state")(e),
            },
            Err(e) => db_error("read session state")(e),
        }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(&self, session: &TrainingSession) -> Result<(), DomainError> {
        let config = session.config();
        let standards: Vec<String> = config.standards().iter().map(|s| s.code().to_string()).collect();
        let chapters: Vec<i16> = config.chapters().iter().map(|c| i16::from(c.number())).collect();

        sqlx::query(
            r#"
            INSERT INTO training_sessions (
                id, owner_id, standards, audit_type, difficulty, chapters,
                industry, hints_enabled, hints_used, created_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.owner().as_str())
        .bind(&standards)
        .bind(config.audit_type().code())
        .bind(config.difficulty().code())
        .bind(&chapters)
        .bind(config.industry().code())
        .bind(config.hints_enabled())
        .bind(session.hints_used() as i32)
        .bind(session.created_at().as_datetime())
        .bind(session.completed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error("insert session"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<TrainingSession>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM training_sessions WHERE id = $1", SESSION_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch session"))?;

        row.map(|row| row_to_session(&row)).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<SessionSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.owner_id, s.standards, s.audit_type, s.difficulty, s.chapters,
                   s.industry, s.hints_enabled, s.hints_used, s.created_at, s.completed_at,
                   f.overall_score,
                   (SELECT COUNT(*) FROM training_messages m WHERE m.session_id = s.id) AS message_count
            FROM training_sessions s
            LEFT JOIN training_feedback f ON f.session_id = s.id
            WHERE s.owner_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list sessions"))?;

        rows.iter()
            .map(|row| {
                let overall_score: Option<i16> = row.try_get("overall_score").map_err(db_error("get overall_score"))?;
                let message_count: i64 = row.try_get("message_count").map_err(db_error("get message_count"))?;
                Ok(SessionSummary {
                    session: row_to_session(row)?,
                    message_count: message_count as u32,
                    overall_score: overall_score.map(|s| s as u8),
                })
            })
            .collect()
    }

    async fn append_message(
        &self,
        session_id: &SessionId,
        message: NewMessage,
    ) -> Result<Message, DomainError> {
        let id = MessageId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO training_messages (id, session_id, author, content)
            SELECT $1, s.id, $3, $4
            FROM training_sessions s
            WHERE s.id = $2 AND s.completed_at IS NULL
            RETURNING sequence, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(session_id.as_uuid())
        .bind(message.author().code())
        .bind(message.content())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("insert message"))?;

        let Some(row) = row else {
            return Err(self.guard_failure(session_id).await);
        };

        let sequence: i64 = row.try_get("sequence").map_err(db_error("get sequence"))?;
        let created_at: chrono::DateTime<chrono::Utc> =
            row.try_get("created_at").map_err(db_error("get created_at"))?;

        Ok(Message {
            id,
            session_id: *session_id,
            author: message.author(),
            content: message.content().to_string(),
            sequence,
            created_at: Timestamp::from_datetime(created_at),
        })
    }

    async fn messages(&self, session_id: &SessionId) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, author, content, sequence, created_at
            FROM training_messages
            WHERE session_id = $1
            ORDER BY sequence ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch messages"))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn increment_hints_used(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE training_sessions
            SET hints_used = hints_used + 1
            WHERE id = $1 AND completed_at IS NULL
            RETURNING hints_used
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("increment hints"))?;

        match row {
            Some(row) => {
                let hints_used: i32 = row.try_get("hints_used").map_err(db_error("get hints_used"))?;
                Ok(hints_used as u32)
            }
            None => Err(self.guard_failure(session_id).await),
        }
    }

    async fn find_feedback(&self, session_id: &SessionId) -> Result<Option<Feedback>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, assessment, best_practice_examples, created_at
            FROM training_feedback
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch feedback"))?;

        row.map(|row| row_to_feedback(&row)).transpose()
    }

    async fn complete_with_feedback(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let session_id = &feedback.session_id;
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        // Closing first takes the row lock, so a concurrent completion waits
        // here and then sees completed_at set.
        let closed = sqlx::query(
            "UPDATE training_sessions SET completed_at = NOW() WHERE id = $1 AND completed_at IS NULL",
        )
        .bind(session_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("complete session"))?;

        if closed.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error("rollback transaction"))?;
            return Err(self.guard_failure(session_id).await);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO training_feedback (
                id, session_id, overall_score, assessment, best_practice_examples, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (session_id) DO NOTHING
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(session_id.as_uuid())
        .bind(i16::from(feedback.overall_score()))
        .bind(Json(&feedback.assessment))
        .bind(feedback.best_practice_examples.as_ref().map(Json))
        .bind(feedback.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert feedback"))?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error("rollback transaction"))?;
            return Err(DomainError::feedback_exists(session_id));
        }

        tx.commit().await.map_err(db_error("commit completion"))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

const SESSION_COLUMNS: &str = "id, owner_id, standards, audit_type, difficulty, chapters, \
     industry, hints_enabled, hints_used, created_at, completed_at";

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", context, e))
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid stored {}: {}", column, detail))
}

/// Column values of one `training_sessions` row.
#[derive(Debug, Clone)]
struct StoredSession {
    id: uuid::Uuid,
    owner_id: String,
    standards: Vec<String>,
    audit_type: String,
    difficulty: String,
    chapters: Vec<i16>,
    industry: String,
    hints_enabled: bool,
    hints_used: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl StoredSession {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, DomainError> {
        Ok(Self {
            id: row.try_get("id").map_err(db_error("get id"))?,
            owner_id: row.try_get("owner_id").map_err(db_error("get owner_id"))?,
            standards: row.try_get("standards").map_err(db_error("get standards"))?,
            audit_type: row.try_get("audit_type").map_err(db_error("get audit_type"))?,
            difficulty: row.try_get("difficulty").map_err(db_error("get difficulty"))?,
            chapters: row.try_get("chapters").map_err(db_error("get chapters"))?,
            industry: row.try_get("industry").map_err(db_error("get industry"))?,
            hints_enabled: row.try_get("hints_enabled").map_err(db_error("get hints_enabled"))?,
            hints_used: row.try_get("hints_used").map_err(db_error("get hints_used"))?,
            created_at: row.try_get("created_at").map_err(db_error("get created_at"))?,
            completed_at: row.try_get("completed_at").map_err(db_error("get completed_at"))?,
        })
    }

    /// Builds the aggregate. Audit type, difficulty and industry codes a
    /// current build does not know fall back to their defaults.
    fn into_session(self) -> Result<TrainingSession, DomainError> {
        let standards = self
            .standards
            .iter()
            .map(|code| code.parse::<StandardCode>().map_err(|e| corrupt("standard", e)))
            .collect::<Result<Vec<_>, _>>()?;
        let chapters = self
            .chapters
            .iter()
            .map(|n| {
                u8::try_from(*n)
                    .map_err(|e| corrupt("chapter", e))
                    .and_then(|n| AnnexChapter::new(n).map_err(|e| corrupt("chapter", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = SessionConfig::new(
            standards,
            AuditType::from_code_or_default(&self.audit_type),
            Difficulty::from_code_or_default(&self.difficulty),
            chapters,
            IndustryCode::from_code_or_default(&self.industry),
            self.hints_enabled,
        )
        .map_err(|e| corrupt("configuration", e))?;

        Ok(TrainingSession::reconstitute(
            SessionId::from_uuid(self.id),
            UserId::new(self.owner_id).map_err(|e| corrupt("owner_id", e))?,
            config,
            self.hints_used.max(0) as u32,
            Timestamp::from_datetime(self.created_at),
            self.completed_at.map(Timestamp::from_datetime),
        ))
    }
}

fn row_to_session(row: &sqlx::postgres::PgRow) -> Result<TrainingSession, DomainError> {
    StoredSession::from_row(row)?.into_session()
}

fn row_to_message(row: &sqlx::postgres::PgRow) -> Result<Message, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error("get id"))?;
    let session_id: uuid::Uuid = row.try_get("session_id").map_err(db_error("get session_id"))?;
    let author: String = row.try_get("author").map_err(db_error("get author"))?;
    let content: String = row.try_get("content").map_err(db_error("get content"))?;
    let sequence: i64 = row.try_get("sequence").map_err(db_error("get sequence"))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(db_error("get created_at"))?;

    Ok(Message {
        id: MessageId::from_uuid(id),
        session_id: SessionId::from_uuid(session_id),
        author: Author::from_code(&author).ok_or_else(|| corrupt("author", &author))?,
        content,
        sequence,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_feedback(row: &sqlx::postgres::PgRow) -> Result<Feedback, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error("get id"))?;
    let session_id: uuid::Uuid = row.try_get("session_id").map_err(db_error("get session_id"))?;
    let Json(assessment): Json<Assessment> =
        row.try_get("assessment").map_err(db_error("get assessment"))?;
    let best_practice: Option<Json<Vec<BestPracticeExample>>> = row
        .try_get("best_practice_examples")
        .map_err(db_error("get best_practice_examples"))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(db_error("get created_at"))?;

    Ok(Feedback {
        id: FeedbackId::from_uuid(id),
        session_id: SessionId::from_uuid(session_id),
        assessment,
        best_practice_examples: best_practice.map(|Json(examples)| examples),
        created_at: Timestamp::from_datetime(created_at),
    })
}
