use std::error::Error;
use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audit_trainer::adapters::http::{api_router, AuthState, TrainingHandlers};
use audit_trainer::adapters::{
    AnthropicConfig, AnthropicProvider, InMemorySessionStore, JwtConfig, JwtSessionValidator,
    MockAIProvider, PostgresSessionStore,
};
use audit_trainer::application::{
    CompleteSessionHandler, CreateSessionHandler, GetSessionHandler, ListSessionsHandler,
    RequestHintHandler, SendMessageHandler,
};
use audit_trainer::config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
use audit_trainer::ports::{AIProvider, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let store = build_store(&config.database).await?;
    let ai_provider = build_ai_provider(&config)?;
    let auth: AuthState = Arc::new(JwtSessionValidator::new(jwt_config(&config.auth)));
    let limits = config.training.limits();

    let handlers = TrainingHandlers::new(
        Arc::new(CreateSessionHandler::new(store.clone())),
        Arc::new(GetSessionHandler::new(store.clone())),
        Arc::new(ListSessionsHandler::new(store.clone())),
        Arc::new(SendMessageHandler::new(
            store.clone(),
            ai_provider.clone(),
            limits,
        )),
        Arc::new(RequestHintHandler::new(
            store.clone(),
            ai_provider.clone(),
            limits,
        )),
        Arc::new(CompleteSessionHandler::new(store, ai_provider, limits)),
    );

    let app = api_router(handlers, auth)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_store(config: &DatabaseConfig) -> Result<Arc<dyn SessionStore>, Box<dyn Error>> {
    let Some(url) = config.url() else {
        tracing::warn!("No database URL configured, sessions are kept in memory");
        return Ok(Arc::new(InMemorySessionStore::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(url)
        .await?;
    tracing::info!("Database connection pool created");

    let store = PostgresSessionStore::new(pool);
    if config.run_migrations {
        store.migrate().await?;
        tracing::info!("Database migrations applied");
    }
    Ok(Arc::new(store))
}

fn build_ai_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, Box<dyn Error>> {
    let Some(api_key) = config.ai.api_key() else {
        tracing::warn!("No Anthropic API key configured, using the scripted mock provider");
        return Ok(Arc::new(MockAIProvider::new()));
    };

    let provider = AnthropicProvider::new(
        AnthropicConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;
    tracing::info!(model = %config.ai.model, "Anthropic provider configured");
    Ok(Arc::new(provider))
}

fn jwt_config(config: &AuthConfig) -> JwtConfig {
    let mut jwt = JwtConfig::new(config.secret());
    if let Some(issuer) = &config.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }
    if let Some(audience) = &config.audience {
        jwt = jwt.with_audience(audience.clone());
    }
    jwt
}

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Waits for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
