use super::feedback::Assessment;
use super::parser::clamp_score;
use crate::domain::hints::{calculate_hint_penalty, hint_usage_summary};
use crate::domain::session::Difficulty;

/// Applies the hint penalty to the overall score.
///
/// The adjusted score is `round(overall - penalty)`, never below 1. When
/// hints were used, a hint-usage line is appended to the development areas
/// so the effect is visible even if rounding leaves the score unchanged.
pub fn apply_hint_penalty(
    assessment: &mut Assessment,
    hints_used: u32,
    hints_enabled: bool,
    difficulty: Difficulty,
) {
    let penalty = calculate_hint_penalty(hints_used, difficulty);
    assessment.overall_score = clamp_score((f64::from(assessment.overall_score) - penalty).round());

    if hints_used > 0 {
        assessment
            .development_areas
            .push(hint_usage_summary(hints_used, hints_enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_overall(score: u8) -> Assessment {
        let mut assessment = Assessment::fallback();
        assessment.overall_score = score;
        assessment.development_areas.clear();
        assessment
    }

    #[test]
    fn no_hints_leaves_everything_untouched() {
        let mut assessment = with_overall(4);
        apply_hint_penalty(&mut assessment, 0, true, Difficulty::Advanced);
        assert_eq!(assessment.overall_score, 4);
        assert!(assessment.development_areas.is_empty());
    }

    #[test]
    fn small_penalty_rounds_back_but_is_noted() {
        let mut assessment = with_overall(4);
        apply_hint_penalty(&mut assessment, 2, true, Difficulty::Basic);
        assert_eq!(assessment.overall_score, 4);
        assert_eq!(assessment.development_areas.len(), 1);
        assert!(assessment.development_areas[0].contains("2 hint(s)"));
    }

    #[test]
    fn full_penalty_drops_one_point() {
        let mut assessment = with_overall(4);
        apply_hint_penalty(&mut assessment, 10, true, Difficulty::Medium);
        assert_eq!(assessment.overall_score, 3);
    }

    #[test]
    fn never_below_one() {
        let mut assessment = with_overall(1);
        apply_hint_penalty(&mut assessment, 50, true, Difficulty::Advanced);
        assert_eq!(assessment.overall_score, 1);
    }

    #[test]
    fn half_point_rounds_up() {
        // 4 - 0.45 = 3.55 rounds to 4; 4 - 0.6 = 3.4 rounds to 3
        let mut a = with_overall(4);
        apply_hint_penalty(&mut a, 3, true, Difficulty::Advanced);
        assert_eq!(a.overall_score, 4);

        let mut b = with_overall(4);
        apply_hint_penalty(&mut b, 4, true, Difficulty::Advanced);
        assert_eq!(b.overall_score, 3);
    }
}
