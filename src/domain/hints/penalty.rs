//! Hint penalty and hint-usage narrative.

use crate::domain::session::Difficulty;

/// Upper bound of the penalty: at most one point off the overall score.
pub const MAX_HINT_PENALTY: f64 = 1.0;

fn per_hint_rate(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Basic => 0.05,
        Difficulty::Medium => 0.10,
        Difficulty::Advanced => 0.15,
    }
}

/// `min(hints_used * rate(difficulty), 1.0)`, always within `[0, 1]`.
pub fn calculate_hint_penalty(hints_used: u32, difficulty: Difficulty) -> f64 {
    (f64::from(hints_used) * per_hint_rate(difficulty)).min(MAX_HINT_PENALTY)
}

/// Narrative line about hint usage. Display only, never used for scoring.
pub fn hint_usage_summary(hints_used: u32, hints_enabled: bool) -> String {
    if !hints_enabled {
        return "Du genomförde revisionen utan aktiverat hints-stöd - imponerande självständighet!"
            .to_string();
    }
    match hints_used {
        0 => "Du genomförde revisionen utan att använda några hints - utmärkt!".to_string(),
        1..=2 => format!(
            "Du använde {hints_used} hint(s) under sessionen. Försök nästa gång att klara dig med färre."
        ),
        3..=5 => format!(
            "Du använde {hints_used} hints under sessionen. Detta påverkade ditt betyg något. \
             Öva på att ställa mer utforskande frågor."
        ),
        _ => format!(
            "Du använde {hints_used} hints under sessionen. För att utvecklas som revisor, \
             försök nästa gång med färre hints eller stäng av dem helt."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Basic, Difficulty::Medium, Difficulty::Advanced];

    #[test]
    fn zero_hints_costs_nothing() {
        for difficulty in DIFFICULTIES {
            assert_eq!(calculate_hint_penalty(0, difficulty), 0.0);
        }
    }

    #[test]
    fn one_basic_hint_is_five_hundredths() {
        assert!((calculate_hint_penalty(1, Difficulty::Basic) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn ten_medium_hints_hit_the_cap() {
        assert!((calculate_hint_penalty(10, Difficulty::Medium) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn many_hints_are_capped() {
        assert_eq!(calculate_hint_penalty(1_000, Difficulty::Advanced), MAX_HINT_PENALTY);
    }

    #[test]
    fn summary_tiers_have_distinct_wording() {
        let tiers = [
            hint_usage_summary(4, false),
            hint_usage_summary(0, true),
            hint_usage_summary(2, true),
            hint_usage_summary(5, true),
            hint_usage_summary(6, true),
        ];
        assert!(tiers[0].contains("utan aktiverat hints-stöd"));
        assert!(tiers[1].contains("utmärkt"));
        assert!(tiers[2].contains("2 hint(s)"));
        assert!(tiers[3].contains("påverkade ditt betyg något"));
        assert!(tiers[4].contains("stäng av dem helt"));
        for (i, a) in tiers.iter().enumerate() {
            for b in tiers.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Basic),
            Just(Difficulty::Medium),
            Just(Difficulty::Advanced),
        ]
    }

    proptest! {
        #[test]
        fn penalty_is_bounded(hints in 0u32..10_000, difficulty in any_difficulty()) {
            let penalty = calculate_hint_penalty(hints, difficulty);
            prop_assert!((0.0..=1.0).contains(&penalty));
        }

        #[test]
        fn penalty_is_non_decreasing(hints in 0u32..10_000, difficulty in any_difficulty()) {
            prop_assert!(
                calculate_hint_penalty(hints, difficulty)
                    <= calculate_hint_penalty(hints + 1, difficulty)
            );
        }

        #[test]
        fn harder_levels_never_cost_less(hints in 0u32..100) {
            let basic = calculate_hint_penalty(hints, Difficulty::Basic);
            let medium = calculate_hint_penalty(hints, Difficulty::Medium);
            let advanced = calculate_hint_penalty(hints, Difficulty::Advanced);
            prop_assert!(basic <= medium && medium <= advanced);
        }
    }
}
