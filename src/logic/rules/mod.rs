pub mod engine;
pub mod moisture;
pub mod nutrients;
pub mod ph;

pub use engine::{PolicyEngine, RuleOutcome};

use crate::models::{Decision, Reading, ReasonCode};
use moisture::MoistureBaselineRule;
use nutrients::{NoNutrientRule, PartialNutrientRule};
use ph::PhBlockRule;

/// Below this moisture percentage the soil counts as dry
pub const MOISTURE_LOW: f64 = 30.0;
/// Above this moisture percentage the soil counts as saturated
pub const MOISTURE_HIGH: f64 = 70.0;
pub const PH_LOW: f64 = 6.0;
pub const PH_HIGH: f64 = 8.0;

/// Trait for irrigation policy rules
pub trait PolicyRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return the decision this rule imposes, or `None` when it does not apply.
    ///
    /// `current` is the outcome of every earlier rule.
    fn apply(&self, reading: &Reading, current: &Decision) -> Option<Decision>;
}

/// Rules in evaluation order. Each applicable rule replaces the previous outcome,
/// so the order is part of the policy:
///
/// 1. moisture baseline
/// 2. pH block (overrides 1)
/// 3. no-nutrient forced irrigation (overrides 1-2)
/// 4. partial-nutrient balancing (overrides 1-3, including the pH block)
///
/// There is no rule for "both nutrients present", so an out-of-range pH keeps the
/// pump off even when the soil is dry.
pub static POLICY_RULES: [&dyn PolicyRule; 4] = [
    &MoistureBaselineRule,
    &PhBlockRule,
    &NoNutrientRule,
    &PartialNutrientRule,
];

/// Starting point before any rule runs. The moisture baseline always applies,
/// so the reason is always replaced.
pub const INITIAL_DECISION: Decision = Decision {
    pump_on: false,
    reason: ReasonCode::MoistureNormal,
};

/// Map one reading to a pump decision.
pub fn evaluate(reading: &Reading) -> Decision {
    PolicyEngine::new().evaluate(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(p: bool, k: bool, ph: f64, moisture: f64) -> Reading {
        Reading::new(p, k, ph, moisture)
    }

    fn assert_decision(r: Reading, pump_on: bool, reason: ReasonCode) {
        let decision = evaluate(&r);
        assert_eq!(
            decision,
            Decision::new(pump_on, reason),
            "unexpected decision for {:?}",
            r
        );
    }

    #[test]
    fn demonstration_scenarios() {
        assert_decision(
            reading(false, false, 7.2, 45.0),
            true,
            ReasonCode::NoNutrientsForceIrrigation,
        );
        assert_decision(
            reading(true, false, 7.0, 25.0),
            true,
            ReasonCode::PartialNutrientBalancing,
        );
        assert_decision(
            reading(false, true, 6.8, 75.0),
            true,
            ReasonCode::PartialNutrientBalancing,
        );
        assert_decision(reading(true, true, 5.5, 40.0), false, ReasonCode::PhTooAcidic);
        assert_decision(reading(true, true, 8.5, 50.0), false, ReasonCode::PhTooAlkaline);
        assert_decision(reading(true, true, 7.0, 55.0), false, ReasonCode::MoistureNormal);
    }

    #[test]
    fn normal_band_with_both_nutrients_keeps_pump_off() {
        for moisture in [30.0, 30.1, 45.0, 69.9, 70.0] {
            for ph in [6.0, 7.0, 8.0] {
                assert_decision(
                    reading(true, true, ph, moisture),
                    false,
                    ReasonCode::MoistureNormal,
                );
            }
        }
    }

    #[test]
    fn moisture_baseline_with_both_nutrients() {
        assert_decision(reading(true, true, 7.0, 29.9), true, ReasonCode::MoistureLow);
        assert_decision(reading(true, true, 6.0, 0.0), true, ReasonCode::MoistureLow);
        assert_decision(reading(true, true, 8.0, 70.1), false, ReasonCode::MoistureHigh);
        assert_decision(reading(true, true, 7.0, 100.0), false, ReasonCode::MoistureHigh);
    }

    #[test]
    fn no_nutrients_always_forces_irrigation() {
        for moisture in [0.0, 29.9, 45.0, 70.1, 100.0] {
            for ph in [0.0, 5.9, 7.0, 8.1, 14.0] {
                assert_decision(
                    reading(false, false, ph, moisture),
                    true,
                    ReasonCode::NoNutrientsForceIrrigation,
                );
            }
        }
    }

    #[test]
    fn partial_nutrients_override_ph_block() {
        for (p, k) in [(true, false), (false, true)] {
            for moisture in [0.0, 45.0, 100.0] {
                for ph in [3.0, 7.0, 11.0] {
                    assert_decision(
                        reading(p, k, ph, moisture),
                        true,
                        ReasonCode::PartialNutrientBalancing,
                    );
                }
            }
        }
    }

    #[test]
    fn ph_block_beats_low_moisture_when_both_nutrients_present() {
        assert_decision(reading(true, true, 5.9, 10.0), false, ReasonCode::PhTooAcidic);
        assert_decision(reading(true, true, 8.1, 10.0), false, ReasonCode::PhTooAlkaline);
    }

    #[test]
    fn ph_thresholds_are_exclusive() {
        assert_decision(reading(true, true, 6.0, 10.0), true, ReasonCode::MoistureLow);
        assert_decision(reading(true, true, 8.0, 10.0), true, ReasonCode::MoistureLow);
    }

    #[test]
    fn out_of_range_values_flow_through() {
        assert_decision(reading(true, true, -1.0, -5.0), false, ReasonCode::PhTooAcidic);
        assert_decision(reading(true, true, 20.0, 150.0), false, ReasonCode::PhTooAlkaline);
        assert_decision(reading(true, true, 7.0, -5.0), true, ReasonCode::MoistureLow);
    }

    #[test]
    fn non_finite_values_fall_into_normal_band() {
        assert_decision(
            reading(true, true, f64::NAN, f64::NAN),
            false,
            ReasonCode::MoistureNormal,
        );
        assert_decision(
            reading(true, true, 7.0, f64::INFINITY),
            false,
            ReasonCode::MoistureHigh,
        );
    }

    #[test]
    fn evaluation_is_pure() {
        let r = reading(true, true, 5.5, 20.0);
        let first = evaluate(&r);
        let second = evaluate(&r);
        assert_eq!(first, second);
    }
}
