use super::{PolicyRule, MOISTURE_HIGH, MOISTURE_LOW};
use crate::models::{Decision, Reading, ReasonCode};

/// Moisture baseline rule - sets the starting pump state from soil moisture
///
/// Conditions:
/// - moisture < 30%: pump on (MOISTURE_LOW)
/// - moisture > 70%: pump off (MOISTURE_HIGH)
/// - otherwise: pump state unchanged (MOISTURE_NORMAL)
///
/// Always applies, so every decision starts from a moisture reason.
pub struct MoistureBaselineRule;

impl PolicyRule for MoistureBaselineRule {
    fn id(&self) -> &'static str {
        "moisture_baseline"
    }

    fn name(&self) -> &'static str {
        "Moisture Baseline"
    }

    fn apply(&self, reading: &Reading, current: &Decision) -> Option<Decision> {
        let moisture = reading.moisture_percent;

        let decision = if moisture < MOISTURE_LOW {
            Decision::new(true, ReasonCode::MoistureLow)
        } else if moisture > MOISTURE_HIGH {
            Decision::new(false, ReasonCode::MoistureHigh)
        } else {
            Decision::new(current.pump_on, ReasonCode::MoistureNormal)
        };

        Some(decision)
    }
}
