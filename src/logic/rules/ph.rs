use super::{PolicyRule, PH_HIGH, PH_LOW};
use crate::models::{Decision, Reading, ReasonCode};

/// pH block rule - stops irrigation when soil pH leaves the 6.0-8.0 band
///
/// Conditions:
/// - pH < 6.0: pump off (PH_TOO_ACIDIC)
/// - pH > 8.0: pump off (PH_TOO_ALKALINE)
///
/// Overrides the moisture baseline, including a dry-soil request.
pub struct PhBlockRule;

impl PolicyRule for PhBlockRule {
    fn id(&self) -> &'static str {
        "ph_block"
    }

    fn name(&self) -> &'static str {
        "pH Block"
    }

    fn apply(&self, reading: &Reading, _current: &Decision) -> Option<Decision> {
        if reading.ph < PH_LOW {
            Some(Decision::new(false, ReasonCode::PhTooAcidic))
        } else if reading.ph > PH_HIGH {
            Some(Decision::new(false, ReasonCode::PhTooAlkaline))
        } else {
            None
        }
    }
}
