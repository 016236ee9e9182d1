use super::reading::Reading;
use serde::{Deserialize, Serialize};

/// Why the policy settled on its final pump state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    MoistureLow,
    MoistureHigh,
    MoistureNormal,
    PhTooAcidic,
    PhTooAlkaline,
    NoNutrientsForceIrrigation,
    PartialNutrientBalancing,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MoistureLow => "MOISTURE_LOW",
            ReasonCode::MoistureHigh => "MOISTURE_HIGH",
            ReasonCode::MoistureNormal => "MOISTURE_NORMAL",
            ReasonCode::PhTooAcidic => "PH_TOO_ACIDIC",
            ReasonCode::PhTooAlkaline => "PH_TOO_ALKALINE",
            ReasonCode::NoNutrientsForceIrrigation => "NO_NUTRIENTS_FORCE_IRRIGATION",
            ReasonCode::PartialNutrientBalancing => "PARTIAL_NUTRIENT_BALANCING",
        }
    }

    /// Operator-facing explanation, quoting the measured value where one applies.
    pub fn describe(&self, reading: &Reading) -> String {
        match self {
            ReasonCode::MoistureLow => {
                format!("Low moisture ({:.1}%)", reading.moisture_percent)
            }
            ReasonCode::MoistureHigh => {
                format!("High moisture ({:.1}%)", reading.moisture_percent)
            }
            ReasonCode::MoistureNormal => {
                format!("Normal moisture ({:.1}%)", reading.moisture_percent)
            }
            ReasonCode::PhTooAcidic => {
                format!("pH too acidic ({:.1}) - irrigation blocked", reading.ph)
            }
            ReasonCode::PhTooAlkaline => {
                format!("pH too alkaline ({:.1}) - irrigation blocked", reading.ph)
            }
            ReasonCode::NoNutrientsForceIrrigation => {
                "NO NUTRIENTS - irrigation forced to prepare soil".to_string()
            }
            ReasonCode::PartialNutrientBalancing => {
                "Partial nutrients - irrigating for balance".to_string()
            }
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub pump_on: bool,
    pub reason: ReasonCode,
}

impl Decision {
    pub fn new(pump_on: bool, reason: ReasonCode) -> Self {
        Self { pump_on, reason }
    }

    pub fn pump_label(&self) -> &'static str {
        if self.pump_on {
            "ON"
        } else {
            "OFF"
        }
    }
}
