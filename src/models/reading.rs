use serde::{Deserialize, Serialize};

/// One cycle's worth of soil measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub phosphorus_present: bool,
    pub potassium_present: bool,
    pub ph: f64,
    pub moisture_percent: f64,
}

impl Reading {
    pub fn new(
        phosphorus_present: bool,
        potassium_present: bool,
        ph: f64,
        moisture_percent: f64,
    ) -> Self {
        Self {
            phosphorus_present,
            potassium_present,
            ph,
            moisture_percent,
        }
    }

    pub fn nutrients(&self) -> NutrientStatus {
        NutrientStatus::from_flags(self.phosphorus_present, self.potassium_present)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientStatus {
    /// Neither phosphorus nor potassium detected
    None,
    /// Exactly one of the two detected
    Partial,
    /// Both detected
    Complete,
}

impl NutrientStatus {
    pub fn from_flags(phosphorus: bool, potassium: bool) -> Self {
        match (phosphorus, potassium) {
            (false, false) => NutrientStatus::None,
            (true, true) => NutrientStatus::Complete,
            _ => NutrientStatus::Partial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientStatus::None => "None",
            NutrientStatus::Partial => "Partial",
            NutrientStatus::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn presence_label(present: bool) -> &'static str {
    if present {
        "PRESENT"
    } else {
        "ABSENT"
    }
}
