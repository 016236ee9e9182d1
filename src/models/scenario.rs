use super::reading::Reading;
use serde::Serialize;

/// A canned field condition used by the demonstration source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub title: &'static str,
    pub reading: Reading,
}

/// The six demonstration cases, in the order the demo source plays them.
pub const DEMO_SCENARIOS: [Scenario; 6] = [
    Scenario {
        title: "NO NUTRIENTS + NORMAL MOISTURE",
        reading: Reading {
            phosphorus_present: false,
            potassium_present: false,
            ph: 7.2,
            moisture_percent: 45.0,
        },
    },
    Scenario {
        title: "PHOSPHORUS ONLY + LOW MOISTURE",
        reading: Reading {
            phosphorus_present: true,
            potassium_present: false,
            ph: 7.0,
            moisture_percent: 25.0,
        },
    },
    Scenario {
        title: "POTASSIUM ONLY + HIGH MOISTURE",
        reading: Reading {
            phosphorus_present: false,
            potassium_present: true,
            ph: 6.8,
            moisture_percent: 75.0,
        },
    },
    Scenario {
        title: "BOTH NUTRIENTS + ACIDIC pH",
        reading: Reading {
            phosphorus_present: true,
            potassium_present: true,
            ph: 5.5,
            moisture_percent: 40.0,
        },
    },
    Scenario {
        title: "BOTH NUTRIENTS + ALKALINE pH",
        reading: Reading {
            phosphorus_present: true,
            potassium_present: true,
            ph: 8.5,
            moisture_percent: 50.0,
        },
    },
    Scenario {
        title: "IDEAL CONDITIONS",
        reading: Reading {
            phosphorus_present: true,
            potassium_present: true,
            ph: 7.0,
            moisture_percent: 55.0,
        },
    },
];

impl Scenario {
    /// Banner text such as `SCENARIO 1/6: IDEAL CONDITIONS`, with a 0-based index.
    pub fn label(&self, index: usize) -> String {
        format!("SCENARIO {}/{}: {}", index + 1, DEMO_SCENARIOS.len(), self.title)
    }
}
