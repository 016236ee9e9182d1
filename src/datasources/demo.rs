use super::{Acquisition, ReadingSource, SimulatedAnalogFrontEnd};
use crate::error::Result;
use crate::models::DEMO_SCENARIOS;

/// Plays the six demonstration scenarios in order, wrapping around after the last.
pub struct DemoScenarioSource {
    next_index: usize,
    front_end: Option<SimulatedAnalogFrontEnd>,
}

impl DemoScenarioSource {
    pub fn new() -> Self {
        Self {
            next_index: 0,
            front_end: None,
        }
    }

    /// Attach analog channels whose values are reported alongside each scenario.
    pub fn with_front_end(mut self, front_end: SimulatedAnalogFrontEnd) -> Self {
        self.front_end = Some(front_end);
        self
    }
}

impl Default for DemoScenarioSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSource for DemoScenarioSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn next_reading(&mut self) -> Result<Acquisition> {
        let index = self.next_index;
        let scenario = DEMO_SCENARIOS[index];

        let analog = self
            .front_end
            .as_ref()
            .and_then(SimulatedAnalogFrontEnd::reference_sample);

        self.next_index = (index + 1) % DEMO_SCENARIOS.len();

        Ok(Acquisition {
            reading: scenario.reading,
            label: Some(scenario.label(index)),
            analog,
        })
    }
}
