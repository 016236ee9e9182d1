use super::{Acquisition, ReadingSource, SimulatedAnalogFrontEnd};
use crate::error::Result;
use crate::models::Reading;

/// Returns the same reading every cycle.
pub struct FixedSource {
    reading: Reading,
    front_end: Option<SimulatedAnalogFrontEnd>,
}

impl FixedSource {
    pub fn new(reading: Reading) -> Self {
        Self {
            reading,
            front_end: None,
        }
    }

    pub fn with_front_end(mut self, front_end: SimulatedAnalogFrontEnd) -> Self {
        self.front_end = Some(front_end);
        self
    }
}

impl ReadingSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn next_reading(&mut self) -> Result<Acquisition> {
        let mut acquisition = Acquisition::new(self.reading);
        acquisition.analog = self
            .front_end
            .as_ref()
            .and_then(SimulatedAnalogFrontEnd::reference_sample);
        Ok(acquisition)
    }
}
