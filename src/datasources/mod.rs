pub mod analog;
pub mod demo;
pub mod fixed;

pub use analog::{AnalogSource, SimulatedAnalogFrontEnd};
pub use demo::DemoScenarioSource;
pub use fixed::FixedSource;

use crate::config::{SensorConfig, SensorMode};
use crate::error::Result;
use crate::models::Reading;
use serde::Serialize;

/// What one acquisition produced: the reading the policy sees, plus display context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acquisition {
    pub reading: Reading,
    /// Banner for the report, e.g. the demonstration scenario title
    pub label: Option<String>,
    /// Raw front-end values shown for reference
    pub analog: Option<AnalogSnapshot>,
}

impl Acquisition {
    pub fn new(reading: Reading) -> Self {
        Self {
            reading,
            label: None,
            analog: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalogSnapshot {
    pub ph_raw: u16,
    pub moisture_raw: u16,
    pub ph: f64,
    pub moisture_percent: f64,
    pub backup_humidity: Option<f64>,
}

/// Supplies one reading per control cycle.
pub trait ReadingSource {
    fn name(&self) -> &'static str;

    fn next_reading(&mut self) -> Result<Acquisition>;
}

/// Build the source selected in configuration.
pub fn from_config(config: &SensorConfig) -> Box<dyn ReadingSource + Send> {
    let front_end = SimulatedAnalogFrontEnd::from_config(&config.analog);

    match config.mode {
        SensorMode::Demo => Box::new(DemoScenarioSource::new().with_front_end(front_end)),
        SensorMode::Fixed => {
            Box::new(FixedSource::new(config.fixed.to_reading()).with_front_end(front_end))
        }
        SensorMode::Analog => Box::new(AnalogSource::new(
            front_end,
            config.fixed.phosphorus_present,
            config.fixed.potassium_present,
        )),
    }
}

impl<S: ReadingSource + ?Sized> ReadingSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn next_reading(&mut self) -> Result<Acquisition> {
        (**self).next_reading()
    }
}
