use super::{Acquisition, AnalogSnapshot, ReadingSource};
use crate::config::AnalogConfig;
use crate::error::{IrrigatorError, Result};
use crate::logic::calculations::{scale_moisture, scale_ph, ADC_MAX};
use crate::models::Reading;
use tracing::warn;

/// Stand-in for the ADC channels: a pH probe and a soil moisture probe, plus an
/// optional backup humidity sensor.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnalogFrontEnd {
    ph_raw: u16,
    moisture_raw: u16,
    backup_humidity: Option<f64>,
}

impl SimulatedAnalogFrontEnd {
    pub fn new(ph_raw: u16, moisture_raw: u16) -> Self {
        Self {
            ph_raw,
            moisture_raw,
            backup_humidity: None,
        }
    }

    pub fn from_config(config: &AnalogConfig) -> Self {
        Self::new(config.ph_raw, config.moisture_raw).with_backup_humidity(config.backup_humidity)
    }

    pub fn with_backup_humidity(mut self, humidity: Option<f64>) -> Self {
        self.backup_humidity = humidity;
        self
    }

    pub fn sample(&self) -> Result<AnalogSnapshot> {
        check_channel("pH", self.ph_raw)?;
        check_channel("moisture", self.moisture_raw)?;

        Ok(AnalogSnapshot {
            ph_raw: self.ph_raw,
            moisture_raw: self.moisture_raw,
            ph: scale_ph(self.ph_raw),
            moisture_percent: scale_moisture(self.moisture_raw),
            backup_humidity: self.read_backup_humidity(),
        })
    }

    /// Sample for display only. A bad channel drops the snapshot instead of the cycle.
    pub fn reference_sample(&self) -> Option<AnalogSnapshot> {
        match self.sample() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Analog reference unavailable: {}", e);
                None
            }
        }
    }

    /// A missing or NaN backup reading is dropped without error.
    fn read_backup_humidity(&self) -> Option<f64> {
        match self.backup_humidity {
            Some(h) if !h.is_nan() => Some(h),
            _ => {
                tracing::debug!("Backup humidity unavailable, skipping");
                None
            }
        }
    }
}

fn check_channel(channel: &str, raw: u16) -> Result<()> {
    if i64::from(raw) > ADC_MAX {
        return Err(IrrigatorError::Sensor(format!(
            "{} channel count {} exceeds ADC range 0-{}",
            channel, raw, ADC_MAX
        )));
    }
    Ok(())
}

/// Drives the policy from the scaled analog channels. Nutrient presence has no
/// analog channel and comes from configuration.
pub struct AnalogSource {
    front_end: SimulatedAnalogFrontEnd,
    phosphorus_present: bool,
    potassium_present: bool,
}

impl AnalogSource {
    pub fn new(
        front_end: SimulatedAnalogFrontEnd,
        phosphorus_present: bool,
        potassium_present: bool,
    ) -> Self {
        Self {
            front_end,
            phosphorus_present,
            potassium_present,
        }
    }
}

impl ReadingSource for AnalogSource {
    fn name(&self) -> &'static str {
        "analog"
    }

    fn next_reading(&mut self) -> Result<Acquisition> {
        let snapshot = self.front_end.sample()?;
        let reading = Reading::new(
            self.phosphorus_present,
            self.potassium_present,
            snapshot.ph,
            snapshot.moisture_percent,
        );

        Ok(Acquisition {
            reading,
            label: None,
            analog: Some(snapshot),
        })
    }
}
