use super::{PinLevel, PumpActuator};
use crate::config::RelayConfig;
use crate::error::{IrrigatorError, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
struct OutputPin {
    number: u8,
    active_low: bool,
    level: PinLevel,
}

impl OutputPin {
    fn new(number: u8, active_low: bool) -> Self {
        Self {
            number,
            active_low,
            level: PinLevel::for_state(false, active_low),
        }
    }

    fn drive(&mut self, on: bool) {
        self.level = PinLevel::for_state(on, self.active_low);
    }
}

/// Pump relay with an optional indicator LED that mirrors it.
///
/// Both outputs start in the OFF state for their polarity. Pin writes are
/// simulated; the resulting levels are logged.
pub struct RelayActuator {
    relay: OutputPin,
    indicator: Option<OutputPin>,
    on: bool,
}

impl RelayActuator {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        if let Some(indicator_pin) = config.indicator_pin {
            if indicator_pin == config.pin && config.indicator_active_low != config.active_low {
                return Err(IrrigatorError::Actuator(format!(
                    "pin {} is shared by relay and indicator with opposite polarity",
                    config.pin
                )));
            }
        }

        let relay = OutputPin::new(config.pin, config.active_low);
        let indicator = config
            .indicator_pin
            .map(|pin| OutputPin::new(pin, config.indicator_active_low));

        debug!(
            "Relay on pin {} initialised {} (active_low={})",
            relay.number, relay.level, relay.active_low
        );

        Ok(Self {
            relay,
            indicator,
            on: false,
        })
    }

    pub fn relay_level(&self) -> PinLevel {
        self.relay.level
    }

    pub fn indicator_level(&self) -> Option<PinLevel> {
        self.indicator.map(|p| p.level)
    }
}

impl PumpActuator for RelayActuator {
    fn apply(&mut self, pump_on: bool) -> Result<()> {
        self.relay.drive(pump_on);
        if let Some(ref mut indicator) = self.indicator {
            indicator.drive(pump_on);
        }

        if pump_on != self.on {
            info!(
                "Pump {} (relay pin {} -> {})",
                if pump_on { "ON" } else { "OFF" },
                self.relay.number,
                self.relay.level
            );
        } else {
            debug!("Pump unchanged ({})", if pump_on { "ON" } else { "OFF" });
        }

        self.on = pump_on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
