pub mod relay;

pub use relay::RelayActuator;

use crate::error::Result;

/// Electrical level on an output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    High,
    Low,
}

impl PinLevel {
    /// Level that puts a load in the requested state, given the pin's polarity.
    pub fn for_state(on: bool, active_low: bool) -> Self {
        if on != active_low {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PinLevel::High => "HIGH",
            PinLevel::Low => "LOW",
        }
    }
}

impl std::fmt::Display for PinLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single binary output the controller drives.
pub trait PumpActuator {
    fn apply(&mut self, pump_on: bool) -> Result<()>;

    fn is_on(&self) -> bool;
}

impl<A: PumpActuator + ?Sized> PumpActuator for Box<A> {
    fn apply(&mut self, pump_on: bool) -> Result<()> {
        (**self).apply(pump_on)
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_level_follows_polarity() {
        assert_eq!(PinLevel::for_state(true, false), PinLevel::High);
        assert_eq!(PinLevel::for_state(false, false), PinLevel::Low);
        assert_eq!(PinLevel::for_state(true, true), PinLevel::Low);
        assert_eq!(PinLevel::for_state(false, true), PinLevel::High);
    }
}
