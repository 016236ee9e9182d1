use super::decision::Decision;
use super::reading::Reading;
use crate::error::IrrigatorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const RECORD_FIELD_COUNT: usize = 6;

/// Column names matching the record line layout.
pub const RECORD_HEADER: &str = "cycle,phosphorus,potassium,ph,moisture,pump";

/// Machine-parsable summary of one control cycle.
///
/// Line layout: `cycle,phosphorus(0|1),potassium(0|1),pH(2 dp),moisture(1 dp),pump(0|1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub cycle: u64,
    pub phosphorus_present: bool,
    pub potassium_present: bool,
    pub ph: f64,
    pub moisture_percent: f64,
    pub pump_on: bool,
}

impl CycleRecord {
    pub fn new(cycle: u64, reading: &Reading, decision: &Decision) -> Self {
        Self {
            cycle,
            phosphorus_present: reading.phosphorus_present,
            potassium_present: reading.potassium_present,
            ph: reading.ph,
            moisture_percent: reading.moisture_percent,
            pump_on: decision.pump_on,
        }
    }

    pub fn reading(&self) -> Reading {
        Reading::new(
            self.phosphorus_present,
            self.potassium_present,
            self.ph,
            self.moisture_percent,
        )
    }

    /// True when the line's first field is not a cycle number, i.e. a column header.
    pub fn is_header(line: &str) -> bool {
        let first = line.split(',').next().unwrap_or("").trim();
        first.is_empty() || !first.chars().all(|c| c.is_ascii_digit())
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl std::fmt::Display for CycleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{:.2},{:.1},{}",
            self.cycle,
            flag(self.phosphorus_present),
            flag(self.potassium_present),
            self.ph,
            self.moisture_percent,
            flag(self.pump_on)
        )
    }
}

fn parse_flag(field: &str, name: &str) -> Result<bool, IrrigatorError> {
    field
        .parse::<i64>()
        .map(|v| v != 0)
        .map_err(|_| IrrigatorError::InvalidRecord(format!("{} is not an integer: '{}'", name, field)))
}

fn parse_number(field: &str, name: &str) -> Result<f64, IrrigatorError> {
    field
        .parse::<f64>()
        .map_err(|_| IrrigatorError::InvalidRecord(format!("{} is not a number: '{}'", name, field)))
}

fn split_fields(line: &str) -> Result<Vec<&str>, IrrigatorError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < RECORD_FIELD_COUNT {
        return Err(IrrigatorError::InvalidRecord(format!(
            "expected {} fields, found {}",
            RECORD_FIELD_COUNT,
            fields.len()
        )));
    }
    Ok(fields)
}

impl CycleRecord {
    /// Parse a line whose first column is not a cycle counter (e.g. a timestamp).
    /// That column is ignored and `cycle` is used instead.
    pub fn parse_unnumbered(line: &str, cycle: u64) -> Result<Self, IrrigatorError> {
        let fields = split_fields(line)?;
        Self::from_fields(cycle, &fields)
    }

    fn from_fields(cycle: u64, fields: &[&str]) -> Result<Self, IrrigatorError> {
        Ok(Self {
            cycle,
            phosphorus_present: parse_flag(fields[1], "phosphorus")?,
            potassium_present: parse_flag(fields[2], "potassium")?,
            ph: parse_number(fields[3], "ph")?,
            moisture_percent: parse_number(fields[4], "moisture")?,
            pump_on: parse_flag(fields[5], "pump")?,
        })
    }
}

impl FromStr for CycleRecord {
    type Err = IrrigatorError;

    /// Extra trailing fields are ignored; fewer than six is an error.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(line)?;

        let cycle = fields[0].parse::<u64>().map_err(|_| {
            IrrigatorError::InvalidRecord(format!("cycle is not a counter: '{}'", fields[0]))
        })?;

        Self::from_fields(cycle, &fields)
    }
}
