use crate::logic::rules::evaluate;
use crate::models::CycleRecord;
use serde::Serialize;
use tracing::warn;

/// Full-scale count of the 12-bit ADC channels
pub const ADC_MAX: i64 = 4095;

/// Integer linear re-mapping, truncating toward zero like the firmware's `map()`.
pub fn map_range(value: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Convert a raw pH channel count to pH units (0-14, two decimal resolution)
pub fn scale_ph(raw: u16) -> f64 {
    map_range(i64::from(raw), 0, ADC_MAX, 0, 1400) as f64 / 100.0
}

/// Convert a raw moisture channel count to a whole-number percentage
pub fn scale_moisture(raw: u16) -> f64 {
    map_range(i64::from(raw), 0, ADC_MAX, 0, 100) as f64
}

/// Parse a captured record log.
///
/// A header on the first line and blank lines are skipped. Lines whose first column is
/// not a cycle counter are numbered by their position among the records. Malformed
/// lines are logged and counted but do not abort the parse. Returns the records and
/// the invalid line count.
pub fn parse_record_log(content: &str) -> (Vec<CycleRecord>, usize) {
    let mut records = Vec::new();
    let mut invalid = 0;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_no == 0 && CycleRecord::is_header(line) {
            continue;
        }

        // Timestamp-prefixed logs carry no cycle number
        let parsed = if CycleRecord::is_header(line) {
            CycleRecord::parse_unnumbered(line, records.len() as u64 + 1)
        } else {
            line.parse::<CycleRecord>()
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping line {}: {} ({})", line_no + 1, line, e);
                invalid += 1;
            }
        }
    }

    (records, invalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStats {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return None;
        }

        let sum: f64 = values.iter().sum();
        let mean = sum / values.len() as f64;
        Some(Self {
            count: values.len(),
            mean: (mean * 100.0).round() / 100.0,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordLogSummary {
    pub records: usize,
    pub invalid_lines: usize,
    pub phosphorus: Option<FieldStats>,
    pub potassium: Option<FieldStats>,
    pub ph: Option<FieldStats>,
    pub moisture: Option<FieldStats>,
    pub pump: Option<FieldStats>,
    /// Share of cycles with the pump on, 0.0-1.0
    pub pump_on_ratio: Option<f64>,
    /// Records whose pump flag differs from re-evaluating the policy on their reading
    pub policy_mismatches: usize,
}

fn as_number(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

pub fn summarize_records(records: &[CycleRecord], invalid_lines: usize) -> RecordLogSummary {
    let pump = FieldStats::from_values(records.iter().map(|r| as_number(r.pump_on)));
    let pump_on_count = records.iter().filter(|r| r.pump_on).count();

    let policy_mismatches = records
        .iter()
        .filter(|r| evaluate(&r.reading()).pump_on != r.pump_on)
        .count();

    RecordLogSummary {
        records: records.len(),
        invalid_lines,
        phosphorus: FieldStats::from_values(
            records.iter().map(|r| as_number(r.phosphorus_present)),
        ),
        potassium: FieldStats::from_values(records.iter().map(|r| as_number(r.potassium_present))),
        ph: FieldStats::from_values(records.iter().map(|r| r.ph)),
        moisture: FieldStats::from_values(records.iter().map(|r| r.moisture_percent)),
        pump_on_ratio: (!records.is_empty())
            .then(|| pump_on_count as f64 / records.len() as f64),
        pump,
        policy_mismatches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_matches_firmware_truncation() {
        assert_eq!(map_range(0, 0, 4095, 0, 1400), 0);
        assert_eq!(map_range(4095, 0, 4095, 0, 1400), 1400);
        // 2048 * 1400 / 4095 = 700.17...
        assert_eq!(map_range(2048, 0, 4095, 0, 1400), 700);
        assert_eq!(map_range(4094, 0, 4095, 0, 100), 99);
    }

    #[test]
    fn map_range_degenerate_input() {
        assert_eq!(map_range(10, 5, 5, 0, 100), 0);
    }

    #[test]
    fn scale_channels() {
        assert!((scale_ph(0) - 0.0).abs() < f64::EPSILON);
        assert!((scale_ph(4095) - 14.0).abs() < f64::EPSILON);
        assert!((scale_ph(2048) - 7.0).abs() < f64::EPSILON);
        assert!((scale_moisture(1229) - 30.0).abs() < f64::EPSILON);
        assert!((scale_moisture(4095) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_log_skips_header_and_invalid_lines() {
        let log = "cycle,phosphorus,potassium,ph,moisture,pump\n\
                   1,0,0,7.20,45.0,1\n\
                   \n\
                   2,1,0,7.00,25.0,1\n\
                   garbage\n\
                   3,0,1,6.80\n";
        let (records, invalid) = parse_record_log(log);
        assert_eq!(records.len(), 2);
        assert_eq!(invalid, 2);
        assert_eq!(records[1].cycle, 2);
    }

    #[test]
    fn parse_log_without_header_keeps_first_line() {
        let (records, invalid) = parse_record_log("5,1,1,7.00,55.0,0\n6,1,1,8.50,50.0,0");
        assert_eq!(records.len(), 2);
        assert_eq!(invalid, 0);
        assert_eq!(records[0].cycle, 5);
    }

    #[test]
    fn field_stats_basic() {
        let stats = FieldStats::from_values([5.5, 7.0, 8.5]).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 7.0).abs() < 1e-9);
        assert!((stats.min - 5.5).abs() < f64::EPSILON);
        assert!((stats.max - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn field_stats_rounds_mean_and_ignores_non_finite() {
        let stats = FieldStats::from_values([1.0, 2.0, 2.0, f64::NAN]).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 1.67).abs() < 1e-9);
        assert!(FieldStats::from_values(Vec::new()).is_none());
    }

    #[test]
    fn summary_of_demo_cycle() {
        let log = "1,0,0,7.20,45.0,1\n\
                   2,1,0,7.00,25.0,1\n\
                   3,0,1,6.80,75.0,1\n\
                   4,1,1,5.50,40.0,0\n\
                   5,1,1,8.50,50.0,0\n\
                   6,1,1,7.00,55.0,0\n";
        let (records, invalid) = parse_record_log(log);
        let summary = summarize_records(&records, invalid);

        assert_eq!(summary.records, 6);
        assert_eq!(summary.invalid_lines, 0);
        assert_eq!(summary.policy_mismatches, 0);
        assert!((summary.pump_on_ratio.unwrap() - 0.5).abs() < f64::EPSILON);

        let moisture = summary.moisture.unwrap();
        assert!((moisture.min - 25.0).abs() < f64::EPSILON);
        assert!((moisture.max - 75.0).abs() < f64::EPSILON);
        assert!((moisture.mean - 48.33).abs() < 1e-9);
    }

    #[test]
    fn pump_on_ratio_keeps_full_precision() {
        let (records, _) = parse_record_log("1,1,1,7.00,50.0,1\n2,1,1,7.00,50.0,0\n3,1,1,7.00,50.0,0");
        let summary = summarize_records(&records, 0);
        assert!((summary.pump_on_ratio.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        // The per-field mean stays rounded for display
        assert!((summary.pump.unwrap().mean - 0.33).abs() < 1e-9);
    }

    #[test]
    fn parse_log_accepts_timestamp_prefixed_lines() {
        let log = "timestamp,fosforo,potassio,ph,umidade,bomba\n\
                   2024-05-01 10:00:00,0,0,7.20,45.0,1\n\
                   2024-05-01 10:00:03,1,0,7.00,25.0,1\n\
                   2024-05-01 10:00:06,1,1\n";
        let (records, invalid) = parse_record_log(log);
        assert_eq!(records.len(), 2);
        assert_eq!(invalid, 1);
        assert_eq!(records[0].cycle, 1);
        assert_eq!(records[1].cycle, 2);
        assert!(records[1].phosphorus_present);
    }

    #[test]
    fn summary_counts_policy_mismatches() {
        // Both nutrients, dry soil, acidic pH: the policy keeps the pump off.
        let (records, _) = parse_record_log("1,1,1,5.00,10.0,1\n2,1,1,7.00,10.0,1");
        let summary = summarize_records(&records, 0);
        assert_eq!(summary.policy_mismatches, 1);
    }

    #[test]
    fn summary_of_empty_log() {
        let summary = summarize_records(&[], 3);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.invalid_lines, 3);
        assert!(summary.ph.is_none());
        assert!(summary.pump_on_ratio.is_none());
    }
}
