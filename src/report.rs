use crate::datasources::Acquisition;
use crate::error::Result;
use crate::logic::calculations::{FieldStats, RecordLogSummary};
use crate::logic::rules::RuleOutcome;
use crate::models::{presence_label, CycleRecord, Decision, Reading, RECORD_HEADER};
use std::io::Write;

const ANALYSIS_HEADER: &str = "=== SENSOR ANALYSIS ===";
const ANALYSIS_FOOTER: &str = "=======================";

/// Writes the per-cycle operator report and record line.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Column names for the record lines that follow.
    pub fn write_record_header(&mut self) -> Result<()> {
        writeln!(self.out, "{}", RECORD_HEADER)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Full cycle output: banner, analog reference, analysis block, record line, separator.
    pub fn write_cycle(
        &mut self,
        cycle: u64,
        acquisition: &Acquisition,
        decision: &Decision,
    ) -> Result<CycleRecord> {
        if let Some(ref label) = acquisition.label {
            writeln!(self.out, ">>> {}", label)?;
        }

        if let Some(analog) = acquisition.analog {
            writeln!(
                self.out,
                "Analog reference - pH: {:.1} | moisture: {:.1}%",
                analog.ph, analog.moisture_percent
            )?;
            if let Some(humidity) = analog.backup_humidity {
                writeln!(self.out, "Backup humidity: {:.1}%", humidity)?;
            }
        }

        self.write_analysis(&acquisition.reading, decision)?;

        let record = CycleRecord::new(cycle, &acquisition.reading, decision);
        writeln!(self.out, "{}", record)?;
        writeln!(self.out)?;
        self.out.flush()?;

        Ok(record)
    }

    pub fn write_analysis(&mut self, reading: &Reading, decision: &Decision) -> Result<()> {
        writeln!(self.out, "{}", ANALYSIS_HEADER)?;
        writeln!(
            self.out,
            "Phosphorus: {}",
            presence_label(reading.phosphorus_present)
        )?;
        writeln!(
            self.out,
            "Potassium: {}",
            presence_label(reading.potassium_present)
        )?;
        writeln!(self.out, "pH: {:.2}", reading.ph)?;
        writeln!(self.out, "Moisture: {:.1}%", reading.moisture_percent)?;
        writeln!(self.out, "PUMP: {}", decision.pump_label())?;
        writeln!(self.out, "Reason: {}", decision.reason.describe(reading))?;
        writeln!(self.out, "{}", ANALYSIS_FOOTER)?;
        Ok(())
    }

    /// Rule-by-rule account of how a decision was reached.
    pub fn write_trace(&mut self, reading: &Reading, trace: &[RuleOutcome]) -> Result<()> {
        writeln!(self.out, "Rule trace:")?;
        for (step, outcome) in trace.iter().enumerate() {
            writeln!(
                self.out,
                "  {}. {:<18} -> pump {:<3} {}",
                step + 1,
                outcome.rule_name,
                outcome.decision.pump_label(),
                outcome.decision.reason.describe(reading)
            )?;
        }
        Ok(())
    }

    pub fn write_summary(&mut self, source: &str, summary: &RecordLogSummary) -> Result<()> {
        writeln!(self.out, "Record log: {}", source)?;
        writeln!(
            self.out,
            "Records: {} (invalid lines skipped: {})",
            summary.records, summary.invalid_lines
        )?;

        let fields = [
            ("Phosphorus", &summary.phosphorus),
            ("Potassium", &summary.potassium),
            ("pH", &summary.ph),
            ("Moisture", &summary.moisture),
            ("Pump", &summary.pump),
        ];
        for (name, stats) in fields {
            match stats {
                Some(FieldStats {
                    count,
                    mean,
                    min,
                    max,
                }) => writeln!(
                    self.out,
                    "  {:<10} n={:<5} mean={:<8.2} min={:<8.2} max={:.2}",
                    name, count, mean, min, max
                )?,
                None => writeln!(self.out, "  {:<10} no data", name)?,
            }
        }

        if let Some(ratio) = summary.pump_on_ratio {
            writeln!(self.out, "Pump on: {:.1}% of cycles", ratio * 100.0)?;
        }
        writeln!(
            self.out,
            "Policy mismatches: {}",
            summary.policy_mismatches
        )?;
        self.out.flush()?;
        Ok(())
    }
}
