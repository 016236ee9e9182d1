use crate::actuators::PumpActuator;
use crate::datasources::ReadingSource;
use crate::error::Result;
use crate::logic::rules::PolicyEngine;
use crate::models::CycleRecord;
use crate::report::Reporter;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Acquire, evaluate, actuate, report - once per cycle.
pub struct Controller<S, A, W>
where
    S: ReadingSource,
    A: PumpActuator,
    W: Write,
{
    source: S,
    actuator: A,
    reporter: Reporter<W>,
    engine: PolicyEngine,
    completed: u64,
    started_at: DateTime<Utc>,
}

impl<S, A, W> Controller<S, A, W>
where
    S: ReadingSource,
    A: PumpActuator,
    W: Write,
{
    pub fn new(source: S, actuator: A, out: W) -> Self {
        Self {
            source,
            actuator,
            reporter: Reporter::new(out),
            engine: PolicyEngine::new(),
            completed: 0,
            started_at: Utc::now(),
        }
    }

    /// Run one cycle. Returns `None` when the source had no reading; the cycle
    /// counter only advances for completed cycles.
    pub fn run_cycle(&mut self) -> Result<Option<CycleRecord>> {
        let acquisition = match self.source.next_reading() {
            Ok(a) => a,
            Err(e) => {
                warn!("Reading from {} source failed, skipping cycle: {}", self.source.name(), e);
                return Ok(None);
            }
        };

        let cycle = self.completed + 1;
        let decision = self.engine.evaluate(&acquisition.reading);

        self.actuator.apply(decision.pump_on)?;
        let record = self.reporter.write_cycle(cycle, &acquisition, &decision)?;
        self.completed = cycle;

        info!(
            cycle,
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            nutrients = %acquisition.reading.nutrients(),
            pump_on = decision.pump_on,
            reason = %decision.reason,
            "Cycle complete"
        );

        Ok(Some(record))
    }

    /// Run cycles every `period` until `max_cycles` complete or Ctrl-C arrives.
    ///
    /// The first cycle fires one full period after start. The pump is switched off
    /// before returning, on success and on error. Returns the completed cycle count.
    pub async fn run(&mut self, period: Duration, max_cycles: Option<u64>) -> Result<u64> {
        info!(
            "Controller starting: source={}, period={}ms, max_cycles={:?}",
            self.source.name(),
            period.as_millis(),
            max_cycles
        );

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut outcome = self.reporter.write_record_header();
        if outcome.is_ok() {
            outcome = loop {
                if max_cycles.is_some_and(|max| self.completed >= max) {
                    break Ok(());
                }

                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cycle() {
                            break Err(e);
                        }
                    }
                    _ = &mut shutdown => {
                        info!("Interrupt received, stopping controller");
                        break Ok(());
                    }
                }
            };
        }

        let stopped = self.actuator.apply(false);

        let uptime = Utc::now() - self.started_at;
        info!(
            "Controller stopped after {} cycles ({}s)",
            self.completed,
            uptime.num_seconds()
        );

        outcome?;
        stopped?;
        debug!(pump_on = self.actuator.is_on(), "Pump switched off on shutdown");
        Ok(self.completed)
    }
}
