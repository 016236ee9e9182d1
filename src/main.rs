mod actuators;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use actuators::RelayActuator;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands, EvaluateArgs, RunArgs};
use config::Config;
use datasources::Acquisition;
use error::{IrrigatorError, Result};
use logic::calculations::{parse_record_log, summarize_records};
use logic::{Controller, PolicyEngine};
use models::{Reading, DEMO_SCENARIOS};
use report::Reporter;
use serde::Serialize;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; stdout carries the reports, so logs go to stderr
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Init) = cli.command {
        Config::setup_interactive(cli.config)?;
        return Ok(());
    }

    let config = Config::load(cli.config)?;

    match cli.command {
        None => run_controller(config, RunArgs::default()).await,
        Some(Commands::Run(args)) => run_controller(config, args).await,
        Some(Commands::Evaluate(args)) => evaluate_reading(args),
        Some(Commands::Scenarios) => print_scenarios(),
        Some(Commands::Summary { file }) => summarize_log(&file),
        Some(Commands::Check) => check_config(&config),
        Some(Commands::Init) => Ok(()),
    }
}

async fn run_controller(config: Config, args: RunArgs) -> Result<()> {
    let interval_ms = args.interval_ms.unwrap_or(config.controller.interval_ms);
    if interval_ms == 0 {
        return Err(IrrigatorError::Config(
            "--interval-ms must be greater than zero".into(),
        ));
    }
    let max_cycles = args.cycles.or(config.controller.max_cycles);

    let source = datasources::from_config(&config.sensors);
    let actuator = RelayActuator::new(&config.relay)?;

    println!("=== Irrigation controller ===");
    println!(
        "Source: {} | period: {} ms | relay pin {} (idle {})",
        config.sensors.mode,
        interval_ms,
        config.relay.pin,
        actuator.relay_level()
    );
    if let Some(level) = actuator.indicator_level() {
        tracing::debug!("Indicator idle level {}", level);
    }
    println!();

    let mut controller = Controller::new(source, actuator, io::stdout());
    let completed = controller
        .run(Duration::from_millis(interval_ms), max_cycles)
        .await?;

    tracing::info!("Completed {} cycles", completed);
    Ok(())
}

#[derive(Serialize)]
struct EvaluationOutput {
    reading: Reading,
    decision: models::Decision,
}

fn evaluate_reading(args: EvaluateArgs) -> Result<()> {
    let reading = Reading::new(args.phosphorus, args.potassium, args.ph, args.moisture);
    let engine = PolicyEngine::new();
    let decision = engine.evaluate(&reading);

    if args.json {
        let output = EvaluationOutput { reading, decision };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut reporter = Reporter::new(io::stdout());
    reporter.write_analysis(&reading, &decision)?;
    if args.explain {
        reporter.write_trace(&reading, &engine.trace(&reading))?;
    }
    Ok(())
}

fn print_scenarios() -> Result<()> {
    let engine = PolicyEngine::new();
    let mut reporter = Reporter::new(io::stdout());

    for (index, scenario) in DEMO_SCENARIOS.iter().enumerate() {
        let acquisition = Acquisition {
            reading: scenario.reading,
            label: Some(scenario.label(index)),
            analog: None,
        };
        let decision = engine.evaluate(&scenario.reading);
        reporter.write_cycle(index as u64 + 1, &acquisition, &decision)?;
    }
    Ok(())
}

fn summarize_log(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let (records, invalid) = parse_record_log(&content);
    let summary = summarize_records(&records, invalid);

    if summary.policy_mismatches > 0 {
        tracing::warn!(
            "{} records disagree with the current policy",
            summary.policy_mismatches
        );
    }

    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    Reporter::new(io::stdout()).write_summary(&path.display().to_string(), &summary)
}

fn check_config(config: &Config) -> Result<()> {
    config.validate()?;
    // Fail here rather than at the first cycle
    RelayActuator::new(&config.relay)?;

    let yaml = serde_yaml::to_string(config)
        .map_err(|e| IrrigatorError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("Configuration OK");
    println!();
    print!("{}", yaml);
    println!();
    println!("Policy rules (evaluation order):");
    for (step, (id, name)) in PolicyEngine::new().list_rules().into_iter().enumerate() {
        println!("  {}. {} ({})", step + 1, name, id);
    }
    Ok(())
}
