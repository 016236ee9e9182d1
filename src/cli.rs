use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "irrigator",
    version,
    about = "Soil nutrient, pH and moisture driven irrigation controller"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the control loop (default)
    Run(RunArgs),
    /// Evaluate the policy for a single reading
    Evaluate(EvaluateArgs),
    /// Evaluate and print the six demonstration scenarios
    Scenarios,
    /// Summarize a captured record log
    Summary {
        /// File containing one record line per cycle
        file: PathBuf,
    },
    /// Interactive setup; writes a config file
    Init,
    /// Validate config and print the effective settings
    Check,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Stop after this many completed cycles
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Override the cycle period in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Phosphorus detected
    #[arg(long)]
    pub phosphorus: bool,

    /// Potassium detected
    #[arg(long)]
    pub potassium: bool,

    /// Soil pH
    #[arg(long, allow_negative_numbers = true)]
    pub ph: f64,

    /// Soil moisture percentage
    #[arg(long, allow_negative_numbers = true)]
    pub moisture: f64,

    /// Show every rule that applied
    #[arg(long)]
    pub explain: bool,

    /// Print the reading and decision as JSON
    #[arg(long, conflicts_with = "explain")]
    pub json: bool,
}
