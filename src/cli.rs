use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "irrigo", version, about = "Greenhouse irrigation fuzzy controller")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override session log directory
    #[arg(short, long)]
    pub log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one set of readings and print the result
    Eval {
        /// Soil moisture in percent (0-100)
        soil_moisture: f64,
        /// Ambient temperature in °C (0-40)
        temperature: f64,
        /// Solar radiation in W/m² (0-1000)
        radiation: f64,
        /// Print per-term degrees and rule strengths
        #[arg(long)]
        diagnostics: bool,
    },
    /// Run the predefined sample scenarios
    Cases,
    /// Run the extreme boundary scenarios
    Extremes,
    /// Print variables, universes and the rule table
    Info,
    /// Open the membership/simulation chart viewer
    Chart {
        /// Readings to overlay on the simulation view
        #[arg(num_args = 3, value_names = ["SOIL", "TEMP", "RAD"])]
        inputs: Option<Vec<f64>>,
    },
}
