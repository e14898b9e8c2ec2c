//! Command-line interface handling for the reward host.
//!
//! Argument parsing uses the `clap` crate; CLI options override settings
//! from the configuration file.

use clap::{Arg, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Number of barrel destructions to feed per actor in the demo script
    pub barrels: u32,
}

impl CliArgs {
    /// Parses command line arguments using clap.
    pub fn parse() -> Self {
        let matches = Command::new("Reward Host")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Runs the salvage rewards plugin against a scripted event feed")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("rewards.toml"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("barrels")
                    .short('n')
                    .long("barrels")
                    .value_name("COUNT")
                    .help("Barrel destructions to feed per actor")
                    .default_value("6")
                    .value_parser(clap::value_parser!(u32)),
            )
            .get_matches();

        Self {
            config_path: PathBuf::from(
                matches
                    .get_one::<String>("config")
                    .expect("Default config path should always be set"),
            ),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            barrels: *matches
                .get_one::<u32>("barrels")
                .expect("Default barrel count should always be set"),
        }
    }
}
