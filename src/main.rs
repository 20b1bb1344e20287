use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

use nuget_version::cli::{RangeReport, VersionReport};
use nuget_version::config::{self, ParserConfig};
use nuget_version::logging;
use nuget_version::version::comparer::{VersionComparison, sort_versions};
use nuget_version::{NuGetVersion, VersionParser};

#[derive(Parser)]
#[command(name = "nuget-version")]
#[command(version, about = "NuGet version parsing and range matching")]
struct Cli {
    /// Parser configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to a file (defaults to the data directory)
    #[arg(long, global = true, num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse versions and describe them
    Parse {
        #[arg(required = true)]
        versions: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Parse a version range and describe it
    Range {
        range: String,
        #[arg(long)]
        json: bool,
    },
    /// Check whether a version satisfies a range
    Satisfies { range: String, version: String },
    /// Pick the best matching version for a range
    BestMatch {
        range: String,
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Approximate overlap test between two ranges
    Overlaps { range: String, other: String },
    /// Sort versions in ascending order
    Sort {
        #[arg(required = true)]
        versions: Vec<String>,
        #[arg(long, value_enum, default_value_t = SortMode::Release)]
        mode: SortMode,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortMode {
    /// Numeric segments only
    Version,
    /// Numeric segments and release labels
    Release,
    /// Numeric segments, release labels and metadata
    Metadata,
}

impl From<SortMode> for VersionComparison {
    fn from(mode: SortMode) -> Self {
        match mode {
            SortMode::Version => VersionComparison::Version,
            SortMode::Release => VersionComparison::VersionRelease,
            SortMode::Metadata => VersionComparison::VersionReleaseMetadata,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _guard = match &cli.log_file {
        Some(path) => {
            let path = path.clone().unwrap_or_else(config::log_path);
            Some(logging::init_file(&path)?)
        }
        None => {
            logging::init_stderr()?;
            None
        }
    };

    let config = load_config(cli.config.as_deref())?;
    debug!("Using parser config {:?}", config);
    let parser = VersionParser::from_config(&config);

    run(&parser, cli.command)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ParserConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = config::config_path();
            if !default.exists() {
                return Ok(ParserConfig::default());
            }
            default
        }
    };

    ParserConfig::from_file(&path).with_context(|| format!("loading config {}", path.display()))
}

fn parse_all(parser: &VersionParser, inputs: &[String]) -> anyhow::Result<Vec<NuGetVersion>> {
    inputs
        .iter()
        .map(|input| {
            parser
                .parse(input)
                .with_context(|| format!("invalid version '{input}'"))
        })
        .collect()
}

fn run(parser: &VersionParser, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Parse { versions, json } => {
            let parsed = parse_all(parser, &versions)?;
            let reports: Vec<VersionReport> = versions
                .iter()
                .zip(&parsed)
                .map(|(input, version)| VersionReport::new(input, version))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in reports {
                    println!("{report}");
                }
            }
        }
        Command::Range { range, json } => {
            let parsed = parser.parse_range(&range)?;
            let report = RangeReport::new(&range, &parsed);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Command::Satisfies { range, version } => {
            let range = parser.parse_range(&range)?;
            let version = parser.parse(&version)?;
            let satisfied = range.satisfies(&version);

            println!("{satisfied}");
            if !satisfied {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::BestMatch { range, versions } => {
            let range = parser.parse_range(&range)?;
            let candidates: Vec<NuGetVersion> = versions
                .iter()
                .filter_map(|input| {
                    let parsed = parser.try_parse(input);
                    if parsed.is_none() {
                        warn!("Skipping invalid version '{}'", input);
                    }
                    parsed
                })
                .collect();

            match range.find_best_match(&candidates) {
                Some(best) => println!("{best}"),
                None => {
                    eprintln!("No version satisfies {range}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Overlaps { range, other } => {
            let range = parser.parse_range(&range)?;
            let other = parser.parse_range(&other)?;
            println!("{}", range.does_range_satisfy(&other));
        }
        Command::Sort { versions, mode } => {
            let mut parsed = parse_all(parser, &versions)?;
            sort_versions(&mut parsed, mode.into());
            for version in parsed {
                println!("{version}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
