use cache_spec::CacheSpec;
use cache_spec_cli::input::{self, SpecLine};
use cache_spec_cli::report::SpecReport;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Cache specification parser CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Log each applied option (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Output format for `parse`
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    /// One `name value` line per field
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a specification and print every field
    Parse {
        /// Specification string, e.g. "maximumSize=100,expireAfterWrite=10m"
        spec: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate specifications; exits non-zero if any is rejected
    Check {
        /// Specification strings
        specs: Vec<String>,

        /// File with one specification per line (`#` starts a comment)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print the canonical form of a specification
    Normalize {
        /// Specification string
        spec: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Parse { spec, format } => {
            let parsed = CacheSpec::parse(&spec)?;
            let report = SpecReport::from(&parsed);
            match format {
                OutputFormat::Text => println!("{}", report.to_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { specs, file } => {
            let mut lines: Vec<SpecLine> = specs
                .into_iter()
                .enumerate()
                .map(|(i, text)| SpecLine::from_arg(i, text))
                .collect();
            if let Some(path) = file {
                debug!(path = %path.display(), "reading specifications");
                lines.extend(input::read_spec_file(&path)?);
            }
            if lines.is_empty() {
                return Err("no specifications given; pass them as arguments or with --file".into());
            }

            let outcomes = cache_spec_cli::check_all(&lines);
            let failures = outcomes.iter().filter(|o| !o.is_ok()).count();
            for outcome in &outcomes {
                println!("{}", outcome.summary());
            }
            info!(total = outcomes.len(), failures, "checked specifications");

            Ok(if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Normalize { spec } => {
            println!("{}", CacheSpec::parse(&spec)?.to_parsable_string());
            Ok(ExitCode::SUCCESS)
        }
    }
}
