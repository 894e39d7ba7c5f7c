//! nelsonkb — build an enriched pediatric knowledge corpus from textbook
//! chunk CSVs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nelsonkb_core::{EnrichOptions, RowErrorPolicy};
use nelsonkb_dataset::{
    convert_to_jsonl, enhance_file, enrich_file, validate_jsonl, QualityReport,
};

#[derive(Parser)]
#[command(
    name = "nelsonkb",
    about = "Pediatric textbook knowledge-base builder"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag raw chunks with concepts, difficulty, relevance, and objectives
    Enhance {
        /// Input chunk CSV
        input: PathBuf,
        /// Output CSV with enhancement columns appended
        output: PathBuf,
        /// What to do with rows the reader rejects
        #[arg(long, value_enum, default_value = "default")]
        policy: PolicyArg,
        /// Process at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Enrich enhanced chunks into the final knowledge CSV
    Enrich {
        /// Input enhanced-chunk CSV
        input: PathBuf,
        /// Output knowledge CSV
        output: PathBuf,
        /// What to do with rows the reader rejects
        #[arg(long, value_enum, default_value = "default")]
        policy: PolicyArg,
        /// Process at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Convert a knowledge CSV to JSONL
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
    /// Validate a JSONL export line by line
    Validate { input: PathBuf },
    /// Print a data-quality report for a knowledge CSV
    Report {
        input: PathBuf,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum PolicyArg {
    /// Substitute defaults for bad rows
    #[default]
    Default,
    /// Drop bad rows with a warning
    Skip,
    /// Abort on the first bad row
    Strict,
}

impl From<PolicyArg> for RowErrorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Default => RowErrorPolicy::DefaultFill,
            PolicyArg::Skip => RowErrorPolicy::Skip,
            PolicyArg::Strict => RowErrorPolicy::Strict,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enhance {
            input,
            output,
            policy,
            limit,
        } => {
            let options = EnrichOptions {
                policy: policy.into(),
                limit,
            };
            let rows = enhance_file(&input, &output, &options)?;
            println!("Enhanced {} rows -> {}", rows, output.display());
        }
        Commands::Enrich {
            input,
            output,
            policy,
            limit,
        } => {
            let options = EnrichOptions {
                policy: policy.into(),
                limit,
            };
            let rows = enrich_file(&input, &output, &options)?;
            println!("Enriched {} rows -> {}", rows, output.display());
        }
        Commands::Convert { input, output } => {
            let records = convert_to_jsonl(&input, &output)?;
            println!("Converted {} records -> {}", records, output.display());
        }
        Commands::Validate { input } => {
            let records = validate_jsonl(&input)?;
            println!("Valid JSONL: {} records", records);
        }
        Commands::Report { input, output } => {
            let report = QualityReport::from_file(&input)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, report.to_string())?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{report}"),
            }
        }
    }

    Ok(())
}
