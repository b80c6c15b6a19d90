mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kyozai",
    version,
    about = "Order analysis for educational-material sales"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-school breakdown by tab, grade and subject
    Report {
        /// Path to the order workbook (.xlsx)
        input_file: PathBuf,

        /// School (得意先) name, exact match
        #[arg(short, long)]
        school: String,

        /// Single tab to report: 通年, 春期, 夏期, 冬期 or 入試 (default: all five)
        #[arg(short, long)]
        tab: Option<String>,

        /// Same-day quantity at/above which an order counts as bulk
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
        bulk_threshold: u32,

        /// Custom keyword table JSON
        #[arg(short, long, value_name = "FILE")]
        keywords: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Classify product names without order data
    Classify {
        /// Product names to classify
        names: Vec<String>,

        /// Custom keyword table JSON
        #[arg(short, long, value_name = "FILE")]
        keywords: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List schools found in an order workbook
    Schools {
        /// Path to the order workbook (.xlsx)
        input_file: PathBuf,

        /// Custom keyword table JSON
        #[arg(short, long, value_name = "FILE")]
        keywords: Option<PathBuf>,
    },
    /// Inspect or validate keyword tables
    Keywords {
        #[command(subcommand)]
        action: KeywordsAction,
    },
}

#[derive(Subcommand)]
enum KeywordsAction {
    /// Print the builtin keyword tables as JSON
    Show,
    /// Validate a custom keyword table file
    Validate {
        /// Path to JSON keyword file
        file: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            input_file,
            school,
            tab,
            bulk_threshold,
            keywords,
            output,
        } => commands::report::run(
            &input_file,
            &school,
            tab.as_deref(),
            bulk_threshold,
            keywords.as_deref(),
            &output,
        ),
        Commands::Classify {
            names,
            keywords,
            output,
        } => commands::classify::run(&names, keywords.as_deref(), &output),
        Commands::Schools {
            input_file,
            keywords,
        } => commands::schools::run(&input_file, keywords.as_deref()),
        Commands::Keywords { action } => match action {
            KeywordsAction::Show => commands::keywords::show(),
            KeywordsAction::Validate { file } => commands::keywords::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
