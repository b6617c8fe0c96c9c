use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_tabular::cli;
use royalbit_tabular::error::TabularResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabular")]
#[command(about = "Records to xlsx/csv and back.")]
#[command(long_about = "Tabular - records to spreadsheet/CSV files and back

Field names become upper-cased column headers on export
(orderId → ORDER ID) and turn back into camelCase on import.

COMMANDS:
  export  - JSON records to .xlsx or .csv
  import  - .xlsx or .csv to JSON rows
  header  - Show the header/field name conversion

EXAMPLES:
  tabular export orders.json orders.xlsx
  tabular import orders.csv -o orders.json
  tabular header orderId customerName
  tabular header --reverse \"ORDER ID\"

Docs: https://github.com/royalbit/tabular")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export JSON records to a spreadsheet or CSV file.

The input is a JSON array of records. Objects become rows, strings holding
a JSON object are decoded, anything else contributes an empty row.
A single JSON object is exported as a one-row file.

The output format follows the output extension: .xlsx or .csv.")]
    /// Export JSON records to .xlsx or .csv
    Export {
        /// Path to the JSON records file
        input: PathBuf,

        /// Output file (.xlsx or .csv)
        output: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Import a .xlsx or .csv file as JSON rows
    Import {
        /// Path to the .xlsx or .csv file
        input: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert field names to column headers (or back with --reverse)
    Header {
        /// Names to convert
        #[arg(required = true)]
        names: Vec<String>,

        /// Convert column headers back to field names
        #[arg(short, long)]
        reverse: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "royalbit_tabular=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", "Error:".bold().red(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> TabularResult<()> {
    match command {
        Commands::Export {
            input,
            output,
            verbose,
        } => cli::export(input, output, verbose),

        Commands::Import {
            input,
            output,
            verbose,
        } => cli::import(input, output, verbose),

        Commands::Header { names, reverse } => cli::header(names, reverse),
    }
}
