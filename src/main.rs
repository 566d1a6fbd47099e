use clap::{Parser, Subcommand};
use ledger_recon::cli;
use ledger_recon::error::ReconResult;
use ledger_recon::types::DatasetRole;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recon")]
#[command(about = "Reconcile a customer PO ledger against an internal production ledger")]
#[command(long_about = "Recon - purchase-order ledger reconciliation

Matches each customer row against the internal production ledger by the
composite key 'Document Number-Line ID' vs 'Po-line', falling back to the
pre-hyphen prefix of 'Document Number' vs 'Po', then writes an annotated
comparison workbook with mismatched cells highlighted.

COMMANDS:
  analyze  - Reconcile two ledgers and export comparison_result.xlsx
  convert  - Re-encode one raw ledger as .xlsx or .json (round-trip checks)
  inspect  - Show the detected headers and row count of a ledger

EXAMPLES:
  recon analyze customer.xlsx own.xlsx
  recon analyze customer.xlsx own.xlsx -o reports --json
  recon convert customer.xlsx customer_data.json
  recon inspect own.xlsx --role own")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Reconcile the two ledgers and export the comparison.

Loads the first sheet of each workbook (row 0 as headers), joins customer
rows onto the own ledger, and writes comparison_result.xlsx into the output
directory. Mismatched cells are filled #FFCCCC:

  - each of the own fields copied into the output (BD xf-date,
    Prouction status(SFC210), Order QTY, Shipmod, unit price) is compared
    against the customer column of the same name
  - the customer's 13th column and the own 'unit price' are additionally
    compared by position; on a difference both cells are flagged

Fails without writing anything when either file cannot be read or when the
customer sheet has fewer columns than the positional rule needs.")]
    /// Reconcile two ledgers and export the comparison workbook
    Analyze {
        /// Customer purchase-order ledger (.xlsx, first sheet)
        customer: PathBuf,

        /// Internal production ledger (.xlsx, first sheet)
        own: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write comparison_result.json (value-only, styles stripped)
        #[arg(long)]
        json: bool,

        /// Show dataset details while loading
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Re-encode one raw ledger for round-trip debugging.

Loads the file through the same first-sheet tabular reader the analysis
uses, then writes it back out unannotated. The output format follows the
output extension: .xlsx or .json. Re-loading an .xlsx produced here yields
the same records string-for-string.

Default output name is derived from the role: customer_data.json or
own_data.json.")]
    /// Re-encode one raw ledger as .xlsx or .json
    Convert {
        /// Input ledger (.xlsx, first sheet)
        input: PathBuf,

        /// Output file (.xlsx or .json); default {role}_data.json
        output: Option<PathBuf>,

        /// Dataset role tag (customer/own)
        #[arg(short, long, default_value = "customer")]
        role: DatasetRole,

        /// Show dataset details while loading
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the detected headers and row count of a ledger
    Inspect {
        /// Input ledger (.xlsx, first sheet)
        input: PathBuf,

        /// Dataset role tag (customer/own)
        #[arg(short, long, default_value = "customer")]
        role: DatasetRole,
    },
}

fn main() -> ReconResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            customer,
            own,
            output,
            json,
            verbose,
        } => cli::analyze(customer, own, output, json, verbose),

        Commands::Convert {
            input,
            output,
            role,
            verbose,
        } => cli::convert(input, output, role, verbose),

        Commands::Inspect { input, role } => cli::inspect(input, role),
    }
}
