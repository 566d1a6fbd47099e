use crate::config::ReconConfig;
use crate::core::ReconSession;
use crate::error::{ReconError, ReconResult};
use crate::excel::{
    export_dataset_json, export_dataset_xlsx, DatasetReader, ResultExporter,
};
use crate::types::{DatasetRole, MatchStatus};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the analyze command: load both ledgers, run the reconciliation
/// and write the styled comparison workbook (plus JSON when requested).
pub fn analyze(
    customer_path: PathBuf,
    own_path: PathBuf,
    output_dir: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> ReconResult<()> {
    println!("{}", "🔍 Recon - Ledger Analysis".bold().green());
    println!("   Customer: {}", customer_path.display());
    println!("   Own:      {}\n", own_path.display());

    let mut session = ReconSession::new(ReconConfig::default());

    if verbose {
        println!("{}", "📖 Loading spreadsheets...".cyan());
    }

    session.load(DatasetReader::new(DatasetRole::Customer).read_path(&customer_path)?);
    session.load(DatasetReader::new(DatasetRole::Own).read_path(&own_path)?);

    if verbose {
        for role in [DatasetRole::Customer, DatasetRole::Own] {
            if let Some(dataset) = session.dataset(role) {
                println!(
                    "   📊 {}: {} columns, {} rows",
                    role.as_str().bright_blue(),
                    dataset.headers.len(),
                    dataset.row_count()
                );
            }
        }
        println!();
    }

    if verbose {
        println!("{}", "🔗 Matching rows...".cyan());
    }

    session.run_analysis()?;
    let rows = session.require_result()?;

    print_match_summary(&session);

    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)?;

    let xlsx_path = output_dir.join("comparison_result.xlsx");
    ResultExporter::new(rows).export_xlsx(&xlsx_path)?;
    println!(
        "{}",
        format!("✅ Comparison written to {}", xlsx_path.display())
            .bold()
            .green()
    );

    if json {
        let json_path = output_dir.join("comparison_result.json");
        ResultExporter::new(rows).export_json(&json_path)?;
        println!(
            "{}",
            format!("✅ JSON written to {}", json_path.display())
                .bold()
                .green()
        );
    }

    Ok(())
}

/// Print per-status counts and the highlighted-cell total
fn print_match_summary(session: &ReconSession) {
    let Some(rows) = session.result() else {
        return;
    };

    let count = |label: &str| {
        rows.iter()
            .filter(|r| r.value(crate::core::annotator::STATUS_HEADER) == label)
            .count()
    };
    let matched = count(MatchStatus::Matched.label());
    let fallback = count(MatchStatus::MatchedFallback.label());
    let unmatched = count(MatchStatus::Unmatched.label());
    let highlighted: usize = rows
        .iter()
        .map(|r| r.cells.iter().filter(|c| c.highlighted).count())
        .sum();

    println!("\n{}", "📊 Match Summary:".bold().cyan());
    println!("{}", "─".repeat(50));
    println!(
        "   {} Matched: {}  {} Without hyphen: {}  {} Unmatched: {}",
        "✅".green(),
        matched.to_string().green(),
        "🔸".yellow(),
        fallback.to_string().yellow(),
        "❌".red(),
        unmatched.to_string().red()
    );
    println!(
        "   Rows: {}   Mismatched cells: {}",
        rows.len(),
        if highlighted > 0 {
            highlighted.to_string().red().to_string()
        } else {
            highlighted.to_string().green().to_string()
        }
    );
    println!("{}", "─".repeat(50));
}

/// Execute the convert command: re-encode one raw dataset as .xlsx or .json,
/// dispatched on the output extension.
pub fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    role: DatasetRole,
    verbose: bool,
) -> ReconResult<()> {
    println!("{}", "🔍 Recon - Dataset Convert".bold().green());
    println!("   Input: {}", input.display());

    let dataset = DatasetReader::new(role).read_path(&input)?;

    if verbose {
        println!(
            "   📊 {} dataset: {} columns, {} rows",
            role.as_str().bright_blue(),
            dataset.headers.len(),
            dataset.row_count()
        );
    }

    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("{}.json", role.file_stem())));
    println!("   Output: {}\n", output.display());

    match extension(&output) {
        "xlsx" => export_dataset_xlsx(&dataset, &output)?,
        "json" => export_dataset_json(&dataset, &output)?,
        other => {
            return Err(ReconError::Export(format!(
                "Unsupported output format: '{}'. Use .xlsx or .json",
                other
            )));
        }
    }

    println!(
        "{}",
        format!("✅ Dataset written to {}", output.display())
            .bold()
            .green()
    );

    Ok(())
}

/// Execute the inspect command: print the detected headers and row count
pub fn inspect(input: PathBuf, role: DatasetRole) -> ReconResult<()> {
    println!("{}", "🔍 Recon - Inspect".bold().green());
    println!("   File: {}\n", input.display());

    let dataset = DatasetReader::new(role).read_path(&input)?;

    println!(
        "   {} columns, {} data rows\n",
        dataset.headers.len(),
        dataset.row_count()
    );
    for (index, header) in dataset.headers.iter().enumerate() {
        println!("   {:>3}  {}", index, header.bright_blue());
    }

    Ok(())
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}
