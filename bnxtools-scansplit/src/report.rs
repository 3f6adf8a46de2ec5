use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use bnxtools_core::models::{InferenceDetails, RunInventory, ScanAssignment, ScanLookup};

///
/// Write the diagnostic run-to-scan mapping report: one tab-delimited row
/// per run in encounter order. The column strategy gets a two-line preamble
/// with the canonical max column and the inferred runs-per-scan value, plus
/// a MaxColumnID column; the cohort strategy reports neither.
///
/// # Arguments:
/// - path: where to write the report
/// - inventory: run metadata from the first pass
/// - assignment: run-to-scan mapping, including how it was inferred
///
pub fn write_run_report(
    path: &Path,
    inventory: &RunInventory,
    assignment: &ScanAssignment,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {:?}", path))?;
    let mut out = BufWriter::new(file);

    let column_strategy = match assignment.details() {
        InferenceDetails::ColumnSaturation {
            canonical_max_col,
            runs_per_scan,
        } => {
            writeln!(out, "# maxColID:\t{}", canonical_max_col)?;
            writeln!(out, "# Run IDs Per Scan:\t{}", runs_per_scan)?;
            writeln!(out, "# RunID\tMaxColumnID\tScanNumber\tNumMoleculesInRunID")?;
            true
        }
        InferenceDetails::CohortCount { .. } => {
            writeln!(out, "# RunID\tScanNumber\tNumMoleculesInRunID")?;
            false
        }
    };

    for run in inventory.runs() {
        let scan = assignment.scan_for_run(run.run_id).unwrap_or(0);
        match column_strategy {
            true => writeln!(
                out,
                "{}\t{}\t{}\t{}",
                run.run_id, run.max_col_id, scan, run.molecule_count
            )?,
            false => writeln!(out, "{}\t{}\t{}", run.run_id, scan, run.molecule_count)?,
        }
    }

    out.flush()?;

    Ok(())
}
