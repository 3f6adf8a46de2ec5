use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use bnxtools_core::errors::BnxError;
use bnxtools_core::models::{RunInventory, ScanAssignment, ScanLookup};
use bnxtools_core::utils::get_dynamic_reader;

use crate::consts;
use crate::meta::parse_info_fields;
use crate::select::OutputGrouping;

/// Options for the second streaming pass.
pub struct SplitOptions {
    /// Output filename prefix (may carry a directory component).
    pub prefix: String,
    /// Replace the `# Number of Molecules:` header value with each output
    /// file's filtered total.
    pub rewrite_counts: bool,
}

///
/// Replay a BNX file into one output file per group.
///
/// Streams the input a second time, broadcasting header lines to every sink
/// and routing each molecule record (the info line plus its subordinate
/// label and quality lines) to the sink owning its run's scan. Molecules
/// whose scan is not covered by the grouping are dropped whole. All sinks
/// are opened before the pass begins and closed when the writer scope ends,
/// on every exit path.
///
/// # Arguments:
/// - path: the BNX file to split
/// - inventory: run metadata from the first pass
/// - assignment: run-to-scan mapping
/// - grouping: scan-to-output-group mapping
/// - options: prefix and header rewrite behavior
///
/// Returns the paths of the files written.
///
pub fn split_bnx_file(
    path: &Path,
    inventory: &RunInventory,
    assignment: &ScanAssignment,
    grouping: &OutputGrouping,
    options: &SplitOptions,
) -> Result<Vec<PathBuf>> {
    let group_totals = molecule_totals(inventory, assignment, grouping);

    let mut sinks: Vec<BufWriter<File>> = Vec::with_capacity(grouping.groups().len());
    let mut written: Vec<PathBuf> = Vec::with_capacity(grouping.groups().len());

    for group in 0..grouping.groups().len() {
        let file_path = PathBuf::from(grouping.file_name(group, &options.prefix));
        let file = File::create(&file_path)
            .with_context(|| format!("Failed to create output file: {:?}", file_path))?;
        sinks.push(BufWriter::new(file));
        written.push(file_path);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Filtering molecules...");

    let reader = get_dynamic_reader(path)?;

    // sink owning the molecule record currently being copied; None while
    // between records or inside a dropped one
    let mut current_sink: Option<usize> = None;
    let mut processed_molecules: u64 = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("There was an error reading line {}", index + 1))?;
        let line_no = index + 1;

        if line.starts_with('#') {
            write_header_line(&line, &mut sinks, &group_totals, options.rewrite_counts)?;
            continue;
        }

        let marker = line.split_whitespace().next().unwrap_or("");

        if marker == consts::INFO_LINE_MARKER {
            let (run_id, _col_id) = parse_info_fields(&line, line_no)?;
            let scan = assignment
                .scan_for_run(run_id)
                .ok_or(BnxError::UnknownRunId {
                    run_id,
                    line: line_no,
                })?;

            current_sink = grouping.group_for_scan(scan);
            if let Some(sink) = current_sink {
                writeln!(sinks[sink], "{}", line)?;
            }

            processed_molecules += 1;
            if processed_molecules % 10_000 == 0 {
                spinner.set_message(format!("Filtered {} molecules", processed_molecules));
            }
            spinner.inc(1);
        } else if consts::SUBORDINATE_LINE_MARKERS.contains(&marker) {
            if let Some(sink) = current_sink {
                writeln!(sinks[sink], "{}", line)?;
            }
        }
    }

    for sink in &mut sinks {
        sink.flush()?;
    }

    spinner.finish_with_message("Done!");

    Ok(written)
}

/// Total molecule count routed into each output group: the sum of
/// molecule_count over every run whose scan belongs to the group.
pub fn molecule_totals(
    inventory: &RunInventory,
    assignment: &ScanAssignment,
    grouping: &OutputGrouping,
) -> Vec<u64> {
    let mut totals = vec![0u64; grouping.groups().len()];

    for run in inventory.runs() {
        let group = assignment
            .scan_for_run(run.run_id)
            .and_then(|scan| grouping.group_for_scan(scan));
        if let Some(group) = group {
            totals[group] += run.molecule_count;
        }
    }

    totals
}

/// Header lines are broadcast to every sink; the molecule-count line is
/// rewritten with each sink's filtered total when requested.
fn write_header_line(
    line: &str,
    sinks: &mut [BufWriter<File>],
    group_totals: &[u64],
    rewrite_counts: bool,
) -> Result<()> {
    let rewrite = rewrite_counts && line.starts_with(consts::NUM_MOLECULES_PREFIX);

    for (group, sink) in sinks.iter_mut().enumerate() {
        match rewrite {
            true => writeln!(
                sink,
                "{}\t{}",
                consts::NUM_MOLECULES_PREFIX,
                group_totals[group]
            )?,
            false => writeln!(sink, "{}", line)?,
        }
    }

    Ok(())
}
