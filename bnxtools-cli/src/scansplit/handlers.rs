use std::path::Path;

use anyhow::{Result, bail};
use clap::ArgMatches;

use bnxtools_core::models::InferenceDetails;
use bnxtools_scansplit::consts::*;
use bnxtools_scansplit::infer::{CohortCount, ColumnSaturation, ScanInference};
use bnxtools_scansplit::meta::scan_run_metadata;
use bnxtools_scansplit::report::write_run_report;
use bnxtools_scansplit::select::ScanSelection;
use bnxtools_scansplit::split::{SplitOptions, split_bnx_file};

pub fn run_scansplit(matches: &ArgMatches) -> Result<()> {
    let bnx = matches
        .get_one::<String>("bnx")
        .expect("A path to a BNX file is required.");

    let default_prefix = DEFAULT_PREFIX.to_string();
    let prefix = matches.get_one::<String>("prefix").unwrap_or(&default_prefix);

    // usage rules are enforced before anything is read or written
    let by_scan = matches.get_flag("by-scan");
    let ranges = matches.get_one::<String>("scan-range");
    let selection = ScanSelection::from_args(by_scan, ranges.map(String::as_str))?;

    let strategy = matches
        .get_one::<String>("strategy")
        .map(String::as_str)
        .unwrap_or("column");
    let strategy: Box<dyn ScanInference> = match strategy {
        "column" => Box::new(ColumnSaturation),
        "cohort" => Box::new(CohortCount),
        other => bail!("Unknown scan inference strategy: {}. Expected column or cohort.", other),
    };

    let bnx = Path::new(bnx);

    println!("Scanning run metadata:\t{:?}", bnx);
    let inventory = scan_run_metadata(bnx)?;
    let assignment = strategy.assign_scans(&inventory)?;

    let report_path = format!("{}_runID_to_scan.txt", prefix);
    write_run_report(Path::new(&report_path), &inventory, &assignment)?;

    let grouping = selection.resolve(&assignment)?;

    // the column-saturation variant rewrites the molecule-count header, the
    // cohort variant copies it through
    let rewrite_counts = !matches.get_flag("keep-counts")
        && matches!(assignment.details(), InferenceDetails::ColumnSaturation { .. });

    let options = SplitOptions {
        prefix: prefix.to_string(),
        rewrite_counts,
    };

    println!("Reading, Filtering BNX File:\t{:?}", bnx);
    let written = split_bnx_file(bnx, &inventory, &assignment, &grouping, &options)?;

    for file in &written {
        println!("Wrote:\t{:?}", file);
    }

    Ok(())
}
