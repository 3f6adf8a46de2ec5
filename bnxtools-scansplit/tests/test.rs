use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use bnxtools_core::models::{InferenceDetails, ScanLookup};
use bnxtools_scansplit::infer::{CohortCount, ColumnSaturation, ScanInference};
use bnxtools_scansplit::meta::scan_run_metadata;
use bnxtools_scansplit::select::ScanSelection;
use bnxtools_scansplit::split::{SplitOptions, molecule_totals, split_bnx_file};

#[fixture]
fn path_to_bnx_file() -> &'static str {
    "tests/data/molecules.bnx"
}

/// All molecule record lines (info + subordinate) of a BNX file, in order.
fn molecule_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(String::from)
        .collect()
}

fn header_count(path: &Path) -> u64 {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .find(|line| line.starts_with("# Number of Molecules:"))
        .and_then(|line| line.split('\t').nth(1))
        .and_then(|value| value.parse().ok())
        .unwrap()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // The fixture holds 8 runs of 2 molecules each, every run saturating a
    // 35-column bank, so the column strategy infers 4 runs per scan and
    // splits the file into scans 1 and 2.

    #[rstest]
    fn test_column_inference_on_fixture(path_to_bnx_file: &str) {
        let inventory = scan_run_metadata(Path::new(path_to_bnx_file)).unwrap();

        assert_eq!(inventory.len(), 8);
        assert_eq!(inventory.max_col_id(), 35);

        let assignment = ColumnSaturation.assign_scans(&inventory).unwrap();

        match assignment.details() {
            InferenceDetails::ColumnSaturation {
                canonical_max_col,
                runs_per_scan,
            } => {
                assert_eq!(*canonical_max_col, 35);
                assert_eq!(*runs_per_scan, 4.0);
            }
            _ => panic!("expected column-saturation details"),
        }

        assert_eq!(assignment.n_scans(), 2);
        assert_eq!(assignment.scan_for_run(4), Some(1));
        assert_eq!(assignment.scan_for_run(5), Some(2));
    }

    #[rstest]
    fn test_per_scan_split_round_trips(path_to_bnx_file: &str) {
        let input = Path::new(path_to_bnx_file);
        let inventory = scan_run_metadata(input).unwrap();
        let assignment = ColumnSaturation.assign_scans(&inventory).unwrap();
        let grouping = ScanSelection::PerScan.resolve(&assignment).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            prefix: dir.path().join("subset").to_string_lossy().to_string(),
            rewrite_counts: true,
        };

        let written = split_bnx_file(input, &inventory, &assignment, &grouping, &options).unwrap();

        let expected: Vec<PathBuf> = ["subset_Scan01.bnx", "subset_Scan02.bnx"]
            .iter()
            .map(|name| dir.path().join(name))
            .collect();
        assert_eq!(written, expected);

        // each per-scan file carries its own filtered molecule total
        assert_eq!(header_count(&written[0]), 8);
        assert_eq!(header_count(&written[1]), 8);

        // concatenating the outputs reproduces every molecule record of the
        // input, in order, with nothing duplicated or dropped
        let mut recombined = molecule_lines(&written[0]);
        recombined.extend(molecule_lines(&written[1]));
        assert_eq!(recombined, molecule_lines(input));

        // headers are broadcast whole
        let input_headers = fs::read_to_string(input)
            .unwrap()
            .lines()
            .filter(|line| line.starts_with('#'))
            .count();
        let output_headers = fs::read_to_string(&written[0])
            .unwrap()
            .lines()
            .filter(|line| line.starts_with('#'))
            .count();
        assert_eq!(output_headers, input_headers);
    }

    #[rstest]
    fn test_range_split_filters_and_rewrites_count(path_to_bnx_file: &str) {
        let input = Path::new(path_to_bnx_file);
        let inventory = scan_run_metadata(input).unwrap();
        let assignment = ColumnSaturation.assign_scans(&inventory).unwrap();

        let selection = ScanSelection::Ranges("2".to_string());
        let grouping = selection.resolve(&assignment).unwrap();

        assert_eq!(
            molecule_totals(&inventory, &assignment, &grouping),
            vec![8]
        );

        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            prefix: dir.path().join("subset").to_string_lossy().to_string(),
            rewrite_counts: true,
        };

        let written = split_bnx_file(input, &inventory, &assignment, &grouping, &options).unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0],
            dir.path().join("subset_ScanRange_2_filtered.bnx")
        );
        assert_eq!(header_count(&written[0]), 8);

        // scan 2 is runs 5-8; every kept info line must reference them and
        // scan 1's molecules must be gone, subordinate lines included
        let kept = molecule_lines(&written[0]);
        assert_eq!(kept.len(), 32);
        for line in kept.iter().filter(|line| line.starts_with("0\t")) {
            let run_id: u32 = line.split_whitespace().nth(11).unwrap().parse().unwrap();
            assert_eq!(run_id >= 5 && run_id <= 8, true);
        }
    }

    #[rstest]
    fn test_range_split_preserves_count_when_asked(path_to_bnx_file: &str) {
        let input = Path::new(path_to_bnx_file);
        let inventory = scan_run_metadata(input).unwrap();
        let assignment = ColumnSaturation.assign_scans(&inventory).unwrap();
        let grouping = ScanSelection::Ranges("1".to_string())
            .resolve(&assignment)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let options = SplitOptions {
            prefix: dir.path().join("subset").to_string_lossy().to_string(),
            rewrite_counts: false,
        };

        let written = split_bnx_file(input, &inventory, &assignment, &grouping, &options).unwrap();

        // original header value survives untouched
        assert_eq!(header_count(&written[0]), 16);
    }

    #[rstest]
    fn test_cohort_strategy_on_fixture(path_to_bnx_file: &str) {
        let inventory = scan_run_metadata(Path::new(path_to_bnx_file)).unwrap();

        // no "Cohort" descriptor in the fixture header, so 8 cohorts per
        // scan and the 8 runs collapse into a single scan
        let assignment = CohortCount.assign_scans(&inventory).unwrap();

        assert_eq!(
            assignment.details(),
            &InferenceDetails::CohortCount { cohorts_per_scan: 8 }
        );
        assert_eq!(assignment.n_scans(), 1);
        for run in inventory.runs() {
            assert_eq!(assignment.scan_for_run(run.run_id), Some(1));
        }
    }

    #[rstest]
    fn test_usage_errors_fail_before_any_output() {
        let dir = tempfile::tempdir().unwrap();

        // both usage violations are rejected at selection time, before any
        // pass runs or file is created
        assert_eq!(ScanSelection::from_args(false, None).is_err(), true);
        assert_eq!(ScanSelection::from_args(true, Some("1-2")).is_err(), true);

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
