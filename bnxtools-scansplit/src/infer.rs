use std::collections::HashMap;

use anyhow::Result;

use bnxtools_core::models::{InferenceDetails, RunInventory, ScanAssignment};

use crate::consts;

///
/// A scan inference strategy: partition the ordered run list of a
/// [RunInventory] into contiguous blocks, one block per scan.
///
/// Both strategies produce the same [ScanAssignment] contract, so the
/// selection resolver and the record writer never know which one ran.
///
pub trait ScanInference {
    fn assign_scans(&self, inventory: &RunInventory) -> Result<ScanAssignment>;
}

///
/// Infers scan boundaries from the maximum column index observed per run.
///
/// A run whose max column reaches the canonical bank width closes a bank;
/// four banks make a scan. The median over observed bank run-counts absorbs
/// banks shortened by sticking, streaking, or low throughput.
///
pub struct ColumnSaturation;

///
/// Infers scan boundaries from header metadata alone, using a fixed number
/// of cohorts per scan (detected from the run declarations' descriptor
/// field). Never touches molecule-level data.
///
pub struct CohortCount;

/// Snap an observed global max column index to one of the three known
/// Saphyr imaging layouts. Bad chip regions or low loading can keep the
/// observed max below the true layout width; inclusive thresholds absorb
/// that.
pub fn canonical_bank_width(max_col_id: u32) -> u32 {
    if max_col_id > consts::BANK_WIDTH_FULL_FOV {
        consts::BANK_WIDTH_SPLIT_FOV
    } else if max_col_id > consts::BANK_WIDTH_SPLIT_FOV_QUARTER {
        consts::BANK_WIDTH_FULL_FOV
    } else {
        consts::BANK_WIDTH_SPLIT_FOV_QUARTER
    }
}

fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    let median = match sorted.len() % 2 {
        0 => (sorted[mid - 1] + sorted[mid]) as f64 / 2.0,
        _ => sorted[mid] as f64,
    };

    Some(median)
}

/// Chunk the ordered run list into blocks of `chunk_size`, numbering scans
/// from 1. A trailing remainder (an interrupted flow cell) becomes the last,
/// shorter scan.
fn chunk_runs(inventory: &RunInventory, chunk_size: usize) -> HashMap<u32, u32> {
    let mut map = HashMap::with_capacity(inventory.len());

    for (position, run) in inventory.runs().iter().enumerate() {
        let scan = (position / chunk_size) as u32 + 1;
        map.insert(run.run_id, scan);
    }

    map
}

impl ScanInference for ColumnSaturation {
    fn assign_scans(&self, inventory: &RunInventory) -> Result<ScanAssignment> {
        let canonical = canonical_bank_width(inventory.max_col_id());

        // runs accumulated since the last full bank; the counter value at
        // each closure is that bank's run-count
        let mut bank_run_counts: Vec<usize> = Vec::new();
        let mut since_last_bank = 0;

        for run in inventory.runs() {
            since_last_bank += 1;
            if run.max_col_id == canonical {
                bank_run_counts.push(since_last_bank);
                since_last_bank = 0;
            }
        }

        // No run ever saturated the canonical width: nothing to infer from,
        // so the whole run list is a single scan.
        let runs_per_scan = match median(&bank_run_counts) {
            Some(median) => consts::BANKS_PER_SCAN * median,
            None => inventory.len() as f64,
        };

        // the median can be a half-integer; an exact-equality chunk test
        // would then never fire, so round before chunking
        let chunk_size = runs_per_scan.round().max(1.0) as usize;

        let map = chunk_runs(inventory, chunk_size);

        Ok(ScanAssignment::new(
            map,
            InferenceDetails::ColumnSaturation {
                canonical_max_col: canonical,
                runs_per_scan,
            },
        ))
    }
}

/// Cohorts per scan from the run declarations: 16 for legacy firmware that
/// tags runs with a "Cohort" descriptor, 8 otherwise.
pub fn detect_cohorts_per_scan(inventory: &RunInventory) -> u32 {
    let has_cohort_marker = inventory.runs().iter().any(|run| {
        run.cohort_descriptor
            .as_deref()
            .is_some_and(|descriptor| descriptor.contains(consts::COHORT_MARKER))
    });

    match has_cohort_marker {
        true => consts::LEGACY_COHORTS_PER_SCAN,
        false => consts::DEFAULT_COHORTS_PER_SCAN,
    }
}

impl ScanInference for CohortCount {
    fn assign_scans(&self, inventory: &RunInventory) -> Result<ScanAssignment> {
        let cohorts_per_scan = detect_cohorts_per_scan(inventory);

        let map = chunk_runs(inventory, cohorts_per_scan as usize);

        Ok(ScanAssignment::new(
            map,
            InferenceDetails::CohortCount { cohorts_per_scan },
        ))
    }
}
