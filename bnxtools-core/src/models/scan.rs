use std::collections::HashMap;

/// How a [ScanAssignment] was produced. Consumed by the mapping report and
/// by the header-count rewrite default.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceDetails {
    ColumnSaturation {
        /// Canonical bank width the observed global max column was snapped to.
        canonical_max_col: u32,
        /// `4 × median(bank run-counts)`, kept unrounded.
        runs_per_scan: f64,
    },
    CohortCount {
        cohorts_per_scan: u32,
    },
}

pub trait ScanLookup {
    fn scan_for_run(&self, run_id: u32) -> Option<u32>;
}

///
/// ScanAssignment struct, the total mapping from run id to scan number
/// produced by an inference strategy. Scan numbers are 1-based and
/// non-decreasing in run encounter order.
///
#[derive(Debug, Clone)]
pub struct ScanAssignment {
    map: HashMap<u32, u32>,
    n_scans: u32,
    details: InferenceDetails,
}

impl ScanLookup for ScanAssignment {
    fn scan_for_run(&self, run_id: u32) -> Option<u32> {
        self.map.get(&run_id).copied()
    }
}

impl ScanAssignment {
    pub fn new(map: HashMap<u32, u32>, details: InferenceDetails) -> Self {
        let n_scans = map.values().copied().max().unwrap_or(0);
        ScanAssignment {
            map,
            n_scans,
            details,
        }
    }

    /// Highest scan number assigned.
    pub fn n_scans(&self) -> u32 {
        self.n_scans
    }

    pub fn details(&self) -> &InferenceDetails {
        &self.details
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
