use std::collections::HashMap;

use anyhow::{Result, bail};

use bnxtools_core::errors::BnxError;
use bnxtools_core::models::ScanAssignment;

///
/// How the caller wants scans grouped into output files: one file per scan,
/// or one file covering the listed inclusive ranges.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSelection {
    PerScan,
    Ranges(String),
}

/// One output file: its filename label and the scans routed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGroup {
    pub label: String,
    pub scans: Vec<u32>,
}

///
/// OutputGrouping struct, the resolved mapping from scan number to output
/// group. Scans absent from the mapping are dropped from output entirely.
///
#[derive(Debug, Clone)]
pub struct OutputGrouping {
    groups: Vec<OutputGroup>,
    by_scan: HashMap<u32, usize>,
    per_scan: bool,
}

impl ScanSelection {
    ///
    /// Build a selection from the CLI surface, enforcing the two usage rules
    /// before any file is opened: range mode requires a range string, and
    /// per-scan mode forbids one.
    ///
    /// # Arguments:
    /// - by_scan: true for one output file per scan
    /// - ranges: the raw `--scan-range` value, when supplied
    pub fn from_args(by_scan: bool, ranges: Option<&str>) -> Result<Self> {
        let ranges = ranges.unwrap_or("");

        if by_scan && !ranges.is_empty() {
            bail!(
                "You have selected one BNX file per scan, but also given a range of scans ({}). \
                 These are incompatible: drop the range, or drop the per-scan flag.",
                ranges
            );
        }

        if !by_scan && ranges.is_empty() {
            bail!(
                "You have selected a BNX file for a range of scans, but given no range. \
                 Supply one, for example: 1-10 or 1-10,15-20."
            );
        }

        match by_scan {
            true => Ok(ScanSelection::PerScan),
            false => Ok(ScanSelection::Ranges(ranges.to_string())),
        }
    }

    ///
    /// Resolve this selection against a [ScanAssignment] into the
    /// scan-to-output-group mapping the record writer consumes.
    ///
    pub fn resolve(&self, assignment: &ScanAssignment) -> Result<OutputGrouping> {
        match self {
            ScanSelection::PerScan => {
                let mut groups = Vec::new();
                let mut by_scan = HashMap::new();

                for scan in 1..=assignment.n_scans() {
                    by_scan.insert(scan, groups.len());
                    groups.push(OutputGroup {
                        label: format!("Scan{:02}", scan),
                        scans: vec![scan],
                    });
                }

                Ok(OutputGrouping {
                    groups,
                    by_scan,
                    per_scan: true,
                })
            }

            ScanSelection::Ranges(spec) => {
                let ranges = parse_scan_ranges(spec)?;

                let mut label = String::from("ScanRange_");
                for token in spec.split(',') {
                    label.push_str(token);
                    label.push('_');
                }

                let covered: Vec<u32> = (1..=assignment.n_scans())
                    .filter(|scan| ranges.iter().any(|(lo, hi)| scan >= lo && scan <= hi))
                    .collect();

                let mut groups = Vec::new();
                let mut by_scan = HashMap::new();

                if !covered.is_empty() {
                    for scan in &covered {
                        by_scan.insert(*scan, 0);
                    }
                    groups.push(OutputGroup {
                        label,
                        scans: covered,
                    });
                }

                Ok(OutputGrouping {
                    groups,
                    by_scan,
                    per_scan: false,
                })
            }
        }
    }
}

/// Parse a comma-separated list of `a-b` ranges and single `a` values into
/// inclusive bounds.
pub fn parse_scan_ranges(spec: &str) -> Result<Vec<(u32, u32)>> {
    let mut ranges = Vec::new();

    for token in spec.split(',') {
        let parse = |value: &str| -> std::result::Result<u32, BnxError> {
            value
                .trim()
                .parse()
                .map_err(|_| BnxError::InvalidScanRange(token.to_string()))
        };

        match token.split_once('-') {
            Some((lo, hi)) => ranges.push((parse(lo)?, parse(hi)?)),
            None => {
                let value = parse(token)?;
                ranges.push((value, value));
            }
        }
    }

    Ok(ranges)
}

impl OutputGrouping {
    pub fn group_for_scan(&self, scan: u32) -> Option<usize> {
        self.by_scan.get(&scan).copied()
    }

    pub fn groups(&self) -> &[OutputGroup] {
        &self.groups
    }

    /// Output filename for a group. Range-mode output carries a `filtered`
    /// suffix to distinguish it from per-scan output.
    pub fn file_name(&self, group: usize, prefix: &str) -> String {
        match self.per_scan {
            true => format!("{}_{}.bnx", prefix, self.groups[group].label),
            false => format!("{}_{}filtered.bnx", prefix, self.groups[group].label),
        }
    }
}
