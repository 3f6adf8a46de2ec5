use std::collections::HashMap;

use crate::errors::{BnxError, Result};

///
/// RunRecord struct, the per-run statistics gathered from one `# Run Data`
/// declaration and the molecule records that reference it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub run_id: u32,
    /// Largest column index seen in any molecule of this run. Stays 0 for a
    /// run that was declared but never produced a molecule.
    pub max_col_id: u32,
    pub molecule_count: u64,
    /// Instrument descriptor from the second `# Run Data` field, when present.
    pub cohort_descriptor: Option<String>,
}

impl RunRecord {
    pub fn new(run_id: u32, cohort_descriptor: Option<String>) -> Self {
        RunRecord {
            run_id,
            max_col_id: 0,
            molecule_count: 0,
            cohort_descriptor,
        }
    }
}

///
/// RunInventory struct, the ordered collection of runs declared in a BNX
/// header. Encounter order is acquisition order and defines adjacency for
/// scan grouping, so runs are kept in a Vec and never sorted.
///
#[derive(Debug, Clone, Default)]
pub struct RunInventory {
    runs: Vec<RunRecord>,
    index: HashMap<u32, usize>,
    max_col_id: u32,
}

impl RunInventory {
    pub fn new() -> Self {
        RunInventory::default()
    }

    ///
    /// Register a run declared by a `# Run Data` header line.
    ///
    /// # Arguments:
    /// - run_id: the declaring line's run id (its last field)
    /// - cohort_descriptor: the declaring line's second field, when present
    /// - line: line number of the declaration, for error reporting
    pub fn declare_run(
        &mut self,
        run_id: u32,
        cohort_descriptor: Option<String>,
        line: usize,
    ) -> Result<()> {
        if self.index.contains_key(&run_id) {
            return Err(BnxError::InvalidField {
                field: "run id",
                line,
                value: format!("{} (declared twice)", run_id),
            });
        }

        self.index.insert(run_id, self.runs.len());
        self.runs.push(RunRecord::new(run_id, cohort_descriptor));

        Ok(())
    }

    ///
    /// Record one molecule observed for a declared run.
    ///
    /// # Arguments:
    /// - run_id: run id from the molecule info line
    /// - col_id: column index from the molecule info line
    /// - line: line number of the record, for error reporting
    pub fn record_molecule(&mut self, run_id: u32, col_id: u32, line: usize) -> Result<()> {
        let position = self
            .index
            .get(&run_id)
            .copied()
            .ok_or(BnxError::UnknownRunId { run_id, line })?;

        let run = &mut self.runs[position];
        run.molecule_count += 1;
        if col_id > run.max_col_id {
            run.max_col_id = col_id;
        }
        if col_id > self.max_col_id {
            self.max_col_id = col_id;
        }

        Ok(())
    }

    pub fn get(&self, run_id: u32) -> Option<&RunRecord> {
        self.index.get(&run_id).map(|position| &self.runs[*position])
    }

    /// Runs in encounter order.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Largest column index seen anywhere in the file.
    pub fn max_col_id(&self) -> u32 {
        self.max_col_id
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
