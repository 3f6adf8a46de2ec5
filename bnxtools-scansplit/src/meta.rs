use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use bnxtools_core::errors::BnxError;
use bnxtools_core::models::RunInventory;
use bnxtools_core::utils::get_dynamic_reader;

use crate::consts;

///
/// Collect run metadata from a BNX file in a single streaming pass.
///
/// Every `# Run Data` header line declares a run; molecule info lines update
/// that run's molecule count and maximum column index. The resulting
/// [RunInventory] is everything the inference strategies need: neither pass
/// ever holds more than one line of molecule data in memory.
///
/// # Arguments:
/// - path: path to the BNX file (plain or gzipped)
///
pub fn scan_run_metadata(path: &Path) -> Result<RunInventory> {
    let reader = get_dynamic_reader(path)?;

    let mut inventory = RunInventory::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("There was an error reading line {}", index + 1))?;
        let line_no = index + 1;

        if line.starts_with(consts::RUN_DATA_PREFIX) {
            let (run_id, descriptor) = parse_run_declaration(&line, line_no)?;
            inventory.declare_run(run_id, descriptor, line_no)?;
        } else if line.split_whitespace().next() == Some(consts::INFO_LINE_MARKER) {
            let (run_id, col_id) = parse_info_fields(&line, line_no)?;
            inventory.record_molecule(run_id, col_id, line_no)?;
        }
    }

    if inventory.is_empty() {
        return Err(BnxError::EmptyInventory(path.display().to_string()).into());
    }

    Ok(inventory)
}

/// Pull the run id (last field) and optional cohort descriptor (second field)
/// out of a tab-delimited `# Run Data` line.
fn parse_run_declaration(
    line: &str,
    line_no: usize,
) -> std::result::Result<(u32, Option<String>), BnxError> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();

    if fields.len() < 2 {
        return Err(BnxError::MissingRunId { line: line_no });
    }

    let run_id_field = fields[fields.len() - 1].trim();
    let run_id: u32 = run_id_field.parse().map_err(|_| BnxError::InvalidField {
        field: "run id",
        line: line_no,
        value: run_id_field.to_string(),
    })?;

    // the descriptor only exists when the run id is not itself the second field
    let descriptor = match fields.len() > 2 {
        true => Some(fields[1].trim().to_string()).filter(|d| !d.is_empty()),
        false => None,
    };

    Ok((run_id, descriptor))
}

/// Pull the run id and column index out of a whitespace-delimited molecule
/// info line (`0 ...`).
pub(crate) fn parse_info_fields(
    line: &str,
    line_no: usize,
) -> std::result::Result<(u32, u32), BnxError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() < consts::INFO_MIN_FIELDS {
        return Err(BnxError::ShortRecord {
            line: line_no,
            expected: consts::INFO_MIN_FIELDS,
            found: fields.len(),
        });
    }

    let run_id_field = fields[consts::INFO_RUN_ID_FIELD];
    let run_id: u32 = run_id_field.parse().map_err(|_| BnxError::InvalidField {
        field: "run id",
        line: line_no,
        value: run_id_field.to_string(),
    })?;

    let col_id_field = fields[consts::INFO_COL_ID_FIELD];
    let col_id: u32 = col_id_field.parse().map_err(|_| BnxError::InvalidField {
        field: "column id",
        line: line_no,
        value: col_id_field.to_string(),
    })?;

    Ok((run_id, col_id))
}
