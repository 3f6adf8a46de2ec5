use std::io;
use thiserror::Error;

/// Error type for operations on BNX files.
#[derive(Error, Debug)]
pub enum BnxError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `# Run Data` header line is missing its run id field.
    #[error("Run declaration on line {line} has no run id")]
    MissingRunId { line: usize },

    /// A molecule info line has fewer fields than the BNX layout requires.
    #[error("Molecule record on line {line} is too short: expected at least {expected} fields, found {found}")]
    ShortRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A molecule info line references a run id never declared in the header.
    #[error("Molecule record on line {line} references undeclared run id {run_id}")]
    UnknownRunId { run_id: u32, line: usize },

    /// A field could not be parsed as the expected type.
    #[error("Invalid {field} on line {line}: {value:?}")]
    InvalidField {
        field: &'static str,
        line: usize,
        value: String,
    },

    /// A scan range token was not of the form `a` or `a-b`.
    #[error("Invalid scan range token: {0:?}")]
    InvalidScanRange(String),

    /// The file declared no runs at all, so no scans can be inferred.
    #[error("No run declarations found in file: {0}")]
    EmptyInventory(String),
}

/// Result type alias for bnxtools operations.
pub type Result<T> = std::result::Result<T, BnxError>;
