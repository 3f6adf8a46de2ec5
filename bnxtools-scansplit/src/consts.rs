pub const SCANSPLIT_CMD: &str = "scansplit";
pub const DEFAULT_PREFIX: &str = "some_great_data";

// line-type markers of the BNX text format
pub const RUN_DATA_PREFIX: &str = "# Run Data";
pub const NUM_MOLECULES_PREFIX: &str = "# Number of Molecules:";
pub const INFO_LINE_MARKER: &str = "0";
pub const SUBORDINATE_LINE_MARKERS: [&str; 6] = ["1", "2", "QX11", "QX12", "QX21", "QX22"];

// 0-based positions of the run id and column index on a molecule info line
// (fields 12 and 13 of the BNX layout)
pub const INFO_RUN_ID_FIELD: usize = 11;
pub const INFO_COL_ID_FIELD: usize = 12;
pub const INFO_MIN_FIELDS: usize = 13;

// Saphyr flow cell geometry: four banks per scan, and the three imaging
// column layouts a bank can have
pub const BANKS_PER_SCAN: f64 = 4.0;
pub const BANK_WIDTH_SPLIT_FOV: u32 = 137;
pub const BANK_WIDTH_FULL_FOV: u32 = 69;
pub const BANK_WIDTH_SPLIT_FOV_QUARTER: u32 = 35;

// cohort metadata in the run declaration's second field
pub const COHORT_MARKER: &str = "Cohort";
pub const DEFAULT_COHORTS_PER_SCAN: u32 = 8;
pub const LEGACY_COHORTS_PER_SCAN: u32 = 16;
