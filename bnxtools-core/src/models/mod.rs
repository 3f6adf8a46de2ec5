pub mod run;
pub mod scan;

// re-export for cleaner imports
pub use self::run::{RunInventory, RunRecord};
pub use self::scan::{InferenceDetails, ScanAssignment, ScanLookup};
