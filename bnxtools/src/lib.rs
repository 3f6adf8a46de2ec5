#[cfg(feature = "core")]
#[doc(inline)]
pub use bnxtools_core as core;

#[cfg(feature = "scansplit")]
#[doc(inline)]
pub use bnxtools_scansplit as scansplit;
