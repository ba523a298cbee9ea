//! Export core modules shared across the CLI and other front-ends.

#[cfg(feature = "excel")]
pub mod excel_core;
