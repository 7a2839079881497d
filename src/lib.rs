//! Classcarve - carve embedded class files out of binary dumps
//!
//! This library crate exposes the extraction pipeline used by the
//! `classcarve` binary, for integration testing and embedding.
//!
//! Scanning and segmentation live in `classcarve-scan`; this crate adds
//! configuration, extraction planning, JAR output and progress reporting.

pub mod archive;
pub mod config;
pub mod error;
pub mod extract;

pub use classcarve_scan::{Fragment, CLASS_MAGIC};
pub use error::{ExtractError, Result};
pub use extract::{ExtractionPlan, ExtractOptions, ExtractOutcome};
