//! Static crop catalogs
//!
//! - `labels`: classifier label → crop name and image asset
//! - `explanations`: crop name → justification text
//!
//! Both tables are embedded, built once on first use and never mutated.

pub mod labels;
pub mod explanations;

pub use labels::{CropRecord, Label, LabelCatalog};
pub use explanations::{ExplanationCatalog, GENERIC_EXPLANATION};
