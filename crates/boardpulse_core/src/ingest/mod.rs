//! Board export ingestion.
//!
//! # Responsibility
//! - Validate the export shape and extract raw records.
//! - Build reference maps and normalize cards into canonical tasks.
//!
//! # Invariants
//! - Only top-level shape problems are fatal; per-card anomalies are defaulted.

pub mod normalize;
pub mod reference;
pub mod validate;
