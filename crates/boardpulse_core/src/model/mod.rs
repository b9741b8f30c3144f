//! Domain model for board ingestion and metrics.
//!
//! # Responsibility
//! - Define the raw export records read from the source tool.
//! - Define the canonical task/member shapes and derived metrics.
//!
//! # Invariants
//! - Raw records carry explicit defaults; canonical records are immutable.
//! - Metrics are derived from tasks and never stored on their own.

pub mod metrics;
pub mod period;
pub mod raw;
pub mod task;
