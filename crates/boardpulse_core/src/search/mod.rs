//! Query facade over normalized tasks.
//!
//! # Responsibility
//! - Re-filter an existing snapshot cheaply for interactive views.
//!
//! # See also
//! - `service::metrics` for the aggregation the facade reuses.

pub mod filter;
