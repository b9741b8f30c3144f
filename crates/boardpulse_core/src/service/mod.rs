//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate ingestion into one pure board-processing call.
//! - Aggregate metrics and project snapshots into reports.
//! - Keep CLI and UI callers decoupled from ingestion details.

pub mod board_service;
pub mod metrics;
pub mod report;
