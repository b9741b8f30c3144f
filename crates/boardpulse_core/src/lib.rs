//! Core ingestion and metrics engine for boardpulse.
//! This crate turns a task-board export into normalized tasks and metrics.

pub mod ingest;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use ingest::reference::ReferenceMaps;
pub use ingest::validate::{parse_board, validate_board, BoardError, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LogTarget};
pub use model::metrics::{MemberStat, Metrics};
pub use model::period::{Period, PeriodError};
pub use model::raw::{RawBoard, RawCard, RawLabel, RawList, RawMember};
pub use model::task::{Label, MemberProfile, Task, TaskStatus};
pub use search::filter::{filter_tasks, FilteredView, TaskFilter};
pub use service::board_service::{
    normalize, process_board, BoardInfo, BoardSnapshot, ProcessOptions,
};
pub use service::metrics::aggregate;
pub use service::report::Report;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
