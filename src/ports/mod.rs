//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (the prediction backend
//! and the local filesystem).

mod api;
mod report_sink;

pub use api::{ApiError, ReadmissionApi};
pub use report_sink::{ReportSink, REPORT_FILE_NAME};
