//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the prediction backend
//! - `download`: filesystem sink for PDF reports
//! - `sanitize`: patient-identifier filtering for logs

pub mod download;
pub mod http;
pub mod sanitize;

pub use download::FsReportSink;
pub use http::HttpApi;
