//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen: the patient form on the left, the prediction result,
//! staffing summary and charts on the right, and a modal prompt for
//! errors and notices.

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::WardTheme;
pub use worker::{RequestWorkers, WorkerEvent};
