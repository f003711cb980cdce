//! Application layer: Use cases and services.
//!
//! This module turns user intents into backend calls and folds the answers
//! back into session state:
//! - `dispatch`: pure planning and precondition checks
//! - `service`: executes planned calls against the ports
//! - `session`: stored payload, rendered views, chart canvases
//! - `render`, `charts`: display text and bar-chart instances

mod charts;
mod dispatch;
mod error;
mod render;
mod service;
mod session;

pub use charts::{Bar, BarChart, ChartBoard, ChartCanvas};
pub use dispatch::{plan, Intent, Plan, PlannedCall};
pub use error::{ActionError, Prompt, PromptLevel};
pub use render::{followup_sentence, simulation_summary, ResultView, PLACEHOLDER};
pub use service::{ActionOutcome, ReadmissionService};
pub use session::Session;
