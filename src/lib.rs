//! # Wardcast
//!
//! Terminal client for a hospital readmission-prediction service.
//!
//! This crate provides:
//! - A typed patient form whose schema drives payload construction
//! - Predict, staffing-simulation and PDF-report actions against the backend
//! - Result rendering with risk and staffing bar charts
//! - Terminal UI for clinicians
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Form schema, Prediction Request, response bodies
//! - `ports`: Trait definitions for the backend API and report delivery
//! - `adapters`: Concrete implementations (reqwest, filesystem, log sanitizer)
//! - `application`: Action dispatcher, session state, rendering
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{Intent, ReadmissionService, Session};
pub use domain::{FormState, PredictionRequest};

/// Result type for Wardcast operations
pub type Result<T> = std::result::Result<T, WardcastError>;

/// Main error type for Wardcast
#[derive(Debug, thiserror::Error)]
pub enum WardcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Backend client error: {0}")]
    Api(#[from] ports::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
