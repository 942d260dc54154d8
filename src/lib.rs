//! Redemption Console Library
//!
//! Headless admin-console client for redemption codes. It includes:
//!
//! - The REST API client and its `{success, message, data}` envelope
//! - Redemption and plan models
//! - The redemption editor (form state, plan catalogue, submission workflow)
//! - Quota rendering, localization and code export helpers
//! - Application configuration

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod i18n;
pub mod models;
pub mod quota;

pub use config::AppConfig;
pub use editor::{EditorHost, EditorState, RedemptionEditor, SubmitOutcome};
pub use error::ConsoleError;

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;
