// src/models/mod.rs
pub mod plan;
pub mod redemption;

pub use plan::{PlanEntry, PlanOption, PlanSummary};
pub use redemption::{RedemptionPayload, RedemptionRecord, RedemptionStatus};

use serde::Deserialize;

/// Standard response envelope returned by every backend endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }

    /// Successful envelope without data
    pub fn empty() -> Self {
        Self {
            success: true,
            message: String::new(),
            data: None,
        }
    }

    /// Rejected envelope with a server message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_null_data() {
        let env: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{"success": true, "message": "", "data": null}"#).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[test]
    fn test_envelope_without_message() {
        let env: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.message, "");
    }
}
