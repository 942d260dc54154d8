//! Admin backend REST integration
//!
//! Every endpoint answers with the `{success, message, data}` envelope.
//! Transport and decoding failures surface as [`ApiError`]; a
//! `success=false` envelope is a regular `Ok` value the caller inspects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use redemption_console::api::{ApiClient, RedemptionApi};
//!
//! let client = ApiClient::from_config(&config.api)?;
//! let envelope = client.get_redemption(42).await?;
//! ```

mod client;
mod redemption;

pub use client::{ApiClient, ApiError};

use async_trait::async_trait;

use crate::models::{ApiEnvelope, PlanEntry, RedemptionPayload, RedemptionRecord};

pub type ApiResult<T> = Result<T, ApiError>;

/// Endpoints the redemption editor depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionApi: Send + Sync {
    /// `GET /api/redemption/{id}`
    async fn get_redemption(&self, id: i64) -> ApiResult<ApiEnvelope<RedemptionRecord>>;

    /// `GET /api/subscription/admin/plans`
    async fn list_plans(&self) -> ApiResult<ApiEnvelope<Vec<PlanEntry>>>;

    /// `POST /api/redemption/`, data carries the generated codes
    async fn create_redemption(
        &self,
        payload: &RedemptionPayload,
    ) -> ApiResult<ApiEnvelope<Vec<String>>>;

    /// `PUT /api/redemption/`
    async fn update_redemption(
        &self,
        payload: &RedemptionPayload,
    ) -> ApiResult<ApiEnvelope<serde_json::Value>>;
}
