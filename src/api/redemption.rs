//! Redemption and plan endpoints

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument};

use super::client::ApiClient;
use super::{ApiResult, RedemptionApi};
use crate::models::{ApiEnvelope, PlanEntry, RedemptionPayload, RedemptionRecord};

const REDEMPTION_PATH: &str = "/api/redemption/";
const PLANS_PATH: &str = "/api/subscription/admin/plans";

#[async_trait]
impl RedemptionApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_redemption(&self, id: i64) -> ApiResult<ApiEnvelope<RedemptionRecord>> {
        let path = format!("{}{}", REDEMPTION_PATH, id);
        self.request::<(), _>(Method::GET, &path, None).await
    }

    #[instrument(skip(self))]
    async fn list_plans(&self) -> ApiResult<ApiEnvelope<Vec<PlanEntry>>> {
        let envelope: ApiEnvelope<Vec<PlanEntry>> =
            self.request::<(), _>(Method::GET, PLANS_PATH, None).await?;

        debug!(
            "Plans fetched: success={}, count={}",
            envelope.success,
            envelope.data.as_ref().map(Vec::len).unwrap_or(0)
        );

        Ok(envelope)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name, count = payload.count))]
    async fn create_redemption(
        &self,
        payload: &RedemptionPayload,
    ) -> ApiResult<ApiEnvelope<Vec<String>>> {
        let envelope: ApiEnvelope<Vec<String>> = self
            .request(Method::POST, REDEMPTION_PATH, Some(payload))
            .await?;

        if envelope.success {
            info!(
                "Redemption codes created: name={}, generated={}",
                payload.name,
                envelope.data.as_ref().map(Vec::len).unwrap_or(0)
            );
        }

        Ok(envelope)
    }

    #[instrument(skip(self, payload), fields(id = ?payload.id))]
    async fn update_redemption(
        &self,
        payload: &RedemptionPayload,
    ) -> ApiResult<ApiEnvelope<serde_json::Value>> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .request(Method::PUT, REDEMPTION_PATH, Some(payload))
            .await?;

        if envelope.success {
            info!("Redemption updated: id={:?}", payload.id);
        }

        Ok(envelope)
    }
}
