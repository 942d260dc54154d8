//! Plan catalogue for the plan selector

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiError, RedemptionApi};
use crate::models::PlanOption;

#[derive(Debug, Error)]
pub enum PlanLoadError {
    /// The backend answered `success=false`
    #[error("plan list rejected: {0}")]
    Rejected(String),

    #[error("plan list request failed: {0}")]
    Request(#[from] ApiError),
}

/// Selectable plans, refreshed every time the editor opens
#[derive(Debug, Clone, Default)]
pub struct PlanCatalogue {
    options: Vec<PlanOption>,
    loading: bool,
}

impl PlanCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[PlanOption] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label of the option whose value is `plan_id`
    pub fn label_for(&self, plan_id: i64) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == plan_id)
            .map(|option| option.label.as_str())
    }

    /// Clears the loading flag of a fetch whose future was dropped
    pub(crate) fn abandon_load(&mut self) {
        self.loading = false;
    }

    /// Fetches the plan list; on any failure the options are cleared
    pub async fn load(&mut self, api: &dyn RedemptionApi) -> Result<usize, PlanLoadError> {
        self.loading = true;
        let result = self.fetch(api).await;
        self.loading = false;

        match result {
            Ok(options) => {
                debug!("Plan options loaded: count={}", options.len());
                self.options = options;
                Ok(self.options.len())
            }
            Err(e) => {
                warn!("Failed to load plan options: {}", e);
                self.options.clear();
                Err(e)
            }
        }
    }

    async fn fetch(&self, api: &dyn RedemptionApi) -> Result<Vec<PlanOption>, PlanLoadError> {
        let envelope = api.list_plans().await?;
        if !envelope.success {
            return Err(PlanLoadError::Rejected(envelope.message));
        }

        Ok(envelope
            .data
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| entry.to_option())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRedemptionApi;
    use crate::models::{ApiEnvelope, PlanEntry};

    #[tokio::test]
    async fn test_load_skips_entries_without_id() {
        let mut api = MockRedemptionApi::new();
        api.expect_list_plans().times(1).returning(|| {
            Ok(ApiEnvelope::ok(vec![
                PlanEntry::new(1, "Basic"),
                PlanEntry::default(),
                PlanEntry::new(0, "Broken"),
                PlanEntry::new(2, "Pro Plan"),
            ]))
        });

        let mut catalogue = PlanCatalogue::new();
        let count = catalogue.load(&api).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(catalogue.label_for(2), Some("Pro Plan"));
        assert_eq!(catalogue.label_for(0), None);
        assert!(!catalogue.is_loading());
    }

    #[tokio::test]
    async fn test_rejection_clears_options() {
        let mut api = MockRedemptionApi::new();
        let mut calls = 0;
        api.expect_list_plans().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(ApiEnvelope::ok(vec![PlanEntry::new(1, "Basic")]))
            } else {
                Ok(ApiEnvelope::failure("forbidden"))
            }
        });

        let mut catalogue = PlanCatalogue::new();
        catalogue.load(&api).await.unwrap();
        assert_eq!(catalogue.options().len(), 1);

        let err = catalogue.load(&api).await.unwrap_err();
        assert!(matches!(err, PlanLoadError::Rejected(ref m) if m == "forbidden"));
        assert!(catalogue.options().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_clears_options() {
        let mut api = MockRedemptionApi::new();
        api.expect_list_plans()
            .returning(|| Err(ApiError::Connection("refused".to_string())));

        let mut catalogue = PlanCatalogue::new();
        let err = catalogue.load(&api).await.unwrap_err();

        assert!(matches!(err, PlanLoadError::Request(_)));
        assert!(catalogue.options().is_empty());
    }
}
