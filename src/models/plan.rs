// src/models/plan.rs
//! Subscription plan references
//!
//! Plans are read-only here: they only populate the plan selector and
//! provide a default redemption name.

use serde::{Deserialize, Serialize};

/// One element of `GET /api/subscription/admin/plans`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanEntry {
    #[serde(default)]
    pub plan: Option<PlanSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Selectable plan option (`{label, value}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOption {
    pub label: String,
    pub value: i64,
}

impl PlanEntry {
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            plan: Some(PlanSummary {
                id: Some(id),
                title: Some(title.to_string()),
            }),
        }
    }

    /// Convert to a selector option; entries without a usable id yield `None`
    pub fn to_option(&self) -> Option<PlanOption> {
        let plan = self.plan.as_ref()?;
        let id = plan.id.filter(|id| *id != 0)?;

        let label = match plan.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("#{}", id),
        };

        Some(PlanOption { label, value: id })
    }
}
