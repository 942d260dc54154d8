// src/models/redemption.rs
//! Redemption code model
//!
//! A redemption code is a voucher redeemable either for wallet quota or
//! for a subscription plan (`plan_id > 0`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a redemption name, in Unicode code points
pub const REDEMPTION_NAME_MAX_CHARS: usize = 20;

/// Redemption record as returned by `GET /api/redemption/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedemptionRecord {
    pub id: i64,
    pub user_id: i64,
    pub key: String,
    pub status: i32,
    pub name: String,
    pub quota: i64,
    /// 0 = wallet quota, >0 = subscription plan
    pub plan_id: i64,
    pub created_time: i64,
    pub redeemed_time: i64,
    /// Only meaningful in create requests; the server echoes 0
    pub count: i64,
    pub used_user_id: i64,
    /// Epoch seconds, 0 means the code never expires
    pub expired_time: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionStatus {
    Enabled,
    Disabled,
    Used,
    Unknown(i32),
}

impl RedemptionStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => RedemptionStatus::Enabled,
            2 => RedemptionStatus::Disabled,
            3 => RedemptionStatus::Used,
            other => RedemptionStatus::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RedemptionStatus::Enabled => "enabled",
            RedemptionStatus::Disabled => "disabled",
            RedemptionStatus::Used => "used",
            RedemptionStatus::Unknown(_) => "unknown",
        }
    }
}

impl RedemptionRecord {
    pub fn status(&self) -> RedemptionStatus {
        RedemptionStatus::from_code(self.status)
    }

    /// Expiry as a date-time, `None` when the code never expires
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expired_time == 0 {
            return None;
        }
        DateTime::from_timestamp(self.expired_time, 0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expired_time != 0 && self.expired_time < now.timestamp()
    }
}

/// Normalized create/update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionPayload {
    /// Present only on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub quota: i64,
    pub plan_id: i64,
    pub count: i64,
    pub expired_time: i64,
    /// Carried over from the loaded record on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl RedemptionPayload {
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}
