use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    PendingPayment,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::PendingPayment => "pending_payment",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(CampaignStatus::Draft),
            "pending_payment" => Ok(CampaignStatus::PendingPayment),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            "cancelled" => Ok(CampaignStatus::Cancelled),
            other => anyhow::bail!("unknown campaign status `{other}`"),
        }
    }
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub headline: String,
    pub status: CampaignStatus,
    pub impressions: i64,
    pub clicks: i64,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// One pre-aggregated row per placement. Numeric columns come back NULL
/// when a placement has no events yet.
#[derive(Debug, Clone)]
pub struct PlacementStat {
    pub placement: String,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub ctr: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AdPackage {
    pub key: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_days: i32,
    pub included_placements: String,
    pub max_impressions: Option<i64>,
    pub is_popular: bool,
}

#[derive(Debug, Clone)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub active_count: usize,
    pub total_impressions: i64,
    pub total_clicks: i64,
    pub overall_ctr_percent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStatus {
    pub is_expired: bool,
    pub days_left: Option<i64>,
}
