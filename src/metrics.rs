use chrono::{DateTime, Utc};

use crate::locale::Locale;
use crate::models::{Campaign, CampaignStatus, PlacementStat, Summary, TimeStatus};
use crate::placements::{PlacementInfo, PlacementLabel};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedStat {
    pub placement: PlacementLabel,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr_display: String,
}

pub fn summarize(campaigns: &[Campaign]) -> Summary {
    let active_count = campaigns
        .iter()
        .filter(|campaign| campaign.status == CampaignStatus::Active)
        .count();
    let total_impressions: i64 = campaigns.iter().map(|campaign| campaign.impressions).sum();
    let total_clicks: i64 = campaigns.iter().map(|campaign| campaign.clicks).sum();

    Summary {
        active_count,
        total_impressions,
        total_clicks,
        overall_ctr_percent: ctr_percent(total_clicks, total_impressions),
    }
}

/// `"X.XX%"` when there were impressions, otherwise the bare `"0%"`.
pub fn ctr_percent(clicks: i64, impressions: i64) -> String {
    if impressions > 0 {
        format!("{}%", two_decimals(clicks as f64 / impressions as f64 * 100.0))
    } else {
        "0%".to_string()
    }
}

/// Two decimals with ties rounded away from zero, so 0.125 reads "0.13".
fn two_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

pub fn decorate_placement_stats(
    stats: &[PlacementStat],
    table: &[PlacementInfo],
    locale: Locale,
) -> Vec<DecoratedStat> {
    stats
        .iter()
        .map(|stat| DecoratedStat {
            placement: PlacementLabel::resolve(table, &stat.placement, locale),
            impressions: stat.impressions.unwrap_or(0),
            clicks: stat.clicks.unwrap_or(0),
            ctr_display: two_decimals(stat.ctr.unwrap_or(0.0)),
        })
        .collect()
}

pub fn campaign_time_status(campaign: &Campaign, now: DateTime<Utc>) -> TimeStatus {
    let Some(ends_at) = campaign.ends_at else {
        return TimeStatus {
            is_expired: false,
            days_left: None,
        };
    };

    let remaining_ms = (ends_at - now).num_milliseconds();
    let days_left = if remaining_ms <= 0 {
        0
    } else {
        (remaining_ms + DAY_MS - 1) / DAY_MS
    };

    TimeStatus {
        is_expired: ends_at < now,
        days_left: Some(days_left),
    }
}

/// Countdown shown next to an active campaign. An active campaign whose end
/// date has passed reads "Expired" rather than a countdown.
pub fn countdown_label(
    status: CampaignStatus,
    time_status: TimeStatus,
    locale: Locale,
) -> Option<String> {
    if status != CampaignStatus::Active {
        return None;
    }

    let messages = locale.messages();
    if time_status.is_expired {
        return Some(messages.expired.to_string());
    }

    match time_status.days_left {
        Some(0) => Some(messages.last_day.to_string()),
        Some(days) => Some(format!("{} {}", days, messages.days_left)),
        None => None,
    }
}
