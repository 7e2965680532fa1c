use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::models::CampaignStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    En,
    Nl,
}

/// Every user-facing string the dashboard renders, one bundle per locale.
pub struct Messages {
    pub title: &'static str,
    pub summary_heading: &'static str,
    pub active_campaigns: &'static str,
    pub impressions: &'static str,
    pub clicks: &'static str,
    pub ctr: &'static str,
    pub campaigns_heading: &'static str,
    pub no_campaigns: &'static str,
    pub placements_heading: &'static str,
    pub no_placement_stats: &'static str,
    pub placement: &'static str,
    pub intent: &'static str,
    pub reach: &'static str,
    pub packages_heading: &'static str,
    pub no_packages: &'static str,
    pub popular: &'static str,
    pub days: &'static str,
    pub max_impressions: &'static str,
    pub days_left: &'static str,
    pub last_day: &'static str,
    pub expired: &'static str,
    pub awareness: &'static str,
    pub buyer: &'static str,
    pub draft: &'static str,
    pub pending_payment: &'static str,
    pub active: &'static str,
    pub paused: &'static str,
    pub completed: &'static str,
    pub cancelled: &'static str,
}

static EN: Messages = Messages {
    title: "Advertising dashboard",
    summary_heading: "Overview",
    active_campaigns: "Active campaigns",
    impressions: "Impressions",
    clicks: "Clicks",
    ctr: "CTR",
    campaigns_heading: "Your campaigns",
    no_campaigns: "No campaigns yet.",
    placements_heading: "Performance by placement",
    no_placement_stats: "No placement data yet.",
    placement: "Placement",
    intent: "Intent",
    reach: "Reach",
    packages_heading: "Advertising packages",
    no_packages: "No packages available.",
    popular: "Most popular",
    days: "days",
    max_impressions: "max impressions",
    days_left: "days left",
    last_day: "last day",
    expired: "Expired",
    awareness: "Awareness",
    buyer: "Buyer intent",
    draft: "Draft",
    pending_payment: "Awaiting payment",
    active: "Active",
    paused: "Paused",
    completed: "Completed",
    cancelled: "Cancelled",
};

static NL: Messages = Messages {
    title: "Advertentiedashboard",
    summary_heading: "Overzicht",
    active_campaigns: "Actieve campagnes",
    impressions: "Vertoningen",
    clicks: "Kliks",
    ctr: "CTR",
    campaigns_heading: "Jouw campagnes",
    no_campaigns: "Nog geen campagnes.",
    placements_heading: "Prestaties per plaatsing",
    no_placement_stats: "Nog geen plaatsingsdata.",
    placement: "Plaatsing",
    intent: "Intentie",
    reach: "Bereik",
    packages_heading: "Advertentiepakketten",
    no_packages: "Geen pakketten beschikbaar.",
    popular: "Meest gekozen",
    days: "dagen",
    max_impressions: "max. vertoningen",
    days_left: "dagen over",
    last_day: "laatste dag",
    expired: "Verlopen",
    awareness: "Naamsbekendheid",
    buyer: "Koopintentie",
    draft: "Concept",
    pending_payment: "Wacht op betaling",
    active: "Actief",
    paused: "Gepauzeerd",
    completed: "Afgerond",
    cancelled: "Geannuleerd",
};

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_NL: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

impl Locale {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Nl => &NL,
        }
    }

    pub fn status_label(&self, status: CampaignStatus) -> &'static str {
        let messages = self.messages();
        match status {
            CampaignStatus::Draft => messages.draft,
            CampaignStatus::PendingPayment => messages.pending_payment,
            CampaignStatus::Active => messages.active,
            CampaignStatus::Paused => messages.paused,
            CampaignStatus::Completed => messages.completed,
            CampaignStatus::Cancelled => messages.cancelled,
        }
    }
}

/// Formats a cent amount as euros: `€1,234.50` (en) or `€ 1.234,50` (nl).
pub fn format_price_cents(cents: i64, locale: Locale) -> String {
    let (group_sep, decimal_sep, prefix) = match locale {
        Locale::En => (',', '.', "€"),
        Locale::Nl => ('.', ',', "€ "),
    };

    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(digit);
    }

    format!("{sign}{prefix}{grouped}{decimal_sep}{fraction:02}")
}

pub fn format_short_date(date: NaiveDate, locale: Locale) -> String {
    let months = match locale {
        Locale::En => &MONTHS_EN,
        Locale::Nl => &MONTHS_NL,
    };
    format!("{} {}", date.day(), months[date.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_follow_locale_separators() {
        assert_eq!(format_price_cents(4900, Locale::En), "€49.00");
        assert_eq!(format_price_cents(4900, Locale::Nl), "€ 49,00");
        assert_eq!(format_price_cents(123_450, Locale::En), "€1,234.50");
        assert_eq!(format_price_cents(123_450, Locale::Nl), "€ 1.234,50");
        assert_eq!(format_price_cents(100_000_005, Locale::En), "€1,000,000.05");
    }

    #[test]
    fn negative_and_zero_prices() {
        assert_eq!(format_price_cents(0, Locale::En), "€0.00");
        assert_eq!(format_price_cents(-250, Locale::Nl), "-€ 2,50");
    }

    #[test]
    fn short_dates_use_localized_months() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        assert_eq!(format_short_date(date, Locale::En), "12 Mar");
        assert_eq!(format_short_date(date, Locale::Nl), "12 mrt");
    }

    #[test]
    fn status_labels_are_localized() {
        assert_eq!(
            Locale::Nl.status_label(CampaignStatus::PendingPayment),
            "Wacht op betaling"
        );
        assert_eq!(Locale::En.status_label(CampaignStatus::Active), "Active");
    }
}
