use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::locale::{format_price_cents, format_short_date, Locale};
use crate::metrics;
use crate::models::{AdPackage, Business, Campaign, PlacementStat};
use crate::placements::{self, PLACEMENTS};

fn date_range(campaign: &Campaign, locale: Locale) -> String {
    let short = |value: Option<DateTime<Utc>>| {
        value
            .map(|at| format_short_date(at.date_naive(), locale))
            .unwrap_or_else(|| "-".to_string())
    };
    format!("{} – {}", short(campaign.starts_at), short(campaign.ends_at))
}

pub fn write_campaigns(
    output: &mut String,
    campaigns: &[Campaign],
    locale: Locale,
    now: DateTime<Utc>,
) {
    let messages = locale.messages();
    let _ = writeln!(output, "## {}", messages.campaigns_heading);

    if campaigns.is_empty() {
        let _ = writeln!(output, "{}", messages.no_campaigns);
        return;
    }

    for campaign in campaigns {
        let time_status = metrics::campaign_time_status(campaign, now);
        let mut line = format!(
            "- **{}** ({}) {} · {}",
            campaign.name,
            locale.status_label(campaign.status),
            campaign.headline,
            date_range(campaign, locale)
        );
        if let Some(countdown) = metrics::countdown_label(campaign.status, time_status, locale) {
            let _ = write!(line, " · {countdown}");
        }
        let _ = writeln!(
            output,
            "{} · {} {} / {} {} / {} {}",
            line,
            campaign.impressions,
            messages.impressions.to_lowercase(),
            campaign.clicks,
            messages.clicks.to_lowercase(),
            messages.ctr,
            metrics::ctr_percent(campaign.clicks, campaign.impressions)
        );
    }
}

pub fn write_placement_stats(output: &mut String, stats: &[PlacementStat], locale: Locale) {
    let messages = locale.messages();
    let _ = writeln!(output, "## {}", messages.placements_heading);

    let decorated = metrics::decorate_placement_stats(stats, &PLACEMENTS, locale);
    if decorated.is_empty() {
        let _ = writeln!(output, "{}", messages.no_placement_stats);
        return;
    }

    let _ = writeln!(
        output,
        "| {} | {} | {} | {} | {} (%) |",
        messages.placement, messages.intent, messages.impressions, messages.clicks, messages.ctr
    );
    let _ = writeln!(output, "|---|---|---:|---:|---:|");
    for row in decorated {
        let _ = writeln!(
            output,
            "| [{}] {} | {} | {} | {} | {} |",
            row.placement.icon,
            row.placement.label,
            row.placement.display_intent().label(locale),
            row.impressions,
            row.clicks,
            row.ctr_display
        );
    }
}

pub fn write_packages(output: &mut String, packages: &[AdPackage], locale: Locale) {
    let messages = locale.messages();
    let _ = writeln!(output, "## {}", messages.packages_heading);

    if packages.is_empty() {
        let _ = writeln!(output, "{}", messages.no_packages);
        return;
    }

    for package in packages {
        let badge = if package.is_popular {
            format!(" ({})", messages.popular)
        } else {
            String::new()
        };
        let _ = writeln!(
            output,
            "### {}{} `{}` · {} / {} {}",
            package.name,
            badge,
            package.key,
            format_price_cents(package.price_cents, locale),
            package.duration_days,
            messages.days
        );
        let _ = writeln!(output, "{}", package.description);
        if let Some(max) = package.max_impressions {
            let _ = writeln!(output, "{}: {}", messages.max_impressions, max);
        }
        for placement in placements::included_placements(&package.included_placements, locale) {
            let _ = write!(
                output,
                "- [{}] {} ({})",
                placement.icon,
                placement.label,
                placement.display_intent().label(locale)
            );
            match (placement.reach, placement.description) {
                (Some(reach), Some(description)) => {
                    let _ = writeln!(output, ": {description} {}: {reach}", messages.reach);
                }
                _ => {
                    let _ = writeln!(output);
                }
            }
        }
        let _ = writeln!(output);
    }
}

pub fn build_dashboard(
    business: &Business,
    locale: Locale,
    now: DateTime<Utc>,
    campaigns: &[Campaign],
    stats: &[PlacementStat],
    packages: &[AdPackage],
) -> String {
    let messages = locale.messages();
    let summary = metrics::summarize(campaigns);
    let mut output = String::new();

    let _ = writeln!(output, "# {} · {}", messages.title, business.name);
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", messages.summary_heading);
    let _ = writeln!(output, "- {}: {}", messages.active_campaigns, summary.active_count);
    let _ = writeln!(output, "- {}: {}", messages.impressions, summary.total_impressions);
    let _ = writeln!(output, "- {}: {}", messages.clicks, summary.total_clicks);
    let _ = writeln!(output, "- {}: {}", messages.ctr, summary.overall_ctr_percent);
    let _ = writeln!(output);

    write_campaigns(&mut output, campaigns, locale, now);
    let _ = writeln!(output);
    write_placement_stats(&mut output, stats, locale);
    let _ = writeln!(output);
    write_packages(&mut output, packages, locale);

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignStatus;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 12, 9, 0, 0).unwrap()
    }

    fn business() -> Business {
        Business {
            id: Uuid::new_v4(),
            name: "Pawsome Grooming".to_string(),
        }
    }

    fn campaign(status: CampaignStatus, ends_in_days: i64) -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            name: "Spring grooming".to_string(),
            headline: "Fresh coat for spring".to_string(),
            status,
            impressions: 1000,
            clicks: 20,
            starts_at: Some(now() - Duration::days(10)),
            ends_at: Some(now() + Duration::days(ends_in_days)),
        }
    }

    fn package() -> AdPackage {
        AdPackage {
            key: "local_boost".to_string(),
            name: "Local boost".to_string(),
            description: "Reach pet owners searching nearby.".to_string(),
            price_cents: 4900,
            duration_days: 30,
            included_placements: "directory_sidebar,search_results,podcast".to_string(),
            max_impressions: Some(10_000),
            is_popular: true,
        }
    }

    #[test]
    fn empty_dashboard_has_placeholders() {
        let report = build_dashboard(&business(), Locale::En, now(), &[], &[], &[]);
        assert!(report.contains("- CTR: 0%"));
        assert!(report.contains("No campaigns yet."));
        assert!(report.contains("No placement data yet."));
        assert!(report.contains("No packages available."));
    }

    #[test]
    fn dashboard_lists_countdown_and_expired() {
        let campaigns = vec![
            campaign(CampaignStatus::Active, 3),
            campaign(CampaignStatus::Active, -1),
        ];
        let report = build_dashboard(&business(), Locale::En, now(), &campaigns, &[], &[]);
        assert!(report.contains("3 days left"));
        assert!(report.contains("Expired"));
        assert!(report.contains("2 Mar – 15 Mar"));
        assert!(report.contains("- Active campaigns: 2"));
        assert!(report.contains("CTR 2.00%"));
    }

    #[test]
    fn dutch_dashboard_formats_prices_and_placements() {
        let report = build_dashboard(&business(), Locale::Nl, now(), &[], &[], &[package()]);
        assert!(report.contains("### Local boost (Meest gekozen) `local_boost` · € 49,00 / 30 dagen"));
        assert!(report.contains("max. vertoningen: 10000"));
        assert!(report.contains("- [map-pin] Gids zijbalk (Koopintentie)"));
        assert!(report.contains("- [megaphone] podcast (Naamsbekendheid)"));
    }

    #[test]
    fn placement_table_renders_missing_ctr() {
        let stats = vec![PlacementStat {
            placement: "homepage_featured".to_string(),
            impressions: Some(50),
            clicks: None,
            ctr: None,
        }];
        let report = build_dashboard(&business(), Locale::En, now(), &[], &stats, &[]);
        assert!(report.contains("| [star] Homepage featured | Awareness | 50 | 0 | 0.00 |"));
    }
}
