use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AdPackage, Business, Campaign, CampaignStatus, PlacementStat};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("migrations applied");
    Ok(())
}

async fn upsert_business(pool: &PgPool, slug: &str, name: &str) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO ad_dashboard.businesses (id, name, slug)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await?
    .get("id");
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn upsert_campaign(
    pool: &PgPool,
    business_id: Uuid,
    source_key: &str,
    name: &str,
    headline: &str,
    status: CampaignStatus,
    impressions: i64,
    clicks: i64,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> anyhow::Result<Uuid> {
    let row = sqlx::query(
        r#"
        INSERT INTO ad_dashboard.campaigns
        (id, business_id, source_key, name, headline, status, impressions, clicks, starts_at, ends_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (source_key) DO UPDATE
        SET name = EXCLUDED.name,
            headline = EXCLUDED.headline,
            status = EXCLUDED.status,
            impressions = EXCLUDED.impressions,
            clicks = EXCLUDED.clicks,
            starts_at = EXCLUDED.starts_at,
            ends_at = EXCLUDED.ends_at
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(business_id)
    .bind(source_key)
    .bind(name)
    .bind(headline)
    .bind(status.as_str())
    .bind(impressions)
    .bind(clicks)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to upsert campaign `{source_key}`"))?;

    Ok(row.get("id"))
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let business_id = upsert_business(pool, "pawsome-grooming", "Pawsome Grooming").await?;

    let packages = vec![
        (
            "starter",
            "Starter",
            "Get noticed next to our pet care articles.",
            2900i64,
            30,
            "blog_sidebar,blog_inline",
            Some(5_000i64),
            false,
        ),
        (
            "local_boost",
            "Local boost",
            "Reach pet owners who are looking for a service nearby.",
            7900,
            30,
            "directory_sidebar,search_results",
            Some(15_000),
            true,
        ),
        (
            "spotlight",
            "Spotlight",
            "Every placement including the homepage.",
            19900,
            30,
            "homepage_featured,search_results,directory_sidebar,blog_sidebar,blog_inline",
            None,
            false,
        ),
    ];

    for (key, name, description, price_cents, duration_days, placements, max_impressions, is_popular) in
        packages
    {
        sqlx::query(
            r#"
            INSERT INTO ad_dashboard.ad_packages
            (id, key, name, description, price_cents, duration_days, included_placements, max_impressions, is_popular)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (key) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                price_cents = EXCLUDED.price_cents,
                duration_days = EXCLUDED.duration_days,
                included_placements = EXCLUDED.included_placements,
                max_impressions = EXCLUDED.max_impressions,
                is_popular = EXCLUDED.is_popular
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(key)
        .bind(name)
        .bind(description)
        .bind(price_cents)
        .bind(duration_days)
        .bind(placements)
        .bind(max_impressions)
        .bind(is_popular)
        .execute(pool)
        .await?;
    }

    let now = Utc::now();
    let campaigns = vec![
        (
            "seed-spring",
            "Spring grooming",
            "Fresh coat for spring, 10% off the first visit",
            CampaignStatus::Active,
            12_400i64,
            248i64,
            Some(now - Duration::days(20)),
            Some(now + Duration::days(10)),
            vec![("search_results", 7_100i64, 181i64), ("directory_sidebar", 5_300, 67)],
        ),
        (
            "seed-winter",
            "Winter paw care",
            "Protect paws against road salt",
            CampaignStatus::Active,
            3_050,
            31,
            Some(now - Duration::days(40)),
            Some(now - Duration::days(2)),
            vec![("blog_sidebar", 3_050, 31)],
        ),
        (
            "seed-puppy",
            "Puppy first cut",
            "Gentle first grooming for puppies",
            CampaignStatus::PendingPayment,
            0,
            0,
            None,
            None,
            vec![],
        ),
    ];

    for (source_key, name, headline, status, impressions, clicks, starts_at, ends_at, events) in campaigns {
        let campaign_id = upsert_campaign(
            pool,
            business_id,
            source_key,
            name,
            headline,
            status,
            impressions,
            clicks,
            starts_at,
            ends_at,
        )
        .await?;

        for (placement, placement_impressions, placement_clicks) in events {
            sqlx::query(
                r#"
                INSERT INTO ad_dashboard.placement_events (campaign_id, placement, impressions, clicks)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (campaign_id, placement) DO UPDATE
                SET impressions = EXCLUDED.impressions, clicks = EXCLUDED.clicks
                "#,
            )
            .bind(campaign_id)
            .bind(placement)
            .bind(placement_impressions)
            .bind(placement_clicks)
            .execute(pool)
            .await?;
        }
    }

    info!(%business_id, "seeded demo business");
    Ok(())
}

/// Key for CSV rows without a `source_key`, stable across re-imports.
fn fallback_source_key(business_slug: &str, name: &str) -> String {
    format!("import-{business_slug}-{name}")
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        business_slug: String,
        business_name: String,
        name: String,
        headline: String,
        status: CampaignStatus,
        impressions: i64,
        clicks: i64,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut upserted = 0usize;

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid campaign row {}", line + 1))?;
        let business_id = upsert_business(pool, &row.business_slug, &row.business_name).await?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| fallback_source_key(&row.business_slug, &row.name));

        upsert_campaign(
            pool,
            business_id,
            &source_key,
            &row.name,
            &row.headline,
            row.status,
            row.impressions,
            row.clicks,
            row.starts_at,
            row.ends_at,
        )
        .await?;
        debug!(%source_key, "campaign upserted");
        upserted += 1;
    }

    Ok(upserted)
}

pub async fn fetch_business(pool: &PgPool, slug: &str) -> anyhow::Result<Business> {
    let row = sqlx::query("SELECT id, name FROM ad_dashboard.businesses WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("no business with slug `{slug}`"))?;

    Ok(Business {
        id: row.get("id"),
        name: row.get("name"),
    })
}

pub async fn fetch_campaigns(pool: &PgPool, business_id: Uuid) -> anyhow::Result<Vec<Campaign>> {
    let records = sqlx::query(
        "SELECT id, name, headline, status, impressions, clicks, starts_at, ends_at \
         FROM ad_dashboard.campaigns \
         WHERE business_id = $1 \
         ORDER BY created_at DESC",
    )
    .bind(business_id)
    .fetch_all(pool)
    .await?;

    let mut campaigns = Vec::with_capacity(records.len());
    for row in records {
        let id: Uuid = row.get("id");
        let status: String = row.get("status");
        campaigns.push(Campaign {
            id,
            name: row.get("name"),
            headline: row.get("headline"),
            status: status
                .parse()
                .with_context(|| format!("campaign {id} has an unreadable status"))?,
            impressions: row.get("impressions"),
            clicks: row.get("clicks"),
            starts_at: row.get("starts_at"),
            ends_at: row.get("ends_at"),
        });
    }

    debug!(count = campaigns.len(), "campaigns fetched");
    Ok(campaigns)
}

pub async fn fetch_placement_stats(
    pool: &PgPool,
    business_id: Uuid,
) -> anyhow::Result<Vec<PlacementStat>> {
    let records = sqlx::query(
        r#"
        SELECT pe.placement,
               SUM(pe.impressions)::BIGINT AS impressions,
               SUM(pe.clicks)::BIGINT AS clicks,
               CASE WHEN SUM(pe.impressions) > 0
                    THEN SUM(pe.clicks)::FLOAT8 / SUM(pe.impressions)::FLOAT8 * 100
               END AS ctr
        FROM ad_dashboard.placement_events pe
        JOIN ad_dashboard.campaigns c ON c.id = pe.campaign_id
        WHERE c.business_id = $1
        GROUP BY pe.placement
        ORDER BY impressions DESC NULLS LAST
        "#,
    )
    .bind(business_id)
    .fetch_all(pool)
    .await?;

    Ok(records
        .into_iter()
        .map(|row| PlacementStat {
            placement: row.get("placement"),
            impressions: row.get("impressions"),
            clicks: row.get("clicks"),
            ctr: row.get("ctr"),
        })
        .collect())
}

pub async fn fetch_packages(pool: &PgPool) -> anyhow::Result<Vec<AdPackage>> {
    let records = sqlx::query(
        "SELECT key, name, description, price_cents, duration_days, \
         included_placements, max_impressions, is_popular \
         FROM ad_dashboard.ad_packages \
         ORDER BY price_cents ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(records
        .into_iter()
        .map(|row| AdPackage {
            key: row.get("key"),
            name: row.get("name"),
            description: row.get("description"),
            price_cents: row.get("price_cents"),
            duration_days: row.get("duration_days"),
            included_placements: row.get("included_placements"),
            max_impressions: row.get("max_impressions"),
            is_popular: row.get("is_popular"),
        })
        .collect())
}

/// Everything the dashboard renders for one business, fetched concurrently.
pub async fn fetch_dashboard(
    pool: &PgPool,
    business_id: Uuid,
) -> anyhow::Result<(Vec<Campaign>, Vec<PlacementStat>, Vec<AdPackage>)> {
    tokio::try_join!(
        fetch_campaigns(pool, business_id),
        fetch_placement_stats(pool, business_id),
        fetch_packages(pool),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_key_is_stable_across_imports() {
        let first = fallback_source_key("happy-tails-sitting", "Autumn walks");
        let second = fallback_source_key("happy-tails-sitting", "Autumn walks");
        assert_eq!(first, second);
        assert_eq!(first, "import-happy-tails-sitting-Autumn walks");
        assert_ne!(first, fallback_source_key("pawsome-grooming", "Autumn walks"));
    }
}
