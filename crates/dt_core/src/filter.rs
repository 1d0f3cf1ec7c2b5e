use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use crate::types::Article;

/// Keeps the articles published within the last `days` days before `now`.
///
/// `None` returns the input unchanged. The cutoff is inclusive, so an article
/// published exactly `days * 24h` ago is kept. A window reaching past the
/// earliest representable date keeps everything. Order is preserved.
pub fn filter_by_days(articles: &[Article], days: Option<u32>, now: DateTime<Utc>) -> Vec<Article> {
    let Some(days) = days else {
        return articles.to_vec();
    };

    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let filtered: Vec<Article> = articles
        .iter()
        .filter(|a| a.published_at >= cutoff)
        .cloned()
        .collect();

    debug!(
        "Kept {}/{} articles published since {}",
        filtered.len(),
        articles.len(),
        cutoff
    );
    filtered
}

/// Human readable name of the reporting period.
pub fn period_label(days: Option<u32>) -> String {
    match days {
        Some(days) => format!("last {} days", days),
        None => "all time".to_string(),
    }
}
