use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A published article, normalized from the platform API.
///
/// Counts are never absent: the fetcher coerces missing or null values to 0
/// before an `Article` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub page_views: u64,
    pub positive_reactions: u64,
    pub comments: u64,
    pub reading_time_minutes: u32,
    pub tags: Vec<String>,
}

impl Article {
    /// Reactions plus comments, used for ranking.
    pub fn engagement(&self) -> u64 {
        self.positive_reactions + self.comments
    }

    /// Engagement as a percentage of views, 0 when the article has no views.
    pub fn engagement_rate(&self) -> f64 {
        if self.page_views == 0 {
            return 0.0;
        }
        self.engagement() as f64 / self.page_views as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Views,
    Reactions,
    Comments,
    Engagement,
}

impl SortKey {
    pub fn value(&self, article: &Article) -> u64 {
        match self {
            SortKey::Views => article.page_views,
            SortKey::Reactions => article.positive_reactions,
            SortKey::Comments => article.comments,
            SortKey::Engagement => article.engagement(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Views => "views",
            SortKey::Reactions => "reactions",
            SortKey::Comments => "comments",
            SortKey::Engagement => "engagement",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn article(id: u64, views: u64, reactions: u64, comments: u64) -> Article {
        Article {
            id,
            title: format!("Article {}", id),
            url: format!("https://dev.to/someone/article-{}", id),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            page_views: views,
            positive_reactions: reactions,
            comments,
            reading_time_minutes: 4,
            tags: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::article;
    use super::*;

    #[test]
    fn test_engagement_rate_zero_views() {
        let a = article(1, 0, 3, 2);
        assert_eq!(a.engagement(), 5);
        assert_eq!(a.engagement_rate(), 0.0);
    }

    #[test]
    fn test_engagement_rate() {
        let a = article(1, 200, 8, 2);
        assert!((a.engagement_rate() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sort_key_engagement_is_absolute() {
        let a = article(1, 1000, 7, 3);
        assert_eq!(SortKey::Engagement.value(&a), 10);
        assert_eq!(SortKey::Views.to_string(), "views");
    }
}
