//! Aggregations over an in-memory article set.
//!
//! Every function here is pure: the result depends only on the articles and
//! parameters passed in, and an empty article set is always valid input.

use std::collections::{BTreeMap, HashMap};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use crate::config::ReadingTimeBucket;
use crate::types::{Article, SortKey};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_articles: u64,
    pub total_views: u64,
    pub total_reactions: u64,
    pub total_comments: u64,
    pub avg_views_per_article: f64,
    /// (reactions + comments) / views * 100 over the whole set.
    pub engagement_rate: f64,
    pub avg_engagement_per_article: f64,
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub fn overview(articles: &[Article]) -> MetricsSnapshot {
    let total_articles = articles.len() as u64;
    let total_views: u64 = articles.iter().map(|a| a.page_views).sum();
    let total_reactions: u64 = articles.iter().map(|a| a.positive_reactions).sum();
    let total_comments: u64 = articles.iter().map(|a| a.comments).sum();
    let total_engagement = total_reactions + total_comments;

    MetricsSnapshot {
        total_articles,
        total_views,
        total_reactions,
        total_comments,
        avg_views_per_article: ratio(total_views, total_articles),
        engagement_rate: ratio(total_engagement, total_views) * 100.0,
        avg_engagement_per_article: ratio(total_engagement, total_articles),
    }
}

/// The `n` best articles by `sort_key`, highest first.
///
/// Ties keep their original order (`sort_by` is stable).
pub fn top_performers(articles: &[Article], n: usize, sort_key: SortKey) -> Vec<&Article> {
    let mut ranked: Vec<&Article> = articles.iter().collect();
    ranked.sort_by(|a, b| sort_key.value(b).cmp(&sort_key.value(a)));
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagStats {
    pub tag: String,
    pub articles: u64,
    pub total_views: u64,
    pub avg_views: f64,
    pub total_reactions: u64,
    pub total_comments: u64,
}

/// Per-tag totals. An article counts toward every tag it carries.
///
/// Sorted by average views descending, then tag name ascending.
pub fn tag_analysis(articles: &[Article]) -> Vec<TagStats> {
    let mut by_tag: HashMap<&str, TagStats> = HashMap::new();

    for article in articles {
        for tag in &article.tags {
            let stats = by_tag.entry(tag.as_str()).or_insert_with(|| TagStats {
                tag: tag.clone(),
                articles: 0,
                total_views: 0,
                avg_views: 0.0,
                total_reactions: 0,
                total_comments: 0,
            });
            stats.articles += 1;
            stats.total_views += article.page_views;
            stats.total_reactions += article.positive_reactions;
            stats.total_comments += article.comments;
        }
    }

    let mut tags: Vec<TagStats> = by_tag
        .into_values()
        .map(|mut stats| {
            stats.avg_views = ratio(stats.total_views, stats.articles);
            stats
        })
        .collect();
    tags.sort_by(|a, b| {
        b.avg_views
            .total_cmp(&a.avg_views)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    tags
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTimeStats {
    pub label: String,
    pub articles: u64,
    pub avg_views: f64,
    pub avg_reactions: f64,
}

/// Average performance per reading-time bucket.
///
/// An article goes to the first bucket containing its reading time. Every
/// bucket is reported, empty ones with zeros.
pub fn reading_time_analysis(articles: &[Article], buckets: &[ReadingTimeBucket]) -> Vec<ReadingTimeStats> {
    let mut totals = vec![(0u64, 0u64, 0u64); buckets.len()];

    for article in articles {
        if let Some(idx) = buckets
            .iter()
            .position(|b| b.contains(article.reading_time_minutes))
        {
            let (count, views, reactions) = &mut totals[idx];
            *count += 1;
            *views += article.page_views;
            *reactions += article.positive_reactions;
        }
    }

    buckets
        .iter()
        .zip(totals)
        .map(|(bucket, (count, views, reactions))| ReadingTimeStats {
            label: bucket.label.clone(),
            articles: count,
            avg_views: ratio(views, count),
            avg_reactions: ratio(reactions, count),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub articles: u64,
    pub total_views: u64,
    pub total_reactions: u64,
    pub total_comments: u64,
}

impl MonthlyStats {
    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Totals per calendar month (UTC) of publication, oldest first.
/// Months without articles are omitted.
pub fn growth_trends(articles: &[Article]) -> Vec<MonthlyStats> {
    let mut months: BTreeMap<(i32, u32), MonthlyStats> = BTreeMap::new();

    for article in articles {
        let key = (article.published_at.year(), article.published_at.month());
        let stats = months.entry(key).or_insert_with(|| MonthlyStats {
            year: key.0,
            month: key.1,
            articles: 0,
            total_views: 0,
            total_reactions: 0,
            total_comments: 0,
        });
        stats.articles += 1;
        stats.total_views += article.page_views;
        stats.total_reactions += article.positive_reactions;
        stats.total_comments += article.comments;
    }

    months.into_values().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnderperformerThresholds {
    pub views: f64,
    pub engagement: f64,
}

impl UnderperformerThresholds {
    /// Thresholds at `ratio` of the dataset's average views and average
    /// per-article engagement.
    pub fn from_snapshot(snapshot: &MetricsSnapshot, ratio: f64) -> Self {
        Self {
            views: snapshot.avg_views_per_article * ratio,
            engagement: snapshot.avg_engagement_per_article * ratio,
        }
    }

    /// Replaces the derived values with explicit ones where given.
    pub fn with_overrides(self, views: Option<f64>, engagement: Option<f64>) -> Self {
        Self {
            views: views.unwrap_or(self.views),
            engagement: engagement.unwrap_or(self.engagement),
        }
    }
}

/// An article underperforms only when it is below BOTH thresholds; either
/// condition alone must not flag it.
pub fn is_underperforming(article: &Article, thresholds: &UnderperformerThresholds) -> bool {
    let low_views = (article.page_views as f64) < thresholds.views;
    let low_engagement = (article.engagement() as f64) < thresholds.engagement;
    low_views && low_engagement
}

pub fn underperformers<'a>(articles: &'a [Article], thresholds: &UnderperformerThresholds) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| is_underperforming(a, thresholds))
        .collect()
}
