//! Console rendering of the analyses.
//!
//! Each `render_*` function returns the finished section as a string and
//! performs no computation beyond formatting. Empty inputs still produce a
//! section, with explicit zeros or a "nothing here" line.

use dt_core::metrics::{MonthlyStats, ReadingTimeStats, TagStats};
use dt_core::{Article, MetricsSnapshot, SortKey, UnderperformerThresholds};

const TITLE_WIDTH: usize = 70;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn thin_rule(width: usize) -> String {
    "-".repeat(width)
}

fn header(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n", title, rule(width))
}

/// `1234567` -> `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn truncate_title(title: &str) -> String {
    title.chars().take(TITLE_WIDTH).collect()
}

pub fn render_overview(snapshot: &MetricsSnapshot, period: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", rule(60)));
    out.push_str(&format!("📊 ANALYTICS OVERVIEW ({})\n", period));
    out.push_str(&format!("{}\n", rule(60)));
    out.push_str(&format!("📝 Total Articles:      {}\n", snapshot.total_articles));
    out.push_str(&format!("👀 Total Views:         {}\n", format_count(snapshot.total_views)));
    out.push_str(&format!("❤️  Total Reactions:     {}\n", format_count(snapshot.total_reactions)));
    out.push_str(&format!("💬 Total Comments:      {}\n", format_count(snapshot.total_comments)));
    out.push_str(&format!("📈 Avg Views/Article:   {:.0}\n", snapshot.avg_views_per_article));
    out.push_str(&format!("🎯 Engagement Rate:     {:.2}%\n", snapshot.engagement_rate));
    if snapshot.total_articles == 0 {
        out.push_str("   No articles published in this period\n");
    }
    out.push_str(&format!("{}\n", rule(60)));
    out
}

pub fn render_top(articles: &[&Article], requested: usize, sort_key: SortKey, period: &str) -> String {
    let mut out = header(
        &format!("🏆 TOP {} ARTICLES (by {}, {})", requested, sort_key, period),
        100,
    );
    if articles.is_empty() {
        out.push_str("No articles to rank\n");
        return out;
    }

    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, truncate_title(&article.title)));
        out.push_str(&format!(
            "   👀 Views: {} | ❤️  Reactions: {} | 💬 Comments: {} | 🎯 Engagement: {} ({:.2}%)\n",
            article.page_views,
            article.positive_reactions,
            article.comments,
            article.engagement(),
            article.engagement_rate()
        ));
        if !article.url.is_empty() {
            out.push_str(&format!("   🔗 {}\n", article.url));
        }
        out.push_str(&format!("   📅 Published: {}\n", article.published_at.format("%Y-%m-%d")));
    }
    out
}

pub fn render_tags(tags: &[TagStats]) -> String {
    let mut out = header("🏷️  TAG PERFORMANCE ANALYSIS", 100);
    out.push_str(&format!(
        "{:<20} {:<10} {:<15} {:<12} {:<12} {}\n",
        "Tag", "Articles", "Total Views", "Avg Views", "Reactions", "Comments"
    ));
    out.push_str(&format!("{}\n", thin_rule(100)));
    if tags.is_empty() {
        out.push_str("No tagged articles\n");
        return out;
    }

    for stats in tags {
        out.push_str(&format!(
            "{:<20} {:<10} {:<15} {:<12.0} {:<12} {}\n",
            stats.tag,
            stats.articles,
            stats.total_views,
            stats.avg_views,
            stats.total_reactions,
            stats.total_comments
        ));
    }
    out
}

pub fn render_reading_time(buckets: &[ReadingTimeStats]) -> String {
    let mut out = header("📚 READING TIME ANALYSIS", 80);
    out.push_str(&format!(
        "{:<15} {:<10} {:<15} {}\n",
        "Time Range", "Articles", "Avg Views", "Avg Reactions"
    ));
    out.push_str(&format!("{}\n", thin_rule(80)));
    for bucket in buckets {
        out.push_str(&format!(
            "{:<15} {:<10} {:<15.0} {:.1}\n",
            bucket.label, bucket.articles, bucket.avg_views, bucket.avg_reactions
        ));
    }
    out
}

/// Shows the most recent `months_shown` months of `months` (oldest first).
pub fn render_growth(months: &[MonthlyStats], months_shown: usize) -> String {
    let mut out = header(&format!("📈 GROWTH TREND (last {} months with articles)", months_shown), 80);
    out.push_str(&format!(
        "{:<15} {:<10} {:<15} {}\n",
        "Month", "Articles", "Total Views", "Total Reactions"
    ));
    out.push_str(&format!("{}\n", thin_rule(80)));
    if months.is_empty() {
        out.push_str("No articles published in this period\n");
        return out;
    }

    let start = months.len().saturating_sub(months_shown);
    for month in &months[start..] {
        out.push_str(&format!(
            "{:<15} {:<10} {:<15} {}\n",
            month.label(),
            month.articles,
            month.total_views,
            month.total_reactions
        ));
    }
    out
}

pub fn render_underperformers(
    articles: &[&Article],
    thresholds: &UnderperformerThresholds,
    period: &str,
) -> String {
    let mut out = header(&format!("⚠️  UNDERPERFORMING ARTICLES ({})", period), 100);
    out.push_str(&format!(
        "Articles below {:.0} views AND below {:.1} reactions + comments\n",
        thresholds.views, thresholds.engagement
    ));
    if articles.is_empty() {
        out.push_str("\n✅ No significantly underperforming articles\n");
        return out;
    }

    for article in articles {
        out.push_str(&format!("\n📉 {}\n", truncate_title(&article.title)));
        out.push_str(&format!(
            "   Views: {} | Reactions + Comments: {} | Engagement: {:.2}%\n",
            article.page_views,
            article.engagement(),
            article.engagement_rate()
        ));
        if !article.url.is_empty() {
            out.push_str(&format!("   🔗 {}\n", article.url));
        }
    }
    out
}
