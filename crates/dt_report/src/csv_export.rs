use std::io::Write;
use std::path::Path;
use dt_core::{Article, Error, Result};
use tracing::info;
use crate::atomic::write_atomically;

pub const CSV_HEADER: [&str; 9] = [
    "Title",
    "URL",
    "Published",
    "Views",
    "Reactions",
    "Comments",
    "Engagement %",
    "Reading Time",
    "Tags",
];

/// One row per article under [`CSV_HEADER`]. Quoting is left to the `csv`
/// writer, so commas, quotes and newlines in titles survive.
pub fn write_csv<W: Write>(writer: W, articles: &[Article]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    for article in articles {
        writer.write_record([
            article.title.clone(),
            article.url.clone(),
            article.published_at.format("%Y-%m-%d").to_string(),
            article.page_views.to_string(),
            article.positive_reactions.to_string(),
            article.comments.to_string(),
            format!("{:.2}", article.engagement_rate()),
            article.reading_time_minutes.to_string(),
            article.tags.join(", "),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, articles: &[Article]) -> Result<()> {
    write_atomically(path, |file| {
        write_csv(&mut *file, articles).map_err(|e| Error::export(path, e))
    })?;
    info!("✅ {} articles exported to {}", articles.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(title: &str, tags: &[&str]) -> Article {
        Article {
            id: 7,
            title: title.to_string(),
            url: "https://dev.to/me/post".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 4, 9, 23, 59, 0).unwrap(),
            page_views: 400,
            positive_reactions: 10,
            comments: 2,
            reading_time_minutes: 8,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_header_only_for_empty_set() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Title,URL,Published,Views,Reactions,Comments,Engagement %,Reading Time,Tags\n"
        );
    }

    #[test]
    fn test_row_format() {
        let mut out = Vec::new();
        write_csv(&mut out, &[article("Plain", &["rust"])]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "Plain,https://dev.to/me/post,2024-04-09,400,10,2,3.00,8,rust");
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let mut out = Vec::new();
        write_csv(&mut out, &[article("Rust, \"fast\"\nand safe", &["rust", "perf"])]).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Rust, \"fast\"\nand safe");
        assert_eq!(&record[8], "rust, perf");
    }
}
