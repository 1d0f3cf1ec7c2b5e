//! Strict conversion of raw API records into [`Article`]s.
//!
//! The API is loosely typed: counts can be missing or null, and `tag_list` is
//! an array on some endpoints and a comma separated string on others. Every
//! field is read as a JSON value here and coerced, so nothing downstream ever
//! touches the raw shape.

use chrono::{DateTime, Utc};
use dt_core::{Article, DataIssue};
use serde::Deserialize;
use serde_json::Value;

pub const UNTITLED: &str = "(untitled)";

/// One article object as returned by `/articles/me/*`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
    #[serde(default)]
    pub published_at: Option<Value>,
    #[serde(default)]
    pub page_views_count: Option<Value>,
    #[serde(default)]
    pub public_reactions_count: Option<Value>,
    #[serde(default)]
    pub positive_reactions_count: Option<Value>,
    #[serde(default)]
    pub comments_count: Option<Value>,
    #[serde(default)]
    pub reading_time_minutes: Option<Value>,
    #[serde(default)]
    pub tag_list: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub article: Article,
    pub issues: Vec<DataIssue>,
}

pub fn normalize(raw: RawArticle) -> Normalized {
    let mut issues = Vec::new();

    let id = match raw.id.as_ref().and_then(as_count) {
        Some(id) => id,
        None => {
            issues.push(DataIssue::MissingId);
            0
        }
    };

    let title = match raw.title.as_ref().and_then(Value::as_str).map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            issues.push(DataIssue::MissingTitle);
            UNTITLED.to_string()
        }
    };

    let url = raw
        .url
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let published_at = match raw.published_at.as_ref() {
        None => {
            issues.push(DataIssue::MissingPublishedAt);
            DateTime::<Utc>::UNIX_EPOCH
        }
        Some(value) => match parse_timestamp(value) {
            Some(at) => at,
            None => {
                issues.push(DataIssue::InvalidPublishedAt(value.to_string()));
                DateTime::<Utc>::UNIX_EPOCH
            }
        },
    };

    let reactions = raw
        .public_reactions_count
        .as_ref()
        .or(raw.positive_reactions_count.as_ref());

    let page_views = count_field(raw.page_views_count.as_ref(), "page_views_count", &mut issues);
    let positive_reactions = count_field(reactions, "public_reactions_count", &mut issues);
    let comments = count_field(raw.comments_count.as_ref(), "comments_count", &mut issues);
    let reading_time_minutes = u32::try_from(count_field(
        raw.reading_time_minutes.as_ref(),
        "reading_time_minutes",
        &mut issues,
    ))
    .unwrap_or(u32::MAX);

    let tags = raw.tag_list.as_ref().map(parse_tags).unwrap_or_default();

    Normalized {
        article: Article {
            id,
            title,
            url,
            published_at,
            page_views,
            positive_reactions,
            comments,
            reading_time_minutes,
            tags,
        },
        issues,
    }
}

/// Normalizes one element of the listing array. Anything that is not a JSON
/// object is kept as an all-default article flagged [`DataIssue::NotAnObject`].
pub fn normalize_value(value: Value) -> Normalized {
    let raw = match value {
        Value::Object(_) => RawArticle::deserialize(value).ok(),
        _ => None,
    };

    match raw {
        Some(raw) => normalize(raw),
        None => {
            let mut normalized = normalize(RawArticle::default());
            normalized.issues.insert(0, DataIssue::NotAnObject);
            normalized
        }
    }
}

/// Missing counts are silently 0; present but unusable ones are reported.
fn count_field(value: Option<&Value>, name: &'static str, issues: &mut Vec<DataIssue>) -> u64 {
    match value {
        None => 0,
        Some(v) => as_count(v).unwrap_or_else(|| {
            issues.push(DataIssue::InvalidCount(name));
            0
        }),
    }
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Tags are a set: blanks dropped, duplicates removed, first occurrence wins.
fn parse_tags(value: &Value) -> Vec<String> {
    let candidates: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
