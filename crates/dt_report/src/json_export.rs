use std::path::Path;
use chrono::{DateTime, Utc};
use dt_core::metrics::{self, MetricsSnapshot};
use dt_core::{Article, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::atomic::write_atomically;

/// Document written by `--export-json`: the snapshot totals at the top level
/// followed by every article in the active set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonExport {
    pub exported_at: DateTime<Utc>,
    pub period: String,
    #[serde(flatten)]
    pub snapshot: MetricsSnapshot,
    pub articles: Vec<Article>,
}

impl JsonExport {
    pub fn new(articles: &[Article], period: &str, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            period: period.to_string(),
            snapshot: metrics::overview(articles),
            articles: articles.to_vec(),
        }
    }
}

pub fn export_json(path: &Path, document: &JsonExport) -> Result<()> {
    write_atomically(path, |file| {
        serde_json::to_writer_pretty(&mut *file, document).map_err(|e| Error::export(path, e))
    })?;
    info!("✅ Data exported to {}", path.display());
    Ok(())
}
