use std::io::Write;
use chrono::{DateTime, Utc};
use dt_core::metrics::{self, UnderperformerThresholds};
use dt_core::{filter_by_days, period_label, AnalyticsConfig, Article, ArticleSource, Result};
use dt_report::{console, export_csv, export_json, JsonExport};
use tracing::{error, info};
use crate::cli::ReportRequest;

/// One invocation: fetch, filter, analyse, print, export.
pub struct Pipeline<'a> {
    source: &'a dyn ArticleSource,
    request: ReportRequest,
    config: AnalyticsConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn ArticleSource, request: ReportRequest, config: AnalyticsConfig) -> Self {
        Self {
            source,
            request,
            config,
        }
    }

    /// Console sections are written to `out` before any export runs, so a
    /// failing export never suppresses the report. Every requested export is
    /// attempted; the first failure is returned.
    pub async fn run<W: Write>(&self, now: DateTime<Utc>, out: &mut W) -> Result<()> {
        let all = self.source.fetch_articles().await?;
        let articles = filter_by_days(&all, self.request.days, now);
        let period = period_label(self.request.days);
        info!("📊 Analysing {} of {} articles ({})", articles.len(), all.len(), period);

        self.write_report(&all, &articles, &period, now, out)?;
        out.flush()?;

        self.export(&articles, &period, now)
    }

    fn write_report<W: Write>(
        &self,
        all: &[Article],
        articles: &[Article],
        period: &str,
        now: DateTime<Utc>,
        out: &mut W,
    ) -> Result<()> {
        let request = &self.request;

        if request.overview {
            let snapshot = metrics::overview(articles);
            write!(out, "{}", console::render_overview(&snapshot, period))?;
        }

        if let Some(n) = request.top {
            let top = metrics::top_performers(articles, n, request.sort);
            write!(out, "{}", console::render_top(&top, n, request.sort, period))?;
        }

        if request.tags {
            write!(out, "{}", console::render_tags(&metrics::tag_analysis(articles)))?;
        }

        if request.reading_time {
            let buckets = metrics::reading_time_analysis(articles, &self.config.reading_time_buckets);
            write!(out, "{}", console::render_reading_time(&buckets))?;
        }

        if request.growth {
            let months = metrics::growth_trends(articles);
            write!(out, "{}", console::render_growth(&months, self.config.growth_months))?;
        }

        if request.underperformers {
            let days = request.days.unwrap_or(self.config.underperformer_window_days);
            let window = filter_by_days(all, Some(days), now);
            let snapshot = metrics::overview(&window);
            let thresholds = UnderperformerThresholds::from_snapshot(&snapshot, self.config.threshold_ratio)
                .with_overrides(self.config.views_threshold, self.config.engagement_threshold);
            let flagged = metrics::underperformers(&window, &thresholds);
            write!(
                out,
                "{}",
                console::render_underperformers(&flagged, &thresholds, &period_label(Some(days)))
            )?;
        }

        Ok(())
    }

    fn export(&self, articles: &[Article], period: &str, now: DateTime<Utc>) -> Result<()> {
        let mut first_error = None;

        if let Some(path) = &self.request.export_json {
            let document = JsonExport::new(articles, period, now);
            if let Err(e) = export_json(path, &document) {
                error!("❌ {}", e);
                first_error.get_or_insert(e);
            }
        }

        if let Some(path) = &self.request.export_csv {
            if let Err(e) = export_csv(path, articles) {
                error!("❌ {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
