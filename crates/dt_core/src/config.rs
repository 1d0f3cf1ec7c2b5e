use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Inclusive range of reading times, in minutes. `max: None` is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTimeBucket {
    pub label: String,
    pub min: u32,
    pub max: Option<u32>,
}

impl ReadingTimeBucket {
    pub fn new(label: &str, min: u32, max: Option<u32>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && self.max.map_or(true, |max| minutes <= max)
    }
}

/// 0-3, 4-5, 6-10, 11-15 and 16+ minutes.
pub fn default_reading_time_buckets() -> Vec<ReadingTimeBucket> {
    vec![
        ReadingTimeBucket::new("0-3 min", 0, Some(3)),
        ReadingTimeBucket::new("4-5 min", 4, Some(5)),
        ReadingTimeBucket::new("6-10 min", 6, Some(10)),
        ReadingTimeBucket::new("11-15 min", 11, Some(15)),
        ReadingTimeBucket::new("16+ min", 16, None),
    ]
}

/// Tunables for the analyses. Every field has a documented default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Buckets for the reading-time analysis, checked in order.
    pub reading_time_buckets: Vec<ReadingTimeBucket>,
    /// Fraction of the dataset averages used as underperformer thresholds (0.5).
    pub threshold_ratio: f64,
    /// Overrides the derived views threshold.
    pub views_threshold: Option<f64>,
    /// Overrides the derived engagement threshold.
    pub engagement_threshold: Option<f64>,
    /// Window for the underperformer analysis when no `--days` is given (30).
    pub underperformer_window_days: u32,
    /// Number of most recent months shown in the growth report (12).
    pub growth_months: usize,
    /// Number of articles ranked by the full report (10).
    pub full_report_top: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            reading_time_buckets: default_reading_time_buckets(),
            threshold_ratio: 0.5,
            views_threshold: None,
            engagement_threshold: None,
            underperformer_window_days: 30,
            growth_months: 12,
            full_report_top: 10,
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_ratio.is_finite() || self.threshold_ratio < 0.0 {
            return Err(Error::Config(format!(
                "threshold ratio must be a non-negative number, got {}",
                self.threshold_ratio
            )));
        }
        for (name, value) in [
            ("views threshold", self.views_threshold),
            ("engagement threshold", self.engagement_threshold),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Config(format!(
                        "{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
            }
        }
        if self.reading_time_buckets.is_empty() {
            return Err(Error::Config("at least one reading-time bucket is required".to_string()));
        }
        if self.underperformer_window_days == 0 {
            return Err(Error::Config("underperformer window must be at least one day".to_string()));
        }
        Ok(())
    }
}
