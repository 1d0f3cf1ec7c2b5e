use std::path::PathBuf;
use std::time::Duration;
use clap::{ArgAction, Parser};
use dt_core::{AnalyticsConfig, SortKey};
use dt_fetch::{FetchConfig, DEFAULT_BASE_URL};

const EXAMPLES: &str = r#"EXAMPLES:
    dt --api-key KEY --overview                  # Overview of all articles
    dt --api-key KEY --top 20 --sort engagement  # Top 20 by reactions + comments
    dt --api-key KEY --overview --days 30        # Last 30 days
    dt --api-key KEY --tags --days 90            # Tag performance, last 90 days
    dt --api-key KEY --export-csv analytics.csv  # Export articles to CSV
    dt --api-key KEY --full-report               # Every analysis
"#;

#[derive(Parser, Debug)]
#[command(name = "dt", author, version)]
#[command(about = "Analytics for your published DEV articles")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Your DEV API key
    #[arg(long, env = "DEVTO_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Show overview statistics
    #[arg(long)]
    pub overview: bool,

    /// Show the top N articles
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Sort criteria for top articles
    #[arg(long, value_enum, default_value_t = SortKey::Views)]
    pub sort: SortKey,

    /// Show tag analysis
    #[arg(long)]
    pub tags: bool,

    /// Show reading time analysis
    #[arg(long)]
    pub reading_time: bool,

    /// Show growth trends by month
    #[arg(long)]
    pub growth: bool,

    /// Find underperforming articles (defaults to the last 30 days)
    #[arg(long)]
    pub underperformers: bool,

    /// Only consider articles published in the last N days
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Export the filtered articles and totals to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export_json: Option<PathBuf>,

    /// Export the filtered articles to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// Run every analysis
    #[arg(long)]
    pub full_report: bool,

    /// API root URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Views below which an article may underperform (default: ratio x average views)
    #[arg(long, value_name = "VIEWS")]
    pub views_threshold: Option<f64>,

    /// Reactions + comments below which an article may underperform
    /// (default: ratio x average engagement)
    #[arg(long, value_name = "COUNT")]
    pub engagement_threshold: Option<f64>,

    /// Fraction of the dataset averages used for the default thresholds
    #[arg(long, value_name = "RATIO", default_value_t = 0.5)]
    pub threshold_ratio: f64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Which sections and exports one invocation produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRequest {
    pub overview: bool,
    pub top: Option<usize>,
    pub sort: SortKey,
    pub tags: bool,
    pub reading_time: bool,
    pub growth: bool,
    pub underperformers: bool,
    pub days: Option<u32>,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl Cli {
    pub fn analytics_config(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            threshold_ratio: self.threshold_ratio,
            views_threshold: self.views_threshold,
            engagement_threshold: self.engagement_threshold,
            ..Default::default()
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }

    pub fn report_request(&self, config: &AnalyticsConfig) -> ReportRequest {
        // Negative counts rank nothing rather than fail.
        let top = self.top.map(|n| usize::try_from(n).unwrap_or(0));
        let mut request = ReportRequest {
            overview: self.overview,
            top,
            sort: self.sort,
            tags: self.tags,
            reading_time: self.reading_time,
            growth: self.growth,
            underperformers: self.underperformers,
            days: self.days,
            export_json: self.export_json.clone(),
            export_csv: self.export_csv.clone(),
        };

        if self.full_report {
            request.overview = true;
            request.top = Some(config.full_report_top);
            request.tags = true;
            request.reading_time = true;
            request.growth = true;
            request.underperformers = true;
        } else if !request.has_output() {
            request.overview = true;
        }
        request
    }
}

impl ReportRequest {
    fn has_output(&self) -> bool {
        self.overview
            || self.top.is_some()
            || self.tags
            || self.reading_time
            || self.growth
            || self.underperformers
            || self.export_json.is_some()
            || self.export_csv.is_some()
    }
}
