pub mod config;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod source;
pub mod types;

pub use config::{AnalyticsConfig, ReadingTimeBucket};
pub use error::{DataIssue, Error, FetchError, Result};
pub use filter::{filter_by_days, period_label};
pub use metrics::{MetricsSnapshot, UnderperformerThresholds};
pub use source::ArticleSource;
pub use types::{Article, SortKey};
