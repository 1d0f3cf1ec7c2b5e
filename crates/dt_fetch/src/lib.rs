pub mod client;
pub mod normalize;

pub use client::{DevToClient, FetchConfig, DEFAULT_BASE_URL};
pub use normalize::{normalize, normalize_value, Normalized, RawArticle};
