use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable name of the platform, used in log lines
    fn name(&self) -> &str;

    /// Fetch every published article of the authenticated user.
    ///
    /// Either the complete set is returned or an error; never a partial list.
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}
