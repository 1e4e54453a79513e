use crate::domain::model::Thresholds;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can hand back the raw HTML of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn incidence_url(&self) -> &str;
    fn cases_url(&self) -> &str;
    fn thresholds(&self) -> Thresholds;
    fn api_author(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn retry_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
    fn cache_max_age(&self) -> u64;
}
