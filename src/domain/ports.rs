use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the launch CSV comes from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;
    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_url(&self) -> &str;
    fn dataset_path(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn host(&self) -> &str;
    fn port(&self) -> u16;
}
