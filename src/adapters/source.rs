use crate::core::{ConfigProvider, DataSource};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Downloads the dataset over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making dataset request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Dataset response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DashError::HttpStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the dataset from a local CSV file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// 本地路徑優先於 URL
pub fn source_from_config(config: &dyn ConfigProvider) -> Result<Box<dyn DataSource>> {
    match config.dataset_path() {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => {
            let timeout = Duration::from_secs(config.timeout_seconds());
            Ok(Box::new(HttpSource::new(config.dataset_url(), timeout)?))
        }
    }
}
