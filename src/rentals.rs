//! Reference-data sources for the rentals snapshot injected into every turn.

use crate::ai::{ChatError, ChatResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;

#[async_trait]
pub trait RentalsSource: Send + Sync {
    /// Fetches the current listings. The document is not validated beyond being JSON.
    async fn fetch(&self) -> ChatResult<Value>;
}

#[async_trait]
impl<T: RentalsSource + ?Sized> RentalsSource for std::sync::Arc<T> {
    async fn fetch(&self) -> ChatResult<Value> {
        (**self).fetch().await
    }
}

#[async_trait]
impl<T: RentalsSource + ?Sized> RentalsSource for Box<T> {
    async fn fetch(&self) -> ChatResult<Value> {
        (**self).fetch().await
    }
}

/// Flattens the fetched document to the compact text placed in the transcript.
pub fn serialize_rentals(data: &Value) -> String {
    data.to_string()
}

pub struct HttpRentalsSource {
    client: Client,
    url: String,
}

impl HttpRentalsSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RentalsSource for HttpRentalsSource {
    async fn fetch(&self) -> ChatResult<Value> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Status { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Reads a `rentals.json` file from disk on every fetch.
pub struct FileRentalsSource {
    path: PathBuf,
}

impl FileRentalsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RentalsSource for FileRentalsSource {
    async fn fetch(&self) -> ChatResult<Value> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
