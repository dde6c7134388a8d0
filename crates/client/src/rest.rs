//! REST expense source.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list expenses | `GET expenses` |
//! | list employee expenses | `GET employee-expenses` |
//! | list categories | `GET categories` |
//! | add category | `POST categories` |
//! | rename category | `PUT categories/{old}` |
//! | remove category | `DELETE categories/{name}` |
//! | list branches | `GET branches` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use expensebook_core::record::{EmployeeExpense, Expense};
use expensebook_core::source::{ExpenseSource, SourceError};
use expensebook_shared::config::BackendConfig;

/// A list item given either as a bare string or as an object with a `name`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NamedItem {
    Name(String),
    Object { name: String },
}

impl NamedItem {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

/// An [`ExpenseSource`] talking to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct RestSource {
    client: Client,
    base_url: Url,
}

impl RestSource {
    /// Creates a source for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::Transport(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Transport(format!(
                "invalid base URL {base_url}"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Creates a source from the backend configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self, SourceError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, SourceError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "backend request failed");
            SourceError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!(status = status.as_u16(), %message, "backend returned an error");
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SourceError> {
        let url = self.url(segments);
        debug!(%url, "GET");
        self.send(self.client.get(url))
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    /// Fetches a record list, dropping items that are not records at all.
    async fn get_records<T: DeserializeOwned>(
        &self,
        segment: &str,
    ) -> Result<Vec<T>, SourceError> {
        let items: Vec<Value> = self.get_json(&[segment]).await?;
        Ok(items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| debug!(list = segment, error = %e, "skipping undecodable record"))
                    .ok()
            })
            .collect())
    }

    async fn get_names(&self, segment: &str) -> Result<Vec<String>, SourceError> {
        let items: Vec<NamedItem> = self.get_json(&[segment]).await?;
        Ok(items.into_iter().map(NamedItem::into_name).collect())
    }
}

#[async_trait]
impl ExpenseSource for RestSource {
    async fn list_expenses(&self) -> Result<Vec<Expense>, SourceError> {
        self.get_records("expenses").await
    }

    async fn list_employee_expenses(&self) -> Result<Vec<EmployeeExpense>, SourceError> {
        self.get_records("employee-expenses").await
    }

    async fn list_categories(&self) -> Result<Vec<String>, SourceError> {
        self.get_names("categories").await
    }

    async fn add_category(&self, name: &str) -> Result<(), SourceError> {
        let request = self
            .client
            .post(self.url(&["categories"]))
            .json(&serde_json::json!({ "name": name }));
        self.send(request).await?;
        Ok(())
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<(), SourceError> {
        let request = self
            .client
            .put(self.url(&["categories", old]))
            .json(&serde_json::json!({ "name": new }));
        self.send(request).await?;
        Ok(())
    }

    async fn remove_category(&self, name: &str) -> Result<(), SourceError> {
        self.send(self.client.delete(self.url(&["categories", name])))
            .await?;
        Ok(())
    }

    async fn list_branches(&self) -> Result<Vec<String>, SourceError> {
        self.get_names("branches").await
    }
}
