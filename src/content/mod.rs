//! Content source adapter.
//!
//! Reads published posts and guides from the external record store. The
//! production implementation talks to an Airtable-style REST API; tests
//! substitute their own `ContentSource`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::ContentRecord;

/// Read-only access to the published content lists.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<ContentRecord>, AppError>;
    async fn fetch_guides(&self) -> Result<Vec<ContentRecord>, AppError>;
}

/// Record list response from the record store API.
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<RawRecord>,
    /// Pagination token; present while more pages remain.
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
struct RawFields {
    #[serde(rename = "Title")]
    title: Option<String>,
}

/// Content source backed by the Airtable REST API.
pub struct AirtableSource {
    client: reqwest::Client,
    base_url: String,
    base_id: String,
    api_key: Option<String>,
    posts_table: String,
    guides_table: String,
}

impl AirtableSource {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("chronicle-backend/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.content_api_base.clone(),
            base_id: config.content_base.clone(),
            api_key: config.content_api_key.clone(),
            posts_table: config.posts_table.clone(),
            guides_table: config.guides_table.clone(),
        }
    }

    /// Fetch every record of one table, following the pagination token.
    async fn fetch_table(&self, table: &str) -> Result<Vec<ContentRecord>, AppError> {
        let url = format!("{}/{}/{}", self.base_url, self.base_id, table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.client.get(&url);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }
            if let Some(token) = &offset {
                request = request.query(&[("offset", token.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(AppError::SourceUnavailable(format!(
                    "Content source returned HTTP {} for table {}",
                    response.status(),
                    table
                )));
            }

            let page: RecordPage = response.json().await?;
            records.extend(page.records.into_iter().map(|r| ContentRecord {
                id: r.id,
                title: r.fields.title.unwrap_or_default(),
            }));

            match page.offset {
                Some(token) => offset = Some(token),
                None => break,
            }
        }

        tracing::debug!("Fetched {} records from {}", records.len(), table);
        Ok(records)
    }
}

#[async_trait]
impl ContentSource for AirtableSource {
    async fn fetch_posts(&self) -> Result<Vec<ContentRecord>, AppError> {
        self.fetch_table(&self.posts_table).await
    }

    async fn fetch_guides(&self) -> Result<Vec<ContentRecord>, AppError> {
        self.fetch_table(&self.guides_table).await
    }
}
