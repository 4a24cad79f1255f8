//! HTTP client for the external vector index service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::ChunkMetadata;

use super::filter::{DeleteSelector, MetadataFilter};
use super::gateway::{
    ScoredRecord, UpsertReceipt, VectorIndexGateway, VectorRecord, MAX_UPSERT_BATCH,
};

/// Gateway implementation over the vector index's REST API.
///
/// The client is stateless aside from connection pooling and is shared
/// across requests.
pub struct HttpVectorIndex {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<WireVector<'a>>,
}

#[derive(Serialize)]
struct WireVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: WireMetadata<'a>,
}

#[derive(Serialize)]
struct WireMetadata<'a> {
    text: &'a str,
    #[serde(flatten)]
    chunk: &'a ChunkMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a MetadataFilter>,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    matches: Vec<WireMatch>,
}

#[derive(Deserialize)]
struct WireMatch {
    score: f32,
    metadata: WireMatchMetadata,
}

#[derive(Deserialize)]
struct WireMatchMetadata {
    #[serde(default)]
    text: String,
    #[serde(flatten)]
    chunk: ChunkMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    delete_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a MetadataFilter>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    #[serde(default)]
    deleted_count: u64,
}

impl HttpVectorIndex {
    /// Create a new gateway for the configured index service
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            builder = builder.header("Api-Key", key);
        }
        builder
    }

    async fn check_status(op: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::index(op, format!("HTTP {}: {}", status, body)))
    }
}

#[async_trait]
impl VectorIndexGateway for HttpVectorIndex {
    async fn upsert(&self, batch: &[VectorRecord]) -> Result<UpsertReceipt> {
        if batch.is_empty() {
            return Ok(UpsertReceipt { upserted: 0 });
        }
        if batch.len() > MAX_UPSERT_BATCH {
            return Err(Error::index(
                "upsert",
                format!(
                    "batch of {} records exceeds the limit of {}",
                    batch.len(),
                    MAX_UPSERT_BATCH
                ),
            ));
        }

        let request = UpsertRequest {
            vectors: batch
                .iter()
                .map(|r| WireVector {
                    id: &r.id,
                    values: &r.values,
                    metadata: WireMetadata {
                        text: &r.text,
                        chunk: &r.metadata,
                    },
                })
                .collect(),
        };

        let response = self
            .request("/vectors/upsert")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index("upsert", e.to_string()))?;
        let response = Self::check_status("upsert", response).await?;

        let upserted: UpsertResponse = response
            .json()
            .await
            .map_err(|e| Error::index("upsert", format!("invalid response: {}", e)))?;

        Ok(UpsertReceipt {
            upserted: upserted.upserted_count,
        })
    }

    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<ScoredRecord>> {
        let request = QueryRequest {
            vector,
            top_k: k,
            filter: (!filter.is_empty()).then_some(filter),
            include_metadata: true,
        };

        let response = self
            .request("/query")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index("search", e.to_string()))?;
        let response = Self::check_status("search", response).await?;

        let results: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::index("search", format!("invalid response: {}", e)))?;

        let mut records: Vec<ScoredRecord> = results
            .matches
            .into_iter()
            .map(|m| ScoredRecord {
                text: m.metadata.text,
                metadata: m.metadata.chunk,
                score: m.score,
            })
            .collect();

        // The store returns hits ordered by similarity already; keep the
        // ordering guarantee even if it does not.
        records.sort_by(|a, b| b.score.total_cmp(&a.score));
        records.truncate(k);

        Ok(records)
    }

    async fn delete(&self, selector: &DeleteSelector) -> Result<u64> {
        selector.validate()?;

        let request = match selector {
            DeleteSelector::All => DeleteRequest {
                delete_all: Some(true),
                filter: None,
            },
            DeleteSelector::Filter(filter) => DeleteRequest {
                delete_all: None,
                filter: Some(filter),
            },
        };

        let response = self
            .request("/vectors/delete")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index("delete", e.to_string()))?;
        let response = Self::check_status("delete", response).await?;

        let deleted: DeleteResponse = response
            .json()
            .await
            .map_err(|e| Error::index("delete", format!("invalid response: {}", e)))?;

        Ok(deleted.deleted_count)
    }
}
