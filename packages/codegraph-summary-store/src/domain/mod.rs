//! Domain layer for summary storage
//!
//! # Domain Models
//!
//! - `StoredSummary`: metadata of one persisted summary document
//! - `StoreStats`: aggregate counts over a store
//!
//! # Port Trait
//!
//! - `SummaryStore`: durable table of method summaries keyed by signature

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codegraph_summary::MethodSummaries;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// Metadata of a persisted summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSummary {
    /// Method signature (primary key)
    pub method: String,
    /// SHA-256 of the stored JSON document
    pub content_hash: String,
    pub flow_count: usize,
    pub gap_count: usize,
    /// Last time the document changed
    pub updated_at: DateTime<Utc>,
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_methods: usize,
    pub total_flows: usize,
    pub total_gaps: usize,
}

/// Hex SHA-256 of a summary document
pub fn content_hash(document: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Durable summary storage
///
/// One entry per method. Saving replaces the stored summary for that
/// method; callers that want to accumulate merge before saving.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Persist a summary.
    ///
    /// Returns `false` when an identical document is already stored.
    ///
    /// # Errors
    ///
    /// `Summary` if the summary has no external form (a hand-built
    /// `GapBaseObject` endpoint), `Database` on storage failure.
    async fn save(&self, summary: &MethodSummaries) -> Result<bool>;

    /// Load the summary of `method`
    ///
    /// # Errors
    ///
    /// `SummaryNotFound` if nothing is stored for `method`.
    async fn load(&self, method: &str) -> Result<MethodSummaries>;

    /// Metadata of the stored summary of `method`
    async fn metadata(&self, method: &str) -> Result<StoredSummary>;

    async fn contains(&self, method: &str) -> Result<bool>;

    /// Remove a summary; returns whether one was stored
    async fn delete(&self, method: &str) -> Result<bool>;

    /// All stored method signatures, sorted
    async fn list_methods(&self) -> Result<Vec<String>>;

    async fn stats(&self) -> Result<StoreStats>;
}
