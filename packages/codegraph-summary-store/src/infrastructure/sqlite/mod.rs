//! SQLite summary store
//!
//! File-based persistent storage. One row per method holding the JSON
//! summary document and its content hash.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codegraph_summary::features::method_summary::infrastructure::{from_json_str, to_json_string};
use codegraph_summary::{MethodSummaries, ValidatedConfig};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::domain::{content_hash, StoreStats, StoredSummary, SummaryStore};
use crate::error::{Result, StorageError};

/// SQLite-based [`SummaryStore`]
///
/// Loaded summaries are rebuilt under the store's configuration, so a
/// store opened with a smaller access-path limit returns coarser summaries.
#[derive(Clone)]
pub struct SqliteSummaryStore {
    conn: Arc<Mutex<Connection>>,
    config: ValidatedConfig,
}

impl SqliteSummaryStore {
    /// Open (or create) a store at the given path
    pub fn new(db_path: impl AsRef<Path>, config: ValidatedConfig) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store (for testing)
    pub fn in_memory(config: ValidatedConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::database("connection mutex poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS method_summaries (
                method TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                content_hash TEXT NOT NULL,
                flow_count INTEGER NOT NULL,
                gap_count INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_method_summaries_hash
             ON method_summaries(content_hash)",
            [],
        )?;
        Ok(())
    }
}

#[async_trait]
impl SummaryStore for SqliteSummaryStore {
    async fn save(&self, summary: &MethodSummaries) -> Result<bool> {
        let document = to_json_string(summary)?;
        let hash = content_hash(&document);

        let conn = self.lock()?;
        let existing: Option<String> = conn
            .query_row(
                "SELECT content_hash FROM method_summaries WHERE method = ?1",
                params![summary.method()],
                |row| row.get(0),
            )
            .optional()?;
        if existing.as_deref() == Some(hash.as_str()) {
            debug!("{}: stored summary unchanged", summary.method());
            return Ok(false);
        }

        conn.execute(
            "INSERT OR REPLACE INTO method_summaries
                (method, document, content_hash, flow_count, gap_count, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                summary.method(),
                document,
                hash,
                summary.flow_count() as i64,
                summary.gap_count() as i64,
                Utc::now(),
            ],
        )?;
        info!(
            "Persisted summary for {} ({} flows, {} gaps)",
            summary.method(),
            summary.flow_count(),
            summary.gap_count()
        );
        Ok(true)
    }

    async fn load(&self, method: &str) -> Result<MethodSummaries> {
        let document: Option<String> = {
            let conn = self.lock()?;
            conn.query_row(
                "SELECT document FROM method_summaries WHERE method = ?1",
                params![method],
                |row| row.get(0),
            )
            .optional()?
        };
        let document = document.ok_or_else(|| StorageError::summary_not_found(method))?;

        let summary = from_json_str(&document, &self.config)?;
        info!(
            "Loaded summary for {} ({} flows, {} gaps)",
            method,
            summary.flow_count(),
            summary.gap_count()
        );
        Ok(summary)
    }

    async fn metadata(&self, method: &str) -> Result<StoredSummary> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT method, content_hash, flow_count, gap_count, updated_at
             FROM method_summaries WHERE method = ?1",
            params![method],
            |row| {
                Ok(StoredSummary {
                    method: row.get(0)?,
                    content_hash: row.get(1)?,
                    flow_count: row.get::<_, i64>(2)? as usize,
                    gap_count: row.get::<_, i64>(3)? as usize,
                    updated_at: row.get::<_, DateTime<Utc>>(4)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| StorageError::summary_not_found(method))
    }

    async fn contains(&self, method: &str) -> Result<bool> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM method_summaries WHERE method = ?1",
                params![method],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    async fn delete(&self, method: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM method_summaries WHERE method = ?1",
            params![method],
        )?;
        if removed > 0 {
            debug!("{}: stored summary deleted", method);
        }
        Ok(removed > 0)
    }

    async fn list_methods(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT method FROM method_summaries ORDER BY method")?;
        let methods = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(methods)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;
        let (methods, flows, gaps): (i64, i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(flow_count), 0), COALESCE(SUM(gap_count), 0)
             FROM method_summaries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(StoreStats {
            total_methods: methods as usize,
            total_flows: flows as usize,
            total_gaps: gaps as usize,
        })
    }
}
