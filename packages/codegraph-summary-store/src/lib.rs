//! Durable storage for method summaries
//!
//! Summaries are computed once per library method and reused across
//! analysis runs. A store keeps one JSON summary document per method
//! signature together with its content hash, so re-saving an unchanged
//! summary is a no-op.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codegraph_summary_store::{SqliteSummaryStore, SummaryStore};
//!
//! let store = SqliteSummaryStore::new("summaries.db", config)?;
//! store.save(&summary).await?;
//! let loaded = store.load(summary.method()).await?;
//! ```

pub mod domain;
pub mod error;

#[cfg(feature = "sqlite")]
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{content_hash, StoreStats, StoredSummary, SummaryStore};

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteSummaryStore;
