//! Shared in-memory summary repository
//!
//! Readers get `Arc` snapshots. Publishing never mutates a summary a reader
//! may hold: it merges into a fresh copy and swaps the entry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::SummaryResult;
use crate::features::method_summary::domain::MethodSummaries;
use crate::features::method_summary::ports::SummaryRepository;

#[derive(Debug, Default)]
pub struct InMemorySummaryRepository {
    summaries: DashMap<String, Arc<MethodSummaries>>,
}

impl InMemorySummaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signatures of all published methods, sorted
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.summaries.iter().map(|e| e.key().clone()).collect();
        methods.sort();
        methods
    }

    /// Drop a method's summary
    pub fn remove(&self, method: &str) -> Option<Arc<MethodSummaries>> {
        self.summaries.remove(method).map(|(_, summary)| summary)
    }

    pub fn clear(&self) {
        self.summaries.clear();
    }
}

impl SummaryRepository for InMemorySummaryRepository {
    fn get(&self, method: &str) -> Option<Arc<MethodSummaries>> {
        self.summaries.get(method).map(|entry| Arc::clone(entry.value()))
    }

    fn publish(&self, summary: MethodSummaries) -> SummaryResult<Arc<MethodSummaries>> {
        match self.summaries.entry(summary.method().to_string()) {
            Entry::Occupied(mut entry) => {
                let mut merged = MethodSummaries::clone(entry.get());
                if !merged.merge(&summary)? {
                    debug!("{}: publish added nothing", summary.method());
                    return Ok(Arc::clone(entry.get()));
                }
                let shared = merged.into_shared();
                entry.insert(Arc::clone(&shared));
                info!(
                    "Updated summary for {} ({} flows, {} gaps)",
                    shared.method(),
                    shared.flow_count(),
                    shared.gap_count()
                );
                Ok(shared)
            }
            Entry::Vacant(entry) => {
                let shared = summary.into_shared();
                entry.insert(Arc::clone(&shared));
                info!(
                    "Published summary for {} ({} flows, {} gaps)",
                    shared.method(),
                    shared.flow_count(),
                    shared.gap_count()
                );
                Ok(shared)
            }
        }
    }

    fn len(&self) -> usize {
        self.summaries.len()
    }
}
