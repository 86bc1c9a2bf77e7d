//! Port definitions for method summaries
//!
//! Interfaces between the summary core and its collaborators:
//! - `CalleeResolver`: call-graph oracle
//! - `TaintWrapper`: hook the solver consults at call sites
//! - `SummaryWriter` / `SummaryReader`: durable summary form
//! - `SummaryRepository`: table of finalized summaries

mod program;

pub use program::{InvokeExpr, Statement, StmtId, TaintedLocation, Value};

use std::collections::HashSet;
use std::sync::Arc;

use super::domain::MethodSummaries;
use crate::errors::SummaryResult;

/// Call-graph oracle
///
/// An empty answer means the call site could not be resolved.
pub trait CalleeResolver {
    /// Signatures of the methods the call at `stmt` may dispatch to
    fn callees_of(&self, stmt: &Statement) -> Vec<String>;

    fn has_callees(&self, stmt: &Statement) -> bool {
        !self.callees_of(stmt).is_empty()
    }
}

/// Call-site hook consulted by the solver
pub trait TaintWrapper {
    /// Locations that are tainted after `stmt` given that `tainted` reaches it.
    ///
    /// `None` means this wrapper has nothing to say and normal propagation
    /// applies.
    fn taints_for_call(
        &self,
        stmt: &Statement,
        tainted: &TaintedLocation,
        resolver: &dyn CalleeResolver,
    ) -> Option<HashSet<TaintedLocation>>;

    /// Whether the wrapper's answer replaces normal propagation at `stmt`
    fn is_exclusive(
        &self,
        stmt: &Statement,
        tainted: &TaintedLocation,
        resolver: &dyn CalleeResolver,
    ) -> bool;

    /// Whether calls to `method` can be handled at all
    fn supports_callee(&self, method: &str) -> bool;

    /// Whether the call at `stmt` is handled by this wrapper
    fn supports_call_site(&self, stmt: &Statement, resolver: &dyn CalleeResolver) -> bool;
}

/// Writes summaries to a durable form
pub trait SummaryWriter {
    fn write(&mut self, summary: &MethodSummaries) -> SummaryResult<()>;
}

/// Reads summaries back from a durable form
pub trait SummaryReader {
    fn read(&mut self) -> SummaryResult<MethodSummaries>;
}

/// Table of finalized summaries, keyed by method signature
///
/// Published summaries are immutable and shared; publishing again for the
/// same method merges into a fresh copy.
pub trait SummaryRepository: Send + Sync {
    fn get(&self, method: &str) -> Option<Arc<MethodSummaries>>;

    /// Store `summary`, merging with what is already published for its method
    fn publish(&self, summary: MethodSummaries) -> SummaryResult<Arc<MethodSummaries>>;

    fn len(&self) -> usize;

    fn contains(&self, method: &str) -> bool {
        self.get(method).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
