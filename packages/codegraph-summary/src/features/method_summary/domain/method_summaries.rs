//! Per-method flow summary
//!
//! The flow set is kept as an antichain under [`Coarsening`]: no stored flow
//! is covered by another one. Because the order is antisymmetric on
//! endpoints, the stored set is exactly the maximal elements of everything
//! inserted, so the final content is independent of insertion order.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

use super::endpoint::{FlowSink, FlowSource};
use super::gap::GapDefinition;
use super::method_flow::MethodFlow;
use super::subsumption::Coarsening;
use crate::errors::{SummaryError, SummaryResult};

/// Flow summary of one method: its flows plus the gaps they pass through
///
/// Built by a single owner while the method is analyzed, then sealed with
/// [`into_shared`](Self::into_shared) and treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSummaries {
    method: String,
    flows: FxHashSet<MethodFlow>,
    gaps: BTreeMap<u32, GapDefinition>,
}

impl MethodSummaries {
    /// Create an empty summary for the method with the given signature
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            flows: FxHashSet::default(),
            gaps: BTreeMap::new(),
        }
    }

    /// Signature of the summarized method
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn flows(&self) -> impl Iterator<Item = &MethodFlow> {
        self.flows.iter()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    pub fn contains_flow(&self, flow: &MethodFlow) -> bool {
        self.flows.contains(flow)
    }

    /// Registered gaps, ordered by id
    pub fn gaps(&self) -> impl Iterator<Item = &GapDefinition> {
        self.gaps.values()
    }

    pub fn gap(&self, id: u32) -> Option<&GapDefinition> {
        self.gaps.get(&id)
    }

    pub fn gap_count(&self) -> usize {
        self.gaps.len()
    }

    /// No flows and no gaps
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty() && self.gaps.is_empty()
    }

    /// Flows a caller must apply when taint arrives at `source`.
    ///
    /// A stored source matches when it covers `source` or is covered by it:
    /// taint on `p.a.b` reaches a flow from `p.a`, and taint on the whole of
    /// `p` reaches a flow from `p.a`.
    pub fn flows_from<'a>(
        &'a self,
        source: &'a FlowSource,
    ) -> impl Iterator<Item = &'a MethodFlow> + 'a {
        self.flows.iter().filter(move |flow| {
            flow.source().is_coarser_than(source) || source.is_coarser_than(flow.source())
        })
    }

    /// Register a gap.
    ///
    /// Returns `Ok(false)` if the same gap is already known. A different gap
    /// under an already used id is rejected.
    pub fn insert_gap(&mut self, gap: GapDefinition) -> SummaryResult<bool> {
        self.check_gap(&gap)?;
        if self.gaps.contains_key(&gap.id()) {
            return Ok(false);
        }
        trace!("{}: registered {}", self.method, gap);
        self.gaps.insert(gap.id(), gap);
        Ok(true)
    }

    /// Insert a flow edge, keeping the flow set reduced.
    ///
    /// Returns `Ok(true)` if the summary changed. The edge is dropped when an
    /// existing edge is coarser on both ends; existing edges the new one
    /// covers are removed. Gaps referenced by either endpoint are registered.
    pub fn insert_flow(&mut self, source: FlowSource, sink: FlowSink) -> SummaryResult<bool> {
        self.insert(MethodFlow::new(source, sink))
    }

    /// [`insert_flow`](Self::insert_flow) for an already paired edge
    pub fn insert(&mut self, flow: MethodFlow) -> SummaryResult<bool> {
        flow.source().validate()?;
        flow.sink().validate()?;
        for gap in flow.gaps() {
            self.check_gap(gap)?;
        }

        // Equal flows may still carry different field types; keep the least
        // so the stored form does not depend on insertion order.
        if let Some(existing) = self.flows.get(&flow) {
            if field_types(&flow) < field_types(existing) {
                trace!("{}: field types of {} replaced", self.method, flow);
                self.flows.replace(flow);
                return Ok(true);
            }
            return Ok(false);
        }

        if let Some(existing) = self.flows.iter().find(|f| f.is_coarser_than(&flow)) {
            debug!(
                "{}: dropped redundant flow {} (covered by {})",
                self.method, flow, existing
            );
            return Ok(false);
        }

        let before = self.flows.len();
        self.flows.retain(|f| !flow.is_coarser_than(f));
        let replaced = before - self.flows.len();
        if replaced > 0 {
            debug!(
                "{}: flow {} replaces {} finer flow(s)",
                self.method, flow, replaced
            );
        }

        for gap in flow.gaps() {
            self.gaps.entry(gap.id()).or_insert_with(|| gap.clone());
        }
        self.flows.insert(flow);
        Ok(true)
    }

    /// Union `other` into `self` with the same reduction as `insert`.
    ///
    /// Both summaries must describe the same method. All gaps of `other` are
    /// checked before anything is modified, so a failed merge leaves `self`
    /// untouched. Returns `Ok(true)` if `self` changed.
    pub fn merge(&mut self, other: &MethodSummaries) -> SummaryResult<bool> {
        if self.method != other.method {
            return Err(SummaryError::MethodMismatch {
                expected: self.method.clone(),
                found: other.method.clone(),
            });
        }
        for gap in other.gaps() {
            self.check_gap(gap)?;
        }

        let mut changed = false;
        for gap in other.gaps() {
            changed |= self.insert_gap(gap.clone())?;
        }
        for flow in other.flows() {
            changed |= self.insert(flow.clone())?;
        }
        Ok(changed)
    }

    /// Seal the summary for read-only sharing
    pub fn into_shared(self) -> Arc<MethodSummaries> {
        Arc::new(self)
    }

    fn check_gap(&self, gap: &GapDefinition) -> SummaryResult<()> {
        match self.gaps.get(&gap.id()) {
            Some(known) if known != gap => {
                Err(SummaryError::unresolved_gap(self.method.clone(), gap.id()))
            }
            _ => Ok(()),
        }
    }
}

type TypeKey<'a> = (bool, Option<&'a [String]>);

fn type_key(types: Option<&[String]>) -> TypeKey<'_> {
    (types.is_none(), types)
}

/// Ordering key over the field types of both endpoints, typed before untyped
fn field_types(flow: &MethodFlow) -> (TypeKey<'_>, TypeKey<'_>) {
    (
        type_key(flow.source().access_path_types()),
        type_key(flow.sink().access_path_types()),
    )
}
