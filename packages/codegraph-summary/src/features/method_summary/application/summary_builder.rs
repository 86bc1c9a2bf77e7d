//! Summary generation for one method
//!
//! The solver drives a [`SummaryBuilder`] while it analyzes a method body:
//! resolved flows go in through [`add_flow`](SummaryBuilder::add_flow), and
//! unresolved call sites become gaps. For a tainted value reaching a gap the
//! builder derives the endpoints on both sides of the gap:
//!
//! | role at the call | taint enters the gap as | taint leaves the gap as |
//! |------------------|-------------------------|-------------------------|
//! | receiver         | `Field`, no path        | `Field` (receiver root) |
//! | argument `i`     | `Parameter(i)`          | `Parameter(i)`          |
//! | assigned result  | n/a                     | `Return`                |
//!
//! Every endpoint carries the gap, so the receiver entering the gap is told
//! apart from the method's own receiver by its gap reference.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{AccessPathLimit, ValidatedConfig};
use crate::errors::SummaryResult;
use crate::features::method_summary::domain::{
    FlowEndpoint, FlowSink, FlowSource, GapDefinition, MethodSummaries, SourceSinkType,
};
use crate::features::method_summary::infrastructure::GapManager;
use crate::features::method_summary::ports::{
    CalleeResolver, Statement, TaintedLocation, Value,
};

/// Position of a value at a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapRole {
    Receiver,
    Argument(usize),
    Result,
}

/// All roles `value` plays at `stmt`, receiver first
pub fn roles_at(stmt: &Statement, value: &Value) -> Vec<GapRole> {
    let mut roles = Vec::new();
    if let Some(invoke) = &stmt.invoke {
        if invoke.base.as_ref() == Some(value) {
            roles.push(GapRole::Receiver);
        }
        roles.extend(
            invoke
                .args
                .iter()
                .enumerate()
                .filter(|(_, arg)| *arg == value)
                .map(|(i, _)| GapRole::Argument(i)),
        );
    }
    if stmt.assigned_to.as_ref() == Some(value) {
        roles.push(GapRole::Result);
    }
    roles
}

pub struct SummaryBuilder {
    summary: MethodSummaries,
    gaps: GapManager,
    limit: AccessPathLimit,
}

impl SummaryBuilder {
    pub fn new(method: impl Into<String>, limit: AccessPathLimit) -> Self {
        Self {
            summary: MethodSummaries::new(method),
            gaps: GapManager::new(),
            limit,
        }
    }

    pub fn from_config(method: impl Into<String>, config: &ValidatedConfig) -> Self {
        Self::new(method, config.access_path_limit())
    }

    pub fn limit(&self) -> AccessPathLimit {
        self.limit
    }

    /// Summary built so far
    pub fn summary(&self) -> &MethodSummaries {
        &self.summary
    }

    /// Record a flow between two resolved endpoints
    pub fn add_flow(&mut self, source: FlowSource, sink: FlowSink) -> SummaryResult<bool> {
        self.summary.insert_flow(source, sink)
    }

    /// Gap for `stmt` if it is an unresolved call.
    ///
    /// The gap is registered with the summary on first use and the same
    /// definition is returned for every later query at that statement.
    pub fn gap_for_call(
        &mut self,
        stmt: &Statement,
        resolver: &dyn CalleeResolver,
    ) -> SummaryResult<Option<GapDefinition>> {
        let Some(invoke) = &stmt.invoke else {
            return Ok(None);
        };
        if resolver.has_callees(stmt) {
            return Ok(None);
        }

        let gap = self.gaps.gap_for(stmt.id, &invoke.signature);
        self.summary.insert_gap(gap.clone())?;
        Ok(Some(gap))
    }

    /// Endpoints through which `location` enters `gap`
    pub fn gap_sinks(
        &self,
        gap: &GapDefinition,
        stmt: &Statement,
        location: &TaintedLocation,
    ) -> Vec<FlowSink> {
        roles_at(stmt, &location.value)
            .into_iter()
            .filter_map(|role| match role {
                // The gap may read any part of its receiver.
                GapRole::Receiver => self.gap_endpoint(gap, role, location, false),
                GapRole::Argument(_) => self.gap_endpoint(gap, role, location, true),
                GapRole::Result => None,
            })
            .collect()
    }

    /// Endpoints through which `location` leaves `gap`
    pub fn gap_sources(
        &self,
        gap: &GapDefinition,
        stmt: &Statement,
        location: &TaintedLocation,
    ) -> Vec<FlowSource> {
        roles_at(stmt, &location.value)
            .into_iter()
            .filter_map(|role| self.gap_endpoint(gap, role, location, true))
            .collect()
    }

    /// Record that taint from `source` reaches the unresolved call at `stmt`
    /// through `location`.
    ///
    /// Returns the gap, or `None` when `stmt` is not an unresolved call.
    pub fn record_gap_call(
        &mut self,
        source: &FlowSource,
        stmt: &Statement,
        location: &TaintedLocation,
        resolver: &dyn CalleeResolver,
    ) -> SummaryResult<Option<GapDefinition>> {
        let Some(gap) = self.gap_for_call(stmt, resolver)? else {
            return Ok(None);
        };
        for sink in self.gap_sinks(&gap, stmt, location) {
            self.summary.insert_flow(source.clone(), sink)?;
        }
        Ok(Some(gap))
    }

    /// Gap-tagged endpoint for `role`.
    ///
    /// An untyped value takes the type the gap signature declares for its
    /// position. Endpoints that still fail validation are skipped.
    fn gap_endpoint(
        &self,
        gap: &GapDefinition,
        role: GapRole,
        location: &TaintedLocation,
        keep_fields: bool,
    ) -> Option<FlowEndpoint> {
        let (builder, declared) = match role {
            GapRole::Receiver => (
                FlowEndpoint::builder(SourceSinkType::Field),
                gap.declaring_type(),
            ),
            GapRole::Argument(i) => (
                FlowEndpoint::builder(SourceSinkType::Parameter).parameter_index(i),
                gap.parameter_type(i),
            ),
            GapRole::Result => (
                FlowEndpoint::builder(SourceSinkType::Return),
                gap.return_type(),
            ),
        };

        let mut builder = builder.gap(gap.clone());
        if let Some(ty) = location.value.ty.as_deref().or(declared) {
            builder = builder.base_type(ty);
        }
        if keep_fields {
            builder = builder.access_path(location.fields.iter().cloned());
        }

        let endpoint = builder.build(self.limit);
        match endpoint.validate() {
            Ok(()) => Some(endpoint),
            Err(err) => {
                warn!(
                    "{}: no {:?} endpoint for {} at {}: {}",
                    self.summary.method(),
                    role,
                    location,
                    gap,
                    err
                );
                None
            }
        }
    }

    /// Seal the summary
    pub fn finish(self) -> Arc<MethodSummaries> {
        debug!(
            "{}: summary finished ({} flows, {} gaps)",
            self.summary.method(),
            self.summary.flow_count(),
            self.summary.gap_count()
        );
        self.summary.into_shared()
    }
}
