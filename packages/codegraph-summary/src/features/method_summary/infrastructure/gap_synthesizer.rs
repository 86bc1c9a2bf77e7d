//! Gap-flow synthesizer
//!
//! Used while summaries are being generated. When a call site has no
//! resolvable callee, the unknown code behind it may do anything with the
//! values it receives, so every value it can touch is treated as a tainted
//! continuation: the receiver, each argument and the assigned result.
//! Resolvable calls are left to normal interprocedural propagation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

use crate::features::method_summary::ports::{
    CalleeResolver, Statement, TaintWrapper, TaintedLocation,
};

/// Hit/miss counters of a taint wrapper
///
/// A hit is a call site the wrapper answered, a miss one it deferred.
#[derive(Debug, Default)]
pub struct WrapperStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl WrapperStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate (0.0-1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

/// Taint wrapper that turns unresolved calls into gaps
///
/// Holds no analysis state; the counters only observe.
#[derive(Debug, Default)]
pub struct GapFlowSynthesizer {
    stats: WrapperStats,
}

impl GapFlowSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &WrapperStats {
        &self.stats
    }
}

impl TaintWrapper for GapFlowSynthesizer {
    /// Conservative continuation set for an unresolved call.
    ///
    /// Returns `None` for non-call statements and for calls with at least one
    /// callee. For a gap the set holds the receiver, every argument and the
    /// assignment target, each with all sub-fields tainted; it is empty only
    /// for a static call with no arguments whose result is discarded.
    fn taints_for_call(
        &self,
        stmt: &Statement,
        tainted: &TaintedLocation,
        resolver: &dyn CalleeResolver,
    ) -> Option<HashSet<TaintedLocation>> {
        let invoke = stmt.invoke.as_ref()?;

        let callees = resolver.callees_of(stmt);
        if !callees.is_empty() {
            self.stats.record_miss();
            trace!(
                "{}: {} callee(s) for {}, deferring",
                stmt.id,
                callees.len(),
                invoke.signature
            );
            return None;
        }

        let mut result = HashSet::new();
        if let Some(base) = &invoke.base {
            result.insert(TaintedLocation::whole(base.clone()));
        }
        for arg in &invoke.args {
            result.insert(TaintedLocation::whole(arg.clone()));
        }
        if let Some(target) = &stmt.assigned_to {
            result.insert(TaintedLocation::whole(target.clone()));
        }

        self.stats.record_hit();
        debug!(
            "{}: gap at {} for incoming {} yields {} location(s)",
            stmt.id,
            invoke.signature,
            tainted,
            result.len()
        );
        Some(result)
    }

    /// Exclusive exactly for the call sites it synthesizes gaps for, so flows
    /// through resolvable callees are never counted twice.
    fn is_exclusive(
        &self,
        stmt: &Statement,
        _tainted: &TaintedLocation,
        resolver: &dyn CalleeResolver,
    ) -> bool {
        self.supports_call_site(stmt, resolver)
    }

    fn supports_callee(&self, _method: &str) -> bool {
        true
    }

    fn supports_call_site(&self, stmt: &Statement, resolver: &dyn CalleeResolver) -> bool {
        stmt.contains_invoke() && !resolver.has_callees(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::method_summary::infrastructure::SimpleCalleeResolver;
    use crate::features::method_summary::ports::{InvokeExpr, StmtId, Value};

    fn incoming() -> TaintedLocation {
        TaintedLocation::whole(Value::local("arg1", "String"))
    }

    fn unknown_call() -> Statement {
        Statement::assign_invoke(
            StmtId(7),
            Value::local("r", "Object"),
            InvokeExpr::instance_call(
                "<Lib: Object unknown(String,String)>",
                Value::local("obj", "Lib"),
                vec![Value::local("arg1", "String"), Value::local("arg2", "String")],
            ),
        )
    }

    #[test]
    fn test_unresolved_call_yields_all_values() {
        let synth = GapFlowSynthesizer::new();
        let resolver = SimpleCalleeResolver::new();

        let result = synth
            .taints_for_call(&unknown_call(), &incoming(), &resolver)
            .unwrap();
        let names: HashSet<&str> = result.iter().map(|l| l.value.name.as_str()).collect();

        assert_eq!(names, HashSet::from(["obj", "arg1", "arg2", "r"]));
        assert!(result.iter().all(|l| l.taint_sub_fields && l.fields.is_empty()));
        assert_eq!(synth.stats().hits(), 1);
    }

    #[test]
    fn test_resolved_call_defers() {
        let synth = GapFlowSynthesizer::new();
        let resolver = SimpleCalleeResolver::new().with_callee(StmtId(7), "<LibImpl: Object unknown(String,String)>");

        assert!(synth
            .taints_for_call(&unknown_call(), &incoming(), &resolver)
            .is_none());
        assert!(!synth.is_exclusive(&unknown_call(), &incoming(), &resolver));
        assert!(!synth.supports_call_site(&unknown_call(), &resolver));
        assert_eq!(synth.stats().misses(), 1);
    }

    #[test]
    fn test_unresolved_call_is_exclusive() {
        let synth = GapFlowSynthesizer::new();
        let resolver = SimpleCalleeResolver::new();
        assert!(synth.is_exclusive(&unknown_call(), &incoming(), &resolver));
        assert!(synth.supports_call_site(&unknown_call(), &resolver));
        assert!(synth.supports_callee("<Anything: void x()>"));
    }

    #[test]
    fn test_non_call_statement_is_ignored() {
        let synth = GapFlowSynthesizer::new();
        let resolver = SimpleCalleeResolver::new();
        let stmt = Statement::assign(StmtId(1), Value::local("x", "int"));

        assert!(synth.taints_for_call(&stmt, &incoming(), &resolver).is_none());
        assert!(!synth.is_exclusive(&stmt, &incoming(), &resolver));
        assert_eq!(synth.stats().hits() + synth.stats().misses(), 0);
    }

    #[test]
    fn test_static_call_without_result() {
        let synth = GapFlowSynthesizer::new();
        let resolver = SimpleCalleeResolver::new();
        let stmt = Statement::invoke(
            StmtId(2),
            InvokeExpr::static_call("<Log: void write(String)>", vec![Value::local("s", "String")]),
        );

        let result = synth.taints_for_call(&stmt, &incoming(), &resolver).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.contains(&TaintedLocation::whole(Value::local("s", "String"))));
    }

    #[test]
    fn test_stats_hit_rate() {
        let synth = GapFlowSynthesizer::new();
        let unresolved = SimpleCalleeResolver::new();
        let resolved = SimpleCalleeResolver::new().with_callee(StmtId(7), "<X: Object unknown(String,String)>");

        synth.taints_for_call(&unknown_call(), &incoming(), &unresolved);
        synth.taints_for_call(&unknown_call(), &incoming(), &resolved);
        assert_eq!(synth.stats().hit_rate(), 0.5);
    }
}
