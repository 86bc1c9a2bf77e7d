//! Map-backed callee resolver
//!
//! For testing and for solvers that precompute call targets per statement.

use std::collections::HashMap;

use crate::features::method_summary::ports::{CalleeResolver, Statement, StmtId};

/// Call targets keyed by statement id; unknown statements are unresolved
#[derive(Debug, Clone, Default)]
pub struct SimpleCalleeResolver {
    callees: HashMap<StmtId, Vec<String>>,
}

impl SimpleCalleeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call edge
    pub fn add_callee(&mut self, stmt: StmtId, callee: impl Into<String>) {
        self.callees.entry(stmt).or_default().push(callee.into());
    }

    /// Builder form of [`add_callee`](Self::add_callee)
    pub fn with_callee(mut self, stmt: StmtId, callee: impl Into<String>) -> Self {
        self.add_callee(stmt, callee);
        self
    }
}

impl CalleeResolver for SimpleCalleeResolver {
    fn callees_of(&self, stmt: &Statement) -> Vec<String> {
        self.callees.get(&stmt.id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::method_summary::ports::{InvokeExpr, Value};

    #[test]
    fn test_simple_resolver() {
        let resolver = SimpleCalleeResolver::new()
            .with_callee(StmtId(1), "<A: void f()>")
            .with_callee(StmtId(1), "<B: void f()>");

        let call = |id| Statement::invoke(StmtId(id), InvokeExpr::static_call("<A: void f()>", vec![]));
        assert_eq!(resolver.callees_of(&call(1)).len(), 2);
        assert!(resolver.has_callees(&call(1)));
        assert!(!resolver.has_callees(&call(2)));

        let assign = Statement::assign(StmtId(3), Value::untyped("x"));
        assert!(resolver.callees_of(&assign).is_empty());
    }
}
