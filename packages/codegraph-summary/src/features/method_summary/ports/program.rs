//! Program model seen by the gap synthesizer
//!
//! The solver owns the real IR; these are the few shapes this crate needs
//! from it at a call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement identifier, unique within one method body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StmtId(pub u32);

impl fmt::Display for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A local, parameter reference or constant operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    pub name: String,
    pub ty: Option<String>,
}

impl Value {
    pub fn local(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }
}

/// Method invocation expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeExpr {
    /// Signature of the invoked method
    pub signature: String,
    /// Receiver, for instance calls
    pub base: Option<Value>,
    pub args: Vec<Value>,
}

impl InvokeExpr {
    pub fn static_call(signature: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            signature: signature.into(),
            base: None,
            args,
        }
    }

    pub fn instance_call(signature: impl Into<String>, base: Value, args: Vec<Value>) -> Self {
        Self {
            signature: signature.into(),
            base: Some(base),
            args,
        }
    }

    pub fn is_instance_call(&self) -> bool {
        self.base.is_some()
    }
}

/// A statement, reduced to what matters at call sites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StmtId,
    pub invoke: Option<InvokeExpr>,
    /// Left-hand side when the statement is a definition
    pub assigned_to: Option<Value>,
}

impl Statement {
    /// `call(...)` with the result discarded
    pub fn invoke(id: StmtId, invoke: InvokeExpr) -> Self {
        Self {
            id,
            invoke: Some(invoke),
            assigned_to: None,
        }
    }

    /// `target = call(...)`
    pub fn assign_invoke(id: StmtId, target: Value, invoke: InvokeExpr) -> Self {
        Self {
            id,
            invoke: Some(invoke),
            assigned_to: Some(target),
        }
    }

    /// `target = <no call>`
    pub fn assign(id: StmtId, target: Value) -> Self {
        Self {
            id,
            invoke: None,
            assigned_to: Some(target),
        }
    }

    pub fn contains_invoke(&self) -> bool {
        self.invoke.is_some()
    }
}

/// A tainted memory location during analysis: a value plus a field chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaintedLocation {
    pub value: Value,
    pub fields: Vec<String>,
    /// Everything reachable below `fields` is tainted as well
    pub taint_sub_fields: bool,
}

impl TaintedLocation {
    /// The whole value including everything reachable from it
    pub fn whole(value: Value) -> Self {
        Self {
            value,
            fields: Vec::new(),
            taint_sub_fields: true,
        }
    }

    pub fn with_fields<I, S>(value: Value, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value,
            fields: fields.into_iter().map(Into::into).collect(),
            taint_sub_fields: true,
        }
    }
}

impl fmt::Display for TaintedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.name)?;
        for field in &self.fields {
            write!(f, ".{}", field)?;
        }
        if self.taint_sub_fields {
            write!(f, ".*")?;
        }
        Ok(())
    }
}
