//! Flow endpoints
//!
//! A source and a sink have the same shape; which one a value is depends only
//! on the side of a [`MethodFlow`](super::MethodFlow) it occupies.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::gap::GapDefinition;
use super::source_sink_type::SourceSinkType;
use crate::config::AccessPathLimit;
use crate::errors::{SummaryError, SummaryResult};

/// One end of a summarized flow.
///
/// Immutable once built. Access paths are truncated to the configured limit
/// at construction, and an empty path is stored as "no path".
///
/// Equality covers kind, parameter index, base type, access path and gap.
/// Access-path types are carried along but do not take part in equality.
#[derive(Debug, Clone)]
pub struct FlowEndpoint {
    kind: SourceSinkType,
    parameter_index: Option<usize>,
    base_type: Option<String>,
    access_path: Option<Vec<String>>,
    access_path_types: Option<Vec<String>>,
    gap: Option<GapDefinition>,
}

/// Endpoint on the source side of a flow
pub type FlowSource = FlowEndpoint;

/// Endpoint on the sink side of a flow
pub type FlowSink = FlowEndpoint;

impl FlowEndpoint {
    /// Start building an endpoint of the given kind
    pub fn builder(kind: SourceSinkType) -> EndpointBuilder {
        EndpointBuilder::new(kind)
    }

    /// Formal parameter `index` of declared type `base_type`
    pub fn parameter(index: usize, base_type: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(SourceSinkType::Parameter)
            .parameter_index(index)
            .base_type(base_type)
    }

    /// The receiver of type `base_type`, or a field below it once a path is added
    pub fn field(base_type: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(SourceSinkType::Field).base_type(base_type)
    }

    /// The return value of type `base_type`
    pub fn return_value(base_type: impl Into<String>) -> EndpointBuilder {
        EndpointBuilder::new(SourceSinkType::Return).base_type(base_type)
    }

    /// The receiver object handed to `gap`
    pub fn gap_base_object(gap: GapDefinition) -> EndpointBuilder {
        EndpointBuilder::new(SourceSinkType::GapBaseObject).gap(gap)
    }

    pub fn kind(&self) -> SourceSinkType {
        self.kind
    }

    /// Parameter index; only set for `Parameter` endpoints
    pub fn parameter_index(&self) -> Option<usize> {
        self.parameter_index
    }

    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref()
    }

    /// Field chain from the root value; empty for the root itself
    pub fn access_path(&self) -> &[String] {
        self.access_path.as_deref().unwrap_or(&[])
    }

    pub fn access_path_types(&self) -> Option<&[String]> {
        self.access_path_types.as_deref()
    }

    pub fn gap(&self) -> Option<&GapDefinition> {
        self.gap.as_ref()
    }

    pub fn is_parameter(&self) -> bool {
        self.kind == SourceSinkType::Parameter
    }

    /// True for every `Field` endpoint, including the receiver itself
    pub fn is_field(&self) -> bool {
        self.kind == SourceSinkType::Field
    }

    pub fn is_return(&self) -> bool {
        self.kind == SourceSinkType::Return
    }

    pub fn is_gap_base_object(&self) -> bool {
        self.kind == SourceSinkType::GapBaseObject
    }

    /// The receiver object itself rather than one of its fields
    pub fn is_this(&self) -> bool {
        self.is_field() && !self.has_access_path()
    }

    pub fn has_access_path(&self) -> bool {
        self.access_path.is_some()
    }

    /// Number of fields in the access path, zero without one
    pub fn field_count(&self) -> usize {
        self.access_path.as_ref().map_or(0, Vec::len)
    }

    /// Static type of the tainted location: the last field type, or the base
    /// type when there is no typed access path.
    pub fn last_field_type(&self) -> Option<&str> {
        match self.access_path_types.as_deref() {
            Some([.., last]) => Some(last.as_str()),
            _ => self.base_type(),
        }
    }

    /// Check the construction invariants that the builder does not enforce
    pub fn validate(&self) -> SummaryResult<()> {
        match (self.kind, self.parameter_index) {
            (SourceSinkType::Parameter, None) => {
                return Err(SummaryError::inconsistent(
                    "parameter endpoint without parameter index",
                ));
            }
            (kind, Some(idx)) if kind != SourceSinkType::Parameter => {
                return Err(SummaryError::inconsistent(format!(
                    "{} endpoint carries parameter index {}",
                    kind, idx
                )));
            }
            _ => {}
        }

        if matches!(self.kind, SourceSinkType::Parameter | SourceSinkType::Field)
            && self.base_type.is_none()
        {
            return Err(SummaryError::inconsistent(format!(
                "{} endpoint without base type",
                self.kind
            )));
        }

        if self.is_gap_base_object() && self.gap.is_none() {
            return Err(SummaryError::inconsistent(
                "gap base object endpoint without gap",
            ));
        }

        if let Some(types) = &self.access_path_types {
            if types.len() != self.field_count() {
                return Err(SummaryError::inconsistent(format!(
                    "access path has {} fields but {} field types",
                    self.field_count(),
                    types.len()
                )));
            }
        }

        Ok(())
    }
}

impl PartialEq for FlowEndpoint {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.parameter_index == other.parameter_index
            && self.base_type == other.base_type
            && self.access_path == other.access_path
            && self.gap == other.gap
    }
}

impl Eq for FlowEndpoint {}

impl Hash for FlowEndpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.parameter_index.hash(state);
        self.base_type.hash(state);
        self.access_path.hash(state);
        self.gap.hash(state);
    }
}

impl fmt::Display for FlowEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(idx) = self.parameter_index {
            write!(f, " {}", idx)?;
        }
        if let Some(ty) = &self.base_type {
            write!(f, " ({})", ty)?;
        }
        if let Some(path) = &self.access_path {
            write!(f, " [{}]", path.join("."))?;
        }
        if let Some(gap) = &self.gap {
            write!(f, " @{}", gap)?;
        }
        Ok(())
    }
}

/// Builder for [`FlowEndpoint`]
///
/// Construction never fails: the only transformation applied by
/// [`build`](Self::build) is access-path truncation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EndpointBuilder {
    kind: SourceSinkType,
    parameter_index: Option<usize>,
    base_type: Option<String>,
    access_path: Option<Vec<String>>,
    access_path_types: Option<Vec<String>>,
    gap: Option<GapDefinition>,
}

impl EndpointBuilder {
    fn new(kind: SourceSinkType) -> Self {
        Self {
            kind,
            parameter_index: None,
            base_type: None,
            access_path: None,
            access_path_types: None,
            gap: None,
        }
    }

    pub fn parameter_index(mut self, index: usize) -> Self {
        self.parameter_index = Some(index);
        self
    }

    pub fn base_type(mut self, ty: impl Into<String>) -> Self {
        self.base_type = Some(ty.into());
        self
    }

    pub fn access_path<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_path = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn access_path_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access_path_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn gap(mut self, gap: GapDefinition) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Finish the endpoint, truncating both path sequences to `limit`
    pub fn build(self, limit: AccessPathLimit) -> FlowEndpoint {
        FlowEndpoint {
            kind: self.kind,
            parameter_index: self.parameter_index,
            base_type: self.base_type,
            access_path: limit.truncate(self.access_path),
            access_path_types: limit.truncate(self.access_path_types),
            gap: self.gap,
        }
    }
}
