//! External attribute form of an endpoint
//!
//! | attribute           | written when                  |
//! |---------------------|-------------------------------|
//! | `flow_type`         | always                        |
//! | `parameter_index`   | flow type is `Parameter`      |
//! | `base_type`         | present                       |
//! | `access_path`       | non-empty                     |
//! | `access_path_types` | present                       |
//! | `gap`               | endpoint is attached to a gap |

use serde::{Deserialize, Serialize};

use super::endpoint::FlowEndpoint;
use super::gap::GapDefinition;
use super::source_sink_type::SourceSinkType;
use crate::config::AccessPathLimit;
use crate::errors::{SummaryError, SummaryResult};

/// Serializable attributes of a [`FlowEndpoint`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointAttributes {
    pub flow_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_path_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<u32>,
}

impl FlowEndpoint {
    /// Export to the external attribute form.
    ///
    /// Fails with `UnsupportedFlowType` for kinds that have no external
    /// name; in-memory state is unaffected.
    pub fn attributes(&self) -> SummaryResult<EndpointAttributes> {
        let (flow_type, parameter_index) = match self.kind() {
            SourceSinkType::Parameter => ("Parameter", self.parameter_index()),
            SourceSinkType::Field => ("Field", None),
            SourceSinkType::Return => ("Return", None),
            kind @ SourceSinkType::GapBaseObject => {
                return Err(SummaryError::UnsupportedFlowType { kind });
            }
        };

        Ok(EndpointAttributes {
            flow_type: flow_type.to_string(),
            parameter_index,
            base_type: self.base_type().map(str::to_string),
            access_path: self
                .has_access_path()
                .then(|| self.access_path().to_vec()),
            access_path_types: self.access_path_types().map(<[String]>::to_vec),
            gap: self.gap().map(GapDefinition::id),
        })
    }

    /// Rebuild an endpoint from its attributes.
    ///
    /// `gap` must be the definition `attrs.gap` refers to, already resolved
    /// by the caller against the owning summary. The access path is truncated
    /// to `limit` again, so documents written under a larger limit load as
    /// sound over-approximations.
    pub fn from_attributes(
        attrs: &EndpointAttributes,
        gap: Option<GapDefinition>,
        limit: AccessPathLimit,
    ) -> SummaryResult<FlowEndpoint> {
        let kind: SourceSinkType = attrs.flow_type.parse()?;

        if attrs.gap != gap.as_ref().map(GapDefinition::id) {
            return Err(SummaryError::inconsistent(
                "gap attribute does not match the supplied gap definition",
            ));
        }

        let mut builder = FlowEndpoint::builder(kind);
        if kind == SourceSinkType::Parameter {
            if let Some(idx) = attrs.parameter_index {
                builder = builder.parameter_index(idx);
            }
        }
        if let Some(ty) = &attrs.base_type {
            builder = builder.base_type(ty.clone());
        }
        if let Some(path) = &attrs.access_path {
            builder = builder.access_path(path.iter().cloned());
        }
        if let Some(types) = &attrs.access_path_types {
            builder = builder.access_path_types(types.iter().cloned());
        }
        if let Some(gap) = gap {
            builder = builder.gap(gap);
        }

        let endpoint = builder.build(limit);
        endpoint.validate()?;
        Ok(endpoint)
    }
}
