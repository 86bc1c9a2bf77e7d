//! Where a flow endpoint attaches

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SummaryError;

/// Attachment point of a flow source or sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceSinkType {
    /// A formal parameter of the summarized method
    Parameter,
    /// The receiver (`this`) or a field reachable from it
    Field,
    /// The return value
    Return,
    /// The receiver object consumed by a gap call. Never serialized directly.
    GapBaseObject,
}

impl SourceSinkType {
    /// External name, if this kind can be written to a summary document
    pub fn external_name(&self) -> Option<&'static str> {
        match self {
            Self::Parameter => Some("Parameter"),
            Self::Field => Some("Field"),
            Self::Return => Some("Return"),
            Self::GapBaseObject => None,
        }
    }
}

impl fmt::Display for SourceSinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parameter => "Parameter",
            Self::Field => "Field",
            Self::Return => "Return",
            Self::GapBaseObject => "GapBaseObject",
        };
        write!(f, "{}", name)
    }
}

/// Parses only the externally representable kinds
impl FromStr for SourceSinkType {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parameter" => Ok(Self::Parameter),
            "Field" => Ok(Self::Field),
            "Return" => Ok(Self::Return),
            "GapBaseObject" => Err(SummaryError::UnsupportedFlowType {
                kind: Self::GapBaseObject,
            }),
            other => Err(SummaryError::serialization(format!(
                "unknown flow type '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_names_roundtrip() {
        for kind in [
            SourceSinkType::Parameter,
            SourceSinkType::Field,
            SourceSinkType::Return,
        ] {
            let name = kind.external_name().unwrap();
            assert_eq!(name.parse::<SourceSinkType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_gap_base_object_not_external() {
        assert!(SourceSinkType::GapBaseObject.external_name().is_none());
        assert!(matches!(
            "GapBaseObject".parse::<SourceSinkType>(),
            Err(SummaryError::UnsupportedFlowType { .. })
        ));
        assert!(matches!(
            "Static".parse::<SourceSinkType>(),
            Err(SummaryError::Serialization(_))
        ));
    }
}
