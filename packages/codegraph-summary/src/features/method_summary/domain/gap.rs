//! Unresolved call sites inside a summarized method

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unresolved call site ("gap") within the method being summarized.
///
/// The id is unique within the owning summary; equality covers both the id
/// and the signature of the call that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GapDefinition {
    id: u32,
    signature: String,
}

impl GapDefinition {
    pub fn new(id: u32, signature: impl Into<String>) -> Self {
        Self {
            id,
            signature: signature.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Signature of the method called at this gap
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Class declaring the called method, from a `<Class: Ret name(Params)>`
    /// signature
    pub fn declaring_type(&self) -> Option<&str> {
        let (class, _) = self.signature.strip_prefix('<')?.split_once(':')?;
        Some(class.trim()).filter(|c| !c.is_empty())
    }

    /// Declared return type; `None` for `void` or an unparsable signature
    pub fn return_type(&self) -> Option<&str> {
        let (_, rest) = self.signature.split_once(':')?;
        let (ret, _) = rest.trim_start().split_once(' ')?;
        Some(ret).filter(|r| !r.is_empty() && *r != "void")
    }

    /// Declared type of parameter `index`
    pub fn parameter_type(&self, index: usize) -> Option<&str> {
        let open = self.signature.find('(')?;
        let close = self.signature.rfind(')')?;
        self.signature
            .get(open + 1..close)?
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .nth(index)
    }
}

impl fmt::Display for GapDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gap #{} ({})", self.id, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_parts() {
        let gap = GapDefinition::new(
            0,
            "<com.example.Registry: java.lang.Object put(java.lang.String, int)>",
        );
        assert_eq!(gap.declaring_type(), Some("com.example.Registry"));
        assert_eq!(gap.return_type(), Some("java.lang.Object"));
        assert_eq!(gap.parameter_type(0), Some("java.lang.String"));
        assert_eq!(gap.parameter_type(1), Some("int"));
        assert_eq!(gap.parameter_type(2), None);
    }

    #[test]
    fn test_void_and_malformed_signatures() {
        let gap = GapDefinition::new(1, "<Lib: void run()>");
        assert_eq!(gap.return_type(), None);
        assert_eq!(gap.parameter_type(0), None);

        let gap = GapDefinition::new(2, "run");
        assert_eq!(gap.declaring_type(), None);
        assert_eq!(gap.return_type(), None);
        assert_eq!(gap.parameter_type(0), None);
    }
}
