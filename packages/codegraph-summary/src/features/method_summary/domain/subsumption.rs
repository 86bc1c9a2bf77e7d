//! Coarsening (subsumption) order over flow facts
//!
//! `a.is_coarser_than(b)` means every memory location `b` describes is also
//! described by `a`, so `b` may be dropped in favour of `a` without losing
//! soundness. A shorter access path with the same root denotes a superset of
//! locations, the same argument that makes access-path truncation sound.

use super::endpoint::FlowEndpoint;

/// Preorder used for antichain reduction of summary facts
pub trait Coarsening {
    /// True if `self` describes at least everything `other` describes
    fn is_coarser_than(&self, other: &Self) -> bool;

    /// Coarser than `other` without being equal to it
    fn is_strictly_coarser_than(&self, other: &Self) -> bool
    where
        Self: PartialEq,
    {
        self != other && self.is_coarser_than(other)
    }
}

impl Coarsening for FlowEndpoint {
    fn is_coarser_than(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }

        if self.kind() != other.kind()
            || self.parameter_index() != other.parameter_index()
            || self.base_type() != other.base_type()
            || self.gap() != other.gap()
        {
            return false;
        }

        // No path means the whole root value, which covers any field below it.
        // A path never covers the bare root.
        match (self.has_access_path(), other.has_access_path()) {
            (false, _) => true,
            (true, false) => false,
            (true, true) => other.access_path().starts_with(self.access_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessPathLimit;
    use crate::features::method_summary::domain::{GapDefinition, SourceSinkType};

    fn field(path: &[&str]) -> FlowEndpoint {
        FlowEndpoint::field("Foo")
            .access_path(path.iter().copied())
            .build(AccessPathLimit::default())
    }

    #[test]
    fn test_reflexive() {
        let a = field(&["x", "y"]);
        assert!(a.is_coarser_than(&a));
        assert!(!a.is_strictly_coarser_than(&a));
    }

    #[test]
    fn test_prefix_is_coarser() {
        let short = field(&["x"]);
        let long = field(&["x", "y"]);
        assert!(short.is_coarser_than(&long));
        assert!(!long.is_coarser_than(&short));
        assert!(short.is_strictly_coarser_than(&long));
    }

    #[test]
    fn test_no_path_covers_any_path() {
        let root = field(&[]);
        let deep = field(&["x", "y", "z"]);
        assert!(root.is_coarser_than(&deep));
        assert!(!deep.is_coarser_than(&root));
    }

    #[test]
    fn test_diverging_paths_are_incomparable() {
        let a = field(&["x", "y"]);
        let b = field(&["x", "z"]);
        assert!(!a.is_coarser_than(&b));
        assert!(!b.is_coarser_than(&a));
    }

    #[test]
    fn test_root_attributes_must_match() {
        let l = AccessPathLimit::default();
        let p0 = FlowEndpoint::parameter(0, "Foo").build(l);
        let p1 = FlowEndpoint::parameter(1, "Foo")
            .access_path(["x"])
            .build(l);
        let other_type = FlowEndpoint::parameter(0, "Bar")
            .access_path(["x"])
            .build(l);
        let field = FlowEndpoint::field("Foo").access_path(["x"]).build(l);

        assert!(!p0.is_coarser_than(&p1));
        assert!(!p0.is_coarser_than(&other_type));
        assert!(!p0.is_coarser_than(&field));
    }

    #[test]
    fn test_gap_must_match() {
        let l = AccessPathLimit::default();
        let gap = GapDefinition::new(0, "<Foo: Object get()>");
        let with_gap = FlowEndpoint::return_value("Object").gap(gap).build(l);
        let without_gap = FlowEndpoint::return_value("Object")
            .access_path(["f"])
            .build(l);
        assert!(!with_gap.is_coarser_than(&without_gap));
        assert!(!without_gap.is_coarser_than(&with_gap));
    }

    #[test]
    fn test_untyped_roots_compare_equal() {
        let l = AccessPathLimit::default();
        let a = FlowEndpoint::builder(SourceSinkType::Return).build(l);
        let b = FlowEndpoint::builder(SourceSinkType::Return)
            .access_path(["f"])
            .build(l);
        assert!(a.is_coarser_than(&b));
    }
}
