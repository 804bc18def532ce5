//! The object identifier value type (spec §3 "OID").

use std::fmt;

/// An ordered sequence of arc values.
///
/// The empty OID (`Oid::root()`) represents the conceptual root of the
/// global OID trie. OIDs are ordered lexicographically by arc, which is
/// also the ordering used when walking the trie arc-by-arc.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Oid(Vec<u32>);

impl Oid {
    /// The empty OID, representing the root of the trie.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds an OID from an explicit arc sequence.
    pub fn from_arcs(arcs: impl Into<Vec<u32>>) -> Self {
        Self(arcs.into())
    }

    /// Parses a dotted-decimal or leading-dot OID string, e.g. `1.3.6.1` or
    /// `.1.3.6.1` (spec §4.7 "a leading-dot OID form").
    ///
    /// Returns `None` if any component fails to parse as a `u32` or the
    /// string is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.strip_prefix('.').unwrap_or(text);
        if text.is_empty() {
            return None;
        }
        let mut arcs = Vec::new();
        for part in text.split('.') {
            arcs.push(part.parse::<u32>().ok()?);
        }
        Some(Self(arcs))
    }

    /// The arc sequence as a slice.
    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root OID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last arc component, or `None` for the root.
    pub fn arc(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// The OID of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Oid> {
        if self.0.is_empty() {
            return None;
        }
        Some(Oid(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns a new OID with `arc` appended.
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.0.clone();
        arcs.push(arc);
        Oid(arcs)
    }

    /// True if `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Oid) -> bool {
        other.0.len() >= self.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Every strict prefix of this OID, from the single-arc prefix up to
    /// (but excluding) `self`, in root-to-leaf order.
    pub fn prefixes(&self) -> Vec<Oid> {
        (1..self.0.len()).map(|n| Oid(self.0[..n].to_vec())).collect()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_dotted_and_leading_dot() {
        assert_eq!(Oid::parse("1.3.6.1"), Some(Oid::from_arcs(vec![1, 3, 6, 1])));
        assert_eq!(Oid::parse(".1.3.6.1"), Some(Oid::from_arcs(vec![1, 3, 6, 1])));
        assert_eq!(Oid::parse(""), None);
        assert_eq!(Oid::parse("1.x.3"), None);
    }

    #[test]
    fn full_u32_range_does_not_wrap() {
        let oid = Oid::parse("1.3.4294967295").expect("parses");
        assert_eq!(oid.arcs(), &[1, 3, 4_294_967_295]);
        assert_eq!(oid.to_string(), "1.3.4294967295");
    }

    #[test]
    fn prefix_testing() {
        let a = Oid::from_arcs(vec![1, 3, 6]);
        let b = Oid::from_arcs(vec![1, 3, 6, 1, 2]);
        assert!(a.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
        assert!(a.is_prefix_of(&a));
    }

    #[test]
    fn parent_and_child_roundtrip() {
        let oid = Oid::from_arcs(vec![1, 3, 6, 1]);
        let parent = oid.parent().expect("has parent");
        assert_eq!(parent, Oid::from_arcs(vec![1, 3, 6]));
        assert_eq!(parent.child(1), oid);
    }

    #[test]
    fn root_has_no_parent_or_arc() {
        let root = Oid::root();
        assert_eq!(root.parent(), None);
        assert_eq!(root.arc(), None);
        assert!(root.is_empty());
    }

    #[test]
    fn prefixes_are_root_to_leaf_exclusive_of_self() {
        let oid = Oid::from_arcs(vec![1, 3, 6, 1]);
        assert_eq!(
            oid.prefixes(),
            vec![
                Oid::from_arcs(vec![1]),
                Oid::from_arcs(vec![1, 3]),
                Oid::from_arcs(vec![1, 3, 6]),
            ]
        );
    }
}
