//! The OID trie (spec §3 "Node", §4.5 "Model assembly").

use std::collections::BTreeMap;

use super::ids::{CapabilityId, ComplianceId, GroupId, ModuleId, NodeId, NotificationId, ObjectId};
use super::oid::Oid;

/// The semantic role of a Node, derived during phase 6 (spec §3 "Kind").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Unknown,
    /// A placeholder materialized only because a descendant needs it as a
    /// prefix; carries no registered entity of its own.
    Internal,
    /// An `OBJECT IDENTIFIER` value assignment with no OBJECT-TYPE at it.
    Node,
    Scalar,
    Table,
    Row,
    Column,
    Notification,
    Group,
    Compliance,
    Capability,
}

impl Kind {
    pub fn is_table(self) -> bool {
        matches!(self, Kind::Table)
    }

    pub fn is_row(self) -> bool {
        matches!(self, Kind::Row)
    }

    pub fn is_column(self) -> bool {
        matches!(self, Kind::Column)
    }
}

/// A single point in the global OID trie.
///
/// Invariant (spec §8): for every non-root Node, `parent.oid ++ [arc] ==
/// oid`, and `arc` is unique among the parent's children.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub oid: Oid,
    pub parent: Option<NodeId>,
    pub children: BTreeMap<u32, NodeId>,
    pub kind: Kind,
    pub module: Option<ModuleId>,
    pub object: Option<ObjectId>,
    pub notification: Option<NotificationId>,
    pub group: Option<GroupId>,
    pub compliance: Option<ComplianceId>,
    pub capability: Option<CapabilityId>,
}

impl Node {
    pub(crate) fn new_root(id: NodeId) -> Self {
        Self {
            id,
            oid: Oid::root(),
            parent: None,
            children: BTreeMap::new(),
            kind: Kind::Internal,
            module: None,
            object: None,
            notification: None,
            group: None,
            compliance: None,
            capability: None,
        }
    }

    pub(crate) fn new_child(id: NodeId, parent: NodeId, oid: Oid) -> Self {
        Self {
            id,
            oid,
            parent: Some(parent),
            children: BTreeMap::new(),
            kind: Kind::Internal,
            module: None,
            object: None,
            notification: None,
            group: None,
            compliance: None,
            capability: None,
        }
    }

    pub fn arc(&self) -> Option<u32> {
        self.oid.arc()
    }
}
