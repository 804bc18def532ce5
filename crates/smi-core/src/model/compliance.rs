//! Resolved `MODULE-COMPLIANCE` entities (spec §3 "Group / Compliance /
//! Capability").

use super::ids::{ComplianceId, GroupId, ModuleId, NodeId, ObjectId, TypeId};
use super::object::Status;

/// A per-OBJECT refinement inside a MODULE clause.
#[derive(Debug, Clone)]
pub struct ObjectRefinement {
    pub object: ObjectId,
    pub syntax: Option<TypeId>,
    pub write_syntax: Option<TypeId>,
    pub min_access: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ComplianceModule {
    pub module_name: Option<String>,
    pub mandatory_groups: Vec<GroupId>,
    pub group_refinements: Vec<(GroupId, Option<String>)>,
    pub object_refinements: Vec<ObjectRefinement>,
}

#[derive(Debug, Clone)]
pub struct Compliance {
    pub id: ComplianceId,
    pub name: String,
    pub node: NodeId,
    pub module: ModuleId,
    pub modules: Vec<ComplianceModule>,
    pub status: Option<Status>,
    pub status_label: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}
