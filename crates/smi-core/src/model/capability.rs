//! Resolved `AGENT-CAPABILITIES` entities (RFC 2580, spec §3 "Group /
//! Compliance / Capability", §A.6 "AGENT-CAPABILITIES VARIATIONS").

use super::defval::DefVal;
use super::ids::{CapabilityId, GroupId, ModuleId, NodeId, ObjectId, TypeId};
use super::object::Status;

#[derive(Debug, Clone)]
pub struct Variation {
    pub object: ObjectId,
    pub syntax: Option<TypeId>,
    pub write_syntax: Option<TypeId>,
    pub access: Option<String>,
    pub creation_requires: Vec<ObjectId>,
    pub defval: Option<DefVal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Supports {
    pub module_name: String,
    pub includes: Vec<GroupId>,
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
    pub node: NodeId,
    pub module: ModuleId,
    pub product_release: Option<String>,
    pub status: Option<Status>,
    pub status_label: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub supports: Vec<Supports>,
}
