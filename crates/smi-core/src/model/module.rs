//! Resolved `Module` entities (spec §3 "Module").

use super::ids::{
    CapabilityId, ComplianceId, GroupId, ModuleId, NotificationId, ObjectId, TypeId,
};
use super::oid::Oid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Smiv1,
    Smiv2,
    Sppi,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub language: Language,
    pub identity_oid: Option<Oid>,
    pub description: Option<String>,
    pub last_updated: Option<String>,
    pub organization: Option<String>,
    pub contact_info: Option<String>,
    /// `(date, description)` pairs, in declaration order.
    pub revisions: Vec<(String, String)>,
    pub types: Vec<TypeId>,
    pub objects: Vec<ObjectId>,
    pub notifications: Vec<NotificationId>,
    pub groups: Vec<GroupId>,
    pub compliances: Vec<ComplianceId>,
    pub capabilities: Vec<CapabilityId>,
}

impl Module {
    pub(crate) fn new(id: ModuleId, name: impl Into<String>, language: Language) -> Self {
        Self {
            id,
            name: name.into(),
            language,
            identity_oid: None,
            description: None,
            last_updated: None,
            organization: None,
            contact_info: None,
            revisions: Vec::new(),
            types: Vec::new(),
            objects: Vec::new(),
            notifications: Vec::new(),
            groups: Vec::new(),
            compliances: Vec::new(),
            capabilities: Vec::new(),
        }
    }
}
