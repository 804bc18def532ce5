//! Resolved `OBJECT-TYPE` / `OBJECT-IDENTITY` entities (spec §3 "Object").

use super::defval::DefVal;
use super::ids::{ModuleId, NodeId, ObjectId, TypeId};

/// MAX-ACCESS / ACCESS values, including SPPI-only ones (spec §3 "Access").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    NotAccessible,
    AccessibleForNotify,
    ReadOnly,
    ReadWrite,
    ReadCreate,
    /// SMIv1 only.
    WriteOnly,
    /// SPPI only (RFC 3159).
    Install,
    InstallNotify,
    ReportOnly,
}

impl Access {
    pub fn parse(text: &str) -> Option<Access> {
        Some(match text {
            "not-accessible" => Access::NotAccessible,
            "accessible-for-notify" => Access::AccessibleForNotify,
            "read-only" => Access::ReadOnly,
            "read-write" | "write" => Access::ReadWrite,
            "read-create" => Access::ReadCreate,
            "write-only" => Access::WriteOnly,
            "install" => Access::Install,
            "install-notify" => Access::InstallNotify,
            "report-only" => Access::ReportOnly,
            _ => return None,
        })
    }
}

/// Object/Type/Notification/Group/Compliance/Capability lifecycle status
/// (spec §3 "Status"). SMIv1's `mandatory`/`optional` are normalized here;
/// the original spelling is kept on the definition for round-tripping (spec
/// §9 "Open questions").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Current,
    Deprecated,
    Obsolete,
}

impl Status {
    /// Normalizes a STATUS clause value, applying the SMIv1 mapping
    /// (`mandatory` → current, `optional` → deprecated).
    pub fn parse(text: &str) -> Option<Status> {
        Some(match text {
            "current" | "mandatory" => Status::Current,
            "deprecated" | "optional" => Status::Deprecated,
            "obsolete" => Status::Obsolete,
            _ => return None,
        })
    }
}

/// One entry of a resolved `INDEX` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexItem {
    pub object: ObjectId,
    pub implied: bool,
}

/// How a conceptual-row object derives its index (spec §3 "Object",
/// §4.6 phase 6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLinkage {
    Index(Vec<IndexItem>),
    Augments(ObjectId),
    None,
}

/// The structural role an OBJECT-TYPE plays within its table, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Scalar,
    Table,
    Row,
    Column,
}

/// A resolved `OBJECT-TYPE` or `OBJECT-IDENTITY` (spec §3 "Object").
#[derive(Debug, Clone)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub node: NodeId,
    pub module: ModuleId,
    pub ty: Option<TypeId>,
    pub object_kind: ObjectKind,
    pub access: Option<Access>,
    pub status: Option<Status>,
    pub status_label: Option<String>,
    pub description: Option<String>,
    pub units: Option<String>,
    pub reference: Option<String>,
    pub defval: Option<DefVal>,
    pub linkage: RowLinkage,
}
