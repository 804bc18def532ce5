//! Resolved `NOTIFICATION-TYPE` / `TRAP-TYPE` entities (spec §3 "Notification").

use super::ids::{ModuleId, NodeId, NotificationId, ObjectId};
use super::object::Status;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub name: String,
    pub node: NodeId,
    pub module: ModuleId,
    /// Resolved varbind objects, in declaration order (spec §4.6 phase 7:
    /// unresolved entries are dropped and reported, not nulled in place).
    pub objects: Vec<ObjectId>,
    pub status: Option<Status>,
    pub status_label: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}
