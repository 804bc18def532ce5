//! Resolved `OBJECT-GROUP` / `NOTIFICATION-GROUP` entities (spec §3 "Group").

use super::ids::{GroupId, ModuleId, NodeId, NotificationId, ObjectId};
use super::object::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMember {
    Object(ObjectId),
    Notification(NotificationId),
}

#[derive(Debug, Clone)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub node: NodeId,
    pub module: ModuleId,
    pub is_notification_group: bool,
    pub members: Vec<GroupMember>,
    pub status: Option<Status>,
    pub status_label: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
}
