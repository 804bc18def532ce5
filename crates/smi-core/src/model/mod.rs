//! The resolved, queryable model (spec §3, §4.5, §4.7, §9).
//!
//! Everything here is arena-allocated and referred to by dense [`ids`] —
//! the same approach the teacher uses for its own entity graph — rather
//! than through `Rc`/`RefCell` pointer cycles.

pub mod capability;
pub mod compliance;
pub mod defval;
pub mod group;
pub mod ids;
pub mod module;
pub mod node;
pub mod notification;
pub mod object;
pub mod oid;
pub mod ty;

use std::collections::HashMap;

use crate::diag::{Diagnostic, Severity, UnresolvedRef};

pub use capability::Capability;
pub use compliance::Compliance;
pub use defval::{DefVal, DefValValue};
pub use group::{Group, GroupMember};
pub use ids::{
    CapabilityId, ComplianceId, GroupId, ModuleId, NodeId, NotificationId, ObjectId, TypeId,
};
pub use module::{Language, Module};
pub use node::{Kind, Node};
pub use notification::Notification;
pub use object::{Access, IndexItem, Object, ObjectKind, RowLinkage, Status};
pub use oid::Oid;
pub use ty::{BaseType, NamedValue, Range, Type};

fn language_rank(lang: Language) -> u8 {
    match lang {
        Language::Smiv2 => 2,
        Language::Sppi => 1,
        Language::Smiv1 => 0,
    }
}

/// The mutable half of the model: the resolver's only write surface
/// (spec §4.5 "the resolver writes into a Model builder").
#[derive(Debug, Default)]
pub struct ModelBuilder {
    nodes: Vec<Node>,
    modules: Vec<Module>,
    types: Vec<Type>,
    objects: Vec<Object>,
    notifications: Vec<Notification>,
    groups: Vec<Group>,
    compliances: Vec<Compliance>,
    capabilities: Vec<Capability>,

    oid_index: HashMap<Oid, NodeId>,
    module_by_name: HashMap<String, ModuleId>,
    name_index: HashMap<String, NodeId>,
    scoped_index: HashMap<(String, String), NodeId>,

    diagnostics: Vec<Diagnostic>,
    unresolved: Vec<UnresolvedRef>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        let root = Node::new_root(NodeId(0));
        let mut oid_index = HashMap::new();
        oid_index.insert(root.oid.clone(), root.id);
        Self {
            nodes: vec![root],
            oid_index,
            ..Default::default()
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Materializes every OID prefix needed to reach `oid`, returning the
    /// (possibly pre-existing) leaf Node (spec §4.5 "the OID trie is
    /// materialized incrementally").
    pub fn ensure_node(&mut self, oid: &Oid) -> NodeId {
        if let Some(&id) = self.oid_index.get(oid) {
            return id;
        }
        let parent_oid = oid.parent().unwrap_or_else(Oid::root);
        let parent_id = self.ensure_node(&parent_oid);
        let id = NodeId(self.nodes.len() as u32);
        let node = Node::new_child(id, parent_id, oid.clone());
        self.nodes.push(node);
        self.oid_index.insert(oid.clone(), id);
        if let Some(arc) = oid.arc() {
            self.nodes[parent_id.index()].children.insert(arc, id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn node_by_oid(&self, oid: &Oid) -> Option<NodeId> {
        self.oid_index.get(oid).copied()
    }

    pub fn register_module(&mut self, module: Module) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.module_by_name.insert(module.name.clone(), id);
        let mut module = module;
        module.id = id;
        self.modules.push(module);
        id
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    pub fn module_by_name(&self, name: &str) -> Option<ModuleId> {
        self.module_by_name.get(name).copied()
    }

    /// Whether `candidate`'s module should become (or remain) the owner of
    /// a Node currently owned by `existing` (spec §4.5 "module preference":
    /// SMIv2 over SMIv1, then greater LAST-UPDATED, then alphabetical).
    pub fn prefers_module(&self, candidate: ModuleId, existing: ModuleId) -> bool {
        let c = &self.modules[candidate.index()];
        let e = &self.modules[existing.index()];
        let (cr, er) = (language_rank(c.language), language_rank(e.language));
        if cr != er {
            return cr > er;
        }
        match (&c.last_updated, &e.last_updated) {
            (Some(cl), Some(el)) if cl != el => return cl > el,
            (Some(_), None) => return true,
            (None, Some(_)) => return false,
            _ => {}
        }
        c.name < e.name
    }

    /// Assigns ownership of `node_id` to `module_id`, applying module
    /// preference if it is already owned. Returns whether `module_id` owns
    /// the node afterward.
    pub fn claim_node(&mut self, node_id: NodeId, module_id: ModuleId) -> bool {
        let existing = self.nodes[node_id.index()].module;
        match existing {
            None => {
                self.nodes[node_id.index()].module = Some(module_id);
                true
            }
            Some(existing_id) if existing_id == module_id => true,
            Some(existing_id) => {
                if self.prefers_module(module_id, existing_id) {
                    self.nodes[node_id.index()].module = Some(module_id);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn index_name(&mut self, module_name: &str, symbol_name: &str, node_id: NodeId) {
        self.name_index.entry(symbol_name.to_owned()).or_insert(node_id);
        self.scoped_index
            .entry((module_name.to_owned(), symbol_name.to_owned()))
            .or_insert(node_id);
    }

    /// Registers a resolved Type. Types have no Node of their own (only the
    /// objects that use them do), so they are not added to the name/scoped
    /// indices here; the resolver keeps its own per-module type symbol table
    /// during phase 4.
    pub fn register_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        let mut ty = ty;
        ty.id = id;
        self.types.push(ty);
        id
    }

    /// Registers a resolved Object under `module_name`. When `object.node`
    /// already carries an Object from an earlier registration (two distinct
    /// OBJECT-TYPEs resolving to the same OID), the first one keeps the
    /// node and this one is returned as the duplicate (spec §9
    /// "duplicate-oid": the resolver reports it and keeps the first-seen
    /// registration). The new Object is still stored — its data remains
    /// reachable by [`ObjectId`] — it simply never becomes `node.object`.
    pub fn register_object(&mut self, module_name: &str, object: Object) -> (ObjectId, Option<ObjectId>) {
        let id = ObjectId(self.objects.len() as u32);
        let mut object = object;
        object.id = id;
        let (name, node_id) = (object.name.clone(), object.node);
        let existing = self.nodes[node_id.index()].object;
        if existing.is_none() {
            self.nodes[node_id.index()].object = Some(id);
        }
        self.objects.push(object);
        self.index_name(module_name, &name, node_id);
        (id, existing)
    }

    pub fn register_notification(&mut self, module_name: &str, n: Notification) -> NotificationId {
        let id = NotificationId(self.notifications.len() as u32);
        let mut n = n;
        n.id = id;
        let (name, node_id) = (n.name.clone(), n.node);
        self.nodes[node_id.index()].notification = Some(id);
        self.notifications.push(n);
        self.index_name(module_name, &name, node_id);
        id
    }

    pub fn register_group(&mut self, module_name: &str, g: Group) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        let mut g = g;
        g.id = id;
        let (name, node_id) = (g.name.clone(), g.node);
        self.nodes[node_id.index()].group = Some(id);
        self.groups.push(g);
        self.index_name(module_name, &name, node_id);
        id
    }

    pub fn register_compliance(&mut self, module_name: &str, c: Compliance) -> ComplianceId {
        let id = ComplianceId(self.compliances.len() as u32);
        let mut c = c;
        c.id = id;
        let (name, node_id) = (c.name.clone(), c.node);
        self.nodes[node_id.index()].compliance = Some(id);
        self.compliances.push(c);
        self.index_name(module_name, &name, node_id);
        id
    }

    pub fn register_capability(&mut self, module_name: &str, c: Capability) -> CapabilityId {
        let id = CapabilityId(self.capabilities.len() as u32);
        let mut c = c;
        c.id = id;
        let (name, node_id) = (c.name.clone(), c.node);
        self.nodes[node_id.index()].capability = Some(id);
        self.capabilities.push(c);
        self.index_name(module_name, &name, node_id);
        id
    }

    /// Records a plain `OBJECT IDENTIFIER` value assignment name against its
    /// Node, for bare/scoped symbol lookup, without creating an Object.
    pub fn index_oid_assignment(&mut self, module_name: &str, name: &str, node_id: NodeId) {
        self.index_name(module_name, name, node_id);
    }

    pub fn push_diagnostic(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn push_unresolved(&mut self, r: UnresolvedRef) {
        self.unresolved.push(r);
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut [Type] {
        &mut self.types
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn modules_slice(&self) -> &[Module] {
        &self.modules
    }

    pub fn notifications_mut(&mut self) -> &mut [Notification] {
        &mut self.notifications
    }

    pub fn groups_mut(&mut self) -> &mut [Group] {
        &mut self.groups
    }

    pub fn compliances_mut(&mut self) -> &mut [Compliance] {
        &mut self.compliances
    }

    pub fn capabilities_mut(&mut self) -> &mut [Capability] {
        &mut self.capabilities
    }

    pub fn name_index(&self) -> &HashMap<String, NodeId> {
        &self.name_index
    }

    pub fn scoped_index(&self) -> &HashMap<(String, String), NodeId> {
        &self.scoped_index
    }

    /// Finalizes the build into an immutable [`Model`] (spec §4.6 phase 10).
    pub fn finish(self) -> Model {
        Model {
            nodes: self.nodes,
            modules: self.modules,
            types: self.types,
            objects: self.objects,
            notifications: self.notifications,
            groups: self.groups,
            compliances: self.compliances,
            capabilities: self.capabilities,
            oid_index: self.oid_index,
            module_by_name: self.module_by_name,
            name_index: self.name_index,
            scoped_index: self.scoped_index,
            diagnostics: self.diagnostics,
            unresolved: self.unresolved,
        }
    }
}

/// The immutable, resolved model returned by a completed load (spec §3
/// "Lifecycles": "all entities ... are immutable thereafter").
#[derive(Debug)]
pub struct Model {
    nodes: Vec<Node>,
    modules: Vec<Module>,
    types: Vec<Type>,
    objects: Vec<Object>,
    notifications: Vec<Notification>,
    groups: Vec<Group>,
    compliances: Vec<Compliance>,
    capabilities: Vec<Capability>,

    oid_index: HashMap<Oid, NodeId>,
    module_by_name: HashMap<String, ModuleId>,
    name_index: HashMap<String, NodeId>,
    scoped_index: HashMap<(String, String), NodeId>,

    diagnostics: Vec<Diagnostic>,
    unresolved: Vec<UnresolvedRef>,
}

impl Model {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.module_by_name.get(name).map(|id| &self.modules[id.index()])
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    pub fn notification(&self, id: NotificationId) -> &Notification {
        &self.notifications[id.index()]
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    pub fn compliance(&self, id: ComplianceId) -> &Compliance {
        &self.compliances[id.index()]
    }

    pub fn capability(&self, id: CapabilityId) -> &Capability {
        &self.capabilities[id.index()]
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.iter()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn unresolved(&self) -> &[UnresolvedRef] {
        &self.unresolved
    }

    /// Whether any diagnostic at or above `fail_at` was emitted (spec §7).
    pub fn has_errors(&self, fail_at: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity <= fail_at)
    }

    /// The INDEX entries that apply to a table row, following `AUGMENTS`
    /// to the base row's own INDEX clause when `object` augments rather
    /// than declares one directly (spec §8 seed scenario 3).
    pub fn effective_index(&self, object: ObjectId) -> &[IndexItem] {
        let mut current = object;
        let mut guard = 0;
        loop {
            match &self.object(current).linkage {
                RowLinkage::Index(items) => return items,
                RowLinkage::Augments(target) if guard < self.objects.len() => {
                    current = *target;
                    guard += 1;
                }
                RowLinkage::Augments(_) | RowLinkage::None => return &[],
            }
        }
    }

    /// An exact-match lookup by OID (spec §4.7: "a dotted OID (prefix-exact
    /// match against the trie)").
    pub fn node_by_oid(&self, oid: &Oid) -> Option<NodeId> {
        self.oid_index.get(oid).copied()
    }

    /// The general-purpose symbol lookup (spec §4.7): accepts a bare name, a
    /// `MODULE::name` scoped form, or a dotted/leading-dot OID.
    pub fn lookup(&self, query: &str) -> Option<NodeId> {
        if let Some(oid) = Oid::parse(query) {
            return self.node_by_oid(&oid);
        }
        if let Some((module, name)) = query.split_once("::") {
            return self
                .scoped_index
                .get(&(module.to_owned(), name.to_owned()))
                .copied();
        }
        self.name_index.get(query).copied()
    }

    /// Walks the trie arc-by-arc, returning the deepest Node whose OID is a
    /// prefix of `oid` (spec §4.7 "longest-prefix-by-OID").
    pub fn longest_prefix(&self, oid: &Oid) -> Option<NodeId> {
        let mut current = self.root();
        let mut best = None;
        for &arc in oid.arcs() {
            let node = &self.nodes[current.index()];
            let Some(&next) = node.children.get(&arc) else {
                break;
            };
            current = next;
            best = Some(current);
        }
        best.or(Some(self.root()))
    }

    /// A lazy, restartable, depth-first pre-order walk of `root`'s subtree,
    /// children visited in ascending arc order (spec §9 "Generators /
    /// iterators").
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            model: self,
            stack: vec![root],
        }
    }
}

pub struct Descendants<'a> {
    model: &'a Model,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = &self.model.nodes[id.index()];
        for &child in node.children.values().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
