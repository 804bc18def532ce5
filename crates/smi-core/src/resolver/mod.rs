//! The resolver: lowered parse trees → a resolved [`Model`] (spec §4.6).
//!
//! Ten phases, in order: module indexing, import resolution, transitive
//! closure, type resolution, OID resolution, kind inference, notification
//! binding, conformance, effective-value computation, finalization. All of
//! them share one [`Resolver`] so later phases can look back at earlier
//! results without re-walking the parse trees.

use std::collections::{HashMap, HashSet};

use crate::diag::{Diagnostic, DiagnosticConfig, Severity, UnresolvedKind, UnresolvedRef};
use crate::graph::DependencyGraph;
use crate::lowering::LoweredModule;
use crate::model::{
    Access, BaseType, Capability, Compliance, DefVal, DefValValue, Group, GroupMember, IndexItem,
    Kind, Model, ModelBuilder, Module, Object, ObjectId, ObjectKind, Oid, RowLinkage, Status, Type,
    TypeId,
};
use crate::parser::{
    CapabilityDef, ComplianceDef, DefValSyntax, Definition, GroupDef, ModuleIdentityDef,
    NotificationDef, ObjectTypeDef, OidArc, OidAssignment, OidValue, TypeSyntax,
};

mod oidval;
mod types;

use oidval::{asn1_universal_root, well_known_oid_root};

fn is_oid_bearing(def: &Definition) -> bool {
    matches!(
        def,
        Definition::ModuleIdentity(_) | Definition::ObjectType(_) | Definition::OidAssignment(_)
    )
}

fn oid_parent_name(def: &Definition) -> Option<&str> {
    let oid = match def {
        Definition::ModuleIdentity(mi) => &mi.oid,
        Definition::ObjectType(ot) => &ot.oid,
        Definition::OidAssignment(a) => &a.oid,
        _ => return None,
    };
    match oid.arcs.first() {
        Some(OidArc::Named { name, number: None }) => Some(name.as_str()),
        _ => None,
    }
}

/// Sorts a module's OID-bearing definitions (`MODULE-IDENTITY`,
/// `OBJECT-TYPE`, plain OID assignments) so a definition always comes after
/// whichever locally-declared symbol its first arc names, regardless of
/// source order (spec §4.6 phase 5, §5 "independent of parse order").
/// Definitions outside this module (imported parents) or not OID-bearing at
/// all are left for the normal per-symbol resolution to handle.
fn oid_dependency_order(decl_order: &[String], symbols: &HashMap<String, Definition>) -> Vec<String> {
    fn visit<'a>(
        name: &'a str,
        symbols: &'a HashMap<String, Definition>,
        emitted: &mut HashSet<&'a str>,
        visiting: &mut HashSet<&'a str>,
        sorted: &mut Vec<String>,
    ) {
        if emitted.contains(name) || visiting.contains(name) {
            return;
        }
        let Some(def) = symbols.get(name).filter(|d| is_oid_bearing(d)) else {
            return;
        };
        visiting.insert(name);
        if let Some(parent) = oid_parent_name(def) {
            visit(parent, symbols, emitted, visiting, sorted);
        }
        visiting.remove(name);
        emitted.insert(name);
        sorted.push(name.to_owned());
    }

    let mut sorted = Vec::with_capacity(decl_order.len());
    let mut emitted = HashSet::new();
    let mut visiting = HashSet::new();
    for name in decl_order {
        visit(name, symbols, &mut emitted, &mut visiting, &mut sorted);
    }
    sorted
}

/// Resolves a fully-lowered module set into a [`Model`] (spec §4.6).
pub fn resolve(modules: HashMap<String, LoweredModule>, config: &DiagnosticConfig) -> Model {
    let mut r = Resolver::new(modules, config);
    r.run();
    r.builder.finish()
}

struct Resolver<'a> {
    modules: HashMap<String, LoweredModule>,
    config: &'a DiagnosticConfig,
    builder: ModelBuilder,

    module_ids: HashMap<String, crate::model::ModuleId>,
    oid_symbols: HashMap<(String, String), Oid>,
    type_symbols: HashMap<(String, String), TypeId>,
    object_symbols: HashMap<(String, String), ObjectId>,
    notification_symbols: HashMap<(String, String), crate::model::NotificationId>,
    group_symbols: HashMap<(String, String), crate::model::GroupId>,
}

impl<'a> Resolver<'a> {
    fn new(modules: HashMap<String, LoweredModule>, config: &'a DiagnosticConfig) -> Self {
        Self {
            modules,
            config,
            builder: ModelBuilder::new(),
            module_ids: HashMap::new(),
            oid_symbols: HashMap::new(),
            type_symbols: HashMap::new(),
            object_symbols: HashMap::new(),
            notification_symbols: HashMap::new(),
            group_symbols: HashMap::new(),
        }
    }

    fn run(&mut self) {
        // Phase 1: module indexing + cycle detection (spec §4.4, §4.6 phase 1).
        let graph = DependencyGraph::build(&self.modules);
        for diag in graph.cycle_diagnostics() {
            self.report(diag);
        }
        let order = graph.resolution_order();

        // Phase 1 (cont'd): register every Module entity up front so cross-
        // module lookups during later phases can resolve module names.
        for name in &order {
            let Some(lowered) = self.modules.get(name) else {
                continue;
            };
            let id = self.builder.register_module(Module::new(
                crate::model::ModuleId(0),
                name.clone(),
                lowered.language,
            ));
            self.module_ids.insert(name.clone(), id);

            let lowering_diags = lowered.diagnostics.clone();
            for diag in lowering_diags {
                self.report(diag);
            }
        }

        // Phases 2-9, module by module in dependency order so imported
        // symbols are already resolved by the time a dependent needs them.
        for name in order {
            self.resolve_module(&name);
        }
    }

    fn report(&mut self, diag: Diagnostic) {
        if let Some(diag) = self.config.filter(diag) {
            self.builder.push_diagnostic(diag);
        }
    }

    fn resolve_module(&mut self, module: &str) {
        let Some(order) = self.modules.get(module).map(|m| m.order.clone()) else {
            return;
        };

        // Phase 2: import resolution — every FROM clause must name a module
        // that was actually loaded (spec §6 `import-module-not-found`).
        let import_clauses = self.modules[module].import_clauses.clone();
        let mut import_diags = Vec::new();
        for clause in &import_clauses {
            let aliased = self
                .config
                .allow_safe_fallbacks()
                .then(|| crate::base_modules::canonical_name(&clause.from_module))
                .flatten();
            let direct = self.modules.get(&clause.from_module);
            let resolved_source =
                direct.or_else(|| aliased.and_then(|canonical| self.modules.get(canonical)));
            if direct.is_none() && resolved_source.is_some() {
                if let Some(canonical) = aliased {
                    import_diags.push(Diagnostic::new(
                        Severity::Info,
                        "import-module-aliased",
                        module,
                        0,
                        0,
                        format!(
                            "module {:?}'s import from {:?} resolved via the canonical name {:?}",
                            module, clause.from_module, canonical,
                        ),
                    ));
                }
            }
            match resolved_source {
                None => {
                    import_diags.push(Diagnostic::new(
                        Severity::Error,
                        "import-module-not-found",
                        module,
                        0,
                        0,
                        format!("module {:?} imports from unknown module {:?}", module, clause.from_module),
                    ));
                }
                Some(source_module) => {
                    for symbol in &clause.symbols {
                        if !source_module.symbols.contains_key(symbol) {
                            import_diags.push(Diagnostic::new(
                                Severity::Error,
                                "import-not-found",
                                module,
                                0,
                                0,
                                format!(
                                    "module {:?} does not export {:?}, imported by {}",
                                    clause.from_module, symbol, module
                                ),
                            ));
                        }
                    }
                }
            }
        }
        for diag in import_diags {
            self.report(diag);
        }

        // Phase 4: types, resolved on demand with memoization (handles
        // forward references within a module and across a cycle).
        for name in &order {
            let is_type = matches!(
                self.modules[module].symbols.get(name),
                Some(Definition::Type(_))
            );
            if is_type {
                let mut visiting = HashSet::new();
                self.resolve_type(module, name, &mut visiting);
            }
        }

        // Phase 5 (MODULE-IDENTITY body) + phase 6 sub-pass 1: materialize
        // OIDs and register entities, deferring cross-references. Walked in
        // dependency-first order (spec §4.6 phase 5), not source-declaration
        // order, so a child declared above its parent still resolves.
        let oid_order = oid_dependency_order(&order, &self.modules[module].symbols);
        for name in &oid_order {
            let def = self.modules[module].symbols.get(name).cloned();
            match def {
                Some(Definition::ModuleIdentity(mi)) => self.resolve_module_identity(module, &mi),
                Some(Definition::ObjectType(ot)) => self.resolve_object_pass1(module, &ot),
                Some(Definition::OidAssignment(a)) => self.resolve_oid_assignment(module, &a),
                _ => {}
            }
        }

        // Phase 6 sub-pass 2: resolve INDEX/AUGMENTS linkage now that every
        // object in this module has a Node and an Object id.
        for name in &order {
            if let Some(Definition::ObjectType(ot)) = self.modules[module].symbols.get(name).cloned() {
                self.resolve_object_linkage(module, &ot);
            }
        }

        // Phase 7: notifications.
        for name in &order {
            if let Some(Definition::Notification(n)) = self.modules[module].symbols.get(name).cloned() {
                self.resolve_notification(module, &n);
            }
        }

        // Phase 8: conformance (groups, compliances, capabilities).
        for name in &order {
            if let Some(Definition::Group(g)) = self.modules[module].symbols.get(name).cloned() {
                self.resolve_group(module, &g);
            }
        }
        for name in &order {
            if let Some(Definition::Compliance(c)) = self.modules[module].symbols.get(name).cloned() {
                self.resolve_compliance(module, &c);
            }
        }
        for name in &order {
            if let Some(Definition::Capability(c)) = self.modules[module].symbols.get(name).cloned() {
                self.resolve_capability(module, &c);
            }
        }
    }

    // -- generic symbol resolution -------------------------------------------

    /// Resolves `name` against `module`'s own symbols first, then its
    /// IMPORTS table (aliased FROM-module names included once
    /// `allow-safe-fallbacks` is on), then — only once
    /// `allow-best-guess-fallbacks` is on — a last-resort scan of every
    /// module's table by bare name (spec §4.8).
    fn resolve_symbol<T: Clone>(
        &self,
        module: &str,
        name: &str,
        table: &HashMap<(String, String), T>,
    ) -> Option<T> {
        if let Some(v) = table.get(&(module.to_owned(), name.to_owned())) {
            return Some(v.clone());
        }
        if let Some(candidates) = self.modules.get(module).and_then(|m| m.imports.candidates.get(name)) {
            for candidate_module in candidates {
                if let Some(v) = table.get(&(candidate_module.clone(), name.to_owned())) {
                    return Some(v.clone());
                }
                if self.config.allow_safe_fallbacks() {
                    if let Some(canonical) = crate::base_modules::canonical_name(candidate_module) {
                        if let Some(v) = table.get(&(canonical.to_owned(), name.to_owned())) {
                            return Some(v.clone());
                        }
                    }
                }
            }
        }
        if self.config.allow_best_guess_fallbacks() {
            return table
                .iter()
                .find(|((_, n), _)| n == name)
                .map(|(_, v)| v.clone());
        }
        None
    }

    fn module_name_for_import(&self, module: &str, name: &str) -> Option<String> {
        self.modules
            .get(module)
            .and_then(|m| m.imports.candidates.get(name))
            .and_then(|c| c.first())
            .cloned()
    }

    // -- OID resolution (phase 5) ---------------------------------------------

    fn resolve_oid_symbol(&mut self, module: &str, name: &str) -> Option<Oid> {
        // `iso`/`ccitt`/`joint-iso-ccitt` are ASN.1 universal roots, not SMI
        // symbols — always available, never gated by strictness.
        if let Some(oid) = asn1_universal_root(name) {
            return Some(oid);
        }
        if let Some(oid) = self.resolve_symbol(module, name, &self.oid_symbols) {
            return Some(oid);
        }
        if self.config.allow_best_guess_fallbacks() {
            if let Some(oid) = well_known_oid_root(name) {
                self.report(Diagnostic::new(
                    Severity::Info,
                    "oid-well-known-fallback",
                    module,
                    0,
                    0,
                    format!("resolved {name:?} via a well-known SMI root fallback"),
                ));
                return Some(oid);
            }
        }
        None
    }

    fn resolve_oid_value(&mut self, module: &str, value: &OidValue) -> Option<Oid> {
        let mut arcs: Vec<u32> = Vec::new();
        for (i, arc) in value.arcs.iter().enumerate() {
            match arc {
                OidArc::Number(n) => arcs.push(*n),
                OidArc::Named { number: Some(n), .. } => arcs.push(*n),
                OidArc::Named { name, number: None } if i == 0 => {
                    let Some(base) = self.resolve_oid_symbol(module, name) else {
                        self.report(Diagnostic::new(
                            Severity::Error,
                            "oid-orphan",
                            module,
                            0,
                            0,
                            format!("unresolved OID base symbol {name:?}"),
                        ));
                        self.builder
                            .push_unresolved(UnresolvedRef::new(UnresolvedKind::Oid, name.clone(), module));
                        return None;
                    };
                    arcs.extend_from_slice(base.arcs());
                }
                OidArc::Named { name, number: None } => {
                    self.report(Diagnostic::new(
                        Severity::Error,
                        "oid-orphan",
                        module,
                        0,
                        0,
                        format!("unresolved OID arc symbol {name:?}"),
                    ));
                    self.builder
                        .push_unresolved(UnresolvedRef::new(UnresolvedKind::Oid, name.clone(), module));
                    return None;
                }
            }
        }
        Some(Oid::from_arcs(arcs))
    }

    // -- types (phase 4) -------------------------------------------------------

    fn resolve_type(
        &mut self,
        module: &str,
        name: &str,
        visiting: &mut HashSet<(String, String)>,
    ) -> Option<TypeId> {
        types::resolve_type(self, module, name, visiting)
    }

    // -- definitions -----------------------------------------------------------

    fn resolve_module_identity(&mut self, module: &str, mi: &ModuleIdentityDef) {
        let Some(oid) = self.resolve_oid_value(module, &mi.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), mi.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        self.builder.node_mut(node_id).kind = Kind::Node;
        self.builder
            .index_oid_assignment(module, &mi.name, node_id);

        let m = self.builder.module_mut(module_id);
        m.identity_oid = Some(oid);
        m.description = mi.description.clone();
        m.last_updated = mi.last_updated.clone();
        m.organization = mi.organization.clone();
        m.contact_info = mi.contact_info.clone();
        m.revisions = mi.revisions.clone();
        m.last_updated = mi.last_updated.clone();
    }

    fn resolve_oid_assignment(&mut self, module: &str, a: &OidAssignment) {
        let Some(oid) = self.resolve_oid_value(module, &a.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), a.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        if self.builder.node(node_id).kind == Kind::Internal {
            self.builder.node_mut(node_id).kind = Kind::Node;
        }
        self.builder.index_oid_assignment(module, &a.name, node_id);
    }

    fn resolve_object_pass1(&mut self, module: &str, def: &ObjectTypeDef) {
        let Some(oid) = self.resolve_oid_value(module, &def.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), def.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);

        let mut visiting = HashSet::new();
        let (ty, is_table, is_row) = match &def.syntax {
            None => (None, false, false),
            Some(TypeSyntax::SequenceOf(_)) => (None, true, false),
            Some(syntax) => {
                let ty = types::build_anonymous_type(self, module, &def.name, syntax, &mut visiting);
                let is_row = ty.base == BaseType::Sequence;
                let id = self.builder.register_type(ty);
                (Some(id), false, is_row)
            }
        };

        let parent_kind = self
            .builder
            .node(node_id)
            .parent
            .map(|p| self.builder.node(p).kind);
        let object_kind = if is_table {
            ObjectKind::Table
        } else if is_row {
            ObjectKind::Row
        } else if parent_kind == Some(Kind::Row) {
            ObjectKind::Column
        } else {
            ObjectKind::Scalar
        };
        self.builder.node_mut(node_id).kind = match object_kind {
            ObjectKind::Table => Kind::Table,
            ObjectKind::Row => Kind::Row,
            ObjectKind::Column => Kind::Column,
            ObjectKind::Scalar => Kind::Scalar,
        };

        let access = def.access.as_deref().and_then(Access::parse);
        let status = def.status.as_deref().and_then(Status::parse);
        let defval = def.defval.as_ref().map(|syntax| {
            let ty_ref = ty.map(|id| self.builder.types()[id.index()].clone());
            self.resolve_defval(module, syntax, def.defval_raw.as_deref().unwrap_or(""), ty_ref.as_ref())
        });

        let object = Object {
            id: ObjectId(0),
            name: def.name.clone(),
            node: node_id,
            module: module_id,
            ty,
            object_kind,
            access,
            status,
            status_label: def.status.clone(),
            description: def.description.clone(),
            units: def.units.clone(),
            reference: def.reference.clone(),
            defval,
            linkage: RowLinkage::None,
        };
        let node_oid = self.builder.node(node_id).oid.clone();
        let (object_id, first_seen) = self.builder.register_object(module, object);
        self.object_symbols.insert((module.to_owned(), def.name.clone()), object_id);

        if let Some(first_id) = first_seen {
            let first = &self.builder.objects()[first_id.index()];
            let first_module = self.builder.modules_slice()[first.module.index()].name.clone();
            let diag = Diagnostic::new(
                Severity::Warning,
                "duplicate-oid",
                module,
                0,
                0,
                format!(
                    "{node_oid} is already registered as {:?} (module {first_module}); \
                     {:?} (module {module}) is ignored",
                    first.name, def.name,
                ),
            );
            self.report(diag);
        }

        let module_entity = self.builder.module_mut(module_id);
        if let Some(id) = ty {
            module_entity.types.push(id);
        }
        module_entity.objects.push(object_id);
    }

    fn resolve_object_linkage(&mut self, module: &str, def: &ObjectTypeDef) {
        let Some(&object_id) = self.object_symbols.get(&(module.to_owned(), def.name.clone())) else {
            return;
        };
        let linkage = match &def.linkage {
            crate::parser::RowLinkage::None => RowLinkage::None,
            crate::parser::RowLinkage::Augments(name) => {
                match self.resolve_symbol(module, name, &self.object_symbols) {
                    Some(id) => RowLinkage::Augments(id),
                    None => {
                        self.report(Diagnostic::new(
                            Severity::Error,
                            "index-unresolved",
                            module,
                            0,
                            0,
                            format!("AUGMENTS target {name:?} not found"),
                        ));
                        self.builder
                            .push_unresolved(UnresolvedRef::new(UnresolvedKind::Index, name.clone(), module));
                        RowLinkage::None
                    }
                }
            }
            crate::parser::RowLinkage::Index(entries) => {
                let mut items = Vec::new();
                for entry in entries {
                    match self.resolve_symbol(module, &entry.name, &self.object_symbols) {
                        Some(id) => items.push(IndexItem { object: id, implied: entry.implied }),
                        None => {
                            self.report(Diagnostic::new(
                                Severity::Error,
                                "index-unresolved",
                                module,
                                0,
                                0,
                                format!("INDEX item {:?} not found", entry.name),
                            ));
                            self.builder.push_unresolved(UnresolvedRef::new(
                                UnresolvedKind::Index,
                                entry.name.clone(),
                                module,
                            ));
                        }
                    }
                }
                RowLinkage::Index(items)
            }
        };
        self.builder.objects_mut()[object_id.index()].linkage = linkage;
    }

    fn resolve_notification(&mut self, module: &str, def: &NotificationDef) {
        let oid = if let Some(enterprise) = &def.trap_enterprise {
            let Some(base) = self.resolve_oid_symbol(module, enterprise) else {
                self.report(Diagnostic::new(
                    Severity::Error,
                    "oid-orphan",
                    module,
                    0,
                    0,
                    format!("TRAP-TYPE enterprise {enterprise:?} not found"),
                ));
                return;
            };
            let number = def.trap_number.unwrap_or(0);
            base.child(0).child(number)
        } else {
            let Some(value) = &def.oid else { return };
            let Some(oid) = self.resolve_oid_value(module, value) else { return };
            oid
        };
        self.oid_symbols.insert((module.to_owned(), def.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        self.builder.node_mut(node_id).kind = Kind::Notification;

        let mut objects = Vec::new();
        for varbind in &def.objects {
            match self.resolve_symbol(module, varbind, &self.object_symbols) {
                Some(id) => objects.push(id),
                None => {
                    self.report(Diagnostic::new(
                        Severity::Error,
                        "objects-unresolved",
                        module,
                        0,
                        0,
                        format!("notification varbind {varbind:?} not found"),
                    ));
                    self.builder.push_unresolved(UnresolvedRef::new(
                        UnresolvedKind::NotificationObject,
                        varbind.clone(),
                        module,
                    ));
                }
            }
        }

        let status = def.status.as_deref().and_then(Status::parse);
        let notification = crate::model::Notification {
            id: crate::model::NotificationId(0),
            name: def.name.clone(),
            node: node_id,
            module: module_id,
            objects,
            status,
            status_label: def.status.clone(),
            description: def.description.clone(),
            reference: def.reference.clone(),
        };
        let id = self.builder.register_notification(module, notification);
        self.notification_symbols.insert((module.to_owned(), def.name.clone()), id);
        self.builder.module_mut(module_id).notifications.push(id);
    }

    fn resolve_group(&mut self, module: &str, def: &GroupDef) {
        let Some(oid) = self.resolve_oid_value(module, &def.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), def.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        self.builder.node_mut(node_id).kind = Kind::Group;

        let mut members = Vec::new();
        for member_name in &def.members {
            if def.is_notification_group {
                match self.resolve_symbol(module, member_name, &self.notification_symbols) {
                    Some(id) => members.push(GroupMember::Notification(id)),
                    None => self.report_group_member_unknown(module, member_name),
                }
            } else {
                match self.resolve_symbol(module, member_name, &self.object_symbols) {
                    Some(id) => members.push(GroupMember::Object(id)),
                    None => self.report_group_member_unknown(module, member_name),
                }
            }
        }

        let status = def.status.as_deref().and_then(Status::parse);
        let group = Group {
            id: crate::model::GroupId(0),
            name: def.name.clone(),
            node: node_id,
            module: module_id,
            is_notification_group: def.is_notification_group,
            members,
            status,
            status_label: def.status.clone(),
            description: def.description.clone(),
            reference: def.reference.clone(),
        };
        let id = self.builder.register_group(module, group);
        self.group_symbols.insert((module.to_owned(), def.name.clone()), id);
        self.builder.module_mut(module_id).groups.push(id);
    }

    fn report_group_member_unknown(&mut self, module: &str, member_name: &str) {
        self.report(Diagnostic::new(
            Severity::Error,
            "group-member-unknown",
            module,
            0,
            0,
            format!("group member {member_name:?} not found"),
        ));
        self.builder
            .push_unresolved(UnresolvedRef::new(UnresolvedKind::Index, member_name, module));
    }

    fn resolve_compliance(&mut self, module: &str, def: &ComplianceDef) {
        let Some(oid) = self.resolve_oid_value(module, &def.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), def.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        self.builder.node_mut(node_id).kind = Kind::Compliance;

        let mut modules = Vec::new();
        for cm in &def.modules {
            let scope = cm.module_name.clone().unwrap_or_else(|| module.to_owned());
            let mandatory_groups = cm
                .mandatory_groups
                .iter()
                .filter_map(|n| self.resolve_symbol(&scope, n, &self.group_symbols))
                .collect();
            let group_refinements = cm
                .group_refinements
                .iter()
                .filter_map(|(n, desc)| {
                    self.resolve_symbol(&scope, n, &self.group_symbols)
                        .map(|id| (id, desc.clone()))
                })
                .collect();
            let mut object_refinements = Vec::new();
            for r in &cm.object_refinements {
                let Some(object) = self.resolve_symbol(&scope, &r.name, &self.object_symbols) else {
                    continue;
                };
                let mut visiting = HashSet::new();
                let syntax = r
                    .syntax
                    .as_ref()
                    .map(|s| types::build_anonymous_type(self, module, &r.name, s, &mut visiting))
                    .map(|ty| self.builder.register_type(ty));
                let write_syntax = r
                    .write_syntax
                    .as_ref()
                    .map(|s| types::build_anonymous_type(self, module, &r.name, s, &mut visiting))
                    .map(|ty| self.builder.register_type(ty));
                object_refinements.push(crate::model::compliance::ObjectRefinement {
                    object,
                    syntax,
                    write_syntax,
                    min_access: r.min_access.clone(),
                    description: r.description.clone(),
                });
            }
            modules.push(crate::model::compliance::ComplianceModule {
                module_name: cm.module_name.clone(),
                mandatory_groups,
                group_refinements,
                object_refinements,
            });
        }

        let status = def.status.as_deref().and_then(Status::parse);
        let compliance = Compliance {
            id: crate::model::ComplianceId(0),
            name: def.name.clone(),
            node: node_id,
            module: module_id,
            modules,
            status,
            status_label: def.status.clone(),
            description: def.description.clone(),
            reference: def.reference.clone(),
        };
        let id = self.builder.register_compliance(module, compliance);
        self.builder.module_mut(module_id).compliances.push(id);
    }

    fn resolve_capability(&mut self, module: &str, def: &CapabilityDef) {
        let Some(oid) = self.resolve_oid_value(module, &def.oid) else {
            return;
        };
        self.oid_symbols.insert((module.to_owned(), def.name.clone()), oid.clone());
        let node_id = self.builder.ensure_node(&oid);
        let module_id = self.module_ids[module];
        self.builder.claim_node(node_id, module_id);
        self.builder.node_mut(node_id).kind = Kind::Capability;

        let mut supports = Vec::new();
        for entry in &def.supports {
            let scope = entry.module_name.clone();
            let includes = entry
                .includes
                .iter()
                .filter_map(|n| self.resolve_symbol(&scope, n, &self.group_symbols))
                .collect();
            let mut variations = Vec::new();
            for v in &entry.variations {
                let Some(object) = self.resolve_symbol(&scope, &v.name, &self.object_symbols) else {
                    continue;
                };
                let mut visiting = HashSet::new();
                let syntax = v
                    .syntax
                    .as_ref()
                    .map(|s| types::build_anonymous_type(self, module, &v.name, s, &mut visiting))
                    .map(|ty| self.builder.register_type(ty));
                let write_syntax = v
                    .write_syntax
                    .as_ref()
                    .map(|s| types::build_anonymous_type(self, module, &v.name, s, &mut visiting))
                    .map(|ty| self.builder.register_type(ty));
                let ty_ref = syntax.map(|id| self.builder.types()[id.index()].clone());
                let defval = v.defval.as_ref().map(|syntax| {
                    self.resolve_defval(module, syntax, "", ty_ref.as_ref())
                });
                let creation_requires = v
                    .creation_requires
                    .iter()
                    .filter_map(|n| self.resolve_symbol(&scope, n, &self.object_symbols))
                    .collect();
                variations.push(crate::model::capability::Variation {
                    object,
                    syntax,
                    write_syntax,
                    access: v.access.clone(),
                    creation_requires,
                    defval,
                    description: v.description.clone(),
                });
            }
            supports.push(crate::model::capability::Supports {
                module_name: entry.module_name.clone(),
                includes,
                variations,
            });
        }

        let status = def.status.as_deref().and_then(Status::parse);
        let capability = Capability {
            id: crate::model::CapabilityId(0),
            name: def.name.clone(),
            node: node_id,
            module: module_id,
            product_release: def.product_release.clone(),
            status,
            status_label: def.status.clone(),
            description: def.description.clone(),
            reference: def.reference.clone(),
            supports,
        };
        let id = self.builder.register_capability(module, capability);
        self.builder.module_mut(module_id).capabilities.push(id);
    }

    // -- DEFVAL (phase 9) --------------------------------------------------

    fn resolve_defval(
        &mut self,
        module: &str,
        syntax: &DefValSyntax,
        raw: &str,
        ty: Option<&Type>,
    ) -> DefVal {
        match syntax {
            DefValSyntax::Int(v) => DefVal::new(raw, DefValValue::Int(*v)),
            DefValSyntax::QuotedString(s) => DefVal::new(raw, DefValValue::Str(s.clone())),
            DefValSyntax::Hex(bytes) => DefVal::new(raw, DefValValue::Bytes(bytes.clone())),
            DefValSyntax::Bin(bytes) => DefVal::new(raw, DefValValue::Bytes(bytes.clone())),
            DefValSyntax::Ident(name) => {
                if let Some(t) = ty {
                    if let Some(nv) = t.named_values.iter().find(|nv| &nv.name == name) {
                        return DefVal::new(raw, DefValValue::Int(nv.number));
                    }
                }
                DefVal::new(raw, DefValValue::Enum(name.clone()))
            }
            DefValSyntax::IdentSet(names) => DefVal::new(raw, DefValValue::BitLabels(names.clone())),
            DefValSyntax::Oid(value) => match self.resolve_oid_value(module, value) {
                Some(oid) => DefVal::new(raw, DefValValue::Oid(oid)),
                None => DefVal::new(raw, DefValValue::Str(raw.to_owned())),
            },
        }
    }
}
