//! OID arc allocation for synthetic modules.
//!
//! Every generated module hangs its definitions off `{ enterprises N }` for
//! some module-unique `N`, via a named root object, then assigns sequential
//! sub-arcs by reference to that name. This keeps OID assignments
//! collision-free across an arbitrarily large corpus without tracking any
//! global state.

/// The name of module `module_index`'s root OID assignment.
pub fn root_name(module_index: usize) -> String {
    format!("benchRoot{module_index}")
}

/// The `OBJECT IDENTIFIER` value a module's root is assigned, under
/// `enterprises`.
pub fn root_value(module_index: usize) -> String {
    format!("{{ enterprises {} }}", module_index + 1)
}

/// An OID value referencing `parent_name` at sub-arc `arc`.
pub fn child(parent_name: &str, arc: usize) -> String {
    format!("{{ {parent_name} {arc} }}")
}
