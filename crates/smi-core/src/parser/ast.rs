//! Parse-tree types produced by the parser (spec §4.2).
//!
//! These are a build-time artifact: dropped once lowering has extracted a
//! per-module symbol table (spec §3 "Lifecycles").

use crate::span::Span;

/// A single arc of an OID value, either a bare integer or a `name(number)`
/// pair (spec §4.2, §A.6 DEFVAL OID syntax).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OidArc {
    Number(u32),
    Named { name: String, number: Option<u32> },
}

/// The right-hand side of an OID value assignment: `{ parent arc arc ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidValue {
    pub arcs: Vec<OidArc>,
    pub span: Span,
}

/// A size or range constraint, e.g. `(0..255)` or `(SIZE (0..64))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    pub lo: i128,
    pub hi: i128,
}

/// A named value in an `INTEGER { a(1), b(2) }` or `BITS { a(0), b(1) }` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedNumber {
    pub name: String,
    pub number: i128,
}

/// A type reference as written in a SYNTAX clause: either a plain name
/// (possibly with an inline refinement) or an anonymous primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    /// A named type reference, e.g. `DisplayString`, `Counter32`, possibly
    /// from an imported module (resolved later).
    Named(String),
    /// `SEQUENCE OF <type-name>` — marks an OBJECT-TYPE as a conceptual table.
    SequenceOf(String),
    /// `SEQUENCE { field-list }` — a row type's column list (name, syntax).
    Sequence(Vec<(String, TypeSyntax)>),
    /// Anonymous `INTEGER { ... }` or a bare `INTEGER`.
    Integer { named_values: Vec<NamedNumber> },
    /// Anonymous `OCTET STRING` with optional size constraints.
    OctetString { sizes: Vec<RangeConstraint> },
    /// Anonymous `BITS { ... }`.
    Bits { named_values: Vec<NamedNumber> },
    ObjectIdentifier,
}

/// A `DEFVAL { ... }` clause, carrying both the raw MIB syntax text and a
/// coarse syntactic classification; full interpretation happens once the
/// object's type is resolved (spec §3 "DefVal", §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefValSyntax {
    Int(i128),
    QuotedString(String),
    Hex(Vec<u8>),
    Bin(Vec<u8>),
    /// A bare identifier: could be an enum label or (for BITS) the start of
    /// a bit-label set; disambiguated once the type is known.
    Ident(String),
    /// `{ a, b, c }` — a BITS label set.
    IdentSet(Vec<String>),
    Oid(OidValue),
}

/// One `{ entry [IMPLIED] }` in an INDEX clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub implied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLinkage {
    Index(Vec<IndexEntry>),
    Augments(String),
    None,
}

/// `OBJECT-TYPE` / `OBJECT-IDENTITY` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTypeDef {
    pub name: String,
    pub syntax: Option<TypeSyntax>,
    pub units: Option<String>,
    pub access: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub linkage: RowLinkage,
    pub defval: Option<DefValSyntax>,
    pub defval_raw: Option<String>,
    pub oid: OidValue,
    pub span: Span,
}

/// `MODULE-IDENTITY` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentityDef {
    pub name: String,
    pub last_updated: Option<String>,
    pub organization: Option<String>,
    pub contact_info: Option<String>,
    pub description: Option<String>,
    pub revisions: Vec<(String, String)>,
    pub oid: OidValue,
    pub span: Span,
}

/// `NOTIFICATION-TYPE` / `TRAP-TYPE` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDef {
    pub name: String,
    pub objects: Vec<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// `Some(enterprise)` for SMIv1 TRAP-TYPE, whose OID is
    /// `enterprise ++ [0, trap-number]` (RFC 1215).
    pub trap_enterprise: Option<String>,
    pub trap_number: Option<u32>,
    pub oid: Option<OidValue>,
    pub span: Span,
}

/// `OBJECT-GROUP` / `NOTIFICATION-GROUP` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDef {
    pub name: String,
    pub is_notification_group: bool,
    pub members: Vec<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub oid: OidValue,
    pub span: Span,
}

/// Per-object refinement inside a `MODULE-COMPLIANCE` MODULE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRefinement {
    pub name: String,
    pub syntax: Option<TypeSyntax>,
    pub write_syntax: Option<TypeSyntax>,
    pub min_access: Option<String>,
    pub description: Option<String>,
}

/// A `MODULE [module-name]` clause inside `MODULE-COMPLIANCE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceModule {
    pub module_name: Option<String>,
    pub mandatory_groups: Vec<String>,
    pub group_refinements: Vec<(String, Option<String>)>,
    pub object_refinements: Vec<ObjectRefinement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceDef {
    pub name: String,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub modules: Vec<ComplianceModule>,
    pub oid: OidValue,
    pub span: Span,
}

/// One `VARIATION <object> { ... }` entry inside a `SUPPORTS` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub name: String,
    pub syntax: Option<TypeSyntax>,
    pub write_syntax: Option<TypeSyntax>,
    pub access: Option<String>,
    pub creation_requires: Vec<String>,
    pub defval: Option<DefValSyntax>,
    pub description: Option<String>,
}

/// One `SUPPORTS <module> INCLUDES { groups } VARIATION ...` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportsEntry {
    pub module_name: String,
    pub includes: Vec<String>,
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDef {
    pub name: String,
    pub product_release: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub supports: Vec<SupportsEntry>,
    pub oid: OidValue,
    pub span: Span,
}

/// `TEXTUAL-CONVENTION` body, or a plain type assignment `Foo ::= <syntax>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub is_textual_convention: bool,
    pub display_hint: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub syntax: TypeSyntax,
    pub span: Span,
}

/// A plain value assignment that is not an OBJECT-TYPE family macro, e.g.
/// `mib-2 OBJECT IDENTIFIER ::= { mgmt 1 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidAssignment {
    pub name: String,
    pub oid: OidValue,
    pub span: Span,
}

/// A single top-level definition parsed from a module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    ObjectType(ObjectTypeDef),
    ModuleIdentity(ModuleIdentityDef),
    Notification(NotificationDef),
    Group(GroupDef),
    Compliance(ComplianceDef),
    Capability(CapabilityDef),
    Type(TypeDef),
    OidAssignment(OidAssignment),
    /// `Name MACRO ::= BEGIN ... END` — recognised but otherwise opaque
    /// (spec §6 "Macro bodies are treated as opaque text for unknown macros").
    MacroDef { name: String, span: Span },
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::ObjectType(d) => &d.name,
            Definition::ModuleIdentity(d) => &d.name,
            Definition::Notification(d) => &d.name,
            Definition::Group(d) => &d.name,
            Definition::Compliance(d) => &d.name,
            Definition::Capability(d) => &d.name,
            Definition::Type(d) => &d.name,
            Definition::OidAssignment(d) => &d.name,
            Definition::MacroDef { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Definition::ObjectType(d) => d.span,
            Definition::ModuleIdentity(d) => d.span,
            Definition::Notification(d) => d.span,
            Definition::Group(d) => d.span,
            Definition::Compliance(d) => d.span,
            Definition::Capability(d) => d.span,
            Definition::Type(d) => d.span,
            Definition::OidAssignment(d) => d.span,
            Definition::MacroDef { span, .. } => *span,
        }
    }
}

/// One `{ symbol, symbol FROM ModuleName }` import clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportClause {
    pub from_module: String,
    pub symbols: Vec<String>,
}

/// The full parse tree for one module, in source order (spec §4.2, §5
/// "Ordering guarantees": definitions preserve source order here).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTree {
    pub name: String,
    pub imports: Vec<ImportClause>,
    pub definitions: Vec<Definition>,
    pub is_pib: bool,
}
