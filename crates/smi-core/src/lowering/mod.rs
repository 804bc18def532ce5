//! Parse tree → per-module symbol table (spec §4.3).

use std::collections::HashMap;

use crate::diag::{Diagnostic, Severity};
use crate::model::Language;
use crate::parser::{Definition, ImportClause, ModuleTree};
use crate::span::LineTable;

/// A resolved `{local-name: [from-module, ...]}` import table, still in
/// "one entry per FROM clause" form; phase 2 of the resolver collapses this
/// into a single source module per symbol.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    /// `local symbol name -> candidate source modules`, preserving the
    /// order symbols were imported in.
    pub candidates: HashMap<String, Vec<String>>,
}

impl ImportTable {
    fn add(&mut self, clause: &ImportClause) {
        for symbol in &clause.symbols {
            self.candidates
                .entry(symbol.clone())
                .or_default()
                .push(clause.from_module.clone());
        }
    }
}

/// The per-module artifact lowering produces (spec §4.3).
#[derive(Debug, Clone)]
pub struct LoweredModule {
    pub name: String,
    pub language: Language,
    pub imports: ImportTable,
    pub import_clauses: Vec<ImportClause>,
    /// `definition name -> definition`, unique per module (spec §4.3:
    /// duplicates are reported and the first registration wins).
    pub symbols: HashMap<String, Definition>,
    /// Symbol names in source-declaration order (spec §5 "within a module,
    /// definitions preserve source order").
    pub order: Vec<String>,
    pub module_identity_oid_name: Option<String>,
    pub last_updated: Option<String>,
    pub line_table: LineTable,
    /// Diagnostics `lower()` itself raised against this module (duplicate
    /// definitions, identifier-style deviations, missing MODULE-IDENTITY).
    /// Carried on the module so the resolver can surface them alongside its
    /// own phase diagnostics once a module actually enters resolution.
    pub diagnostics: Vec<Diagnostic>,
}

/// Lowers a parsed module tree into a [`LoweredModule`], reporting
/// `duplicate-definition` for any name collision within the module and
/// RFC 2578/2579 naming-convention deviations (spec §6) for every
/// definition name.
pub fn lower(tree: ModuleTree, source: &[u8]) -> (LoweredModule, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut imports = ImportTable::default();
    for clause in &tree.imports {
        imports.add(clause);
    }

    let line_table = LineTable::build(source);
    let mut symbols = HashMap::new();
    let mut order = Vec::new();
    let mut module_identity_oid_name = None;
    let mut last_updated = None;

    for def in tree.definitions {
        let name = def.name().to_owned();
        let pos = line_table.lookup(def.span().start);
        if !matches!(def, Definition::MacroDef { .. }) {
            check_identifier_style(
                &name,
                matches!(def, Definition::Type(_)),
                &tree.name,
                pos.line,
                pos.column,
                &mut diagnostics,
            );
        }
        if let Definition::ModuleIdentity(mi) = &def {
            module_identity_oid_name = Some(mi.name.clone());
            last_updated = mi.last_updated.clone();
        }
        if symbols.contains_key(&name) {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                "duplicate-definition",
                tree.name.clone(),
                pos.line,
                pos.column,
                format!("duplicate definition of {name:?} in module {}", tree.name),
            ));
            continue;
        }
        order.push(name.clone());
        symbols.insert(name, def);
    }

    let language = detect_language(&tree.name, &tree.imports, &symbols, tree.is_pib);

    if language == Language::Smiv2 && module_identity_oid_name.is_none() {
        diagnostics.push(Diagnostic::new(
            Severity::Style,
            "missing-module-identity",
            tree.name.clone(),
            0,
            0,
            format!("module {} has no MODULE-IDENTITY clause", tree.name),
        ));
    }

    let lowered = LoweredModule {
        name: tree.name,
        language,
        imports,
        import_clauses: tree.imports,
        symbols,
        order,
        module_identity_oid_name,
        last_updated,
        line_table,
        diagnostics: diagnostics.clone(),
    };
    (lowered, diagnostics)
}

/// RFC 2578/2579 identifier-style checks (spec §6 diagnostic codes):
/// no underscores, no trailing hyphen, at most 64 characters, and the
/// ASN.1 type-ref/value-ref case convention for the definition's kind.
fn check_identifier_style(
    name: &str,
    is_type_ref: bool,
    module: &str,
    line: u32,
    column: u32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if name.contains('_') {
        diagnostics.push(Diagnostic::new(
            Severity::Style,
            "identifier-underscore",
            module,
            line,
            column,
            format!("identifier {name:?} contains an underscore"),
        ));
    }
    if name.ends_with('-') {
        diagnostics.push(Diagnostic::new(
            Severity::Style,
            "identifier-hyphen-end",
            module,
            line,
            column,
            format!("identifier {name:?} ends with a hyphen"),
        ));
    }
    if name.len() > 64 {
        diagnostics.push(Diagnostic::new(
            Severity::Style,
            "identifier-length-64",
            module,
            line,
            column,
            format!("identifier {name:?} is longer than 64 characters"),
        ));
    }
    let starts_upper = name.chars().next().is_some_and(char::is_uppercase);
    if starts_upper != is_type_ref {
        diagnostics.push(Diagnostic::new(
            Severity::Style,
            "bad-identifier-case",
            module,
            line,
            column,
            format!(
                "identifier {name:?} does not follow the {} naming convention",
                if is_type_ref { "type-ref (uppercase-initial)" } else { "value-ref (lowercase-initial)" }
            ),
        ));
    }
}

/// Heuristically detects the SMI dialect a module is written in (spec
/// §4.3): SPPI if the header was `PIB-DEFINITIONS`; SMIv2 if a
/// MODULE-IDENTITY is present; SMIv1 if RFC1155-SMI constructs (an import
/// from RFC1155-SMI, or a TRAP-TYPE definition) are used; otherwise SMIv2.
fn detect_language(
    module_name: &str,
    imports: &[ImportClause],
    symbols: &HashMap<String, Definition>,
    is_pib: bool,
) -> Language {
    if is_pib {
        return Language::Sppi;
    }
    if symbols
        .values()
        .any(|d| matches!(d, Definition::ModuleIdentity(_)))
    {
        return Language::Smiv2;
    }
    let imports_smiv1_base = imports
        .iter()
        .any(|c| c.from_module == "RFC1155-SMI" || c.from_module == "RFC-1212");
    let has_trap_type = symbols
        .values()
        .any(|d| matches!(d, Definition::Notification(n) if n.trap_enterprise.is_some()));
    if imports_smiv1_base || has_trap_type {
        return Language::Smiv1;
    }
    let _ = module_name;
    Language::Smiv2
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn lower_src(src: &str) -> (LoweredModule, Vec<Diagnostic>) {
        let (tokens, _) = Lexer::new(src.as_bytes(), "TEST").tokenize();
        let (tree, _) = Parser::new(&tokens, "TEST").parse_module();
        lower(tree.expect("parses"), src.as_bytes())
    }

    #[test]
    fn detects_smiv2_via_module_identity() {
        let (m, diags) = lower_src(
            r#"
            TEST-MIB DEFINITIONS ::= BEGIN
            testModule MODULE-IDENTITY
                LAST-UPDATED "202601010000Z"
                ORGANIZATION "x"
                CONTACT-INFO "x"
                DESCRIPTION  "x"
                ::= { enterprises 1 }
            END
            "#,
        );
        assert!(diags.is_empty());
        assert_eq!(m.language, Language::Smiv2);
        assert_eq!(m.module_identity_oid_name.as_deref(), Some("testModule"));
    }

    #[test]
    fn detects_smiv1_via_trap_type() {
        let (m, _) = lower_src(
            r#"
            TEST-MIB DEFINITIONS ::= BEGIN
            coldStart TRAP-TYPE
                ENTERPRISE snmp
                DESCRIPTION "x"
                ::= 0
            END
            "#,
        );
        assert_eq!(m.language, Language::Smiv1);
    }

    #[test]
    fn detects_sppi_via_pib_definitions() {
        let (m, _) = lower_src(
            r#"
            TEST-PIB PIB-DEFINITIONS ::= BEGIN
            END
            "#,
        );
        assert_eq!(m.language, Language::Sppi);
    }

    #[test]
    fn duplicate_definition_is_reported_and_first_wins() {
        let (m, diags) = lower_src(
            r#"
            TEST-MIB DEFINITIONS ::= BEGIN
            foo OBJECT IDENTIFIER ::= { enterprises 1 }
            foo OBJECT IDENTIFIER ::= { enterprises 2 }
            END
            "#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "duplicate-definition");
        let Definition::OidAssignment(a) = m.symbols.get("foo").expect("kept") else {
            panic!("expected OidAssignment");
        };
        assert_eq!(a.oid.arcs.len(), 2);
    }

    #[test]
    fn preserves_source_order() {
        let (m, _) = lower_src(
            r#"
            TEST-MIB DEFINITIONS ::= BEGIN
            a OBJECT IDENTIFIER ::= { enterprises 1 }
            b OBJECT IDENTIFIER ::= { enterprises 2 }
            END
            "#,
        );
        assert_eq!(m.order, vec!["a".to_owned(), "b".to_owned()]);
    }
}
