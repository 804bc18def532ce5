//! Integration tests over the six seed scenarios: end-to-end checks that
//! exercise the lexer, parser, lowering, dependency graph, and resolver
//! together against small literal fixtures, rather than any one phase in
//! isolation.
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use smi_core::{
    Access, CancellationToken, DefValValue, DiagnosticConfig, Kind, MemorySource, Oid,
    RowLinkage, StrictnessLevel, load_all, load_by_name,
};

fn normal_config() -> DiagnosticConfig {
    DiagnosticConfig::new(StrictnessLevel::Normal)
}

/// Seed scenario 1: OID attribution. Two modules declare the same
/// enterprise-style subtree; `ifIndex` should attribute to IF-MIB, at the
/// right OID, as a read-only column.
#[test]
fn oid_attribution_resolves_module_oid_kind_and_access() {
    let mut source = MemorySource::new();
    source.insert(
        "IF-MIB",
        "IF-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         mib-2 FROM SNMPv2-SMI;\n\
         ifMIB OBJECT IDENTIFIER ::= { mib-2 31 }\n\
         interfaces OBJECT IDENTIFIER ::= { mib-2 2 }\n\
         ifTable OBJECT-TYPE\n\
         SYNTAX SEQUENCE OF IfEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"A list of interface entries.\"\n\
         ::= { interfaces 2 }\n\
         ifEntry OBJECT-TYPE\n\
         SYNTAX IfEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"An interface entry.\"\n\
         INDEX { ifIndex }\n\
         ::= { ifTable 1 }\n\
         IfEntry ::= SEQUENCE {\n\
         ifIndex INTEGER\n\
         }\n\
         ifIndex OBJECT-TYPE\n\
         SYNTAX INTEGER\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"A unique value for each interface.\"\n\
         ::= { ifEntry 1 }\n\
         END",
    );
    source.insert(
        "RFC1213-MIB",
        "RFC1213-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         mib-2 FROM SNMPv2-SMI;\n\
         system OBJECT IDENTIFIER ::= { mib-2 1 }\n\
         END",
    );

    let config = normal_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads cleanly");

    let node_id = model.lookup("ifIndex").expect("ifIndex resolves by name");
    let node = model.node(node_id);
    assert_eq!(node.oid, Oid::from_arcs([1, 3, 6, 1, 2, 1, 2, 2, 1, 1]));
    assert_eq!(node.kind, Kind::Column);

    let module_id = node.module.expect("ifIndex's node has a module");
    assert_eq!(model.module(module_id).name, "IF-MIB");

    let object_id = node.object.expect("ifIndex's node has an object");
    let object = model.object(object_id);
    assert_eq!(object.access, Some(Access::ReadOnly));
}

/// Seed scenario 2: longest-prefix lookup. An OID one level below `ifIndex`
/// (a column instance) should resolve back to the `ifIndex` node.
#[test]
fn longest_prefix_finds_the_enclosing_column() {
    let mut source = MemorySource::new();
    source.insert(
        "IF-MIB",
        "IF-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         mib-2 FROM SNMPv2-SMI;\n\
         interfaces OBJECT IDENTIFIER ::= { mib-2 2 }\n\
         ifTable OBJECT-TYPE\n\
         SYNTAX SEQUENCE OF IfEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"A list of interface entries.\"\n\
         ::= { interfaces 2 }\n\
         ifEntry OBJECT-TYPE\n\
         SYNTAX IfEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"An interface entry.\"\n\
         INDEX { ifIndex }\n\
         ::= { ifTable 1 }\n\
         IfEntry ::= SEQUENCE {\n\
         ifIndex INTEGER\n\
         }\n\
         ifIndex OBJECT-TYPE\n\
         SYNTAX INTEGER\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"A unique value for each interface.\"\n\
         ::= { ifEntry 1 }\n\
         END",
    );

    let config = normal_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads cleanly");

    let expected = model.lookup("ifIndex").expect("ifIndex resolves");
    let probe = Oid::from_arcs([1, 3, 6, 1, 2, 1, 2, 2, 1, 1, 5]);
    let found = model.longest_prefix(&probe).expect("a prefix node exists");
    assert_eq!(found, expected);
}

/// Seed scenario 3: AUGMENTS inheritance. B-Entry has no INDEX of its own
/// and instead AUGMENTS A-Entry; its effective index should be A-Entry's.
#[test]
fn augments_inherits_the_base_rows_index() {
    let mut source = MemorySource::new();
    source.insert(
        "AUGMENTS-MIB",
        "AUGMENTS-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         enterprises FROM RFC1155-SMI;\n\
         augMod OBJECT IDENTIFIER ::= { enterprises 9001 }\n\
         aTable OBJECT-TYPE\n\
         SYNTAX SEQUENCE OF AEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"Table A.\"\n\
         ::= { augMod 1 }\n\
         aEntry OBJECT-TYPE\n\
         SYNTAX AEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"Row A.\"\n\
         INDEX { aIdx }\n\
         ::= { aTable 1 }\n\
         AEntry ::= SEQUENCE {\n\
         aIdx INTEGER,\n\
         aVal INTEGER\n\
         }\n\
         aIdx OBJECT-TYPE\n\
         SYNTAX INTEGER\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"Index of row A.\"\n\
         ::= { aEntry 1 }\n\
         aVal OBJECT-TYPE\n\
         SYNTAX INTEGER\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"Value of row A.\"\n\
         ::= { aEntry 2 }\n\
         bTable OBJECT-TYPE\n\
         SYNTAX SEQUENCE OF BEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"Table B.\"\n\
         ::= { augMod 2 }\n\
         bEntry OBJECT-TYPE\n\
         SYNTAX BEntry\n\
         MAX-ACCESS not-accessible\n\
         STATUS current\n\
         DESCRIPTION \"Row B, augmenting row A.\"\n\
         AUGMENTS { aEntry }\n\
         ::= { bTable 1 }\n\
         BEntry ::= SEQUENCE {\n\
         bVal INTEGER\n\
         }\n\
         bVal OBJECT-TYPE\n\
         SYNTAX INTEGER\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"Value of row B.\"\n\
         ::= { bEntry 1 }\n\
         END",
    );

    let config = normal_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads cleanly");

    let a_idx_node = model.lookup("aIdx").expect("aIdx resolves");
    let a_idx_object = model.node(a_idx_node).object.expect("aIdx has an object");

    let b_entry_node = model.lookup("bEntry").expect("bEntry resolves");
    let b_entry_object_id = model.node(b_entry_node).object.expect("bEntry has an object");
    let b_entry_object = model.object(b_entry_object_id);

    let a_entry_node = model.lookup("aEntry").expect("aEntry resolves");
    let a_entry_object = model.node(a_entry_node).object.expect("aEntry has an object");

    match &b_entry_object.linkage {
        RowLinkage::Augments(target) => assert_eq!(*target, a_entry_object),
        other => panic!("expected Augments linkage on bEntry, got {other:?}"),
    }

    let effective = model.effective_index(b_entry_object_id);
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].object, a_idx_object);
    assert!(!effective[0].implied);
}

/// Seed scenario 4: textual-convention chain. `MyLabel` is built on top of
/// `MyString` without its own DISPLAY-HINT, so it should inherit MyString's.
#[test]
fn textual_convention_chain_inherits_display_hint() {
    let mut source = MemorySource::new();
    source.insert(
        "TC-CHAIN-MIB",
        "TC-CHAIN-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         TEXTUAL-CONVENTION FROM SNMPv2-TC\n\
         enterprises FROM RFC1155-SMI;\n\
         tcMod OBJECT IDENTIFIER ::= { enterprises 9002 }\n\
         MyString ::= TEXTUAL-CONVENTION\n\
         DISPLAY-HINT \"255a\"\n\
         STATUS current\n\
         DESCRIPTION \"A display string.\"\n\
         SYNTAX OCTET STRING (SIZE (0..64))\n\
         MyLabel ::= TEXTUAL-CONVENTION\n\
         STATUS current\n\
         DESCRIPTION \"A label built on MyString.\"\n\
         SYNTAX MyString\n\
         x OBJECT-TYPE\n\
         SYNTAX MyLabel\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"An object typed as MyLabel.\"\n\
         ::= { tcMod 1 }\n\
         END",
    );

    let config = normal_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads cleanly");

    let x_node = model.lookup("x").expect("x resolves");
    let x_object_id = model.node(x_node).object.expect("x has an object");
    let x_object = model.object(x_object_id);
    let ty_id = x_object.ty.expect("x has a type");
    let ty = model.ty(ty_id);

    assert_eq!(ty.display_hint.as_deref(), Some("255a"));
    assert_eq!(ty.sizes.len(), 1);
    assert_eq!(ty.sizes[0].lo, 0);
    assert_eq!(ty.sizes[0].hi, 64);
}

/// Seed scenario 5: DEFVAL duality. A hex-string DEFVAL keeps both its raw
/// MIB syntax and an interpreted big-endian integer value.
#[test]
fn defval_keeps_raw_text_and_interpreted_value() {
    let mut source = MemorySource::new();
    source.insert(
        "DEFVAL-MIB",
        "DEFVAL-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         enterprises FROM RFC1155-SMI;\n\
         defvalMod OBJECT IDENTIFIER ::= { enterprises 9003 }\n\
         y OBJECT-TYPE\n\
         SYNTAX OCTET STRING (SIZE (4))\n\
         MAX-ACCESS read-write\n\
         STATUS current\n\
         DESCRIPTION \"An octet string with a hex default.\"\n\
         DEFVAL { '00000000'H }\n\
         ::= { defvalMod 1 }\n\
         END",
    );

    let config = normal_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads cleanly");

    let y_node = model.lookup("y").expect("y resolves");
    let y_object_id = model.node(y_node).object.expect("y has an object");
    let y_object = model.object(y_object_id);
    let defval = y_object.defval.as_ref().expect("y has a DEFVAL");

    assert_eq!(defval.raw, "'00000000'H");
    assert!(matches!(defval.value, DefValValue::Bytes(_)));
    assert_eq!(defval.interpreted_int(), Some(0));
    assert_eq!(defval.display_string(), "0");
}

/// Seed scenario 6: strictness gating. A module uses `Counter64` without
/// importing it; Strict/Normal leave it unresolved with a diagnostic naming
/// the symbol, Permissive resolves it via the well-known-application fallback.
#[test]
fn strictness_gates_the_unimported_well_known_type() {
    let mut source = MemorySource::new();
    source.insert(
        "UNIMPORTED-MIB",
        "UNIMPORTED-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         OBJECT-TYPE FROM SNMPv2-SMI\n\
         enterprises FROM RFC1155-SMI;\n\
         unimportedMod OBJECT IDENTIFIER ::= { enterprises 9004 }\n\
         z OBJECT-TYPE\n\
         SYNTAX Counter64\n\
         MAX-ACCESS read-only\n\
         STATUS current\n\
         DESCRIPTION \"A counter with no Counter64 import.\"\n\
         ::= { unimportedMod 1 }\n\
         END",
    );

    let strict_model = load_all(
        &source,
        &DiagnosticConfig::new(StrictnessLevel::Normal),
        &CancellationToken::new(),
    )
    .expect("loads despite the unresolved type");

    let z_node = strict_model.lookup("z").expect("z resolves as an object even if untyped");
    let z_object_id = strict_model.node(z_node).object.expect("z has an object");
    assert!(strict_model.object(z_object_id).ty.is_none());
    assert!(
        strict_model
            .diagnostics()
            .iter()
            .any(|d| d.code == "type-unknown" && d.message.contains("Counter64"))
    );

    let permissive_model = load_all(
        &source,
        &DiagnosticConfig::new(StrictnessLevel::Permissive),
        &CancellationToken::new(),
    )
    .expect("loads cleanly under permissive strictness");

    let z_node = permissive_model.lookup("z").expect("z resolves");
    let z_object_id = permissive_model.node(z_node).object.expect("z has an object");
    let ty_id = permissive_model
        .object(z_object_id)
        .ty
        .expect("Counter64 resolves via the well-known-application fallback");
    assert_eq!(
        permissive_model.ty(ty_id).base,
        smi_core::BaseType::Counter64
    );
    assert!(
        !permissive_model
            .diagnostics()
            .iter()
            .any(|d| d.code == "type-unknown")
    );
}

#[test]
fn load_by_name_discovers_transitive_imports() {
    let mut source = MemorySource::new();
    source.insert(
        "BASE-MIB",
        "BASE-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         enterprises FROM RFC1155-SMI;\n\
         baseRoot OBJECT IDENTIFIER ::= { enterprises 9005 }\n\
         END",
    );
    source.insert(
        "DEPENDENT-MIB",
        "DEPENDENT-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         baseRoot FROM BASE-MIB;\n\
         dependentChild OBJECT IDENTIFIER ::= { baseRoot 1 }\n\
         END",
    );
    source.insert(
        "UNRELATED-MIB",
        "UNRELATED-MIB DEFINITIONS ::= BEGIN\n\
         IMPORTS\n\
         enterprises FROM RFC1155-SMI;\n\
         unrelatedRoot OBJECT IDENTIFIER ::= { enterprises 9006 }\n\
         END",
    );

    let config = normal_config();
    let model = load_by_name(
        &source,
        &["DEPENDENT-MIB".to_owned()],
        &config,
        &CancellationToken::new(),
    )
    .expect("loads the transitive closure");

    assert!(model.module_by_name("BASE-MIB").is_some());
    assert!(model.module_by_name("DEPENDENT-MIB").is_some());
    assert!(model.module_by_name("UNRELATED-MIB").is_none());
}
