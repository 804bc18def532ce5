#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::lexer::Lexer;

fn parse(src: &str) -> (Option<ModuleTree>, Vec<crate::diag::Diagnostic>) {
    let (tokens, lex_diags) = Lexer::new(src.as_bytes(), "TEST").tokenize();
    let (tree, mut parse_diags) = Parser::new(&tokens, "TEST").parse_module();
    parse_diags.extend(lex_diags);
    (tree, parse_diags)
}

#[test]
fn parses_minimal_module_header() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("module should parse");
    assert_eq!(tree.name, "TEST-MIB");
    assert!(!tree.is_pib);
    assert!(tree.definitions.is_empty());
}

#[test]
fn parses_pib_definitions_header() {
    let (tree, diags) = parse(
        r#"
        TEST-PIB PIB-DEFINITIONS ::= BEGIN
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    assert!(tree.expect("parses").is_pib);
}

#[test]
fn parses_imports_clause() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS
            OBJECT-TYPE, MODULE-IDENTITY FROM SNMPv2-SMI
            DisplayString FROM SNMPv2-TC;
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    assert_eq!(tree.imports.len(), 2);
    assert_eq!(tree.imports[0].from_module, "SNMPv2-SMI");
    assert_eq!(tree.imports[0].symbols, vec!["OBJECT-TYPE", "MODULE-IDENTITY"]);
    assert_eq!(tree.imports[1].from_module, "SNMPv2-TC");
    assert_eq!(tree.imports[1].symbols, vec!["DisplayString"]);
}

#[test]
fn parses_object_type_scalar_with_defval() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        sysUpTime OBJECT-TYPE
            SYNTAX      INTEGER
            MAX-ACCESS  read-only
            STATUS      current
            DESCRIPTION "uptime"
            DEFVAL      { 0 }
            ::= { system 3 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    assert_eq!(tree.definitions.len(), 1);
    let Definition::ObjectType(obj) = &tree.definitions[0] else {
        panic!("expected ObjectType definition");
    };
    assert_eq!(obj.name, "sysUpTime");
    assert!(matches!(obj.syntax, Some(TypeSyntax::Integer { .. })));
    assert_eq!(obj.access.as_deref(), Some("read-only"));
    assert_eq!(obj.status.as_deref(), Some("current"));
    assert_eq!(obj.description.as_deref(), Some("uptime"));
    assert!(matches!(obj.defval, Some(DefValSyntax::Int(0))));
    assert_eq!(obj.oid.arcs.len(), 2);
}

#[test]
fn parses_object_type_with_index() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        ifEntry OBJECT-TYPE
            SYNTAX      IfEntry
            MAX-ACCESS  not-accessible
            STATUS      current
            DESCRIPTION "row"
            INDEX       { ifIndex }
            ::= { ifTable 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::ObjectType(obj) = &tree.definitions[0] else {
        panic!("expected ObjectType definition");
    };
    match &obj.linkage {
        RowLinkage::Index(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].name, "ifIndex");
            assert!(!entries[0].implied);
        }
        other => panic!("expected Index linkage, got {other:?}"),
    }
}

#[test]
fn parses_augments_linkage() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        ifXEntry OBJECT-TYPE
            SYNTAX      IfXEntry
            MAX-ACCESS  not-accessible
            STATUS      current
            DESCRIPTION "row"
            AUGMENTS    { ifEntry }
            ::= { ifXTable 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::ObjectType(obj) = &tree.definitions[0] else {
        panic!("expected ObjectType definition");
    };
    assert!(matches!(&obj.linkage, RowLinkage::Augments(name) if name == "ifEntry"));
}

#[test]
fn parses_module_identity() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        testModule MODULE-IDENTITY
            LAST-UPDATED "202601010000Z"
            ORGANIZATION "Example"
            CONTACT-INFO "nobody"
            DESCRIPTION  "desc"
            REVISION     "202601010000Z"
            DESCRIPTION  "initial"
            ::= { enterprises 9999 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::ModuleIdentity(mi) = &tree.definitions[0] else {
        panic!("expected ModuleIdentity definition");
    };
    assert_eq!(mi.last_updated.as_deref(), Some("202601010000Z"));
    assert_eq!(mi.revisions.len(), 1);
}

#[test]
fn parses_notification_type() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        linkDown NOTIFICATION-TYPE
            OBJECTS     { ifIndex, ifDescr }
            STATUS      current
            DESCRIPTION "trap"
            ::= { testTraps 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Notification(n) = &tree.definitions[0] else {
        panic!("expected Notification definition");
    };
    assert_eq!(n.objects, vec!["ifIndex", "ifDescr"]);
    assert!(n.oid.is_some());
    assert!(n.trap_enterprise.is_none());
}

#[test]
fn parses_trap_type_smiv1() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        coldStart TRAP-TYPE
            ENTERPRISE  snmp
            VARIABLES   { sysDescr }
            DESCRIPTION "cold"
            ::= 0
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Notification(n) = &tree.definitions[0] else {
        panic!("expected Notification definition");
    };
    assert_eq!(n.trap_enterprise.as_deref(), Some("snmp"));
    assert_eq!(n.trap_number, Some(0));
    assert!(n.oid.is_none());
}

#[test]
fn parses_object_group() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        testGroup OBJECT-GROUP
            OBJECTS     { ifIndex, ifDescr }
            STATUS      current
            DESCRIPTION "group"
            ::= { testConformance 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Group(g) = &tree.definitions[0] else {
        panic!("expected Group definition");
    };
    assert!(!g.is_notification_group);
    assert_eq!(g.members, vec!["ifIndex", "ifDescr"]);
}

#[test]
fn parses_module_compliance() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        testCompliance MODULE-COMPLIANCE
            STATUS      current
            DESCRIPTION "compliance"
            MODULE
                MANDATORY-GROUPS { testGroup }
                OBJECT   ifAdminStatus
                    MIN-ACCESS read-only
                    DESCRIPTION "ro is enough"
            ::= { testConformance 2 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Compliance(c) = &tree.definitions[0] else {
        panic!("expected Compliance definition");
    };
    assert_eq!(c.modules.len(), 1);
    assert_eq!(c.modules[0].mandatory_groups, vec!["testGroup"]);
    assert_eq!(c.modules[0].object_refinements.len(), 1);
    assert_eq!(c.modules[0].object_refinements[0].name, "ifAdminStatus");
}

#[test]
fn parses_agent_capabilities() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        testCaps AGENT-CAPABILITIES
            PRODUCT-RELEASE "v1"
            STATUS          current
            DESCRIPTION     "caps"
            SUPPORTS        TEST-MIB
            INCLUDES        { testGroup }
            VARIATION       ifAdminStatus
                ACCESS      read-only
                DESCRIPTION "ro"
            ::= { testCapRegistry 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Capability(cap) = &tree.definitions[0] else {
        panic!("expected Capability definition");
    };
    assert_eq!(cap.supports.len(), 1);
    assert_eq!(cap.supports[0].module_name, "TEST-MIB");
    assert_eq!(cap.supports[0].variations.len(), 1);
    assert_eq!(cap.supports[0].variations[0].name, "ifAdminStatus");
}

#[test]
fn parses_textual_convention() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        DisplayString ::= TEXTUAL-CONVENTION
            DISPLAY-HINT "255a"
            STATUS       current
            DESCRIPTION  "text"
            SYNTAX       OCTET STRING (SIZE (0..255))
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Type(t) = &tree.definitions[0] else {
        panic!("expected Type definition");
    };
    assert!(t.is_textual_convention);
    assert_eq!(t.display_hint.as_deref(), Some("255a"));
    assert!(matches!(t.syntax, TypeSyntax::OctetString { .. }));
}

#[test]
fn parses_plain_type_assignment() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        Counter32 ::= INTEGER
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Type(t) = &tree.definitions[0] else {
        panic!("expected Type definition");
    };
    assert!(!t.is_textual_convention);
}

#[test]
fn parses_oid_assignment() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        mib-2 OBJECT IDENTIFIER ::= { mgmt 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::OidAssignment(a) = &tree.definitions[0] else {
        panic!("expected OidAssignment definition");
    };
    assert_eq!(a.name, "mib-2");
    assert_eq!(a.oid.arcs.len(), 2);
}

#[test]
fn parses_named_oid_arcs_with_numbers() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        mib-2 OBJECT IDENTIFIER ::= { iso(1) org(3) dod(6) 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::OidAssignment(a) = &tree.definitions[0] else {
        panic!("expected OidAssignment definition");
    };
    assert_eq!(a.oid.arcs.len(), 4);
    assert!(matches!(&a.oid.arcs[0], OidArc::Named { name, number: Some(1) } if name == "iso"));
}

#[test]
fn parses_macro_definition_opaquely() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        OBJECT-TYPE MACRO ::=
        BEGIN
            TYPE NOTATION ::= "SYNTAX" type(Type)
            VALUE NOTATION ::= value(VALUE Type)
        END
        sysUpTime OBJECT-TYPE
            SYNTAX      INTEGER
            MAX-ACCESS  read-only
            STATUS      current
            DESCRIPTION "uptime"
            ::= { system 3 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    assert_eq!(tree.definitions.len(), 2);
    assert!(matches!(tree.definitions[0], Definition::MacroDef { .. }));
    assert!(matches!(tree.definitions[1], Definition::ObjectType(_)));
}

#[test]
fn malformed_definition_is_dropped_but_parsing_continues() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        totallyBroken ***
        sysUpTime OBJECT-TYPE
            SYNTAX      INTEGER
            MAX-ACCESS  read-only
            STATUS      current
            DESCRIPTION "uptime"
            ::= { system 3 }
        END
        "#,
    );
    assert!(!diags.is_empty());
    let tree = tree.expect("module header still parses");
    assert_eq!(tree.definitions.len(), 1);
    assert_eq!(tree.definitions[0].name(), "sysUpTime");
}

#[test]
fn parses_sequence_of_for_table_type() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        IfTable ::= SEQUENCE OF IfEntry
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Type(t) = &tree.definitions[0] else {
        panic!("expected Type definition");
    };
    assert!(matches!(&t.syntax, TypeSyntax::SequenceOf(name) if name == "IfEntry"));
}

#[test]
fn parses_sequence_row_type() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        IfEntry ::= SEQUENCE {
            ifIndex     INTEGER,
            ifDescr     OCTET STRING
        }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::Type(t) = &tree.definitions[0] else {
        panic!("expected Type definition");
    };
    let TypeSyntax::Sequence(fields) = &t.syntax else {
        panic!("expected Sequence syntax");
    };
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].0, "ifIndex");
    assert_eq!(fields[1].0, "ifDescr");
}

#[test]
fn parses_integer_enumeration_syntax() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        ifAdminStatus OBJECT-TYPE
            SYNTAX      INTEGER { up(1), down(2), testing(3) }
            MAX-ACCESS  read-write
            STATUS      current
            DESCRIPTION "status"
            ::= { ifEntry 7 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::ObjectType(obj) = &tree.definitions[0] else {
        panic!("expected ObjectType definition");
    };
    let Some(TypeSyntax::Integer { named_values }) = &obj.syntax else {
        panic!("expected enumerated Integer syntax");
    };
    assert_eq!(named_values.len(), 3);
    assert_eq!(named_values[1].name, "down");
    assert_eq!(named_values[1].number, 2);
}

#[test]
fn tolerates_tag_default_clause_before_assign() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS IMPLICIT TAGS ::= BEGIN
        END
        "#,
    );
    // An optional tag-default clause between DEFINITIONS and `::=` is
    // skipped rather than treated as an error.
    assert!(diags.is_empty(), "{diags:?}");
    assert!(tree.is_some());
}

#[test]
fn parses_defval_oid_form() {
    let (tree, diags) = parse(
        r#"
        TEST-MIB DEFINITIONS ::= BEGIN
        testObj OBJECT-TYPE
            SYNTAX      OBJECT IDENTIFIER
            MAX-ACCESS  read-only
            STATUS      current
            DESCRIPTION "oid default"
            DEFVAL      { { 1 3 6 } }
            ::= { testObjects 1 }
        END
        "#,
    );
    assert!(diags.is_empty(), "{diags:?}");
    let tree = tree.expect("parses");
    let Definition::ObjectType(obj) = &tree.definitions[0] else {
        panic!("expected ObjectType definition");
    };
    assert!(matches!(&obj.defval, Some(DefValSyntax::Oid(oid)) if oid.arcs.len() == 3));
}
