//! The three MIB modules every SMIv2 load implicitly depends on: the SMI
//! itself, its textual conventions, and the conformance macros — plus the
//! SMIv1 ancestor they supersede. Embedded so a load never has to go find
//! them on disk (spec §A.6 "supplemented features").
//!
//! Each constant is lexed, parsed, and lowered exactly once, on first use,
//! behind a [`std::sync::OnceLock`].

use std::sync::OnceLock;

use crate::lexer::Lexer;
use crate::lowering::{self, LoweredModule};
use crate::parser::Parser;

const SNMPV2_SMI: &str = include_str!("base_modules/SNMPv2-SMI.mib");
const SNMPV2_TC: &str = include_str!("base_modules/SNMPv2-TC.mib");
const SNMPV2_CONF: &str = include_str!("base_modules/SNMPv2-CONF.mib");
const RFC1155_SMI: &str = include_str!("base_modules/RFC1155-SMI.mib");

fn lower_embedded(name: &'static str, text: &'static str) -> LoweredModule {
    let (tokens, _) = Lexer::new(text.as_bytes(), name).tokenize();
    let (tree, _) = Parser::new(&tokens, name).parse_module();
    let tree = tree.unwrap_or_else(|| crate::parser::ModuleTree {
        name: name.to_owned(),
        imports: Vec::new(),
        definitions: Vec::new(),
        is_pib: false,
    });
    let (lowered, _) = lowering::lower(tree, text.as_bytes());
    lowered
}

macro_rules! embedded_module {
    ($fn_name:ident, $cell:ident, $name:expr, $text:expr) => {
        fn $fn_name() -> &'static LoweredModule {
            static $cell: OnceLock<LoweredModule> = OnceLock::new();
            $cell.get_or_init(|| lower_embedded($name, $text))
        }
    };
}

embedded_module!(snmpv2_smi, SNMPV2_SMI_CELL, "SNMPv2-SMI", SNMPV2_SMI);
embedded_module!(snmpv2_tc, SNMPV2_TC_CELL, "SNMPv2-TC", SNMPV2_TC);
embedded_module!(snmpv2_conf, SNMPV2_CONF_CELL, "SNMPv2-CONF", SNMPV2_CONF);
embedded_module!(rfc1155_smi, RFC1155_SMI_CELL, "RFC1155-SMI", RFC1155_SMI);

/// Every embedded base module, by declared name. A caller assembling a
/// module set for the resolver should union this in before resolving
/// (`base_modules::all()` clones the already-lowered modules; lowering
/// itself only happens once per process).
pub fn all() -> Vec<(String, LoweredModule)> {
    vec![
        ("SNMPv2-SMI".to_owned(), snmpv2_smi().clone()),
        ("SNMPv2-TC".to_owned(), snmpv2_tc().clone()),
        ("SNMPv2-CONF".to_owned(), snmpv2_conf().clone()),
        ("RFC1155-SMI".to_owned(), rfc1155_smi().clone()),
    ]
}

/// Historical aliases callers sometimes use for these modules in IMPORTS
/// clauses, recognized when `allow-safe-fallbacks` is enabled (spec §4.8
/// "module-name aliases").
pub fn canonical_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "RFC-1212" => "RFC1155-SMI",
        "SNMPv2-SMI-v1" => "SNMPv2-SMI",
        _ => return None,
    })
}
