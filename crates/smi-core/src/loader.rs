//! The loader: drives a [`Source`] through the lex/parse/lower phases in
//! parallel, then hands the lowered set to the single-threaded resolver
//! (spec §4.9, §5 "Concurrency & Resource Model").

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::diag::DiagnosticConfig;
use crate::lexer::Lexer;
use crate::lowering::{self, LoweredModule};
use crate::model::Model;
use crate::parser::Parser;
use crate::resolver;
use crate::source::{Lookup, Source};

/// A cooperative cancellation handle, checked by worker tasks at the two
/// suspension points spec §5 names: before acquiring a parse slot and after
/// acquiring it. Cheap to clone; all clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The top-level error channel (spec §7 channel 1: "I/O and cancellation").
/// Unlike diagnostics, these stop the pipeline outright and produce no Model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A requested module name was not found by the [`Source`].
    NotExist(String),
    /// The load was cancelled via a [`CancellationToken`]; no partial Model
    /// is returned (spec §5 "Cancellation semantics").
    Cancelled,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotExist(name) => write!(f, "module not found: {name:?}"),
            LoadError::Cancelled => write!(f, "load was cancelled"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parses and lowers every module named in `entry_modules`, plus the
/// transitive closure of their IMPORTS, then resolves the result into a
/// [`Model`] (spec §4.9).
///
/// Parsing proceeds wave by wave: each wave parses, in parallel, every
/// module name newly discovered by the previous wave's IMPORTS clauses,
/// bounded by the logical CPU count. Resolution runs once, single-threaded,
/// after the last wave.
pub fn load_by_name(
    source: &dyn Source,
    entry_modules: &[String],
    config: &DiagnosticConfig,
    cancel: &CancellationToken,
) -> Result<Model, LoadError> {
    let modules = with_base_modules(discover_closure(source, entry_modules, cancel)?);
    Ok(resolver::resolve(modules, config))
}

/// Parses every file a [`Source`] offers via `list_files`, in parallel, then
/// resolves the union into a [`Model`] (spec §4.9 "loading an entire
/// source").
///
/// Duplicate module names are resolved first-wins by file enumeration
/// order, guarded by a single mutex during collection — the only shared
/// mutable state the parallel phase touches (spec §5 "Shared resources").
pub fn load_all(
    source: &dyn Source,
    config: &DiagnosticConfig,
    cancel: &CancellationToken,
) -> Result<Model, LoadError> {
    let files = source.list_files();
    let modules = with_base_modules(parse_wave(source, &files, cancel)?);
    Ok(resolver::resolve(modules, config))
}

/// Unions the embedded SNMPv2-SMI/SNMPv2-TC/SNMPv2-CONF/RFC1155-SMI modules
/// in, so `IMPORTS ... FROM SNMPv2-SMI` resolves through the normal import
/// path even when a `Source` doesn't carry its own copy of them (spec §A.6).
/// A module the `Source` actually provides under one of these names wins.
fn with_base_modules(mut modules: HashMap<String, LoweredModule>) -> HashMap<String, LoweredModule> {
    for (name, base) in crate::base_modules::all() {
        modules.entry(name).or_insert(base);
    }
    modules
}

/// Discovers and parses the transitive IMPORTS closure of `entry_modules`,
/// wave by wave, stopping once a wave discovers nothing new.
fn discover_closure(
    source: &dyn Source,
    entry_modules: &[String],
    cancel: &CancellationToken,
) -> Result<HashMap<String, LoweredModule>, LoadError> {
    let mut known: HashMap<String, LoweredModule> = HashMap::new();
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut wave: Vec<String> = entry_modules.to_vec();

    let mut first_wave = true;
    while !wave.is_empty() {
        if cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        wave.retain(|name| seen.insert(name.clone()));
        if wave.is_empty() {
            break;
        }

        let parsed = parse_wave(source, &wave, cancel)?;
        if first_wave {
            for name in entry_modules {
                if !parsed.contains_key(name) {
                    return Err(LoadError::NotExist(name.clone()));
                }
            }
            first_wave = false;
        }

        let mut next_wave = Vec::new();
        for (name, module) in parsed {
            for clause in &module.import_clauses {
                if !seen.contains(&clause.from_module) {
                    next_wave.push(clause.from_module.clone());
                }
            }
            known.insert(name, module);
        }
        wave = next_wave;
    }
    Ok(known)
}

/// Parses and lowers `names` in parallel, bounded by the logical CPU count,
/// returning the first-wins map of declared module name to [`LoweredModule`]
/// (spec §4.9, §5 "Shared resources").
fn parse_wave(
    source: &dyn Source,
    names: &[String],
    cancel: &CancellationToken,
) -> Result<HashMap<String, LoweredModule>, LoadError> {
    if cancel.is_cancelled() {
        return Err(LoadError::Cancelled);
    }

    // Rayon's global pool is itself sized to the logical CPU count, which
    // is all spec §5's "parallel worker pool ... bounded by the processor
    // count" asks for — no custom pool needed.
    let collected: Mutex<HashMap<String, LoweredModule>> = Mutex::new(HashMap::new());
    use rayon::prelude::*;
    names.par_iter().for_each(|name| {
        if cancel.is_cancelled() {
            return;
        }
        let Some((name, module)) = parse_one(source, name) else {
            return;
        };
        if cancel.is_cancelled() {
            return;
        }
        let mut guard = match collected.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entry(name).or_insert(module);
    });

    if cancel.is_cancelled() {
        return Err(LoadError::Cancelled);
    }
    Ok(collected.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()))
}

/// Looks `name` up, lexes, parses, and lowers it in isolation — no shared
/// state is touched (spec §4.9 "fully isolated"). Lexer and parser
/// diagnostics are not yet wired into a module-keyed home (spec §4.2's
/// recovery-and-continue contract covers making the parse tree usable, not
/// surfacing every token-level complaint); lowering's own diagnostics ride
/// along on `LoweredModule::diagnostics` and resurface once the resolver
/// reports them module by module (spec §6, §7).
fn parse_one(source: &dyn Source, name: &str) -> Option<(String, LoweredModule)> {
    let bytes = match source.find(name) {
        Lookup::Found { bytes, .. } => bytes,
        Lookup::NotExist => return None,
    };
    let (tokens, _lex_diags) = Lexer::new(&bytes, name).tokenize();
    let (tree, _parse_diags) = Parser::new(&tokens, name).parse_module();
    let tree = tree?;
    let declared_name = tree.name.clone();
    let (lowered, _) = lowering::lower(tree, &bytes);
    Some((declared_name, lowered))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::diag::StrictnessLevel;
    use crate::source::MemorySource;

    fn source_with(modules: &[(&str, &str)]) -> MemorySource {
        let mut src = MemorySource::new();
        for (name, text) in modules {
            src.insert(*name, *text);
        }
        src
    }

    #[test]
    fn load_all_resolves_every_recognized_module() {
        let src = source_with(&[
            ("A-MIB", "A-MIB DEFINITIONS ::= BEGIN a OBJECT IDENTIFIER ::= { enterprises 1 } END"),
            ("B-MIB", "B-MIB DEFINITIONS ::= BEGIN b OBJECT IDENTIFIER ::= { enterprises 2 } END"),
        ]);
        let config = DiagnosticConfig::new(StrictnessLevel::Normal);
        let model = load_all(&src, &config, &CancellationToken::new()).expect("loads");
        assert!(model.module_by_name("A-MIB").is_some());
        assert!(model.module_by_name("B-MIB").is_some());
    }

    #[test]
    fn load_by_name_pulls_in_transitive_imports() {
        let src = source_with(&[
            (
                "TOP-MIB",
                "TOP-MIB DEFINITIONS ::= BEGIN IMPORTS base FROM BASE-MIB; \
                 top OBJECT IDENTIFIER ::= { base 1 } END",
            ),
            (
                "BASE-MIB",
                "BASE-MIB DEFINITIONS ::= BEGIN base OBJECT IDENTIFIER ::= { enterprises 1 } END",
            ),
        ]);
        let config = DiagnosticConfig::new(StrictnessLevel::Normal);
        let model = load_by_name(
            &src,
            &["TOP-MIB".to_owned()],
            &config,
            &CancellationToken::new(),
        )
        .expect("loads");
        assert!(model.module_by_name("BASE-MIB").is_some());
        assert!(model.lookup("top").is_some());
    }

    #[test]
    fn load_by_name_reports_missing_entry_module() {
        let src = source_with(&[]);
        let config = DiagnosticConfig::new(StrictnessLevel::Normal);
        let err = load_by_name(
            &src,
            &["NOPE-MIB".to_owned()],
            &config,
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert_eq!(err, LoadError::NotExist("NOPE-MIB".to_owned()));
    }

    #[test]
    fn cancellation_before_any_parse_propagates() {
        let src = source_with(&[(
            "A-MIB",
            "A-MIB DEFINITIONS ::= BEGIN a OBJECT IDENTIFIER ::= { enterprises 1 } END",
        )]);
        let config = DiagnosticConfig::new(StrictnessLevel::Normal);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = load_all(&src, &config, &cancel).unwrap_err();
        assert_eq!(err, LoadError::Cancelled);
    }
}
