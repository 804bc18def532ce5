#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod base_modules;
pub mod diag;
pub mod graph;
pub mod lexer;
pub mod loader;
pub mod lowering;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod source;
pub mod span;

pub use diag::{Diagnostic, DiagnosticConfig, Severity, StrictnessLevel, UnresolvedKind, UnresolvedRef};
pub use graph::{DependencyGraph, ImportCycle};
pub use lexer::{Lexer, Token, TokenKind};
pub use loader::{CancellationToken, LoadError, load_all, load_by_name};
pub use lowering::{ImportTable, LoweredModule, lower};
pub use model::{
    Access, BaseType, Capability, Compliance, DefVal, DefValValue, Group, GroupMember, IndexItem,
    Kind, Language, Model, ModelBuilder, Module, NamedValue, Node, Notification, Object,
    ObjectKind, Oid, Range, RowLinkage, Status, Type,
};
pub use parser::{ModuleTree, Parser};
pub use resolver::resolve;
pub use source::{Lookup, MemorySource, Source, has_recognized_extension, looks_like_mib};
pub use span::{LineCol, LineTable, Span};

/// Returns the current version of the crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
