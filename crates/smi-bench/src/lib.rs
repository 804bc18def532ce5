//! Synthetic MIB corpus generator and correctness checkers for benchmarking
//! `smi-core`.
//!
//! Deterministic generation of parseable, resolvable module sets at a few
//! size tiers, for lexer/parser/resolver benchmarks and property-style
//! correctness checks.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_corpus};

/// Where the large-tier corpus is cached on disk, so the benchmark harness
/// and `gen-corpus` binary agree on a location without hardcoding it twice.
pub fn large_corpus_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest.join("..").join("..").join("target").join("bench-fixtures")
}
