//! Writes the Large-tier synthetic corpus to disk as individual `.mib`
//! files, for benchmarks that want to measure from-disk loading instead of
//! from-memory parsing.
//!
//! Run via `cargo run -p smi-bench --bin gen-corpus`. Files land under
//! `target/bench-fixtures/` and are gitignored.

use std::error::Error;
use std::fs;

use smi_bench::{SizeTier, generate_corpus, large_corpus_dir};

fn main() -> Result<(), Box<dyn Error>> {
    let dir = large_corpus_dir();
    fs::create_dir_all(&dir)?;

    eprintln!("Generating Large tier corpus...");
    let corpus = generate_corpus(&SizeTier::Large.config());
    eprintln!("Generated {} modules", corpus.len());

    for (name, text) in &corpus {
        let path = dir.join(format!("{name}.mib"));
        fs::write(&path, text)?;
    }

    eprintln!("Wrote {} modules to {}", corpus.len(), dir.display());
    Ok(())
}
