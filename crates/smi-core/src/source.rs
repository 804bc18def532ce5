//! The `Source` contract a caller implements to hand MIB text to the loader
//! (spec §6 "External Interfaces").
//!
//! The core never touches a filesystem or network directly; it only ever
//! asks a `Source` to find a module by name or list what it has. This keeps
//! the crate usable against a directory, an in-memory bundle, a VCS blob
//! store, or anything else a caller wants to plug in.

use std::borrow::Cow;

/// The outcome of looking a module up by name (spec §6 "Source contract").
pub enum Lookup {
    /// The module's raw bytes, plus a path string for diagnostics (not
    /// necessarily a filesystem path — just something to show a human).
    Found { bytes: Cow<'static, [u8]>, path: String },
    /// No module named this was found.
    NotExist,
}

/// A provider of MIB module text, keyed by module name (spec §6).
///
/// Implementors decide what "a module named X" means: a directory of
/// `.mib` files keyed by filename-sans-extension, a database row, a
/// network fetch. The core only relies on `find` and `list_files`.
pub trait Source {
    /// Looks up a module by its declared name (e.g. `"IF-MIB"`), not by
    /// filename — the two often differ.
    fn find(&self, name: &str) -> Lookup;

    /// Every file path this source is willing to offer, used by a loader
    /// doing a directory-wide load rather than loading named modules.
    fn list_files(&self) -> Vec<String>;
}

/// The maximum number of bytes probed when deciding if a file looks like a
/// MIB module (spec §6 "file content recognition heuristic").
pub const PROBE_WINDOW: usize = 128 * 1024;

/// File extensions a directory-backed [`Source`] should read as candidate
/// MIB text; everything else is ignored outright (spec §6).
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["mib", "smi", "txt", "my"];

/// Returns whether `path` has an extension a directory-backed [`Source`]
/// should consider, or no extension at all (spec §6: "no-extension" files
/// are accepted too, since many vendor MIB trees ship without one).
pub fn has_recognized_extension(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            RECOGNIZED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => true,
    }
}

/// Heuristically decides whether `bytes` look like MIB module text (spec
/// §6): at most [`PROBE_WINDOW`] bytes of non-null content in the probed
/// prefix, containing both `DEFINITIONS` and `::=`.
pub fn looks_like_mib(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(PROBE_WINDOW)];
    if bytes.len() > PROBE_WINDOW && window.contains(&0) {
        return false;
    }
    if window.contains(&0) {
        return false;
    }
    contains_subslice(window, b"DEFINITIONS") && contains_subslice(window, b"::=")
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// A [`Source`] backed by an in-memory map of module name to text, useful
/// for tests and for callers that have already gathered their MIB text
/// (e.g. from a VCS blob store) rather than a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    modules: std::collections::HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.modules.insert(name.into(), text.into());
        self
    }
}

impl Source for MemorySource {
    fn find(&self, name: &str) -> Lookup {
        match self.modules.get(name) {
            Some(text) => Lookup::Found {
                bytes: Cow::Owned(text.clone().into_bytes()),
                path: format!("<memory>/{name}"),
            },
            None => Lookup::NotExist,
        }
    }

    fn list_files(&self) -> Vec<String> {
        self.modules.keys().map(|n| format!("<memory>/{n}")).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn recognizes_mib_text() {
        let text = b"TEST-MIB DEFINITIONS ::= BEGIN END";
        assert!(looks_like_mib(text));
    }

    #[test]
    fn rejects_text_missing_defining_tokens() {
        assert!(!looks_like_mib(b"just some plain text file"));
        assert!(!looks_like_mib(b"DEFINITIONS without the arrow"));
    }

    #[test]
    fn rejects_binary_content() {
        let mut bytes = b"TEST-MIB DEFINITIONS ::= BEGIN".to_vec();
        bytes.push(0);
        assert!(!looks_like_mib(&bytes));
    }

    #[test]
    fn extension_allowlist() {
        assert!(has_recognized_extension("IF-MIB.mib"));
        assert!(has_recognized_extension("if-mib.SMI"));
        assert!(has_recognized_extension("RFC1213-MIB.txt"));
        assert!(has_recognized_extension("vendor.my"));
        assert!(has_recognized_extension("NOEXT"));
        assert!(!has_recognized_extension("readme.md"));
        assert!(!has_recognized_extension("archive.tar.gz"));
    }

    #[test]
    fn memory_source_round_trips() {
        let mut src = MemorySource::new();
        src.insert("TEST-MIB", "TEST-MIB DEFINITIONS ::= BEGIN END");
        match src.find("TEST-MIB") {
            Lookup::Found { bytes, .. } => assert!(looks_like_mib(&bytes)),
            Lookup::NotExist => panic!("expected to find TEST-MIB"),
        }
        assert!(matches!(src.find("NOPE"), Lookup::NotExist));
        assert_eq!(src.list_files().len(), 1);
    }
}
