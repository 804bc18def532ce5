//! Diagnostics, severities, and the strictness policy (spec §3 "Diagnostic",
//! §4.8, §6, §7).
//!
//! Diagnostics never stop the pipeline: every parse or resolve irregularity
//! is recorded here with a stable code, a severity, and a source location,
//! and the resolver always produces the best model it can.

use std::collections::HashMap;
use std::fmt;

/// Diagnostic severity. Lower numbers mean more severe (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Aborts the pipeline outright (malformed input the lexer cannot resynchronize from).
    Fatal,
    /// A structural violation severe enough that dependents cannot be trusted.
    Severe,
    /// A resolution failure: a symbol, type, or OID that could not be resolved.
    Error,
    /// A lesser resolution concern that still leaves a usable result.
    Minor,
    /// A stylistic deviation from RFC 2578/2579 naming conventions.
    Style,
    /// A recoverable parse irregularity.
    Warning,
    /// An informational note, typically describing a strictness fallback that succeeded.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fatal => "fatal",
            Self::Severe => "severe",
            Self::Error => "error",
            Self::Minor => "minor",
            Self::Style => "style",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(s)
    }
}

/// A single diagnostic finding produced while lexing, parsing, or resolving.
///
/// `code` is one of the stable strings enumerated in spec §6, e.g.
/// `"import-not-found"` or `"type-unknown"`. Diagnostics are collected
/// across the whole pipeline and returned in `Model::diagnostics()` in a
/// deterministic order (spec §5 "Ordering guarantees").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub module: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: &'static str,
        module: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            module: module.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}: {}",
            self.module, self.line, self.column, self.severity, self.code, self.message
        )
    }
}

/// Kind tag for a dangling reference (spec §3 "UnresolvedRef").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedKind {
    Import,
    Type,
    Oid,
    Index,
    NotificationObject,
}

/// A structural record of a symbol that could not be resolved, independent
/// of the human-readable diagnostic describing it (spec §7 channel 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub kind: UnresolvedKind,
    pub symbol: String,
    pub module: String,
}

impl UnresolvedRef {
    pub fn new(kind: UnresolvedKind, symbol: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            module: module.into(),
        }
    }
}

/// Strictness level, gating the two fallback predicates of spec §4.8.
///
/// The numeric boundaries are exact (spec §8 "Boundary cases"): Strict
/// spans 0..2, Normal spans 3..4, Permissive is 5, Silent is 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrictnessLevel {
    Strict,
    Normal,
    Permissive,
    Silent,
}

impl StrictnessLevel {
    /// The representative ordinal used for level-boundary reasoning (spec §8).
    fn rank(self) -> u8 {
        match self {
            Self::Strict => 1,
            Self::Normal => 3,
            Self::Permissive => 5,
            Self::Silent => 6,
        }
    }

    /// `allow-safe-fallbacks` — enabled at Normal and above (spec §4.8).
    pub fn allows_safe_fallbacks(self) -> bool {
        self.rank() >= StrictnessLevel::Normal.rank()
    }

    /// `allow-best-guess-fallbacks` — enabled at Permissive and above (spec §4.8).
    pub fn allows_best_guess_fallbacks(self) -> bool {
        self.rank() >= StrictnessLevel::Permissive.rank()
    }

    /// Silent mode enables both fallbacks but suppresses all reporting.
    pub fn is_silent(self) -> bool {
        matches!(self, Self::Silent)
    }
}

/// Per-code severity override or suppression, applied after a diagnostic is
/// produced but before it is recorded (spec §4.8).
#[derive(Debug, Clone, Default)]
pub struct DiagnosticConfig {
    level: StrictnessLevel,
    fail_at: Severity,
    ignore: Vec<&'static str>,
    overrides: HashMap<&'static str, Severity>,
}

impl Default for StrictnessLevel {
    fn default() -> Self {
        Self::Normal
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Error
    }
}

impl DiagnosticConfig {
    /// A config at the given strictness level, `fail_at = Error`, no ignores
    /// or overrides.
    pub fn new(level: StrictnessLevel) -> Self {
        Self {
            level,
            fail_at: Severity::Error,
            ignore: Vec::new(),
            overrides: HashMap::new(),
        }
    }

    pub fn level(&self) -> StrictnessLevel {
        self.level
    }

    pub fn fail_at(&self) -> Severity {
        self.fail_at
    }

    pub fn set_fail_at(&mut self, severity: Severity) -> &mut Self {
        self.fail_at = severity;
        self
    }

    pub fn ignore_code(&mut self, code: &'static str) -> &mut Self {
        self.ignore.push(code);
        self
    }

    pub fn override_severity(&mut self, code: &'static str, severity: Severity) -> &mut Self {
        self.overrides.insert(code, severity);
        self
    }

    pub fn allow_safe_fallbacks(&self) -> bool {
        self.level.allows_safe_fallbacks()
    }

    pub fn allow_best_guess_fallbacks(&self) -> bool {
        self.level.allows_best_guess_fallbacks()
    }

    /// Applies the ignore list and severity overrides to a would-be
    /// diagnostic, returning `None` if it should be dropped (spec §4.8,
    /// §7 "every fallback that succeeds emits ... so a caller auditing a
    /// load can reconstruct which shortcuts were taken").
    ///
    /// Silent mode (spec §4.8, §8) suppresses all reporting regardless of
    /// the ignore list or overrides.
    pub fn filter(&self, mut diag: Diagnostic) -> Option<Diagnostic> {
        if self.level.is_silent() {
            return None;
        }
        if self.ignore.contains(&diag.code) {
            return None;
        }
        if let Some(&severity) = self.overrides.get(diag.code) {
            diag.severity = severity;
        }
        Some(diag)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn strictness_boundaries_are_exact() {
        assert!(!StrictnessLevel::Strict.allows_safe_fallbacks());
        assert!(!StrictnessLevel::Strict.allows_best_guess_fallbacks());

        assert!(StrictnessLevel::Normal.allows_safe_fallbacks());
        assert!(!StrictnessLevel::Normal.allows_best_guess_fallbacks());

        assert!(StrictnessLevel::Permissive.allows_safe_fallbacks());
        assert!(StrictnessLevel::Permissive.allows_best_guess_fallbacks());

        assert!(StrictnessLevel::Silent.allows_safe_fallbacks());
        assert!(StrictnessLevel::Silent.allows_best_guess_fallbacks());
        assert!(StrictnessLevel::Silent.is_silent());
    }

    #[test]
    fn ignore_list_drops_diagnostic() {
        let mut cfg = DiagnosticConfig::new(StrictnessLevel::Normal);
        cfg.ignore_code("type-unknown");
        let d = Diagnostic::new(Severity::Error, "type-unknown", "TEST", 1, 1, "x");
        assert_eq!(cfg.filter(d), None);
    }

    #[test]
    fn override_replaces_severity() {
        let mut cfg = DiagnosticConfig::new(StrictnessLevel::Normal);
        cfg.override_severity("type-unknown", Severity::Warning);
        let d = Diagnostic::new(Severity::Error, "type-unknown", "TEST", 1, 1, "x");
        let filtered = cfg.filter(d).expect("not ignored");
        assert_eq!(filtered.severity, Severity::Warning);
    }

    #[test]
    fn silent_suppresses_everything() {
        let cfg = DiagnosticConfig::new(StrictnessLevel::Silent);
        let d = Diagnostic::new(Severity::Fatal, "lex-stray-character", "TEST", 1, 1, "x");
        assert_eq!(cfg.filter(d), None);
    }
}
