//! Post-resolve invariant checkers, used both by the benchmark harness (to
//! make sure what's being timed is actually valid) and by
//! `tests/correctness_invariants.rs`.

use smi_core::{DiagnosticConfig, Model, Severity};

/// Verifies that resolving a generated corpus produced no errors and
/// registered every module it was given.
pub fn check_model_invariants(model: &Model, expected_module_names: &[String]) -> Result<(), String> {
    if model.has_errors(Severity::Error) {
        let errors: Vec<_> = model
            .diagnostics()
            .iter()
            .filter(|d| d.severity <= Severity::Error)
            .collect();
        return Err(format!("model has {} error diagnostics: {errors:?}", errors.len()));
    }
    for name in expected_module_names {
        if model.module_by_name(name).is_none() {
            return Err(format!("expected module {name} missing from resolved model"));
        }
    }
    Ok(())
}

/// Verifies the default [`DiagnosticConfig`] at Normal strictness accepted
/// the generated corpus without triggering any fallback-gated diagnostic.
pub fn check_no_unresolved(model: &Model) -> Result<(), String> {
    if !model.unresolved().is_empty() {
        return Err(format!("{} unresolved references remain", model.unresolved().len()));
    }
    Ok(())
}

/// A Normal-strictness config, the default a real loader would use.
pub fn default_config() -> DiagnosticConfig {
    DiagnosticConfig::new(smi_core::StrictnessLevel::Normal)
}
