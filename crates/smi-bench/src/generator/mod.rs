//! Synthetic MIB corpus generator.
//!
//! Produces a set of independently-parseable MIB modules with realistic
//! import chains and object/table density for benchmarking `smi-core`'s
//! lexer, parser, and resolver.

pub mod module;
pub mod naming;
pub mod objects;
pub mod oids;

use module::{render, ModuleSpec};

/// Configuration for the corpus generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Number of modules to generate.
    pub num_modules: usize,
    /// Scalar objects per module.
    pub scalars_per_module: usize,
    /// Tables per module.
    pub tables_per_module: usize,
    /// Columns per table.
    pub columns_per_table: usize,
    /// Notifications per module.
    pub notifications_per_module: usize,
    /// Whether each module (after the first) imports from the previous one,
    /// forming a resolvable import chain instead of independent modules.
    pub chain_imports: bool,
}

/// Predefined size tiers for benchmarking, modeled after real-world MIB
/// repository sizes (a vendor enterprise tree is rarely more than a few
/// hundred modules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// A handful of modules, a few objects each.
    Small,
    /// A couple dozen modules with tables.
    Medium,
    /// A hundred-plus modules, closer to a full vendor MIB set.
    Large,
}

impl SizeTier {
    /// Returns the default [`GeneratorConfig`] for this size tier.
    pub fn config(self) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                num_modules: 3,
                scalars_per_module: 4,
                tables_per_module: 1,
                columns_per_table: 3,
                notifications_per_module: 1,
                chain_imports: true,
            },
            SizeTier::Medium => GeneratorConfig {
                num_modules: 25,
                scalars_per_module: 10,
                tables_per_module: 3,
                columns_per_table: 6,
                notifications_per_module: 2,
                chain_imports: true,
            },
            SizeTier::Large => GeneratorConfig {
                num_modules: 150,
                scalars_per_module: 20,
                tables_per_module: 5,
                columns_per_table: 10,
                notifications_per_module: 3,
                chain_imports: true,
            },
        }
    }
}

/// Generates `config.num_modules` modules, returning `(module_name, text)`
/// pairs in generation order. Deterministic: the same config always
/// produces byte-identical output.
pub fn generate_corpus(config: &GeneratorConfig) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(config.num_modules);
    for index in 0..config.num_modules {
        let imports_from = if config.chain_imports && index > 0 {
            Some(index - 1)
        } else {
            None
        };
        let spec = ModuleSpec {
            index,
            num_scalars: config.scalars_per_module,
            num_tables: config.tables_per_module,
            columns_per_table: config.columns_per_table,
            num_notifications: config.notifications_per_module,
            imports_from,
        };
        let text = render(&spec);
        out.push((naming::module_name(index), text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_module_count() {
        let corpus = generate_corpus(&SizeTier::Small.config());
        assert_eq!(corpus.len(), 3);
        for (name, text) in &corpus {
            assert!(text.starts_with(name));
        }
    }

    #[test]
    fn is_deterministic() {
        let a = generate_corpus(&SizeTier::Medium.config());
        let b = generate_corpus(&SizeTier::Medium.config());
        assert_eq!(a, b);
    }
}
