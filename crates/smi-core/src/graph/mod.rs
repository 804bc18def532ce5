//! Inter-module dependency graph and resolution order (spec §4.4).

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::diag::{Diagnostic, Severity};
use crate::lowering::LoweredModule;

/// A cycle detected among module IMPORTS (spec §4.4 "import cycles ... are
/// reported as a single diagnostic per strongly-connected component").
#[derive(Debug, Clone)]
pub struct ImportCycle {
    pub modules: Vec<String>,
}

/// The module dependency graph, built from each module's IMPORTS clauses.
///
/// Nodes are modules; an edge `a -> b` means `a` imports a symbol from `b`.
/// Unknown `from_module` targets (modules never loaded) are simply absent
/// as nodes and produce no edge — phase 2 of the resolver reports those as
/// unresolved imports instead.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    index_by_name: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn build(modules: &HashMap<String, LoweredModule>) -> Self {
        let mut graph = DiGraph::new();
        let mut index_by_name = HashMap::new();
        // HashMap iteration order is randomized per-process; sorting names
        // before assigning NodeIndex keeps tarjan_scc's output (and thus
        // resolution_order for mutually-independent modules) reproducible
        // across runs instead of depending on hasher seed.
        let mut names: Vec<&String> = modules.keys().collect();
        names.sort();
        for name in names {
            let idx = graph.add_node(name.clone());
            index_by_name.insert(name.clone(), idx);
        }
        let mut names: Vec<&String> = modules.keys().collect();
        names.sort();
        for name in names {
            let Some(&from_idx) = index_by_name.get(name) else {
                continue;
            };
            let module = &modules[name];
            for clause in &module.import_clauses {
                if let Some(&to_idx) = index_by_name.get(&clause.from_module) {
                    graph.update_edge(from_idx, to_idx, ());
                }
            }
        }
        Self { graph, index_by_name }
    }

    /// A deterministic resolution order: modules with no unresolved
    /// dependency come first, with strongly-connected components (cycles)
    /// collapsed and reported via [`Self::cycles`] (spec §4.4 "a
    /// deterministic order ... Tarjan's algorithm, with each
    /// strongly-connected component ... visited together").
    pub fn resolution_order(&self) -> Vec<String> {
        let mut sccs = tarjan_scc(&self.graph);
        // tarjan_scc returns components in reverse topological order
        // (dependents before dependencies); reverse so dependencies come
        // first, which is the order the resolver wants to walk modules in.
        sccs.reverse();
        let mut order = Vec::new();
        for mut scc in sccs {
            scc.sort_by_key(|&idx| self.graph[idx].clone());
            for idx in scc {
                order.push(self.graph[idx].clone());
            }
        }
        order
    }

    /// Every strongly-connected component of size > 1, plus single modules
    /// with a self-import, reported as import cycles (spec §4.4).
    pub fn cycles(&self) -> Vec<ImportCycle> {
        let mut cycles = Vec::new();
        for scc in tarjan_scc(&self.graph) {
            let is_self_loop = scc.len() == 1 && self.graph.contains_edge(scc[0], scc[0]);
            if scc.len() > 1 || is_self_loop {
                let mut modules: Vec<String> = scc.iter().map(|&idx| self.graph[idx].clone()).collect();
                modules.sort();
                cycles.push(ImportCycle { modules });
            }
        }
        cycles
    }

    /// Diagnostics for every detected cycle, at [`Severity::Error`].
    pub fn cycle_diagnostics(&self) -> Vec<Diagnostic> {
        self.cycles()
            .into_iter()
            .map(|c| {
                let module = c.modules.first().cloned().unwrap_or_default();
                Diagnostic::new(
                    Severity::Error,
                    "import-cycle",
                    module,
                    0,
                    0,
                    format!("import cycle among modules: {}", c.modules.join(", ")),
                )
            })
            .collect()
    }

    pub fn contains(&self, module_name: &str) -> bool {
        self.index_by_name.contains_key(module_name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::lowering::{lower, ImportTable};
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn lowered(name: &str, src: &str) -> LoweredModule {
        let (tokens, _) = Lexer::new(src.as_bytes(), name).tokenize();
        let (tree, _) = Parser::new(&tokens, name).parse_module();
        let (m, _) = lower(tree.expect("parses"), src.as_bytes());
        m
    }

    fn modules(pairs: Vec<(&str, &str)>) -> HashMap<String, LoweredModule> {
        pairs
            .into_iter()
            .map(|(name, src)| (name.to_owned(), lowered(name, src)))
            .collect()
    }

    #[test]
    fn orders_dependency_before_dependent() {
        let mods = modules(vec![
            ("A-MIB", "A-MIB DEFINITIONS ::= BEGIN IMPORTS foo FROM B-MIB; END"),
            ("B-MIB", "B-MIB DEFINITIONS ::= BEGIN foo OBJECT IDENTIFIER ::= { enterprises 1 } END"),
        ]);
        let graph = DependencyGraph::build(&mods);
        let order = graph.resolution_order();
        let a_pos = order.iter().position(|n| n == "A-MIB").unwrap();
        let b_pos = order.iter().position(|n| n == "B-MIB").unwrap();
        assert!(b_pos < a_pos);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn detects_mutual_import_cycle() {
        let mods = modules(vec![
            ("A-MIB", "A-MIB DEFINITIONS ::= BEGIN IMPORTS foo FROM B-MIB; END"),
            ("B-MIB", "B-MIB DEFINITIONS ::= BEGIN IMPORTS bar FROM A-MIB; END"),
        ]);
        let graph = DependencyGraph::build(&mods);
        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].modules, vec!["A-MIB".to_owned(), "B-MIB".to_owned()]);
    }

    #[test]
    fn unrelated_modules_have_no_forced_order() {
        let mods = modules(vec![
            ("A-MIB", "A-MIB DEFINITIONS ::= BEGIN END"),
            ("B-MIB", "B-MIB DEFINITIONS ::= BEGIN END"),
        ]);
        let graph = DependencyGraph::build(&mods);
        assert_eq!(graph.resolution_order().len(), 2);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    #[allow(unused_imports)]
    fn import_table_type_is_reachable() {
        let _t: ImportTable = ImportTable::default();
    }
}
