//! Assembles a full synthetic MIB module from a [`ModuleSpec`].

use super::naming::module_name;
use super::objects::{notification, object_group, scalar, table};
use super::oids::{root_name, root_value};

/// Shape of a single generated module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleSpec {
    pub index: usize,
    pub num_scalars: usize,
    pub num_tables: usize,
    pub columns_per_table: usize,
    pub num_notifications: usize,
    /// If `Some(prev_index)`, this module imports its root object from the
    /// previous module, forming a import chain for resolver benchmarks.
    pub imports_from: Option<usize>,
}

/// Renders `spec` to a complete, independently-parseable MIB module.
pub fn render(spec: &ModuleSpec) -> String {
    let name = module_name(spec.index);
    let root = root_name(spec.index);

    let mut imports = vec!["IMPORTS\n    enterprises FROM SNMPv2-SMI".to_owned()];
    if let Some(prev) = spec.imports_from {
        imports.push(format!("    {} FROM {}", root_name(prev), module_name(prev)));
    }
    let imports_clause = imports.join("\n") + ";\n";

    let mut body = format!("{root} OBJECT IDENTIFIER ::= {}\n\n", root_value(spec.index));

    let mut arc = 1usize;
    let mut all_object_names = Vec::new();

    for i in 0..spec.num_scalars {
        let (oname, text) = scalar(&root, arc, i);
        body += &text;
        body += "\n";
        all_object_names.push(oname);
        arc += 1;
    }

    for i in 0..spec.num_tables {
        let (tname, text) = table(&root, arc, i, spec.columns_per_table);
        body += &text;
        all_object_names.push(tname);
        arc += 1;
    }

    let mut notif_names = Vec::new();
    for i in 0..spec.num_notifications {
        let objs: Vec<String> = all_object_names.iter().take(2).cloned().collect();
        let (nname, text) = notification(&root, arc, i, &objs);
        body += &text;
        body += "\n";
        notif_names.push(nname);
        arc += 1;
    }

    if !all_object_names.is_empty() {
        body += &object_group(&root, arc, 0, &all_object_names);
        arc += 1;
    }
    let _ = arc;

    format!("{name} DEFINITIONS ::= BEGIN\n\n{imports_clause}\n{body}\nEND\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_self_contained_module() {
        let spec = ModuleSpec {
            index: 0,
            num_scalars: 2,
            num_tables: 1,
            columns_per_table: 3,
            num_notifications: 1,
            imports_from: None,
        };
        let text = render(&spec);
        assert!(text.starts_with("BENCH-MOD-0 DEFINITIONS"));
        assert!(text.trim_end().ends_with("END"));
        assert!(text.contains("IMPORTS"));
    }

    #[test]
    fn chained_module_imports_previous_root() {
        let spec = ModuleSpec {
            index: 1,
            num_scalars: 1,
            num_tables: 0,
            columns_per_table: 0,
            num_notifications: 0,
            imports_from: Some(0),
        };
        let text = render(&spec);
        assert!(text.contains("benchRoot0 FROM BENCH-MOD-0"));
    }
}
