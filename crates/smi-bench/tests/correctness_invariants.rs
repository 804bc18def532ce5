//! Post-resolve invariant tests using generated data, plus a handful of
//! semantic checks specific to the synthetic corpus shape (import chains,
//! table/row/column linkage).
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use smi_bench::correctness;
use smi_bench::{SizeTier, generate_corpus};
use smi_core::{CancellationToken, MemorySource, load_all};

fn medium_model() -> (smi_core::Model, Vec<String>) {
    let corpus = generate_corpus(&SizeTier::Medium.config());
    let mut source = MemorySource::new();
    let mut names = Vec::new();
    for (name, text) in &corpus {
        source.insert(name.clone(), text.clone());
        names.push(name.clone());
    }
    let config = correctness::default_config();
    let model = load_all(&source, &config, &CancellationToken::new()).expect("loads");
    (model, names)
}

#[test]
fn model_invariants_hold() {
    let (model, names) = medium_model();
    correctness::check_model_invariants(&model, &names).expect("invariants hold");
}

#[test]
fn no_unresolved_references() {
    let (model, _) = medium_model();
    correctness::check_no_unresolved(&model).expect("no unresolved refs");
}

#[test]
fn chained_modules_see_each_others_roots() {
    // BENCH-MOD-1 imports benchRoot0 from BENCH-MOD-0; both should resolve
    // to real modules in the same model, not just parse independently.
    let (model, _) = medium_model();
    let first = model.module_by_name("BENCH-MOD-0").expect("first module present");
    let second = model.module_by_name("BENCH-MOD-1").expect("second module present");
    assert_ne!(first.name, second.name);
}

#[test]
fn table_columns_resolve_index_linkage() {
    use smi_core::{Node, ObjectKind, RowLinkage};

    let (model, _) = medium_model();
    let table_node_id = model.lookup("alphaAlphaTable0").expect("table object registered");
    let table_node: &Node = model.node(table_node_id);
    let table_obj = table_node.object.expect("table has an object");
    assert_eq!(model.object(table_obj).object_kind, ObjectKind::Table);

    let row_node_id = model.lookup("alphaAlphaEntry0").expect("row object registered");
    let row_obj = model.object(model.node(row_node_id).object.expect("row has an object"));
    match &row_obj.linkage {
        RowLinkage::Index(items) => assert!(!items.is_empty()),
        other => panic!("expected Index linkage for a generated row, got {other:?}"),
    }
}
