//! Type resolution (spec §4.6 phase 4): named-type chains, well-known
//! application types gated by strictness, and anonymous inline refinements.

use std::collections::HashSet;

use super::Resolver;
use crate::diag::{Diagnostic, Severity, UnresolvedKind, UnresolvedRef};
use crate::model::{BaseType, NamedValue, Range, Type, TypeId};
use crate::parser::{NamedNumber, RangeConstraint, TypeSyntax};

fn to_range(r: &RangeConstraint) -> Range {
    Range { lo: r.lo, hi: r.hi }
}

fn to_named_value(n: &NamedNumber) -> NamedValue {
    NamedValue {
        name: n.name.clone(),
        number: n.number,
    }
}

fn blank_type(name: &str) -> Type {
    Type {
        id: TypeId(0),
        name: name.to_owned(),
        parent: None,
        base: BaseType::Unknown,
        is_textual_convention: false,
        display_hint: None,
        sizes: Vec::new(),
        ranges: Vec::new(),
        named_values: Vec::new(),
        status: None,
        description: None,
        reference: None,
        unresolved: false,
    }
}

/// Resolves a named type symbol `name` (either a local `TypeDef`, or an
/// imported one) into a registered [`TypeId`], memoizing across calls.
pub(super) fn resolve_type(
    r: &mut Resolver<'_>,
    module: &str,
    name: &str,
    visiting: &mut HashSet<(String, String)>,
) -> Option<TypeId> {
    let key = (module.to_owned(), name.to_owned());
    if let Some(&id) = r.type_symbols.get(&key) {
        return Some(id);
    }
    if visiting.contains(&key) {
        r.report(Diagnostic::new(
            Severity::Severe,
            "type-cycle",
            module,
            0,
            0,
            format!("type {name:?} is defined in terms of itself"),
        ));
        return None;
    }
    visiting.insert(key.clone());

    let result = if let Some(crate::parser::Definition::Type(def)) =
        r.modules.get(module).and_then(|m| m.symbols.get(name)).cloned()
    {
        let mut ty = build_anonymous_type(r, module, name, &def.syntax, visiting);
        // A type assignment literally named one of the SMIv2 application
        // types (`Counter32 ::= INTEGER (0..4294967295)`, etc.) gets its
        // real base unconditionally — this is the type's own definition,
        // not a best-guess fallback for a name nobody defined (spec §4.9).
        if ty.parent.is_none() {
            if let Some(base) = Type::builtin_base(name).or_else(|| Type::well_known_application(name)) {
                ty.base = base;
            }
        }
        ty.is_textual_convention = def.is_textual_convention;
        // A TC's own clauses refine its parent's, not replace them wholesale:
        // a DISPLAY-HINT-less TC built on top of one that has it still has
        // it (spec §8 "textual-convention chain").
        if def.display_hint.is_some() {
            ty.display_hint = def.display_hint.clone();
        }
        ty.status = def.status.clone();
        ty.description = def.description.clone();
        ty.reference = def.reference.clone();
        Some(r.builder.register_type(ty))
    } else if let Some(source) = r.module_name_for_import(module, name) {
        if source == module {
            None
        } else {
            resolve_type(r, &source, name, visiting)
        }
    } else {
        None
    };

    visiting.remove(&key);

    let resolved = match result {
        Some(id) => Some(id),
        None if r.config.allow_best_guess_fallbacks() => r
            .type_symbols
            .iter()
            .find(|((_, n), _)| n == name)
            .map(|(_, &id)| id),
        None => None,
    };

    match resolved {
        Some(id) => {
            r.type_symbols.insert(key, id);
            Some(id)
        }
        None => {
            r.report(Diagnostic::new(
                Severity::Error,
                "type-unknown",
                module,
                0,
                0,
                format!("type {name:?} could not be resolved"),
            ));
            r.builder
                .push_unresolved(UnresolvedRef::new(UnresolvedKind::Type, name, module));
            None
        }
    }
}

/// Builds a [`Type`] value (not yet registered with an id) from a syntax
/// node: either a bare primitive, an anonymous `INTEGER`/`BITS`/`OCTET
/// STRING` refinement, a `SEQUENCE`/`SEQUENCE OF` row marker, or a named
/// reference resolved via [`resolve_type`].
pub(super) fn build_anonymous_type(
    r: &mut Resolver<'_>,
    module: &str,
    name: &str,
    syntax: &TypeSyntax,
    visiting: &mut HashSet<(String, String)>,
) -> Type {
    match syntax {
        TypeSyntax::Named(type_name) => {
            if let Some(base) = Type::builtin_base(type_name) {
                let mut ty = blank_type(name);
                ty.base = base;
                return ty;
            }
            if r.config.allow_best_guess_fallbacks() {
                if let Some(base) = Type::well_known_application(type_name) {
                    r.report(Diagnostic::new(
                        Severity::Info,
                        "type-well-known-fallback",
                        module,
                        0,
                        0,
                        format!("resolved {type_name:?} via a well-known application type fallback"),
                    ));
                    let mut ty = blank_type(name);
                    ty.base = base;
                    return ty;
                }
                if let Some(base) = Type::well_known_smiv1(type_name) {
                    r.report(Diagnostic::new(
                        Severity::Info,
                        "type-well-known-fallback",
                        module,
                        0,
                        0,
                        format!("resolved {type_name:?} via a well-known SMIv1 alias fallback"),
                    ));
                    let mut ty = blank_type(name);
                    ty.base = base;
                    return ty;
                }
                if let Some(base) = Type::well_known_textual_convention(type_name) {
                    r.report(Diagnostic::new(
                        Severity::Info,
                        "type-well-known-fallback",
                        module,
                        0,
                        0,
                        format!("resolved {type_name:?} via a well-known textual-convention fallback"),
                    ));
                    let mut ty = blank_type(name);
                    ty.base = base;
                    ty.is_textual_convention = true;
                    return ty;
                }
            }
            match resolve_type(r, module, type_name, visiting) {
                Some(parent_id) => {
                    let parent = r.builder.types()[parent_id.index()].clone();
                    let mut ty = blank_type(name);
                    ty.parent = Some(parent_id);
                    ty.base = parent.base;
                    ty.sizes = parent.sizes.clone();
                    ty.ranges = parent.ranges.clone();
                    ty.named_values = parent.named_values.clone();
                    ty.display_hint = parent.display_hint.clone();
                    ty
                }
                None => {
                    let mut ty = blank_type(name);
                    ty.unresolved = true;
                    ty
                }
            }
        }
        TypeSyntax::SequenceOf(_) | TypeSyntax::Sequence(_) => {
            let mut ty = blank_type(name);
            ty.base = BaseType::Sequence;
            ty
        }
        TypeSyntax::Integer { named_values } => {
            let mut ty = blank_type(name);
            ty.base = BaseType::Integer32;
            ty.named_values = named_values.iter().map(to_named_value).collect();
            ty
        }
        TypeSyntax::OctetString { sizes } => {
            let mut ty = blank_type(name);
            ty.base = BaseType::OctetString;
            ty.sizes = sizes.iter().map(to_range).collect();
            ty
        }
        TypeSyntax::Bits { named_values } => {
            let mut ty = blank_type(name);
            ty.base = BaseType::Bits;
            ty.named_values = named_values.iter().map(to_named_value).collect();
            ty
        }
        TypeSyntax::ObjectIdentifier => {
            let mut ty = blank_type(name);
            ty.base = BaseType::ObjectIdentifier;
            ty
        }
    }
}
