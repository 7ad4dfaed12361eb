use crate::language::{
    ast::{EntryDef, Module, RegistryDef, ValueExpr},
    errors::{DeclarationError, DeclarationErrors},
};
use crate::registry::{EntrySpec, Registry, RegistrySet};
use std::collections::HashSet;

/// Lowers a parsed module into a set of registries. Duplicate entry names
/// and duplicate registry names are reported against the span of the
/// offending identifier.
pub fn build_module(module: &Module) -> Result<RegistrySet, DeclarationErrors> {
    let mut errors = Vec::new();
    let mut set = RegistrySet::new();

    for def in &module.registries {
        let Some(registry) = build_registry(def, &mut errors) else {
            continue;
        };
        if set.insert(registry).is_err() {
            errors.push(DeclarationError::duplicate_registry(
                &def.name.name,
                def.name.span,
            ));
        }
    }

    if errors.is_empty() {
        Ok(set)
    } else {
        Err(DeclarationErrors::new(errors))
    }
}

fn build_registry(def: &RegistryDef, errors: &mut Vec<DeclarationError>) -> Option<Registry> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(def.entries.len());
    let mut clean = true;

    for entry in &def.entries {
        if !seen.insert(entry.name.name.as_str()) {
            errors.push(DeclarationError::duplicate_entry(
                &entry.name.name,
                &def.name.name,
                entry.name.span,
            ));
            clean = false;
        }
    }
    if !clean {
        return None;
    }

    let specs = def.entries.iter().map(lower_entry).collect();
    match Registry::build(def.name.name.clone(), specs) {
        Ok(registry) => Some(registry),
        Err(err) => {
            errors.push(DeclarationError::new(err.to_string(), def.name.span));
            None
        }
    }
}

fn lower_entry(entry: &EntryDef) -> EntrySpec {
    match &entry.value {
        None => EntrySpec::Auto(entry.name.name.clone()),
        Some(ValueExpr::Integer { value, .. }) => EntrySpec::Int(entry.name.name.clone(), *value),
        Some(ValueExpr::String { value, .. }) => {
            EntrySpec::Str(entry.name.name.clone(), value.clone())
        }
    }
}
