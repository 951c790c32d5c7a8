//! Locate the argument definition a loaded module exposes.
//!
//! Strategies run in a fixed order and the first hit wins: definitions bound at
//! module scope, then zero-argument functions probed by calling them. Probing
//! executes those functions, so this is only meant for trusted local scripts.
use crate::definition::Definition;
use crate::module::{Binding, Module};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no argument definition found in {0}")]
    NotFound(String),
}

type Strategy = fn(&Module) -> Option<Definition>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("module scope", find_in_scope),
    ("zero-argument functions", find_in_functions),
];

/// Return the module's argument definition.
pub fn find(module: &Module) -> Result<Definition, LocateError> {
    for &(label, strategy) in STRATEGIES {
        if let Some(definition) = strategy(module) {
            tracing::debug!(module = module.name(), strategy = label, "found argument definition");
            return Ok(definition);
        }
    }
    Err(LocateError::NotFound(module.label()))
}

fn find_in_scope(module: &Module) -> Option<Definition> {
    let mut candidates = module.bindings().filter_map(|(name, binding)| match binding {
        Binding::Value(value) => value.as_definition().map(|definition| (name, definition)),
        Binding::Function(_) => None,
    });
    let (name, definition) = candidates.next()?;
    let ignored: Vec<&str> = candidates.map(|(other, _)| other).collect();
    if !ignored.is_empty() {
        tracing::warn!(
            module = module.name(),
            selected = name,
            ignored = ?ignored,
            "multiple module-scope definitions; selection follows binding order"
        );
    }
    Some(definition.clone())
}

fn find_in_functions(module: &Module) -> Option<Definition> {
    for (name, binding) in module.bindings() {
        let Binding::Function(function) = binding else {
            continue;
        };
        if !function.params().is_empty() {
            tracing::debug!(function = name, "skipping function with parameters");
            continue;
        }
        // Every invocation failure counts as "not a candidate".
        match function.call() {
            Ok(value) => {
                if let Some(definition) = value.into_definition() {
                    return Some(definition);
                }
                tracing::debug!(function = name, "function did not return a definition");
            }
            Err(err) => {
                tracing::debug!(function = name, error = %err, "skipping function that failed");
            }
        }
    }
    None
}
