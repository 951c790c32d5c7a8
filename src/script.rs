//! Script declarations and their conversion into module bindings.
//!
//! A script is a table of top-level bindings. Tables tagged
//! `kind = "parser"` declare an argument definition, tables tagged
//! `kind = "function"` declare a callable, and any other string `kind` is an
//! error. Values without a string `kind` are plain data.
use crate::definition::{Action, ArgumentSpec, Definition, DefinitionError, ValueType};
use crate::module::{Binding, Function, FunctionBody, Value};
use serde::Deserialize;
use thiserror::Error;

const KIND_KEY: &str = "kind";

/// Errors in a single top-level declaration.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("malformed declaration")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown kind {0:?} (expected \"parser\" or \"function\")")]
    UnknownKind(String),

    #[error("function declares both `returns` and `raises`")]
    AmbiguousBody,

    #[error("argument #{index} ({names}) is invalid")]
    Argument {
        index: usize,
        names: String,
        #[source]
        source: DefinitionError,
    },
}

/// Source syntax of a script file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Toml,
    Json,
}

impl ScriptFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScriptFormat::Json,
            _ => ScriptFormat::Toml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Parser,
    Function,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParserDecl {
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_add_help")]
    add_help: bool,
    #[serde(default)]
    arguments: Vec<ArgumentDecl>,
}

fn default_add_help() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArgumentDecl {
    names: Vec<String>,
    #[serde(default)]
    dest: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default, rename = "type")]
    value_type: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    metavar: Option<String>,
    #[serde(default)]
    action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FunctionDecl {
    #[serde(default)]
    params: Vec<String>,
    #[serde(default)]
    returns: Option<serde_json::Value>,
    #[serde(default)]
    raises: Option<String>,
}

/// Convert one top-level script value into a binding.
pub fn binding_from_json(raw: serde_json::Value) -> Result<Binding, DeclarationError> {
    match declared_kind(&raw)? {
        Some(Kind::Function) => {
            let decl: FunctionDecl = serde_json::from_value(declaration_fields(raw))?;
            Ok(Binding::Function(function_from_decl(decl)?))
        }
        _ => Ok(Binding::Value(value_from_json(raw)?)),
    }
}

fn value_from_json(raw: serde_json::Value) -> Result<Value, DeclarationError> {
    if declared_kind(&raw)? != Some(Kind::Parser) {
        return Ok(Value::Data(raw));
    }
    let decl: ParserDecl = serde_json::from_value(declaration_fields(raw))?;
    Ok(Value::Definition(definition_from_decl(decl)?))
}

fn declared_kind(raw: &serde_json::Value) -> Result<Option<Kind>, DeclarationError> {
    let Some(kind) = raw
        .as_object()
        .and_then(|table| table.get(KIND_KEY))
        .and_then(serde_json::Value::as_str)
    else {
        return Ok(None);
    };
    match kind {
        "parser" => Ok(Some(Kind::Parser)),
        "function" => Ok(Some(Kind::Function)),
        other => Err(DeclarationError::UnknownKind(other.to_string())),
    }
}

/// Strip the `kind` tag so the remaining keys can be checked strictly.
fn declaration_fields(mut raw: serde_json::Value) -> serde_json::Value {
    if let Some(table) = raw.as_object_mut() {
        table.remove(KIND_KEY);
    }
    raw
}

fn function_from_decl(decl: FunctionDecl) -> Result<Function, DeclarationError> {
    let body = match (decl.returns, decl.raises) {
        (Some(_), Some(_)) => return Err(DeclarationError::AmbiguousBody),
        (_, Some(message)) => FunctionBody::Raises(message),
        (Some(returns), None) => FunctionBody::Returns(value_from_json(returns)?),
        // A function without a return statement yields nothing useful.
        (None, None) => FunctionBody::Returns(Value::Data(serde_json::Value::Null)),
    };
    Ok(Function::new(decl.params, body))
}

fn definition_from_decl(decl: ParserDecl) -> Result<Definition, DeclarationError> {
    let mut definition = if decl.add_help {
        Definition::new(decl.description)
    } else {
        Definition::without_help(decl.description)
    };
    for (index, argument) in decl.arguments.into_iter().enumerate() {
        let names = argument.names.join(", ");
        let spec = ArgumentSpec {
            names: argument.names,
            dest: argument.dest,
            help: argument.help,
            value_type: argument.value_type.as_deref().map(ValueType::parse),
            required: argument.required,
            metavar: argument.metavar,
            action: argument.action,
        };
        definition
            .add_argument(spec)
            .map_err(|source| DeclarationError::Argument {
                index,
                names,
                source,
            })?;
    }
    Ok(definition)
}
