//! Loaded modules: the explicit table of top-level bindings a script exposes.
//!
//! The locator never introspects anything; it walks `Module::bindings`, which
//! yields bindings sorted by name.
use crate::definition::Definition;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A runtime value bound at module scope or returned by a function.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Definition(Definition),
    /// Anything else the script binds (strings, numbers, tables, ...).
    Data(serde_json::Value),
}

impl Value {
    pub fn as_definition(&self) -> Option<&Definition> {
        match self {
            Value::Definition(definition) => Some(definition),
            Value::Data(_) => None,
        }
    }

    pub fn into_definition(self) -> Option<Definition> {
        match self {
            Value::Definition(definition) => Some(definition),
            Value::Data(_) => None,
        }
    }
}

/// Why calling a function failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("raised: {0}")]
    Raised(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Returns(Value),
    Raises(String),
}

/// A top-level callable with a declared parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    params: Vec<String>,
    body: FunctionBody,
}

impl Function {
    pub fn new(params: Vec<String>, body: FunctionBody) -> Self {
        Self { params, body }
    }

    pub fn returning(value: Value) -> Self {
        Self::new(Vec::new(), FunctionBody::Returns(value))
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Invoke with no arguments.
    pub fn call(&self) -> Result<Value, CallError> {
        if !self.params.is_empty() {
            return Err(CallError::MissingArguments(self.params.clone()));
        }
        match &self.body {
            FunctionBody::Returns(value) => Ok(value.clone()),
            FunctionBody::Raises(message) => Err(CallError::Raised(message.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Value(Value),
    Function(Function),
}

/// A loaded script: a name, where it came from, and its top-level bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: String,
    origin: Option<PathBuf>,
    bindings: BTreeMap<String, Binding>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: None,
            bindings: BTreeMap::new(),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_binding(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.bind(name, binding);
        self
    }

    /// Bind `name`, replacing any earlier binding of the same name.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> String {
        match &self.origin {
            Some(origin) => origin.display().to_string(),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_argument_function_returns_its_value() {
        let function = Function::returning(Value::Definition(Definition::new(None)));
        let value = function.call().expect("call");
        assert!(value.as_definition().is_some());
    }

    #[test]
    fn function_with_params_cannot_be_called_bare() {
        let function = Function::new(
            vec!["src".to_string(), "dest".to_string()],
            FunctionBody::Returns(Value::Data(serde_json::Value::Null)),
        );
        assert_eq!(
            function.call(),
            Err(CallError::MissingArguments(vec![
                "src".to_string(),
                "dest".to_string()
            ]))
        );
    }

    #[test]
    fn raising_function_reports_message() {
        let function = Function::new(Vec::new(), FunctionBody::Raises("boom".to_string()));
        let err = function.call().unwrap_err();
        assert_eq!(err.to_string(), "raised: boom");
    }

    #[test]
    fn bindings_enumerate_in_name_order() {
        let module = Module::new("demo")
            .with_binding("zeta", Binding::Value(Value::Data(1.into())))
            .with_binding("alpha", Binding::Value(Value::Data(2.into())));
        let names: Vec<_> = module.bindings().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn label_prefers_origin_path() {
        let module = Module::new("demo");
        assert_eq!(module.label(), "demo");
        let module = module.with_origin("/tmp/demo.toml");
        assert_eq!(module.label(), "/tmp/demo.toml");
    }
}
