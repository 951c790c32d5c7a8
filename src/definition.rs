//! Argument definitions: the schema a script declares for its command line.
//!
//! Definitions are assembled the way argparse users assemble them, one
//! `add_argument` call per option. `dest`, arity and required-ness are derived
//! from the names and the action, and the per-definition invariants (unique
//! identifiers, well-formed flags, positionals without flags) are enforced here
//! so the renderer can trust what it reads.
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Identifier of the implicit help option.
pub const HELP_DEST: &str = "help";

const HELP_TEXT: &str = "show this help message and exit";

/// Violations of the definition invariants, reported by `add_argument`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("argument declares no names")]
    NoNames,

    #[error("argument name must not be empty")]
    EmptyName,

    #[error("invalid flag string {0:?}")]
    InvalidFlag(String),

    #[error("invalid names {0:?}: a positional takes exactly one name and no flags")]
    MixedNames(Vec<String>),

    #[error("cannot derive an identifier from {0:?}")]
    InvalidDest(String),

    #[error("identifier {0:?} is already defined")]
    DuplicateDest(String),

    #[error("flag {flag} conflicts with option {existing:?}")]
    ConflictingFlag { flag: String, existing: String },

    #[error("'required' is not accepted for positional {0:?}")]
    RequiredOnPositional(String),

    #[error("action {action} on {dest:?} does not accept {setting}")]
    UnexpectedSetting {
        dest: String,
        action: Action,
        setting: &'static str,
    },
}

/// What an option does with its command-line occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Store,
    StoreTrue,
    StoreFalse,
    Count,
    Append,
}

impl Action {
    fn takes_value(self) -> bool {
        matches!(self, Action::Store | Action::Append)
    }

    fn as_str(self) -> &'static str {
        match self {
            Action::Store => "store",
            Action::StoreTrue => "store_true",
            Action::StoreFalse => "store_false",
            Action::Count => "count",
            Action::Append => "append",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many command-line values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Boolean-style flag; presence is the value.
    NoValue,
    /// Flag followed by exactly one value.
    Single,
    /// Bare value identified by its position.
    Positional,
}

/// Declared value type of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// The option consumes a file path.
    File,
    Named(String),
}

impl ValueType {
    pub fn parse(name: &str) -> Self {
        match name {
            "file" | "FileType" => ValueType::File,
            other => ValueType::Named(other.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ValueType::File => "file",
            ValueType::Named(name) => name,
        }
    }
}

/// One argument or flag of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgOption {
    pub dest: String,
    pub help: Option<String>,
    pub flags: Vec<String>,
    pub value_type: Option<ValueType>,
    pub required: bool,
    pub metavar: Option<String>,
    pub arity: Arity,
}

impl ArgOption {
    pub fn is_positional(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_help(&self) -> bool {
        self.dest == HELP_DEST
    }

    pub fn first_flag(&self) -> Option<&str> {
        self.flags.first().map(String::as_str)
    }
}

/// Inputs to `Definition::add_argument`, mirroring argparse keywords.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSpec {
    pub names: Vec<String>,
    pub dest: Option<String>,
    pub help: Option<String>,
    pub value_type: Option<ValueType>,
    pub required: Option<bool>,
    pub metavar: Option<String>,
    pub action: Action,
}

impl ArgumentSpec {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

/// A command's argument schema: description plus options in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    description: Option<String>,
    options: Vec<ArgOption>,
}

impl Definition {
    /// Create a definition carrying the implicit `-h, --help` option.
    pub fn new(description: Option<String>) -> Self {
        let mut definition = Self::without_help(description);
        definition.options.push(ArgOption {
            dest: HELP_DEST.to_string(),
            help: Some(HELP_TEXT.to_string()),
            flags: vec!["-h".to_string(), "--help".to_string()],
            value_type: None,
            required: false,
            metavar: None,
            arity: Arity::NoValue,
        });
        definition
    }

    pub fn without_help(description: Option<String>) -> Self {
        Self {
            description,
            options: Vec::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All options, including the implicit help option, in declaration order.
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    /// Options that appear in generated documentation.
    pub fn documented_options(&self) -> impl Iterator<Item = &ArgOption> {
        self.options.iter().filter(|option| !option.is_help())
    }

    pub fn add_argument(&mut self, spec: ArgumentSpec) -> Result<&mut Self, DefinitionError> {
        let option = self.build_option(spec)?;
        self.options.push(option);
        Ok(self)
    }

    fn build_option(&self, mut spec: ArgumentSpec) -> Result<ArgOption, DefinitionError> {
        // An empty metavar displays nothing, so it counts as unset.
        spec.metavar = spec.metavar.take().filter(|metavar| !metavar.is_empty());
        if spec.names.is_empty() {
            return Err(DefinitionError::NoNames);
        }
        if spec.names.iter().any(|name| name.is_empty()) {
            return Err(DefinitionError::EmptyName);
        }

        let positional = !spec.names[0].starts_with('-');
        if (positional && spec.names.len() > 1)
            || (!positional && spec.names.iter().any(|name| !name.starts_with('-')))
        {
            return Err(DefinitionError::MixedNames(spec.names));
        }

        let flags = if positional {
            Vec::new()
        } else {
            for flag in &spec.names {
                if !flag_pattern().is_match(flag) {
                    return Err(DefinitionError::InvalidFlag(flag.clone()));
                }
            }
            spec.names.clone()
        };

        let dest = match spec.dest {
            Some(dest) if dest.is_empty() => return Err(DefinitionError::InvalidDest(dest)),
            Some(dest) => dest,
            None => derive_dest(&spec.names)?,
        };
        if self.options.iter().any(|option| option.dest == dest) {
            return Err(DefinitionError::DuplicateDest(dest));
        }
        for flag in &flags {
            if let Some(existing) = self.options.iter().find(|option| option.flags.contains(flag)) {
                return Err(DefinitionError::ConflictingFlag {
                    flag: flag.clone(),
                    existing: existing.dest.clone(),
                });
            }
        }

        if !spec.action.takes_value() {
            let setting = if spec.value_type.is_some() {
                Some("a type")
            } else if spec.metavar.is_some() {
                Some("a metavar")
            } else if positional {
                Some("positional use")
            } else {
                None
            };
            if let Some(setting) = setting {
                return Err(DefinitionError::UnexpectedSetting {
                    dest,
                    action: spec.action,
                    setting,
                });
            }
        }

        let (arity, required) = if positional {
            if spec.required.is_some() {
                return Err(DefinitionError::RequiredOnPositional(dest));
            }
            (Arity::Positional, true)
        } else if spec.action.takes_value() {
            (Arity::Single, spec.required.unwrap_or(false))
        } else {
            (Arity::NoValue, spec.required.unwrap_or(false))
        };

        Ok(ArgOption {
            dest,
            help: spec.help,
            flags,
            value_type: spec.value_type,
            required,
            metavar: spec.metavar,
            arity,
        })
    }
}

fn flag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^--?[A-Za-z0-9][A-Za-z0-9_-]*$").expect("flag regex"))
}

/// Positional name as-is, else first long flag, else first short flag, with
/// dashes turned into underscores.
fn derive_dest(names: &[String]) -> Result<String, DefinitionError> {
    if !names[0].starts_with('-') {
        return Ok(names[0].clone());
    }
    let source = names
        .iter()
        .find(|name| name.starts_with("--"))
        .unwrap_or(&names[0]);
    let dest = source.trim_start_matches('-').replace('-', "_");
    if dest.is_empty() {
        return Err(DefinitionError::InvalidDest(source.clone()));
    }
    Ok(dest)
}
