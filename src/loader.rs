//! Load script files into modules.
//!
//! Modules are resolved by name against a search path. The script's own
//! directory sits at the front of that path only while its module is being
//! resolved; `SearchPathGuard` restores the previous path on every exit.
use crate::module::Module;
use crate::script::{binding_from_json, DeclarationError, ScriptFormat};
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MODULE_EXTENSIONS: &[&str] = &["toml", "json"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("script {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("cannot derive a module name from {}", .0.display())]
    InvalidModuleName(PathBuf),

    #[error("no module named {name:?} on the search path")]
    ModuleNotFound { name: String },

    #[error("read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse TOML script {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("parse JSON script {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("script {} must be a table of top-level bindings", .0.display())]
    NotATable(PathBuf),

    #[error("binding {binding:?} in {}", path.display())]
    Binding {
        path: PathBuf,
        binding: String,
        #[source]
        source: DeclarationError,
    },
}

/// Directories module names resolve against, searched front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Put `dir` in front until the returned guard is dropped.
    pub fn push_front(&mut self, dir: PathBuf) -> SearchPathGuard<'_> {
        let saved = self.dirs.clone();
        self.dirs.insert(0, dir);
        SearchPathGuard {
            search_path: self,
            saved,
        }
    }

    /// First existing `dir/file_name`, trying each directory in order.
    pub fn resolve(&self, file_names: &[String]) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| {
            file_names
                .iter()
                .map(|file_name| dir.join(file_name))
                .find(|candidate| candidate.is_file())
        })
    }
}

/// Restores the search path it was created from when dropped.
pub struct SearchPathGuard<'a> {
    search_path: &'a mut SearchPath,
    saved: Vec<PathBuf>,
}

impl Deref for SearchPathGuard<'_> {
    type Target = SearchPath;

    fn deref(&self) -> &SearchPath {
        self.search_path
    }
}

impl Drop for SearchPathGuard<'_> {
    fn drop(&mut self) {
        self.search_path.dirs = std::mem::take(&mut self.saved);
    }
}

#[derive(Debug, Default)]
pub struct Loader {
    search_path: SearchPath,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Load the script at `path` as a module named after its file stem.
    pub fn load(&mut self, path: &Path) -> Result<Module, LoadError> {
        if !path.is_file() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        let name = module_name(path)?;
        let script_dir = script_dir(path)?;
        let candidates = candidate_file_names(path, &name);

        let resolved = {
            let scoped = self.search_path.push_front(script_dir);
            tracing::debug!(module = %name, search_path = ?scoped.dirs(), "resolving module");
            scoped.resolve(&candidates)
        };
        let resolved =
            resolved.ok_or_else(|| LoadError::ModuleNotFound { name: name.clone() })?;
        read_module(&name, &resolved)
    }
}

fn module_name(path: &Path) -> Result<String, LoadError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LoadError::InvalidModuleName(path.to_path_buf()))
}

fn script_dir(path: &Path) -> Result<PathBuf, LoadError> {
    let absolute = std::path::absolute(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

/// `<name>.<ext>` for each module extension, the script's own extension first
/// when it is one of them.
fn candidate_file_names(path: &Path, name: &str) -> Vec<String> {
    let own_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| MODULE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)));
    let mut names: Vec<String> = own_ext.map(|ext| format!("{name}.{ext}")).into_iter().collect();
    for ext in MODULE_EXTENSIONS {
        if own_ext.is_some_and(|own| own.eq_ignore_ascii_case(ext)) {
            continue;
        }
        names.push(format!("{name}.{ext}"));
    }
    names
}

fn read_module(name: &str, path: &Path) -> Result<Module, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = ScriptFormat::from_extension(path.extension().and_then(|ext| ext.to_str()));
    let table: serde_json::Value = match format {
        ScriptFormat::Toml => toml::from_str(&text).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
        ScriptFormat::Json => serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?,
    };
    let serde_json::Value::Object(table) = table else {
        return Err(LoadError::NotATable(path.to_path_buf()));
    };

    let mut module = Module::new(name).with_origin(path);
    for (binding, raw) in table {
        let value = binding_from_json(raw).map_err(|source| LoadError::Binding {
            path: path.to_path_buf(),
            binding: binding.clone(),
            source,
        })?;
        module.bind(binding, value);
    }
    tracing::debug!(module = name, path = %path.display(), "loaded module");
    Ok(module)
}
