//! End-to-end pipeline: script path in, Markdown out.
use crate::loader::{LoadError, Loader};
use crate::locator::{self, LocateError};
use crate::render::render_markdown;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// Generate usage documentation for the script at `path`.
///
/// Nothing is produced unless every step succeeds.
pub fn generate_markdown_from_script(path: &Path) -> Result<String, AppError> {
    if !path.is_file() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }
    let module = Loader::new().load(path)?;
    let definition = locator::find(&module)?;
    let script_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(render_markdown(&definition, script_name.as_deref()))
}
