//! Generate Markdown usage documentation from argument definitions.
//!
//! A script file is loaded into a [`module::Module`], the locator picks out its
//! [`definition::Definition`], and the renderer turns that into Markdown.
pub mod app;
pub mod cli;
pub mod definition;
pub mod loader;
pub mod locator;
pub mod module;
pub mod render;
pub mod script;

pub use app::{generate_markdown_from_script, AppError};
pub use render::render_markdown;
