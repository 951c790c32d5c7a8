//! Deterministic Markdown renderer for argument definitions.
//!
//! Rendering is a single pass over the definition's options in declaration
//! order. The implicit help option never appears in the output, and absent
//! fields collapse to empty or omitted sections, so rendering cannot fail.
use crate::definition::Definition;

mod format;

use format::{
    append_description_section, append_header, append_options_section,
    append_table_of_contents, append_usage_section,
};

/// Script name used in the usage line when the caller has none.
pub const FALLBACK_SCRIPT_NAME: &str = "script.py";

/// Render `definition` as a Markdown usage document.
pub fn render_markdown(definition: &Definition, script_name: Option<&str>) -> String {
    let script_name = script_name
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_SCRIPT_NAME);

    let mut out = String::new();
    append_header(&mut out);
    append_description_section(&mut out, definition.description());
    append_usage_section(&mut out, script_name, definition);
    append_table_of_contents(&mut out, definition);
    append_options_section(&mut out, definition);
    out
}
