use crate::definition::{ArgOption, Arity, Definition};

pub(super) fn append_header(out: &mut String) {
    out.push_str("# Usage Documentation\n\n");
}

pub(super) fn append_description_section(out: &mut String, description: Option<&str>) {
    out.push_str("## Description\n\n");
    out.push_str(description.unwrap_or_default());
    out.push_str("\n\n");
}

pub(super) fn append_usage_section(out: &mut String, script_name: &str, definition: &Definition) {
    out.push_str("## Overall Usage Example\n\n");
    let tokens: Vec<String> = definition.documented_options().map(usage_token).collect();
    if tokens.is_empty() {
        out.push_str(&format!("`{script_name}`\n\n"));
    } else {
        out.push_str(&format!("`{script_name} {}`\n\n", tokens.join(" ")));
    }
}

pub(super) fn append_table_of_contents(out: &mut String, definition: &Definition) {
    out.push_str("## Table of Contents\n\n");
    for option in definition.documented_options() {
        out.push_str(&format!("- [{0}](#{0})\n", option.dest));
    }
    out.push('\n');
}

pub(super) fn append_options_section(out: &mut String, definition: &Definition) {
    let mut options = definition.documented_options().peekable();
    if options.peek().is_none() {
        return;
    }
    out.push_str("## Options\n\n");
    for option in options {
        append_option_block(out, option);
    }
}

pub(super) fn append_option_block(out: &mut String, option: &ArgOption) {
    out.push_str(&format!("### {}\n\n", option.dest));
    out.push_str(option.help.as_deref().unwrap_or_default());
    out.push_str("\n\n");

    if !option.flags.is_empty() {
        out.push_str(&format!("**Flags**: `{}`\n\n", option.flags.join(", ")));
    }
    if let Some(value_type) = &option.value_type {
        out.push_str(&format!("**Type**: `{}`\n\n", value_type.display_name()));
    }
    let required = if option.required { "Yes" } else { "No" };
    out.push_str(&format!("**Required**: {required}\n\n"));

    if let Some(metavar) = &option.metavar {
        let example = match option.first_flag() {
            Some(flag) => format!("{flag} <{metavar}>"),
            None => metavar.clone(),
        };
        out.push_str(&format!("#### Example Usage\n\n`{example}`\n\n"));
    }
}

/// One usage-line token; optional flags are bracketed.
fn usage_token(option: &ArgOption) -> String {
    let Some(flag) = option.first_flag() else {
        return format!("<{}>", option.dest);
    };
    let token = format!("{flag}{}", value_placeholder(option));
    if option.required {
        token
    } else {
        format!("[{token}]")
    }
}

fn value_placeholder(option: &ArgOption) -> String {
    match (&option.metavar, option.arity) {
        (Some(metavar), _) => format!(" <{metavar}>"),
        (None, Arity::NoValue) => String::new(),
        (None, _) => " <value>".to_string(),
    }
}
