use anyhow::Result;
use clap::Parser;
use parse2docs::cli::Args;
use parse2docs::generate_markdown_from_script;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let markdown = generate_markdown_from_script(&args.file_path)?;
    println!("{markdown}");
    Ok(())
}

/// Logs go to stderr so stdout carries only the generated document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
