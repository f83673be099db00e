mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use termfolio_core::content::ProjectStore;
use termfolio_core::{Engine, EngineOptions};

fn main() -> Result<()> {
    init_tracing()?;

    let args: Vec<String> = std::env::args().collect();
    let store = match args.get(1).map(String::as_str) {
        Some("--help" | "-h") => {
            eprintln!("Usage: termfolio [projects.json]");
            return Ok(());
        }
        Some(path) => {
            let path = PathBuf::from(path);
            let data = std::fs::read(&path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            ProjectStore::from_json(&data).context("parsing project catalog")?
        }
        None => ProjectStore::builtin(),
    };
    tracing::info!(projects = store.len(), "catalog loaded");

    let engine = Engine::new(store, EngineOptions::default());
    renderer::run(engine)?;
    Ok(())
}

/// Log to a file: the alternate screen owns stdout/stderr.
fn init_tracing() -> Result<()> {
    let file = std::fs::File::create("termfolio.log").context("creating log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
