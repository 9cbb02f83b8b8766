//! Reading documents from files or stdin.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

enum Syntax {
    Json,
    Yaml,
}

fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Syntax::Yaml,
        _ => Syntax::Json,
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and deserialize `path`; YAML by extension, JSON otherwise.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = read_source(path)?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "Read input");
    match syntax_for(path) {
        Syntax::Yaml => serde_yaml::from_str(&source)
            .with_context(|| format!("Invalid YAML in {}", path.display())),
        Syntax::Json => serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON in {}", path.display())),
    }
}
