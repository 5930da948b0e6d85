//! Parser module — dispatch by file extension.

pub mod docstring;
pub mod python;

use crate::model::FileContent;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parse a source file into its documented content based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<FileContent> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") => python::parse(content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
