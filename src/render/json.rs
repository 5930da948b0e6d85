//! JSON renderer — serializes the documentation tree verbatim.
//!
//! The artifact parses back into the same tree, which is what tooling
//! integrations consume.

use crate::model::DirectoryNode;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, tree: &DirectoryNode) -> Result<String> {
        serde_json::to_string_pretty(tree).context("failed to serialize documentation tree")
    }

    fn file_name(&self) -> &'static str {
        "doc.json"
    }
}
