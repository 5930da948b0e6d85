//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::DirectoryNode;
use anyhow::{anyhow, Result};

/// Trait for rendering the documentation tree into one output format.
pub trait Renderer {
    fn render(&self, tree: &DirectoryNode) -> Result<String>;
    /// Name of the artifact written into the output directory.
    fn file_name(&self) -> &'static str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use html, markdown, or json",
            format
        )),
    }
}
