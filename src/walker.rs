//! Directory walker — recursive scan assembling the documentation tree.
//!
//! Hidden and dunder directories are skipped. Directories that yield no
//! documented content and files with no documented items are pruned;
//! per-file failures are logged and do not stop the walk.

use crate::model::{DirectoryNode, FileNode};
use crate::parser;
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// Default extension filter for scanned files.
pub const DEFAULT_EXTENSION: &str = ".py";

pub struct Walker {
    extension: String,
    recursive: bool,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION, true)
    }
}

impl Walker {
    pub fn new(extension: &str, recursive: bool) -> Self {
        // Normalize "py" and ".py" to the same filter.
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        Self {
            extension,
            recursive,
        }
    }

    /// Walk the tree rooted at `root`.
    ///
    /// The root node is always returned, even when nothing documented was
    /// found; an unreadable root is the only fatal error.
    pub fn walk(&self, root: &Path) -> Result<DirectoryNode> {
        let mut node = self.directory_node(root);
        self.fill_directory(root, &mut node)
            .with_context(|| format!("failed to read directory: {}", root.display()))?;
        Ok(node)
    }

    fn directory_node(&self, path: &Path) -> DirectoryNode {
        DirectoryNode {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            path: path.display().to_string(),
            files: Vec::new(),
            directories: Vec::new(),
        }
    }

    fn fill_directory(&self, path: &Path, node: &mut DirectoryNode) -> Result<()> {
        let mut entries: Vec<_> = fs::read_dir(path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        // Sort for deterministic output.
        entries.sort();

        for entry in entries {
            if entry.is_dir() {
                if !self.recursive || skip_directory(&entry) {
                    continue;
                }
                let mut child = self.directory_node(&entry);
                match self.fill_directory(&entry, &mut child) {
                    Ok(()) => {
                        if !child.is_empty() {
                            node.directories.push(child);
                        }
                    }
                    Err(e) => {
                        warn!("skipping directory {}: {}", entry.display(), e);
                    }
                }
            } else if entry
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&self.extension))
            {
                match self.scan_file(&entry) {
                    Ok(Some(file)) => node.files.push(file),
                    Ok(None) => {}
                    Err(e) => {
                        warn!("skipping {}: {}", entry.display(), e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Scan one source file; `None` when it has nothing documented.
    fn scan_file(&self, path: &Path) -> Result<Option<FileNode>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = parser::parse_file(path, &content)?;
        if parsed.is_empty() {
            return Ok(None);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = file_name
            .strip_suffix(&self.extension)
            .unwrap_or(&file_name)
            .to_string();

        Ok(Some(FileNode {
            name,
            path: path.display().to_string(),
            functions: parsed.functions,
            classes: parsed.classes,
        }))
    }
}

/// Hidden and dunder directories are never descended into.
fn skip_directory(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('.') || n.starts_with("__"))
}
