//! Data model for the documentation tree — format-agnostic.

use serde::{Deserialize, Serialize};

/// A directory in the scanned tree.
///
/// Only directories with at least one documented descendant survive the
/// walk; the root node is the single exception and is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub files: Vec<FileNode>,
    #[serde(default)]
    pub directories: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// True when the directory contributes nothing to the output.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

/// A source file with at least one documented function or class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    /// Basename without the matched extension.
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub functions: Vec<DocItem>,
    #[serde(default)]
    pub classes: Vec<ClassDocItem>,
}

/// Documented declarations extracted from a single file.
#[derive(Debug, Default)]
pub struct FileContent {
    pub functions: Vec<DocItem>,
    pub classes: Vec<ClassDocItem>,
}

impl FileContent {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty()
    }
}

/// One documented function or method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamMeta>,
    #[serde(default)]
    pub returns: Vec<ReturnMeta>,
}

/// A documented class: its own doc item plus documented methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDocItem {
    #[serde(flatten)]
    pub item: DocItem,
    #[serde(default)]
    pub methods: Vec<DocItem>,
}

/// A `@param`-tagged docstring entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A `@returns`-tagged docstring entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DirectoryNode {
        DirectoryNode {
            name: "root".into(),
            path: "./root".into(),
            files: vec![FileNode {
                name: "mod".into(),
                path: "./root/mod.py".into(),
                functions: vec![DocItem {
                    name: "run".into(),
                    short_description: Some("Run it.".into()),
                    long_description: None,
                    params: vec![ParamMeta {
                        arg_name: Some("path".into()),
                        type_name: Some("str".into()),
                        description: Some("where to run".into()),
                    }],
                    returns: vec![ReturnMeta {
                        type_name: Some("bool".into()),
                        description: Some("success".into()),
                    }],
                }],
                classes: vec![ClassDocItem {
                    item: DocItem {
                        name: "Runner".into(),
                        short_description: Some("A runner.".into()),
                        ..Default::default()
                    },
                    methods: vec![DocItem {
                        name: "stop".into(),
                        short_description: Some("Stop it.".into()),
                        ..Default::default()
                    }],
                }],
            }],
            directories: vec![DirectoryNode {
                name: "sub".into(),
                path: "./root/sub".into(),
                files: vec![],
                directories: vec![],
            }],
        }
    }

    #[test]
    fn json_round_trip_is_identical() {
        let tree = sample_tree();
        let json = serde_json::to_string_pretty(&tree).unwrap();
        let back: DirectoryNode = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }

    #[test]
    fn class_fields_flatten_into_object() {
        let tree = sample_tree();
        let json = serde_json::to_string(&tree).unwrap();
        // The class name sits directly on the class object, not under "item".
        assert!(json.contains(r#""name":"Runner""#));
        assert!(!json.contains(r#""item""#));
    }

    #[test]
    fn empty_directory_reports_empty() {
        assert!(DirectoryNode::default().is_empty());
        assert!(!sample_tree().is_empty());
    }
}
