//! Markdown renderer — headings per tree level, bullet lists for metadata.

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, tree: &DirectoryNode) -> Result<String> {
        Ok(render_directory(tree, true))
    }

    fn file_name(&self) -> &'static str {
        "doc.md"
    }
}

/// Render a directory: root as H1, nested directories as H2.
fn render_directory(node: &DirectoryNode, is_root: bool) -> String {
    let mut out = String::new();

    if is_root {
        out.push_str(&format!("# {}\n\n", node.name));
    } else {
        out.push_str(&format!("## {}\n\n", node.name));
    }

    for file in &node.files {
        out.push_str(&render_file(file));
    }
    for dir in &node.directories {
        out.push_str(&render_directory(dir, false));
    }

    out
}

fn render_file(file: &FileNode) -> String {
    let mut out = String::new();
    out.push_str(&format!("**{}**\n\n", file.name));

    for class in &file.classes {
        out.push_str(&render_item(&class.item, "Class"));
        for method in &class.methods {
            out.push_str(&render_item(method, "Method"));
        }
    }
    for func in &file.functions {
        out.push_str(&render_item(func, "Function"));
    }

    out
}

/// Render one documented item as an H2 block.
fn render_item(item: &DocItem, kind: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("## {}: {}\n\n", kind, item.name));

    if let Some(ref short) = item.short_description {
        out.push_str(short);
        out.push_str("\n\n");
    }
    if let Some(ref long) = item.long_description {
        out.push_str(long);
        out.push_str("\n\n");
    }

    if !item.params.is_empty() {
        out.push_str("#### Parameters:\n");
        for param in &item.params {
            out.push_str(&render_list_item(
                param.arg_name.as_deref(),
                param.type_name.as_deref(),
                param.description.as_deref(),
            ));
        }
        out.push('\n');
    }

    if !item.returns.is_empty() {
        out.push_str("#### Returns:\n");
        for ret in &item.returns {
            out.push_str(&render_list_item(
                None,
                ret.type_name.as_deref(),
                ret.description.as_deref(),
            ));
        }
        out.push('\n');
    }

    out
}

/// One parameter or return value bullet: ``- `name (type)`: description``.
fn render_list_item(
    arg_name: Option<&str>,
    type_name: Option<&str>,
    description: Option<&str>,
) -> String {
    let mut label = String::new();
    if let Some(name) = arg_name {
        label.push_str(name);
    }
    if let Some(t) = type_name {
        if !label.is_empty() {
            label.push(' ');
        }
        label.push_str(&format!("({})", t));
    }
    format!("- `{}`: {}\n", label, description.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, short: &str) -> DocItem {
        DocItem {
            name: name.into(),
            short_description: Some(short.into()),
            ..Default::default()
        }
    }

    #[test]
    fn root_is_h1_and_nested_is_h2() {
        let tree = DirectoryNode {
            name: "root".into(),
            path: "root".into(),
            files: vec![],
            directories: vec![DirectoryNode {
                name: "sub".into(),
                path: "root/sub".into(),
                files: vec![FileNode {
                    name: "mod".into(),
                    path: "root/sub/mod.py".into(),
                    functions: vec![item("run", "Run.")],
                    classes: vec![],
                }],
                directories: vec![],
            }],
        };
        let md = MarkdownRenderer.render(&tree).unwrap();
        assert!(md.starts_with("# root\n"));
        assert!(md.contains("## sub\n"));
        assert!(md.contains("**mod**\n"));
        assert!(md.contains("## Function: run\n\nRun.\n"));
    }

    #[test]
    fn class_with_method_renders_nested_entry() {
        let file = FileNode {
            name: "runner".into(),
            path: "runner.py".into(),
            functions: vec![],
            classes: vec![ClassDocItem {
                item: item("Runner", "A runner."),
                methods: vec![item("stop", "Stop the runner.")],
            }],
        };
        let md = render_file(&file);
        assert!(md.contains("## Class: Runner\n\nA runner.\n"));
        assert!(md.contains("## Method: stop\n\nStop the runner.\n"));
    }

    #[test]
    fn params_and_returns_render_as_bullets() {
        let mut func = item("foo", "Do foo.");
        func.params.push(ParamMeta {
            arg_name: Some("x".into()),
            type_name: Some("int".into()),
            description: Some("the input".into()),
        });
        func.returns.push(ReturnMeta {
            type_name: Some("bool".into()),
            description: Some("success".into()),
        });

        let md = render_item(&func, "Function");
        assert!(md.contains("#### Parameters:\n- `x (int)`: the input\n"));
        assert!(md.contains("#### Returns:\n- `(bool)`: success\n"));
    }

    #[test]
    fn untyped_param_keeps_plain_label() {
        let line = render_list_item(Some("x"), None, Some("a value"));
        assert_eq!(line, "- `x`: a value\n");
    }
}
