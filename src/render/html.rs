//! HTML renderer — standalone page with collapsible directory sections.

use crate::model::*;
use crate::render::Renderer;
use anyhow::Result;

pub struct HtmlRenderer;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 0; }
.container { margin: 20px; }
h3 { font-style: oblique; }
details { margin: 1rem 0; border: 1px solid #ccc; border-radius: 5px; padding: 1rem; background-color: #f8f8f8; }
summary { cursor: pointer; font-weight: bold; }
section { margin-left: 1rem; }
.item { margin: 0.5rem 0; border: 1px solid #eee; border-radius: 3px; padding: 0.5rem; background-color: #f0f0f0; }
.item h3 { margin-bottom: 0.25rem; }
.doc-string-list-item { margin-left: 1rem; list-style-type: disc; }
";

impl Renderer for HtmlRenderer {
    fn render(&self, tree: &DirectoryNode) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        out.push_str("<title>Documentation</title>\n");
        out.push_str("<style>\n");
        out.push_str(STYLE);
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");
        out.push_str(&render_directory(tree, true));
        out.push_str("</body>\n</html>\n");

        Ok(out)
    }

    fn file_name(&self) -> &'static str {
        "index.html"
    }
}

/// Render a directory: the root as a titled section, nested directories as
/// collapsible blocks followed by their own subdirectories.
fn render_directory(node: &DirectoryNode, is_root: bool) -> String {
    let mut files = String::new();
    for file in &node.files {
        files.push_str(&render_file(file));
    }

    let mut subdirs = String::new();
    for dir in &node.directories {
        subdirs.push_str(&render_directory(dir, false));
    }

    if is_root {
        return format!(
            "<section class=\"container\">\n<h1>{}</h1>\n<section>{}</section>\n{}</section>\n",
            html_escape(&node.name),
            files,
            subdirs
        );
    }

    format!(
        "<details>\n<summary>{}</summary>\n<section>{}</section>\n</details>\n{}",
        html_escape(&node.name),
        files,
        subdirs
    )
}

fn render_file(file: &FileNode) -> String {
    let mut out = String::new();
    out.push_str("<details>\n");
    out.push_str(&format!("<summary>{}</summary>\n", html_escape(&file.name)));

    if !file.classes.is_empty() {
        out.push_str("<div>\n");
        for class in &file.classes {
            out.push_str(&render_class(class));
        }
        out.push_str("</div>\n");
    }
    if !file.functions.is_empty() {
        out.push_str("<div>\n");
        for func in &file.functions {
            out.push_str(&render_item(func));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</details>\n");
    out
}

fn render_class(class: &ClassDocItem) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"item\">\n");
    out.push_str(&render_item_body(&class.item));
    for method in &class.methods {
        out.push_str(&render_item(method));
    }
    out.push_str("</article>\n");
    out
}

fn render_item(item: &DocItem) -> String {
    format!(
        "<article class=\"item\">\n{}</article>\n",
        render_item_body(item)
    )
}

fn render_item_body(item: &DocItem) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h3>{}</h3>\n", html_escape(&item.name)));

    if let Some(ref short) = item.short_description {
        out.push_str(&format!("<p>{}</p>\n", html_escape(short)));
    }
    if let Some(ref long) = item.long_description {
        out.push_str(&format!("<p>{}</p>\n", html_escape(long)));
    }

    if !item.params.is_empty() {
        out.push_str("<h4>Params</h4>\n<ul>\n");
        for param in &item.params {
            out.push_str(&render_list_item(
                param.arg_name.as_deref(),
                param.type_name.as_deref(),
                param.description.as_deref(),
            ));
        }
        out.push_str("</ul>\n");
    }

    if !item.returns.is_empty() {
        out.push_str("<h4>Returns</h4>\n<ul>\n");
        for ret in &item.returns {
            out.push_str(&render_list_item(
                None,
                ret.type_name.as_deref(),
                ret.description.as_deref(),
            ));
        }
        out.push_str("</ul>\n");
    }

    out
}

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
    format!(
        "  <li class=\"doc-string-list-item\">{}: {}</li>\n",
        html_escape(&label),
        html_escape(description.unwrap_or(""))
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
