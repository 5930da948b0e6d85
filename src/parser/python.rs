//! Python source scanner — static extraction of documented declarations.
//!
//! Lexes a source file line-by-line into `def` / `class` declarations with
//! their docstrings, tracking indentation, multi-line signatures, and
//! string literals (so declarations inside string bodies are not picked
//! up). No interpretation, no imports — text in, declarations out.

use crate::model::{ClassDocItem, DocItem, FileContent, ParamMeta, ReturnMeta};
use crate::parser::docstring;
use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)class\s+([A-Za-z_]\w*)\s*[(:]").unwrap());

static RE_STRING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[rRbBuUfF]{0,2}("""|'''|"|')"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Function,
    Class,
}

/// One `def` or `class` header found in the source.
#[derive(Debug)]
struct Declaration {
    kind: DeclKind,
    name: String,
    indent: usize,
    docstring: Option<String>,
}

/// Parse Python source into its documented functions and classes.
///
/// Returns `Err` on lexical errors (unterminated triple-quoted string,
/// EOF inside a signature); the caller is expected to skip just this file.
pub fn parse(content: &str) -> Result<FileContent> {
    let lines: Vec<&str> = content.lines().collect();
    let declarations = lex(&lines)?;
    Ok(assemble(declarations))
}

// -- Lexing -------------------------------------------------------------------

/// Blank out string literals and strip comments from one line of code.
///
/// Returns the cleaned line plus the delimiter of a triple-quoted string
/// the line leaves open, if any. Single-quoted strings never span lines.
fn strip_strings_and_comments(line: &str) -> (String, Option<&'static str>) {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '#' {
            break;
        }
        if c == '"' || c == '\'' {
            if i + 2 < chars.len() && chars[i + 1] == c && chars[i + 2] == c {
                let delim = if c == '"' { "\"\"\"" } else { "'''" };
                match find_delim(&chars, i + 3, c) {
                    Some(close) => i = close + 3,
                    None => return (out, Some(delim)),
                }
            } else {
                let mut j = i + 1;
                loop {
                    if j >= chars.len() {
                        break;
                    }
                    if chars[j] == '\\' {
                        j += 2;
                        continue;
                    }
                    if chars[j] == c {
                        break;
                    }
                    j += 1;
                }
                i = (j + 1).min(chars.len());
            }
            continue;
        }
        out.push(c);
        i += 1;
    }

    (out, None)
}

/// Find the start index of a triple-quote delimiter made of `quote` chars,
/// scanning from `from`.
fn find_delim(chars: &[char], from: usize, quote: char) -> Option<usize> {
    if chars.len() < 3 {
        return None;
    }
    (from..chars.len() - 2)
        .find(|&i| chars[i] == quote && chars[i + 1] == quote && chars[i + 2] == quote)
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Scan every line, collecting declarations with their docstrings.
fn lex(lines: &[&str]) -> Result<Vec<Declaration>> {
    let mut declarations = Vec::new();
    let mut open_string: Option<(&'static str, usize)> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        // Inside a multi-line string from a previous line: look only for
        // the closing delimiter.
        if let Some((delim, _)) = open_string {
            if line.contains(delim) {
                open_string = None;
            }
            i += 1;
            continue;
        }

        let (code, open) = strip_strings_and_comments(line);

        if let Some((kind, name)) = match_declaration(&code) {
            let indent = indent_of(line);
            let sig_end = consume_signature(lines, i, &code, &name)?;
            let (docstring, next) = read_docstring(lines, sig_end + 1)?;
            declarations.push(Declaration {
                kind,
                name,
                indent,
                docstring,
            });
            i = next;
            continue;
        }

        if let Some(delim) = open {
            open_string = Some((delim, i + 1));
        }
        i += 1;
    }

    if let Some((_, line_no)) = open_string {
        bail!("unterminated triple-quoted string starting at line {}", line_no);
    }

    Ok(declarations)
}

fn match_declaration(code: &str) -> Option<(DeclKind, String)> {
    if let Some(caps) = RE_DEF.captures(code) {
        return Some((DeclKind::Function, caps[2].to_string()));
    }
    if let Some(caps) = RE_CLASS.captures(code) {
        return Some((DeclKind::Class, caps[2].to_string()));
    }
    None
}

/// Walk forward from the header line until the signature's terminating `:`
/// at bracket depth zero. Returns the index of the line that closes it.
fn consume_signature(lines: &[&str], start: usize, first_code: &str, name: &str) -> Result<usize> {
    let mut depth = 0i32;
    let mut code = first_code.to_string();
    let mut i = start;

    loop {
        for c in code.chars() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                ':' if depth == 0 => return Ok(i),
                _ => {}
            }
        }

        i += 1;
        if i >= lines.len() {
            bail!(
                "unexpected end of file in signature of `{}` (line {})",
                name,
                start + 1
            );
        }
        let (next_code, open) = strip_strings_and_comments(lines[i]);
        if open.is_some() {
            bail!(
                "unterminated string literal in signature of `{}` (line {})",
                name,
                i + 1
            );
        }
        code = next_code;
    }
}

/// Read the docstring that opens a declaration body, if any.
///
/// Skips blank and comment lines; the body's first statement counts only
/// when it is a string literal. Returns the docstring (cleaned) and the
/// index of the first unconsumed line.
fn read_docstring(lines: &[&str], mut i: usize) -> Result<(Option<String>, usize)> {
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }
        break;
    }
    if i >= lines.len() {
        return Ok((None, i));
    }

    let trimmed = lines[i].trim_start();
    let caps = match RE_STRING_START.captures(trimmed) {
        Some(caps) => caps,
        None => return Ok((None, i)),
    };
    let delim = caps.get(1).unwrap().as_str();
    let open_end = caps.get(0).unwrap().end();
    let after_open = &trimmed[open_end..];

    if delim.len() == 3 {
        // Triple-quoted: may close on the same line or span several.
        if let Some(pos) = after_open.find(delim) {
            return Ok((Some(cleandoc(&after_open[..pos])), i + 1));
        }
        let mut body = vec![after_open.to_string()];
        let mut j = i + 1;
        while j < lines.len() {
            if let Some(pos) = lines[j].find(delim) {
                body.push(lines[j][..pos].to_string());
                let joined = body.join("\n");
                return Ok((Some(cleandoc(&joined)), j + 1));
            }
            body.push(lines[j].to_string());
            j += 1;
        }
        bail!("unterminated triple-quoted string starting at line {}", i + 1);
    }

    // Single-quoted docstring: must close on the same line.
    let quote = delim.chars().next().unwrap();
    let chars: Vec<char> = after_open.chars().collect();
    let mut j = 0;
    while j < chars.len() {
        if chars[j] == '\\' {
            j += 2;
            continue;
        }
        if chars[j] == quote {
            let content: String = chars[..j].iter().collect();
            return Ok((Some(cleandoc(&content)), i + 1));
        }
        j += 1;
    }
    bail!("unterminated string literal at line {}", i + 1);
}

/// Normalize docstring indentation the way `inspect.cleandoc` does:
/// strip the first line, remove the common indentation of the rest,
/// and drop leading/trailing blank lines.
fn cleandoc(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let margin = lines[1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    out.push(lines[0].trim().to_string());
    for line in &lines[1..] {
        if line.len() >= margin {
            out.push(line[margin..].trim_end().to_string());
        } else {
            out.push(line.trim_end().to_string());
        }
    }

    while out.first().is_some_and(|l| l.is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

// -- Assembly -----------------------------------------------------------------

enum Scope {
    Class(usize),
    Function,
}

struct ClassAcc {
    item: Option<DocItem>,
    methods: Vec<DocItem>,
}

/// Build the file's content from the declaration list.
///
/// Top-level documented `def`s become functions. Classes are collected at
/// any depth but retained only when they carry their own docstring;
/// documented direct-child `def`s attach as methods. Nested `def`s inside
/// functions are ignored.
fn assemble(declarations: Vec<Declaration>) -> FileContent {
    let mut functions: Vec<DocItem> = Vec::new();
    let mut class_accs: Vec<ClassAcc> = Vec::new();
    let mut stack: Vec<(usize, Scope)> = Vec::new();

    for decl in declarations {
        while stack
            .last()
            .is_some_and(|(indent, _)| decl.indent <= *indent)
        {
            stack.pop();
        }

        match decl.kind {
            DeclKind::Class => {
                class_accs.push(ClassAcc {
                    item: decl.docstring.map(|d| to_doc_item(&decl.name, &d)),
                    methods: Vec::new(),
                });
                stack.push((decl.indent, Scope::Class(class_accs.len() - 1)));
            }
            DeclKind::Function => {
                match stack.last() {
                    None => {
                        if let Some(ref doc) = decl.docstring {
                            functions.push(to_doc_item(&decl.name, doc));
                        }
                    }
                    Some((_, Scope::Class(idx))) => {
                        if let Some(ref doc) = decl.docstring {
                            class_accs[*idx].methods.push(to_doc_item(&decl.name, doc));
                        }
                    }
                    Some((_, Scope::Function)) => {}
                }
                stack.push((decl.indent, Scope::Function));
            }
        }
    }

    let classes: Vec<ClassDocItem> = class_accs
        .into_iter()
        .filter_map(|acc| {
            acc.item.map(|item| ClassDocItem {
                item,
                methods: acc.methods,
            })
        })
        .collect();

    FileContent { functions, classes }
}

/// Normalize one declaration's docstring into a DocItem.
fn to_doc_item(name: &str, raw: &str) -> DocItem {
    let doc = docstring::parse(raw);

    let params = doc
        .meta
        .iter()
        .filter(|m| m.args.first().map(String::as_str) == Some("param"))
        .map(|m| ParamMeta {
            arg_name: m.arg_name.clone(),
            type_name: m.type_name.clone(),
            description: m.description.clone(),
        })
        .collect();

    let returns = doc
        .meta
        .iter()
        .filter(|m| m.args.first().map(String::as_str) == Some("returns"))
        .map(|m| ReturnMeta {
            type_name: m.type_name.clone(),
            description: m.description.clone(),
        })
        .collect();

    DocItem {
        name: name.to_string(),
        short_description: doc.short_description,
        long_description: doc.long_description,
        params,
        returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_function_is_extracted() {
        let src = "def foo(x):\n    \"\"\"Do foo.\n\n    Args:\n        x (int): the input\n\n    Returns:\n        int: the output\n    \"\"\"\n    return x\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        let foo = &content.functions[0];
        assert_eq!(foo.name, "foo");
        assert_eq!(foo.short_description.as_deref(), Some("Do foo."));
        assert_eq!(foo.params.len(), 1);
        assert_eq!(foo.params[0].arg_name.as_deref(), Some("x"));
        assert_eq!(foo.returns.len(), 1);
        assert_eq!(foo.returns[0].type_name.as_deref(), Some("int"));
    }

    #[test]
    fn undocumented_function_is_skipped() {
        let src = "def foo():\n    \"\"\"Documented.\"\"\"\n    pass\n\ndef bar():\n    return 1\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "foo");
    }

    #[test]
    fn class_with_documented_methods() {
        let src = "class Runner:\n    \"\"\"A runner.\"\"\"\n\n    def start(self):\n        \"\"\"Start it.\"\"\"\n        pass\n\n    def helper(self):\n        pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.classes.len(), 1);
        let runner = &content.classes[0];
        assert_eq!(runner.item.name, "Runner");
        assert_eq!(runner.methods.len(), 1);
        assert_eq!(runner.methods[0].name, "start");
    }

    #[test]
    fn undocumented_class_is_dropped_even_with_documented_method() {
        let src = "class Quiet:\n    def loud(self):\n        \"\"\"Documented method.\"\"\"\n        pass\n";
        let content = parse(src).unwrap();
        assert!(content.classes.is_empty());
        // The method is not hoisted into the function list either.
        assert!(content.functions.is_empty());
    }

    #[test]
    fn methods_are_not_top_level_functions() {
        let src = "class C:\n    \"\"\"C.\"\"\"\n    def m(self):\n        \"\"\"M.\"\"\"\n        pass\n\ndef free():\n    \"\"\"Free.\"\"\"\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "free");
        assert_eq!(content.classes[0].methods.len(), 1);
    }

    #[test]
    fn nested_def_inside_function_is_ignored() {
        let src = "def outer():\n    \"\"\"Outer.\"\"\"\n    def inner():\n        \"\"\"Inner.\"\"\"\n        pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "outer");
    }

    #[test]
    fn nested_class_is_collected() {
        let src = "class Outer:\n    \"\"\"Outer.\"\"\"\n    class Inner:\n        \"\"\"Inner.\"\"\"\n        def m(self):\n            \"\"\"M.\"\"\"\n            pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.classes.len(), 2);
        assert_eq!(content.classes[0].item.name, "Outer");
        assert_eq!(content.classes[1].item.name, "Inner");
        assert_eq!(content.classes[1].methods.len(), 1);
    }

    #[test]
    fn multi_line_signature() {
        let src = "def many(\n    a,\n    b,\n):\n    \"\"\"Many args.\"\"\"\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(
            content.functions[0].short_description.as_deref(),
            Some("Many args.")
        );
    }

    #[test]
    fn annotation_colons_do_not_end_signature() {
        let src = "def typed(a: int = 0, b: dict = {1: 2}) -> str:\n    \"\"\"Typed.\"\"\"\n    return ''\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "typed");
    }

    #[test]
    fn async_def_is_a_function() {
        let src = "async def fetch():\n    \"\"\"Fetch.\"\"\"\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "fetch");
    }

    #[test]
    fn single_quoted_docstring() {
        let src = "def f():\n    'One liner.'\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(
            content.functions[0].short_description.as_deref(),
            Some("One liner.")
        );
    }

    #[test]
    fn declarations_inside_strings_are_ignored() {
        let src = "TEMPLATE = \"\"\"\ndef fake():\n    pass\n\"\"\"\n\ndef real():\n    \"\"\"Real.\"\"\"\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(content.functions.len(), 1);
        assert_eq!(content.functions[0].name, "real");
    }

    #[test]
    fn unterminated_docstring_is_an_error() {
        let src = "def broken():\n    \"\"\"Never closed.\n    pass\n";
        assert!(parse(src).is_err());
    }

    #[test]
    fn unterminated_signature_is_an_error() {
        let src = "def broken(a,\n           b,\n";
        assert!(parse(src).is_err());
    }

    #[test]
    fn comment_between_def_and_docstring() {
        let src = "def f():\n    # note\n    \"\"\"Doc.\"\"\"\n    pass\n";
        let content = parse(src).unwrap();
        assert_eq!(
            content.functions[0].short_description.as_deref(),
            Some("Doc.")
        );
    }

    #[test]
    fn cleandoc_strips_common_margin() {
        assert_eq!(cleandoc("First.\n\n    Args:\n        x: y\n    "), "First.\n\nArgs:\n    x: y");
    }
}
