//! Docstring normalizer — raw docstring text to structured metadata.
//!
//! Supports the three common Python docstring dialects:
//!
//! - **Google**: `Args:` / `Returns:` sections with `name (type): desc` entries
//! - **Sphinx**: `:param name: desc` / `:returns:` / `:rtype:` field lines
//! - **NumPy**: `Parameters` headers underlined with dashes
//!
//! The style is auto-detected per docstring. Output is a flat [`Docstring`]
//! with tagged meta entries; absent fields stay `None`.

use regex::Regex;
use std::sync::LazyLock;

static RE_SPHINX_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([a-zA-Z]+)\s*([^:]*):\s*(.*)$").unwrap());

static RE_GOOGLE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(Args|Arguments|Parameters|Params|Returns|Return|Yields|Yield|Raises|Raise|Attributes|Examples?|Notes?)\s*:\s*$",
    )
    .unwrap()
});

static RE_NUMPY_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-{3,}\s*$").unwrap());

static RE_GOOGLE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*{0,2}\w+)\s*(?:\(([^)]*)\))?\s*:\s*(.*)$").unwrap());

static RE_TYPED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+?)\s*:\s*(.*)$").unwrap());

static RE_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Dd]efaults\s+to\s+(.+?)\.?\s*$").unwrap());

/// Detected docstring dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocstringStyle {
    Google,
    Sphinx,
    Numpy,
}

/// Normalized docstring: scalar descriptions plus tagged meta entries.
#[derive(Debug)]
pub struct Docstring {
    #[allow(dead_code)]
    pub style: DocstringStyle,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub meta: Vec<MetaEntry>,
}

/// One tagged metadata entry.
///
/// `args` carries the tag tokens, e.g. `["param", "path"]`, `["returns"]`,
/// `["raises", "ValueError"]`. Fields that a dialect does not provide are
/// left `None`.
#[derive(Debug, Default, Clone, PartialEq)]
#[allow(dead_code)]
pub struct MetaEntry {
    pub args: Vec<String>,
    pub arg_name: Option<String>,
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub is_optional: Option<bool>,
    pub default: Option<String>,
}

/// Parse a docstring into its normalized form. Never fails; an
/// unrecognizable docstring comes back as plain Google-style prose.
pub fn parse(text: &str) -> Docstring {
    let lines: Vec<&str> = text.lines().collect();
    match detect_style(&lines) {
        DocstringStyle::Sphinx => parse_sphinx(&lines),
        DocstringStyle::Numpy => parse_numpy(&lines),
        DocstringStyle::Google => parse_google(&lines),
    }
}

fn detect_style(lines: &[&str]) -> DocstringStyle {
    for line in lines {
        if RE_SPHINX_FIELD.is_match(line.trim_start()) {
            return DocstringStyle::Sphinx;
        }
    }
    for pair in lines.windows(2) {
        if numpy_section_kind(pair[0]).is_some() && RE_NUMPY_UNDERLINE.is_match(pair[1]) {
            return DocstringStyle::Numpy;
        }
    }
    DocstringStyle::Google
}

// -- Shared helpers -----------------------------------------------------------

/// Split the free-text region into short (first paragraph) and long
/// (remaining paragraphs) descriptions.
fn split_description(lines: &[&str]) -> (Option<String>, Option<String>) {
    let start = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(i) => i,
        None => return (None, None),
    };

    let mut short: Vec<&str> = Vec::new();
    let mut i = start;
    while i < lines.len() && !lines[i].trim().is_empty() {
        short.push(lines[i].trim());
        i += 1;
    }

    let long = lines[i..]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    let short = Some(short.join(" "));
    let long = if long.is_empty() { None } else { Some(long) };
    (short, long)
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split a parameter type like `str, optional` into the bare type and the
/// optionality marker.
fn split_optional(type_name: &str) -> (Option<String>, bool) {
    let trimmed = type_name.trim();
    if trimmed.is_empty() {
        return (None, false);
    }
    if let Some(bare) = trimmed.strip_suffix(", optional").or_else(|| trimmed.strip_suffix(",optional")) {
        let bare = bare.trim();
        let name = if bare.is_empty() { None } else { Some(bare.to_string()) };
        return (name, true);
    }
    if trimmed == "optional" {
        return (None, true);
    }
    (Some(trimmed.to_string()), false)
}

/// Pull a `Defaults to X.` clause out of a description.
fn extract_default(description: &str) -> Option<String> {
    RE_DEFAULT
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
}

fn param_entry(arg_name: String, type_name: Option<String>, optional: bool, description: String) -> MetaEntry {
    let default = extract_default(&description);
    MetaEntry {
        args: vec!["param".into(), arg_name.clone()],
        arg_name: Some(arg_name),
        type_name,
        description: none_if_empty(description),
        is_optional: Some(optional),
        default,
    }
}

fn none_if_empty(text: String) -> Option<String> {
    let trimmed = text.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// -- Google -------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Params,
    Returns,
    Yields,
    Raises,
    Other,
}

fn google_section_kind(line: &str) -> Option<SectionKind> {
    let caps = RE_GOOGLE_SECTION.captures(line)?;
    Some(match &caps[1] {
        "Args" | "Arguments" | "Parameters" | "Params" => SectionKind::Params,
        "Returns" | "Return" => SectionKind::Returns,
        "Yields" | "Yield" => SectionKind::Yields,
        "Raises" | "Raise" => SectionKind::Raises,
        _ => SectionKind::Other,
    })
}

fn parse_google(lines: &[&str]) -> Docstring {
    let body_end = lines
        .iter()
        .position(|l| google_section_kind(l).is_some())
        .unwrap_or(lines.len());
    let (short, long) = split_description(&lines[..body_end]);

    let mut meta = Vec::new();
    let mut i = body_end;
    while i < lines.len() {
        let kind = match google_section_kind(lines[i]) {
            Some(k) => k,
            None => {
                i += 1;
                continue;
            }
        };
        let section_start = i + 1;
        let mut section_end = section_start;
        while section_end < lines.len() && google_section_kind(lines[section_end]).is_none() {
            section_end += 1;
        }
        collect_section_entries(kind, &lines[section_start..section_end], &mut meta);
        i = section_end;
    }

    Docstring {
        style: DocstringStyle::Google,
        short_description: short,
        long_description: long,
        meta,
    }
}

/// Group a section's lines into entries by indentation: a line at the
/// section's base indent starts a new entry, deeper lines continue it.
fn section_entries(lines: &[&str]) -> Vec<String> {
    let base = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut entries: Vec<String> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if indent_of(line) == base || entries.is_empty() {
            entries.push(line.trim().to_string());
        } else {
            let last = entries.last_mut().unwrap();
            last.push('\n');
            last.push_str(line.trim());
        }
    }
    entries
}

fn collect_section_entries(kind: SectionKind, lines: &[&str], meta: &mut Vec<MetaEntry>) {
    if kind == SectionKind::Other {
        return;
    }
    for entry in section_entries(lines) {
        // Continuation lines were joined with '\n'; tag patterns only apply
        // to the head line.
        let (head, rest) = match entry.split_once('\n') {
            Some((head, rest)) => (head, Some(rest)),
            None => (entry.as_str(), None),
        };
        let with_rest = |first: String| match rest {
            Some(r) => {
                if first.is_empty() {
                    r.to_string()
                } else {
                    format!("{}\n{}", first, r)
                }
            }
            None => first,
        };

        match kind {
            SectionKind::Params => {
                if let Some(caps) = RE_GOOGLE_PARAM.captures(head) {
                    let arg_name = caps[1].to_string();
                    let (type_name, optional) = caps
                        .get(2)
                        .map(|m| split_optional(m.as_str()))
                        .unwrap_or((None, false));
                    let description = with_rest(caps[3].to_string());
                    meta.push(param_entry(arg_name, type_name, optional, description));
                }
            }
            SectionKind::Returns | SectionKind::Yields => {
                let tag = if kind == SectionKind::Returns {
                    "returns"
                } else {
                    "yields"
                };
                let (type_name, description) = match RE_TYPED_ENTRY.captures(head) {
                    Some(caps) => (Some(caps[1].to_string()), with_rest(caps[2].to_string())),
                    None => (None, with_rest(head.to_string())),
                };
                meta.push(MetaEntry {
                    args: vec![tag.into()],
                    type_name,
                    description: none_if_empty(description),
                    ..Default::default()
                });
            }
            SectionKind::Raises => {
                let (type_name, description) = match RE_TYPED_ENTRY.captures(head) {
                    Some(caps) => (Some(caps[1].to_string()), with_rest(caps[2].to_string())),
                    None => (None, with_rest(head.to_string())),
                };
                let mut args = vec!["raises".to_string()];
                if let Some(ref t) = type_name {
                    args.push(t.clone());
                }
                meta.push(MetaEntry {
                    args,
                    type_name,
                    description: none_if_empty(description),
                    ..Default::default()
                });
            }
            SectionKind::Other => {}
        }
    }
}

// -- Sphinx -------------------------------------------------------------------

fn parse_sphinx(lines: &[&str]) -> Docstring {
    let field_start = lines
        .iter()
        .position(|l| RE_SPHINX_FIELD.is_match(l.trim_start()))
        .unwrap_or(lines.len());
    let (short, long) = split_description(&lines[..field_start]);

    // Collect raw fields with their continuation lines first.
    let mut fields: Vec<(String, String, String)> = Vec::new();
    for line in &lines[field_start..] {
        let trimmed = line.trim_start();
        if let Some(caps) = RE_SPHINX_FIELD.captures(trimmed) {
            fields.push((
                caps[1].to_string(),
                caps[2].trim().to_string(),
                caps[3].to_string(),
            ));
        } else if let Some((_, _, body)) = fields.last_mut() {
            if !trimmed.is_empty() {
                body.push('\n');
                body.push_str(trimmed);
            }
        }
    }

    let mut meta: Vec<MetaEntry> = Vec::new();
    let mut returns_at: Option<usize> = None;

    for (name, argument, body) in fields {
        match name.as_str() {
            "param" | "parameter" | "arg" | "argument" | "key" | "keyword" => {
                // `:param str name:` carries the type before the name.
                let tokens: Vec<&str> = argument.split_whitespace().collect();
                let (type_name, arg_name) = match tokens.as_slice() {
                    [t, n] => (Some((*t).to_string()), (*n).to_string()),
                    [n] => (None, (*n).to_string()),
                    _ => (None, argument.clone()),
                };
                let (type_name, optional) = match type_name {
                    Some(t) => {
                        let (bare, opt) = split_optional(&t);
                        (bare, opt)
                    }
                    None => (None, false),
                };
                meta.push(param_entry(arg_name, type_name, optional, body));
            }
            "type" => {
                let (bare, optional) = split_optional(&body);
                if let Some(entry) = meta
                    .iter_mut()
                    .find(|m| m.arg_name.as_deref() == Some(argument.as_str()))
                {
                    entry.type_name = bare;
                    if optional {
                        entry.is_optional = Some(true);
                    }
                }
            }
            "returns" | "return" => {
                let idx = ensure_returns(&mut meta, &mut returns_at);
                meta[idx].description = none_if_empty(body);
            }
            "rtype" => {
                let idx = ensure_returns(&mut meta, &mut returns_at);
                meta[idx].type_name = none_if_empty(body);
            }
            "yields" | "yield" => {
                meta.push(MetaEntry {
                    args: vec!["yields".into()],
                    description: none_if_empty(body),
                    ..Default::default()
                });
            }
            "raises" | "raise" | "except" | "exception" => {
                let mut args = vec!["raises".to_string()];
                let type_name = none_if_empty(argument);
                if let Some(ref t) = type_name {
                    args.push(t.clone());
                }
                meta.push(MetaEntry {
                    args,
                    type_name,
                    description: none_if_empty(body),
                    ..Default::default()
                });
            }
            _ => {}
        }
    }

    Docstring {
        style: DocstringStyle::Sphinx,
        short_description: short,
        long_description: long,
        meta,
    }
}

/// Find or append the single returns entry (`:returns:` and `:rtype:` merge).
fn ensure_returns(meta: &mut Vec<MetaEntry>, at: &mut Option<usize>) -> usize {
    if let Some(idx) = *at {
        return idx;
    }
    meta.push(MetaEntry {
        args: vec!["returns".into()],
        ..Default::default()
    });
    let idx = meta.len() - 1;
    *at = Some(idx);
    idx
}

// -- NumPy --------------------------------------------------------------------

fn numpy_section_kind(line: &str) -> Option<SectionKind> {
    Some(match line.trim() {
        "Parameters" | "Other Parameters" => SectionKind::Params,
        "Returns" => SectionKind::Returns,
        "Yields" => SectionKind::Yields,
        "Raises" => SectionKind::Raises,
        "Attributes" | "See Also" | "Notes" | "Examples" | "References" | "Warnings" => {
            SectionKind::Other
        }
        _ => return None,
    })
}

fn parse_numpy(lines: &[&str]) -> Docstring {
    let is_header = |i: usize| -> bool {
        numpy_section_kind(lines[i]).is_some()
            && i + 1 < lines.len()
            && RE_NUMPY_UNDERLINE.is_match(lines[i + 1])
    };

    let body_end = (0..lines.len()).find(|&i| is_header(i)).unwrap_or(lines.len());
    let (short, long) = split_description(&lines[..body_end]);

    let mut meta = Vec::new();
    let mut i = body_end;
    while i < lines.len() {
        if !is_header(i) {
            i += 1;
            continue;
        }
        let kind = numpy_section_kind(lines[i]).unwrap();
        let section_start = i + 2;
        let mut section_end = section_start;
        while section_end < lines.len() && !is_header(section_end) {
            section_end += 1;
        }
        if kind != SectionKind::Other {
            collect_numpy_entries(kind, &lines[section_start..section_end], &mut meta);
        }
        i = section_end;
    }

    Docstring {
        style: DocstringStyle::Numpy,
        short_description: short,
        long_description: long,
        meta,
    }
}

fn collect_numpy_entries(kind: SectionKind, lines: &[&str], meta: &mut Vec<MetaEntry>) {
    for entry in section_entries(lines) {
        // NumPy entries put the description on continuation lines.
        let (head, description) = match entry.split_once('\n') {
            Some((head, rest)) => (head.to_string(), rest.replace('\n', " ")),
            None => (entry.clone(), String::new()),
        };

        match kind {
            SectionKind::Params => {
                let (arg_name, type_raw) = match head.split_once(':') {
                    Some((name, t)) => (name.trim().to_string(), t.trim().to_string()),
                    None => (head.trim().to_string(), String::new()),
                };
                let (type_name, optional) = split_optional(&type_raw);
                meta.push(param_entry(arg_name, type_name, optional, description));
            }
            SectionKind::Returns | SectionKind::Yields => {
                let tag = if kind == SectionKind::Returns {
                    "returns"
                } else {
                    "yields"
                };
                // `name : type` names the value; a bare head is the type.
                let type_name = match head.split_once(':') {
                    Some((_, t)) => t.trim().to_string(),
                    None => head.trim().to_string(),
                };
                meta.push(MetaEntry {
                    args: vec![tag.into()],
                    type_name: none_if_empty(type_name),
                    description: none_if_empty(description),
                    ..Default::default()
                });
            }
            SectionKind::Raises => {
                let type_name = none_if_empty(head.trim().to_string());
                let mut args = vec!["raises".to_string()];
                if let Some(ref t) = type_name {
                    args.push(t.clone());
                }
                meta.push(MetaEntry {
                    args,
                    type_name,
                    description: none_if_empty(description),
                    ..Default::default()
                });
            }
            SectionKind::Other => {}
        }
    }
}
