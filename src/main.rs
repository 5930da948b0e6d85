//! doctree — generate documentation from Python docstrings.
//!
//! Walks a source tree, extracts docstrings from functions and classes,
//! and renders the result as HTML, Markdown, or JSON. Three stages:
//! configure (flags or interactive prompts), scan, build output.

mod model;
mod parser;
mod render;
mod terminal;
mod walker;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doctree",
    about = "Generate HTML, Markdown, or JSON documentation from Python docstrings"
)]
struct Cli {
    /// Prompt for configuration instead of reading flags
    #[arg(short, long)]
    interactive: bool,

    /// Root directory to scan
    #[arg(short, long, default_value = "./")]
    path: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// Output format: html, markdown, json
    #[arg(short, long, default_value = "html")]
    format: String,

    /// File extension to scan for
    #[arg(short, long, default_value = walker::DEFAULT_EXTENSION)]
    extension: String,

    /// Do not descend into subdirectories
    #[arg(long)]
    no_recurse: bool,
}

struct Config {
    root: PathBuf,
    out: PathBuf,
    format: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = configure(&cli)?;
    let renderer = render::create_renderer(&config.format)?;

    print_banner();
    print_config(&config);

    let tree = walker::Walker::new(&cli.extension, !cli.no_recurse).walk(&config.root)?;
    terminal::print_tree(&tree, &terminal::Palette::default());

    // Single-level create: a missing parent is an error.
    if !config.out.is_dir() {
        fs::create_dir(&config.out).with_context(|| {
            format!(
                "failed to create output directory: {}",
                config.out.display()
            )
        })?;
    }

    println!(
        "{}",
        format!("Output: {} to '{}'", config.format, config.out.display()).green()
    );

    let content = renderer.render(&tree)?;
    let out_path = config.out.join(renderer.file_name());
    fs::write(&out_path, content)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!("{}", "Output complete".green());
    Ok(())
}

/// Resolve the run configuration from flags, or from prompts in
/// interactive mode.
fn configure(cli: &Cli) -> Result<Config> {
    if !cli.interactive {
        return Ok(Config {
            root: cli.path.clone(),
            out: cli.out.clone(),
            format: cli.format.clone(),
        });
    }

    println!("{}", "Entering interactive mode".yellow());

    let root = loop {
        let input = prompt("Please enter the path you wish to document: ")?;
        let path = PathBuf::from(input.trim());
        if path.is_dir() {
            break path;
        }
        println!("{}", "This is an invalid path, please try again".red());
    };

    let out = PathBuf::from(prompt("Please enter an output path: ")?.trim());

    let format = loop {
        let input = prompt("Please select an output format (1: html, 2: markdown, 3: json): ")?;
        match input.trim() {
            "1" | "html" => break "html",
            "2" | "markdown" | "md" => break "markdown",
            "3" | "json" => break "json",
            _ => println!("{}", "Invalid option, please try again".red()),
        }
    }
    .to_string();

    Ok(Config { root, out, format })
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    if read == 0 {
        bail!("input stream closed");
    }
    Ok(line)
}

fn print_banner() {
    let message = "Welcome to doctree";
    let rule = "#".repeat(message.len());
    println!("{}", format!("{}\n{}\n{}", rule, message, rule).green());
}

fn print_config(config: &Config) {
    println!("{}", format!("Input Path: {}", config.root.display()).blue());
    println!("{}", format!("Output Path: {}", config.out.display()).blue());
    println!("{}", format!("Output Format: {}", config.format).blue());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_config() {
        let cli = Cli::parse_from(["doctree", "-p", "src", "-o", "docs", "-f", "json"]);
        let config = configure(&cli).unwrap();
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(config.out, PathBuf::from("docs"));
        assert_eq!(config.format, "json");
    }

    #[test]
    fn default_flags() {
        let cli = Cli::parse_from(["doctree"]);
        let config = configure(&cli).unwrap();
        assert_eq!(config.root, PathBuf::from("./"));
        assert_eq!(config.out, PathBuf::from("output"));
        assert_eq!(config.format, "html");
        assert_eq!(cli.extension, ".py");
        assert!(!cli.no_recurse);
    }
}
