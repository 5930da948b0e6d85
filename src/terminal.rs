//! Colored terminal dump of the documentation tree.
//!
//! Interactive feedback only; the rendered artifact never goes through
//! here. Colors come from a plain palette passed by reference.

use crate::model::{ClassDocItem, DirectoryNode, DocItem, FileNode};
use colored::{Color, Colorize};

/// Per-kind colors for the tree dump.
pub struct Palette {
    pub directory: Color,
    pub file: Color,
    pub function: Color,
    pub klass: Color,
    pub method: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            directory: Color::Magenta,
            file: Color::Cyan,
            function: Color::Yellow,
            klass: Color::Blue,
            method: Color::Magenta,
        }
    }
}

/// Print the whole tree, indented one tab per level.
pub fn print_tree(tree: &DirectoryNode, palette: &Palette) {
    print_directory(tree, palette, 0);
}

fn print_directory(node: &DirectoryNode, palette: &Palette, level: usize) {
    println!("{}", directory_line(node, level).color(palette.directory));
    for file in &node.files {
        print_file(file, palette, level + 1);
    }
    for dir in &node.directories {
        print_directory(dir, palette, level + 1);
    }
}

fn print_file(file: &FileNode, palette: &Palette, level: usize) {
    println!("{}", file_line(file, level).color(palette.file));
    for func in &file.functions {
        println!("{}", item_line(func, "Function", level + 1).color(palette.function));
    }
    for class in &file.classes {
        print_class(class, palette, level + 1);
    }
}

fn print_class(class: &ClassDocItem, palette: &Palette, level: usize) {
    println!("{}", item_line(&class.item, "Class", level).color(palette.klass));
    for method in &class.methods {
        println!("{}", item_line(method, "Method", level + 1).color(palette.method));
    }
}

fn directory_line(node: &DirectoryNode, level: usize) -> String {
    format!(
        "{}\u{221f} {} -- Files: {} -- Folders: {}",
        "\t".repeat(level),
        node.name,
        node.files.len(),
        node.directories.len()
    )
}

fn file_line(file: &FileNode, level: usize) -> String {
    format!(
        "{}\u{221f} {} -- Functions: {}",
        "\t".repeat(level),
        file.name,
        file.functions.len()
    )
}

fn item_line(item: &DocItem, kind: &str, level: usize) -> String {
    format!("{}\u{221f} {}: {}", "\t".repeat(level), kind, item.name)
}
