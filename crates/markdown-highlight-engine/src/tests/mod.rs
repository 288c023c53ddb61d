//! Shared helpers for unit tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::models::{Element, Node, Point, Position};

pub fn create_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn root(children: Vec<Node>) -> Node {
    Node::Other(Element::new("root").with_children(children))
}

pub fn paragraph(children: Vec<Node>) -> Node {
    Node::Other(Element::new("paragraph").with_children(children))
}

/// Text node on line 1 starting at byte `offset`.
pub fn text_at(value: &str, offset: usize) -> Node {
    let point = |offset: usize| Point {
        line: 1,
        column: offset + 1,
        offset,
    };
    Node::text(
        value,
        Some(Position::new(point(offset), point(offset + value.len()))),
    )
}
