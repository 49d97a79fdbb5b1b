//! Heading outline trees and the flat table of contents derived from them.

use std::collections::VecDeque;

use crate::parser::Heading;

/// A node in a document's heading outline.
///
/// The outline is rooted at a synthetic node (depth 0, empty id and value)
/// whose children are the document's top-level headings. The root itself
/// never appears in a rendered table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TocNode {
    /// Anchor ID
    pub id: String,
    /// Heading level (0 for the synthetic root)
    pub depth: u8,
    /// Display text
    pub value: String,
    /// Nested headings, in source order
    pub children: Vec<TocNode>,
}

impl TocNode {
    fn new(id: String, depth: u8, value: String) -> Self {
        Self {
            id,
            depth,
            value,
            children: Vec::new(),
        }
    }
}

/// One entry of a flattened table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTocEntry {
    /// Anchor ID
    pub id: String,
    /// Heading level
    pub depth: u8,
    /// Display text
    pub value: String,
}

/// Errors produced when flattening an outline.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OutlineError {
    #[error("outline has no headings under its root")]
    EmptyOutline,
}

/// Nest a flat heading list into an outline tree.
///
/// Each heading becomes a child of the nearest preceding heading with a
/// smaller depth, so skipped levels (an h3 directly under an h1) attach to
/// the closest available ancestor.
pub fn build_outline(headings: &[Heading]) -> TocNode {
    let mut root = TocNode::new(String::new(), 0, String::new());

    for heading in headings {
        let node = TocNode::new(heading.id.clone(), heading.depth, heading.title.clone());
        attach(&mut root, node);
    }

    root
}

fn attach(parent: &mut TocNode, node: TocNode) {
    match parent.children.last_mut() {
        Some(last) if last.depth < node.depth => attach(last, node),
        _ => parent.children.push(node),
    }
}

/// Flatten an outline tree into pre-order table-of-contents entries.
///
/// Traversal is an iterative work queue: each dequeued node's children are
/// spliced in front of the remaining queue, so a node's subtree is exhausted
/// before its next sibling. The result is pre-order (parent before children,
/// left to right) with stack depth independent of how deeply the document
/// nests.
///
/// The root must carry at least one child; an outline with none fails with
/// [`OutlineError::EmptyOutline`] so callers decide what an empty table of
/// contents means instead of silently receiving one.
///
/// The tree is only borrowed. Entries own their strings, so the caller may
/// mutate or drop the output without touching the outline.
pub fn flatten_outline(root: &TocNode) -> Result<Vec<FlatTocEntry>, OutlineError> {
    if root.children.is_empty() {
        return Err(OutlineError::EmptyOutline);
    }

    let mut queue: VecDeque<&TocNode> = root.children.iter().collect();
    let mut flat = Vec::new();

    while let Some(node) = queue.pop_front() {
        flat.push(FlatTocEntry {
            id: node.id.clone(),
            depth: node.depth,
            value: node.value.clone(),
        });

        // Splice children in front so the subtree runs before the next sibling.
        for child in node.children.iter().rev() {
            queue.push_front(child);
        }
    }

    Ok(flat)
}
