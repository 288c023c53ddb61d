//! Depth-first traversal over text nodes with a skip protocol.
//!
//! The visitor gets the parent's child vector and the index of a text node
//! in it, and answers with a [`Visit`] telling the walker where to resume.
//! Rewrites go through [`replace_child`], which reports how many nodes it
//! inserted so the visitor can skip exactly those.

use crate::models::Node;

/// Where the walker resumes in the current child sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Resume at the next sibling.
    Continue,
    /// Resume at the given index, bypassing everything before it.
    ///
    /// Returning the visited index without removing the node there never
    /// makes progress; callers must only skip over nodes they changed.
    SkipTo(usize),
}

/// Walks `tree` pre-order, left to right, calling `visitor` for every text
/// node that has a parent.
///
/// A root that is itself a text node has no parent to splice into, so the
/// visitor is not called for it.
pub fn visit_text<F>(tree: &mut Node, mut visitor: F)
where
    F: FnMut(&mut Vec<Node>, usize) -> Visit,
{
    match tree.children_mut() {
        Some(children) => walk_children(children, &mut visitor),
        None => log::trace!("Root has no children, nothing to visit"),
    }
}

fn walk_children<F>(children: &mut Vec<Node>, visitor: &mut F)
where
    F: FnMut(&mut Vec<Node>, usize) -> Visit,
{
    let mut index = 0;
    while index < children.len() {
        if children[index].is_text() {
            index = match visitor(children, index) {
                Visit::Continue => index + 1,
                Visit::SkipTo(next) => next,
            };
            continue;
        }

        if let Some(grandchildren) = children[index].children_mut() {
            walk_children(grandchildren, visitor);
        }
        index += 1;
    }
}

/// Replaces `siblings[index]` with `nodes`, keeping surrounding order.
///
/// Returns how many nodes were inserted. An out-of-range index leaves the
/// sequence alone and returns 0.
pub fn replace_child(siblings: &mut Vec<Node>, index: usize, nodes: Vec<Node>) -> usize {
    if index >= siblings.len() {
        log::trace!(
            "replace_child index {index} out of range (len {})",
            siblings.len()
        );
        return 0;
    }
    let inserted = nodes.len();
    siblings.splice(index..=index, nodes);
    inserted
}
