//! # Highlight Pass
//!
//! Rewrites text nodes containing `!!marked!!` spans into an ordered run of
//! text and highlight nodes.
//!
//! ## Modules
//!
//! - **`delimiter`**: `Delimiter` owns the marker and the match pattern
//! - **`split`**: `split()` turns one text value into replacement nodes
//!
//! ## Flow
//!
//! For every text node the walker reaches: fast reject, split, splice the
//! replacement into the parent, then skip past everything inserted. The
//! highlight nodes wrap their own text child, and skipping keeps the walker
//! from descending into them.

pub mod delimiter;
pub mod split;

pub use delimiter::{Delimiter, DelimiterError, Match};
pub use split::{split, split_if_needed};

use crate::models::Node;
use crate::processor::Transform;
use crate::visit::{Visit, replace_child, visit_text};

/// Zero-argument plugin factory: returns the tree rewrite using `!!`.
pub fn highlight() -> impl Fn(&mut Node) {
    let plugin = HighlightPlugin::default();
    move |tree: &mut Node| plugin.apply(tree)
}

/// The highlight rewrite with a configurable delimiter.
#[derive(Debug, Clone, Default)]
pub struct HighlightPlugin {
    delimiter: Delimiter,
}

impl HighlightPlugin {
    pub const NAME: &'static str = "highlight";

    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Rewrites `tree` in place.
    pub fn apply(&self, tree: &mut Node) {
        let mut rewritten = 0usize;
        visit_text(tree, |siblings, index| {
            let Some(text) = siblings[index].as_text() else {
                return Visit::Continue;
            };
            let Some(nodes) = split_if_needed(&text.value, text.position, &self.delimiter)
            else {
                return Visit::Continue;
            };

            log::debug!(
                "Splitting text node at index {index} on {} into {} nodes",
                self.delimiter.fence(),
                nodes.len()
            );
            rewritten += 1;
            let inserted = replace_child(siblings, index, nodes);
            Visit::SkipTo(index + inserted)
        });
        log::debug!("Highlight pass rewrote {rewritten} text nodes");
    }
}

impl Transform for HighlightPlugin {
    fn transform(&self, tree: &mut Node) {
        self.apply(tree);
    }
}
