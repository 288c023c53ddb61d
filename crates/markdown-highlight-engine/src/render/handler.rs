//! Node handler trait definition.

use crate::models::Node;

use super::HtmlRenderer;

/// Inline style the highlight handler applies unless told otherwise.
pub const DEFAULT_HIGHLIGHT_STYLE: &str = "color:red;font-weight:bold";

/// Renders one node kind to HTML.
///
/// Handlers receive the renderer so they can recurse into children with
/// whatever handlers are registered there.
pub trait Handler {
    fn render(&self, node: &Node, renderer: &HtmlRenderer, out: &mut String);
}

impl<F> Handler for F
where
    F: Fn(&Node, &HtmlRenderer, &mut String),
{
    fn render(&self, node: &Node, renderer: &HtmlRenderer, out: &mut String) {
        self(node, renderer, out)
    }
}

/// Handler for `highlight` nodes: an inline `<span>` with `style`, wrapping
/// the node's children.
pub fn highlight_handler(style: impl Into<String>) -> impl Handler {
    let style = style.into();
    move |node: &Node, renderer: &HtmlRenderer, out: &mut String| {
        out.push_str("<span style=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(&style));
        out.push_str("\">");
        if let Some(children) = node.children() {
            renderer.render_children(children, out);
        }
        out.push_str("</span>");
    }
}
