//! HTML rendering of the document tree.
//!
//! Node kinds are looked up in a handler registry first, so callers can
//! add kinds the renderer doesn't know (such as `highlight`) or override
//! built-in output. Kinds with neither a handler nor built-in output fall
//! back to a `<div>` around their children, or to their escaped `value`.

mod handler;

pub use handler::{DEFAULT_HIGHLIGHT_STYLE, Handler, highlight_handler};

use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::{Element, Node};

/// Converts a tree into an HTML string.
#[derive(Default)]
pub struct HtmlRenderer {
    handlers: HashMap<String, Box<dyn Handler>>,
    allow_dangerous_html: bool,
}

impl HtmlRenderer {
    /// A renderer with no custom handlers; raw HTML is dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer with the default highlight handler registered.
    pub fn with_highlight() -> Self {
        Self::new().with_handler(Node::HIGHLIGHT, highlight_handler(DEFAULT_HIGHLIGHT_STYLE))
    }

    #[must_use]
    pub fn with_handler(mut self, kind: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.register(kind, handler);
        self
    }

    /// Register a handler for a node kind, replacing any previous one.
    pub fn register(&mut self, kind: impl Into<String>, handler: impl Handler + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    #[must_use]
    pub fn has_handler(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Pass `html` nodes through verbatim instead of dropping them.
    #[must_use]
    pub fn allow_dangerous_html(mut self, allow: bool) -> Self {
        self.allow_dangerous_html = allow;
        self
    }

    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.render_node(node, &mut out);
        out
    }

    pub fn render_node(&self, node: &Node, out: &mut String) {
        if let Some(handler) = self.handlers.get(node.kind()) {
            handler.render(node, self, out);
            return;
        }
        match node {
            Node::Text(t) => out.push_str(&encode_text(&t.value)),
            Node::Highlight(_) => fallback(self, node, out),
            Node::Other(el) => {
                if !self.render_builtin(el, out) {
                    fallback(self, node, out);
                }
            }
        }
    }

    pub fn render_children(&self, children: &[Node], out: &mut String) {
        for child in children {
            self.render_node(child, out);
        }
    }

    /// Built-in output for known element kinds. Returns false for unknown kinds.
    fn render_builtin(&self, el: &Element, out: &mut String) -> bool {
        match el.kind.as_str() {
            "root" => self.render_children(&el.children, out),
            "paragraph" => self.wrap("p", el, out, "\n"),
            "heading" => {
                let depth = el.attr_int("depth").unwrap_or(1).clamp(1, 6);
                self.wrap(&format!("h{depth}"), el, out, "\n");
            }
            "blockquote" => {
                out.push_str("<blockquote>\n");
                self.render_children(&el.children, out);
                out.push_str("</blockquote>\n");
            }
            "list" => {
                let ordered = el.attr_bool("ordered").unwrap_or(false);
                match (ordered, el.attr_int("start")) {
                    (true, Some(start)) if start != 1 => {
                        out.push_str(&format!("<ol start=\"{start}\">\n"));
                    }
                    (true, _) => out.push_str("<ol>\n"),
                    (false, _) => out.push_str("<ul>\n"),
                }
                self.render_children(&el.children, out);
                out.push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            "listItem" => {
                out.push_str("<li>");
                match el.attr_bool("checked") {
                    Some(true) => out.push_str("<input type=\"checkbox\" disabled checked /> "),
                    Some(false) => out.push_str("<input type=\"checkbox\" disabled /> "),
                    None => {}
                }
                self.render_children(&el.children, out);
                out.push_str("</li>\n");
            }
            "emphasis" => self.wrap("em", el, out, ""),
            "strong" => self.wrap("strong", el, out, ""),
            "delete" => self.wrap("del", el, out, ""),
            "inlineCode" => {
                out.push_str("<code>");
                out.push_str(&encode_text(el.value.as_deref().unwrap_or_default()));
                out.push_str("</code>");
            }
            "code" => {
                match el.attr_str("lang") {
                    Some(lang) => out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        encode_double_quoted_attribute(lang)
                    )),
                    None => out.push_str("<pre><code>"),
                }
                let value = el.value.as_deref().unwrap_or_default();
                out.push_str(&encode_text(value));
                if !value.is_empty() {
                    out.push('\n');
                }
                out.push_str("</code></pre>\n");
            }
            "inlineMath" => {
                out.push_str("<code class=\"language-math math-inline\">");
                out.push_str(&encode_text(el.value.as_deref().unwrap_or_default()));
                out.push_str("</code>");
            }
            "math" => {
                out.push_str("<pre><code class=\"language-math math-display\">");
                out.push_str(&encode_text(el.value.as_deref().unwrap_or_default()));
                out.push_str("</code></pre>\n");
            }
            "link" => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(
                    el.attr_str("url").unwrap_or_default(),
                ));
                out.push('"');
                push_title(el, out);
                out.push('>');
                self.render_children(&el.children, out);
                out.push_str("</a>");
            }
            "image" => {
                out.push_str("<img src=\"");
                out.push_str(&encode_double_quoted_attribute(
                    el.attr_str("url").unwrap_or_default(),
                ));
                out.push_str("\" alt=\"");
                out.push_str(&encode_double_quoted_attribute(
                    el.attr_str("alt").unwrap_or_default(),
                ));
                out.push('"');
                push_title(el, out);
                out.push_str(" />");
            }
            "thematicBreak" => out.push_str("<hr />\n"),
            "break" => out.push_str("<br />\n"),
            "html" => {
                if self.allow_dangerous_html {
                    out.push_str(el.value.as_deref().unwrap_or_default());
                }
            }
            "table" => {
                out.push_str("<table>\n");
                self.render_children(&el.children, out);
                out.push_str("</table>\n");
            }
            "tableRow" => {
                let cell = if el.attr_bool("head").unwrap_or(false) {
                    "th"
                } else {
                    "td"
                };
                out.push_str("<tr>\n");
                for child in &el.children {
                    out.push_str(&format!("<{cell}>"));
                    if let Some(grandchildren) = child.children() {
                        self.render_children(grandchildren, out);
                    }
                    out.push_str(&format!("</{cell}>\n"));
                }
                out.push_str("</tr>\n");
            }
            "footnoteReference" => {
                let id = encode_double_quoted_attribute(el.attr_str("identifier").unwrap_or_default());
                out.push_str(&format!("<sup><a href=\"#fn-{id}\">{id}</a></sup>"));
            }
            "footnoteDefinition" => {
                let id = encode_double_quoted_attribute(el.attr_str("identifier").unwrap_or_default());
                out.push_str(&format!("<div id=\"fn-{id}\">\n"));
                self.render_children(&el.children, out);
                out.push_str("</div>\n");
            }
            _ => return false,
        }
        true
    }

    fn wrap(&self, tag: &str, el: &Element, out: &mut String, after: &str) {
        out.push_str(&format!("<{tag}>"));
        self.render_children(&el.children, out);
        out.push_str(&format!("</{tag}>{after}"));
    }
}

/// Output for kinds nobody knows how to render.
fn fallback(renderer: &HtmlRenderer, node: &Node, out: &mut String) {
    match node.children() {
        Some(children) if !children.is_empty() => {
            out.push_str("<div>");
            renderer.render_children(children, out);
            out.push_str("</div>");
        }
        _ => {
            if let Some(value) = node.value() {
                out.push_str(&encode_text(value));
            }
        }
    }
}

fn push_title(el: &Element, out: &mut String) {
    if let Some(title) = el.attr_str("title") {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(title));
        out.push('"');
    }
}
