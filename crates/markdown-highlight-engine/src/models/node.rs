use std::collections::BTreeMap;

use serde::Serialize;

use super::position::Position;

/// A node of the document tree.
///
/// Only the two kinds the highlight pass cares about get their own
/// variant. Every other mdast kind is carried as an [`Element`] whose
/// `kind` string the pass never looks at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Text(Text),
    Highlight(Highlight),
    #[serde(untagged)]
    Other(Element),
}

/// A run of literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A delimited span. `children` always holds exactly one text node whose
/// value equals `value`, because renderers wrap children rather than a
/// bare scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub value: String,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Any node kind other than text and highlight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttrValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Scalar attribute of an [`Element`] (`depth`, `url`, `ordered`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(u64),
    Str(String),
}

impl Text {
    pub fn new(value: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            value: value.into(),
            position,
        }
    }
}

impl Highlight {
    /// Builds a highlight whose single child repeats `value`.
    ///
    /// Only the highlight itself carries `position`; the inner text has none.
    pub fn new(value: impl Into<String>, position: Option<Position>) -> Self {
        let value = value.into();
        Self {
            children: vec![Node::Text(Text::new(value.clone(), None))],
            value,
            position,
        }
    }
}

impl Element {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            position: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttrValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn attr_int(&self, name: &str) -> Option<u64> {
        match self.attributes.get(name) {
            Some(AttrValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        match self.attributes.get(name) {
            Some(AttrValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<u64> for AttrValue {
    fn from(n: u64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl Node {
    pub const TEXT: &'static str = "text";
    pub const HIGHLIGHT: &'static str = "highlight";

    /// Shorthand for a text node.
    pub fn text(value: impl Into<String>, position: Option<Position>) -> Self {
        Node::Text(Text::new(value, position))
    }

    /// Shorthand for a highlight node.
    pub fn highlight(value: impl Into<String>, position: Option<Position>) -> Self {
        Node::Highlight(Highlight::new(value, position))
    }

    /// The mdast `type` tag of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text(_) => Self::TEXT,
            Node::Highlight(_) => Self::HIGHLIGHT,
            Node::Other(el) => &el.kind,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(&t.value),
            Node::Highlight(h) => Some(&h.value),
            Node::Other(el) => el.value.as_deref(),
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Text(t) => t.position,
            Node::Highlight(h) => h.position,
            Node::Other(el) => el.position,
        }
    }

    /// Child sequence, or `None` for leaf kinds.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Text(_) => None,
            Node::Highlight(h) => Some(&h.children),
            Node::Other(el) => Some(&el.children),
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Text(_) => None,
            Node::Highlight(h) => Some(&mut h.children),
            Node::Other(el) => Some(&mut el.children),
        }
    }

    /// Concatenated text of this node and all its descendants.
    ///
    /// Highlights contribute their children, so delimiters never show up.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.value),
            Node::Highlight(h) => h.children.iter().for_each(|c| c.collect_text(out)),
            Node::Other(el) => {
                if el.children.is_empty() {
                    if let Some(v) = &el.value {
                        out.push_str(v);
                    }
                } else {
                    el.children.iter().for_each(|c| c.collect_text(out));
                }
            }
        }
    }
}

impl From<Text> for Node {
    fn from(t: Text) -> Self {
        Node::Text(t)
    }
}

impl From<Highlight> for Node {
    fn from(h: Highlight) -> Self {
        Node::Highlight(h)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Other(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pos() -> Position {
        Position::new(
            Point {
                line: 1,
                column: 1,
                offset: 0,
            },
            Point {
                line: 1,
                column: 8,
                offset: 7,
            },
        )
    }

    #[test]
    fn highlight_child_repeats_value_without_position() {
        let h = Highlight::new("hot", Some(pos()));
        assert_eq!(h.value, "hot");
        assert_eq!(h.position, Some(pos()));
        assert_eq!(h.children, vec![Node::text("hot", None)]);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(Node::text("a", None).kind(), "text");
        assert_eq!(Node::highlight("a", None).kind(), "highlight");
        assert_eq!(Node::Other(Element::new("paragraph")).kind(), "paragraph");
    }

    #[test]
    fn text_has_no_children() {
        let mut n = Node::text("a", None);
        assert!(n.children().is_none());
        assert!(n.children_mut().is_none());
    }

    #[test]
    fn text_content_skips_markers() {
        let para = Node::Other(Element::new("paragraph").with_children(vec![
            Node::text("a ", None),
            Node::highlight("b", None),
            Node::Other(Element::new("inlineCode").with_value("c")),
        ]));
        assert_eq!(para.text_content(), "a bc");
    }

    #[test]
    fn serializes_like_mdast() {
        let tree = Node::Other(
            Element::new("heading")
                .with_attr("depth", 2u64.into())
                .with_children(vec![
                    Node::text("x", None),
                    Node::highlight("y", Some(pos())),
                ]),
        );
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "heading",
                "depth": 2,
                "children": [
                    { "type": "text", "value": "x" },
                    {
                        "type": "highlight",
                        "value": "y",
                        "children": [{ "type": "text", "value": "y" }],
                        "position": {
                            "start": { "line": 1, "column": 1, "offset": 0 },
                            "end": { "line": 1, "column": 8, "offset": 7 }
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn typed_attribute_accessors() {
        let el = Element::new("list")
            .with_attr("ordered", true.into())
            .with_attr("start", 3u64.into())
            .with_attr("spread", "no".into());
        assert_eq!(el.attr_bool("ordered"), Some(true));
        assert_eq!(el.attr_int("start"), Some(3));
        assert_eq!(el.attr_str("spread"), Some("no"));
        assert_eq!(el.attr_str("start"), None);
        assert!(el.attr("missing").is_none());
    }
}
