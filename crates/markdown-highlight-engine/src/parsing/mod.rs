//! Markdown parsing into an mdast-shaped [`Node`] tree.
//!
//! The highlight pass itself never parses Markdown; it operates on whatever
//! tree it is handed. This module is the parser the pipeline and the CLI use
//! to produce that tree from raw source.
//!
//! ## Shape of the output
//!
//! - The root is an `Other` element of kind `root`.
//! - Each run of literal text becomes exactly one [`Node::Text`]. pulldown-cmark
//!   fragments text at characters that *might* start inline syntax (`!`, `[`,
//!   `*`, ...), so consecutive fragments are merged here, and soft line breaks
//!   are folded into the run as `"\n"`. Without this, `a!!b!!c` would arrive
//!   as several text nodes and never match.
//! - Literal containers (`code`, block `html`) keep their content in `value`
//!   and have no children, so tree walkers never see code as text.
//! - Image alt text is flattened into the `alt` attribute.
//! - Every node carries a [`Position`](crate::models::Position) computed from
//!   the event's byte range.

pub mod lines;

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::models::{AttrValue, Element, Node, Text};
use lines::LineIndex;

/// Parse markdown content into a tree rooted at a `root` element.
pub fn parse_markdown(content: &str) -> Node {
    let index = LineIndex::new(content);
    let mut builder = TreeBuilder::new(&index, 0..content.len());

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    for (event, range) in Parser::new_ext(content, options).into_offset_iter() {
        builder.process_event(event, range);
    }

    builder.finalize()
}

/// What to do with text that arrives inside an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    /// Text becomes child nodes.
    None,
    /// Text accumulates into the element's `value` (code, html blocks).
    Value,
    /// Text accumulates into the `alt` attribute (images).
    Alt,
}

/// An element still waiting for its `End` event.
struct Frame {
    element: Element,
    literal: Literal,
    buffer: String,
}

/// Builds the tree from pulldown-cmark's flat event stream.
///
/// Open containers live on `stack`; the bottom entry is always the root.
/// `End` events pop the top frame and attach it to the frame below, so the
/// builder never needs to match end tags against start tags.
struct TreeBuilder<'a> {
    index: &'a LineIndex<'a>,
    stack: Vec<Frame>,
}

impl<'a> TreeBuilder<'a> {
    fn new(index: &'a LineIndex<'a>, whole: Range<usize>) -> Self {
        let root = Element::new("root").with_position(Some(index.position(whole)));
        Self {
            index,
            stack: vec![Frame {
                element: root,
                literal: Literal::None,
                buffer: String::new(),
            }],
        }
    }

    /// Process a single markdown event with its source range.
    fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.open(tag, range),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text, range),
            Event::SoftBreak => self.push_text("\n", range),
            Event::Code(code) => self.push_leaf(Element::new("inlineCode").with_value(&*code), range),
            Event::InlineMath(math) => {
                self.push_leaf(Element::new("inlineMath").with_value(&*math), range)
            }
            Event::DisplayMath(math) => self.push_leaf(Element::new("math").with_value(&*math), range),
            Event::Html(html) | Event::InlineHtml(html) => {
                // Inside an html block the fragments form the block's value
                if self.top().literal == Literal::Value {
                    self.top_mut().buffer.push_str(&html);
                } else {
                    self.push_leaf(Element::new("html").with_value(&*html), range);
                }
            }
            Event::FootnoteReference(label) => self.push_leaf(
                Element::new("footnoteReference").with_attr("identifier", label.to_string().into()),
                range,
            ),
            Event::HardBreak => self.push_leaf(Element::new("break"), range),
            Event::Rule => self.push_leaf(Element::new("thematicBreak"), range),
            Event::TaskListMarker(checked) => self.mark_task(checked),
        }
    }

    fn open(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let position = Some(self.index.position(range));
        let (element, literal) = match tag {
            Tag::Paragraph => (Element::new("paragraph"), Literal::None),
            Tag::Heading { level, .. } => (
                Element::new("heading").with_attr("depth", (level as u64).into()),
                Literal::None,
            ),
            Tag::BlockQuote(_) => (Element::new("blockquote"), Literal::None),
            Tag::CodeBlock(kind) => {
                let mut el = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind {
                    // Info string is "lang meta..."
                    let mut parts = info.splitn(2, char::is_whitespace);
                    if let Some(lang) = parts.next().filter(|l| !l.is_empty()) {
                        el = el.with_attr("lang", lang.into());
                    }
                    if let Some(meta) = parts.next().map(str::trim).filter(|m| !m.is_empty()) {
                        el = el.with_attr("meta", meta.into());
                    }
                }
                (el, Literal::Value)
            }
            Tag::HtmlBlock => (Element::new("html"), Literal::Value),
            Tag::List(start) => {
                let mut el = Element::new("list").with_attr("ordered", start.is_some().into());
                if let Some(start) = start {
                    el = el.with_attr("start", start.into());
                }
                (el, Literal::None)
            }
            Tag::Item => (Element::new("listItem"), Literal::None),
            Tag::Emphasis => (Element::new("emphasis"), Literal::None),
            Tag::Strong => (Element::new("strong"), Literal::None),
            Tag::Strikethrough => (Element::new("delete"), Literal::None),
            Tag::Link {
                dest_url, title, ..
            } => (link_like("link", &dest_url, &title), Literal::None),
            Tag::Image {
                dest_url, title, ..
            } => (link_like("image", &dest_url, &title), Literal::Alt),
            Tag::Table(_) => (Element::new("table"), Literal::None),
            Tag::TableHead => (
                Element::new("tableRow").with_attr("head", true.into()),
                Literal::None,
            ),
            Tag::TableRow => (Element::new("tableRow"), Literal::None),
            Tag::TableCell => (Element::new("tableCell"), Literal::None),
            Tag::FootnoteDefinition(label) => (
                Element::new("footnoteDefinition")
                    .with_attr("identifier", label.to_string().into()),
                Literal::None,
            ),
            _ => (Element::new("unknown"), Literal::None),
        };

        self.stack.push(Frame {
            element: element.with_position(position),
            literal,
            buffer: String::new(),
        });
    }

    fn close(&mut self) {
        // The root frame is never closed by an event
        if self.stack.len() < 2 {
            log::warn!("Unbalanced end event ignored");
            return;
        }
        if let Some(frame) = self.stack.pop() {
            let node = Node::Other(finish_frame(frame));
            let parent = self.top_mut();
            if parent.literal == Literal::None {
                parent.element.children.push(node);
            } else {
                // e.g. emphasis inside image alt text
                parent.buffer.push_str(&node.text_content());
            }
        }
    }

    fn push_text(&mut self, text: &str, range: Range<usize>) {
        let position = self.index.position(range);
        let frame = self.top_mut();
        if frame.literal != Literal::None {
            frame.buffer.push_str(text);
            return;
        }

        // Merge with the previous fragment of the same run
        if let Some(Node::Text(last)) = frame.element.children.last_mut() {
            last.value.push_str(text);
            last.position = Some(match last.position {
                Some(prev) => prev.extend_to(position),
                None => position,
            });
            return;
        }
        frame
            .element
            .children
            .push(Node::Text(Text::new(text, Some(position))));
    }

    fn push_leaf(&mut self, element: Element, range: Range<usize>) {
        let position = Some(self.index.position(range));
        let frame = self.top_mut();
        if frame.literal != Literal::None {
            if let Some(value) = &element.value {
                frame.buffer.push_str(value);
            }
            return;
        }
        frame
            .element
            .children
            .push(Node::Other(element.with_position(position)));
    }

    fn mark_task(&mut self, checked: bool) {
        if let Some(item) = self
            .stack
            .iter_mut()
            .rev()
            .find(|f| f.element.kind == "listItem")
        {
            item.element
                .attributes
                .insert("checked".to_string(), AttrValue::Bool(checked));
        }
    }

    fn top(&self) -> &Frame {
        // Invariant: the root frame is never popped
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Closes anything left open and returns the root.
    fn finalize(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(root) => Node::Other(finish_frame(root)),
            None => Node::Other(Element::new("root")),
        }
    }
}

fn link_like(kind: &str, url: &str, title: &str) -> Element {
    let mut el = Element::new(kind).with_attr("url", url.into());
    if !title.is_empty() {
        el = el.with_attr("title", title.into());
    }
    el
}

fn finish_frame(frame: Frame) -> Element {
    let Frame {
        mut element,
        literal,
        buffer,
    } = frame;
    match literal {
        Literal::None => {}
        Literal::Value => {
            // Fenced code keeps its trailing newline in the event stream; mdast drops it
            let value = if element.kind == "code" {
                buffer.strip_suffix('\n').unwrap_or(&buffer).to_string()
            } else {
                buffer
            };
            element.value = Some(value);
        }
        Literal::Alt => {
            element
                .attributes
                .insert("alt".to_string(), AttrValue::Str(buffer));
        }
    }
    element
}
