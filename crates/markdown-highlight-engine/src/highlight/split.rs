use crate::models::{Node, Position};

use super::delimiter::Delimiter;

/// Splits one text value into text and highlight nodes.
///
/// Text between matches is emitted as [`Node::Text`]; empty gaps are never
/// emitted. Every returned node carries `position` unchanged. When nothing
/// matches, the result is a single text node equal to the input.
pub fn split(text: &str, position: Option<Position>, delimiter: &Delimiter) -> Vec<Node> {
    split_if_needed(text, position, delimiter)
        .unwrap_or_else(|| vec![Node::text(text, position)])
}

/// Like [`split`], but returns `None` when `text` has no delimited span so
/// callers can leave the original node untouched.
pub fn split_if_needed(
    text: &str,
    position: Option<Position>,
    delimiter: &Delimiter,
) -> Option<Vec<Node>> {
    if !delimiter.is_match(text) {
        return None;
    }

    fn flush_text(out: &mut Vec<Node>, gap: &str, position: Option<Position>) {
        if !gap.is_empty() {
            out.push(Node::text(gap, position));
        }
    }

    let mut out = vec![];
    let mut cursor = 0;
    for m in delimiter.find_matches(text) {
        flush_text(&mut out, &text[cursor..m.start], position);
        out.push(Node::highlight(m.content, position));
        cursor = m.end;
    }
    flush_text(&mut out, &text[cursor..], position);

    Some(out)
}
