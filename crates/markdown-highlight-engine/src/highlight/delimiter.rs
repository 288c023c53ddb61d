use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
/// Compiled pattern for the default `!` marker.
static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&pattern_for(Delimiter::MARKER)).expect("valid regex"));

#[derive(Debug, thiserror::Error)]
pub enum DelimiterError {
    #[error("Invalid highlight marker {0:?}: markers must not be whitespace")]
    WhitespaceMarker(char),
    #[error("Failed to compile highlight pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The marker pair that bounds a highlighted span: `MM content MM`.
///
/// Content is one or more characters other than the marker, so matches are
/// non-greedy, never empty and never overlap.
#[derive(Debug, Clone)]
pub struct Delimiter {
    marker: char,
    pattern: Regex,
}

/// One delimited span found in a text value.
///
/// `start..end` is the byte range of the whole match including both marker
/// pairs; `content` is the text between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'t> {
    pub start: usize,
    pub end: usize,
    pub content: &'t str,
}

impl Delimiter {
    /// The default marker character.
    pub const MARKER: char = '!';
    /// How many markers form one side of the delimiter.
    pub const WIDTH: usize = 2;

    /// Builds a delimiter for a custom marker character.
    pub fn new(marker: char) -> Result<Self, DelimiterError> {
        if marker.is_whitespace() {
            return Err(DelimiterError::WhitespaceMarker(marker));
        }
        if marker == Self::MARKER {
            return Ok(Self::default());
        }
        Ok(Self {
            marker,
            pattern: Regex::new(&pattern_for(marker))?,
        })
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// The literal opening (and closing) sequence, e.g. `!!`.
    pub fn fence(&self) -> String {
        std::iter::repeat_n(self.marker, Self::WIDTH).collect()
    }

    /// Fast reject: true when `text` holds at least one delimited span.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// All non-overlapping spans in `text`, left to right.
    ///
    /// Each call starts a fresh scan; nothing carries over between calls.
    pub fn find_matches<'t>(&self, text: &'t str) -> impl Iterator<Item = Match<'t>> {
        self.pattern.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let content = caps.get(1)?;
            Some(Match {
                start: whole.start(),
                end: whole.end(),
                content: content.as_str(),
            })
        })
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self {
            marker: Self::MARKER,
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

/// `MM([^M]+)MM` with the marker escaped for the regex syntax.
fn pattern_for(marker: char) -> String {
    let m = regex::escape(&marker.to_string());
    format!("{m}{m}([^{m}]+){m}{m}")
}
