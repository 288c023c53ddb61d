pub mod highlight;
pub mod io;
pub mod models;
pub mod parsing;
pub mod processor;
pub mod render;
pub mod visit;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use highlight::{Delimiter, DelimiterError, HighlightPlugin, highlight, split};
pub use io::*;
pub use models::*;
pub use parsing::parse_markdown;
pub use processor::{Processor, Transform};
pub use render::{DEFAULT_HIGHLIGHT_STYLE, Handler, HtmlRenderer, highlight_handler};
pub use visit::{Visit, replace_child, visit_text};
