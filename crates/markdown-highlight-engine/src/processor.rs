//! A small parse → transform → render pipeline.
//!
//! Stages are named tree rewrites run in registration order. Any
//! `Fn(&mut Node)` is a stage, so the plugin factory's output can be
//! registered directly.

use crate::models::Node;
use crate::parsing::parse_markdown;
use crate::render::HtmlRenderer;

/// A tree rewrite that runs as one pipeline stage.
pub trait Transform {
    fn transform(&self, tree: &mut Node);
}

impl<F> Transform for F
where
    F: Fn(&mut Node),
{
    fn transform(&self, tree: &mut Node) {
        self(tree)
    }
}

struct Stage {
    name: String,
    transform: Box<dyn Transform>,
}

/// Parses Markdown, runs the registered stages, renders HTML.
#[derive(Default)]
pub struct Processor {
    stages: Vec<Stage>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stage under `name`. Later stages see earlier stages' output.
    #[must_use]
    pub fn use_stage(mut self, name: impl Into<String>, transform: impl Transform + 'static) -> Self {
        self.stages.push(Stage {
            name: name.into(),
            transform: Box::new(transform),
        });
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn parse(&self, source: &str) -> Node {
        parse_markdown(source)
    }

    /// Runs every stage over `tree`, in order.
    pub fn run(&self, tree: &mut Node) {
        for stage in &self.stages {
            log::debug!("Running stage '{}'", stage.name);
            stage.transform.transform(tree);
        }
    }

    /// Parses and transforms `source`, returning the rewritten tree.
    pub fn run_source(&self, source: &str) -> Node {
        let mut tree = self.parse(source);
        self.run(&mut tree);
        tree
    }

    /// Full pipeline: parse, run all stages, render.
    pub fn process(&self, source: &str, renderer: &HtmlRenderer) -> String {
        renderer.render(&self.run_source(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightPlugin, highlight};
    use crate::models::Element;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn stages_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&log);
        let second = Rc::clone(&log);
        let processor = Processor::new()
            .use_stage("first", move |_: &mut Node| first.borrow_mut().push("first"))
            .use_stage("second", move |_: &mut Node| second.borrow_mut().push("second"));

        processor.run_source("text");

        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(processor.stage_names(), vec!["first", "second"]);
    }

    #[test]
    fn later_stages_see_earlier_output() {
        let processor = Processor::new()
            .use_stage(HighlightPlugin::NAME, highlight())
            .use_stage("count", |tree: &mut Node| {
                let count = tree.children().map_or(0, |c| c.len());
                if let Node::Other(el) = tree {
                    el.attributes.insert("count".into(), (count as u64).into());
                }
            });

        let tree = processor.run_source("a\n\nb");
        match tree {
            Node::Other(Element { attributes, .. }) => {
                assert_eq!(attributes.get("count"), Some(&2u64.into()));
            }
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn process_renders_highlight() {
        let processor = Processor::new().use_stage(HighlightPlugin::NAME, highlight());
        let html = processor.process("see !!this!!", &HtmlRenderer::with_highlight());
        insta::assert_snapshot!(
            html.trim_end(),
            @r#"<p>see <span style="color:red;font-weight:bold">this</span></p>"#
        );
    }

    #[test]
    fn no_stages_leaves_markers() {
        let html = Processor::new().process("see !!this!!", &HtmlRenderer::new());
        assert_eq!(html, "<p>see !!this!!</p>\n");
    }
}
