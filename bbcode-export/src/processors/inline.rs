use super::ConversionResult;
use crate::attribute_tree::{Node, TreeBuilder, TreeMerger};
use crate::mapping::PositionMapper;
use crate::model;
use crate::position::ModelPosition;
use crate::rules::{RuleRegistry, TagRule};
use tracing::trace;

/// Converts a run of consecutive model text nodes into tagged text.
pub struct InlineProcessor<'a> {
    rules: &'a RuleRegistry,
}

impl<'a> InlineProcessor<'a> {
    pub fn new(rules: &'a RuleRegistry) -> Self {
        Self { rules }
    }

    /// Consumes the text nodes following `position`.
    ///
    /// Returns `None` when no text node follows. Otherwise the model position
    /// resumes after the last text node and the view position after the view
    /// node rendering it.
    pub fn process(
        &self,
        model: &model::Fragment,
        mapper: &dyn PositionMapper,
        position: &ModelPosition,
    ) -> Option<ConversionResult> {
        let siblings = position.siblings(&model.children)?;
        let run: Vec<&model::Text> = siblings
            .get(position.offset()..)?
            .iter()
            .map_while(model::Node::as_text)
            .collect();
        if run.is_empty() {
            return None;
        }

        let last = position.offset() + run.len() - 1;
        let text = self.render_run(&run);
        let model_end = ModelPosition::at(position.parent(), last + 1);
        let view_end = mapper
            .to_view_position(&ModelPosition::at(position.parent(), last))
            .next();

        trace!(%position, nodes = run.len(), "inline run");
        Some(ConversionResult::new(text, model_end, view_end))
    }

    /// Builds, merges and serializes the attribute tree of one text run.
    pub fn render_run(&self, run: &[&model::Text]) -> String {
        self.serialize(&self.merge_run(run))
    }

    /// Loads a text run into an attribute tree, one leaf per text node, and
    /// merges it with the registered inline rules.
    pub fn merge_run(&self, run: &[&model::Text]) -> Node {
        let mut builder = TreeBuilder::new();
        let mut offset = 0;
        for text in run {
            let end = offset + text.len();
            builder.add_leaf(offset, end, text.attributes.clone(), Some(text.data.clone()));
            offset = end;
        }
        TreeMerger::new(self.rules).merge(builder.into_tree())
    }

    /// Depth-first serialization of a merged attribute tree.
    ///
    /// Tags open in attribute order and close in reverse; attributes without a
    /// rule produce no tags.
    pub fn serialize(&self, node: &Node) -> String {
        let attributes = node.attributes();
        let mut output = String::new();
        let mut closing = Vec::new();

        for name in attributes.keys() {
            let Some(rule) = self.rules.rule_for_attribute(name) else {
                continue;
            };
            if !rule.matches(attributes) {
                continue;
            }
            output.push_str(&rule.opening_tag(attributes));
            closing.push(rule.closing_tag(attributes));
        }

        if let Some(text) = node.text() {
            output.push_str(text);
        }
        for child in node.children() {
            output.push_str(&self.serialize(child));
        }
        for tag in closing.iter().rev() {
            output.push_str(tag);
        }
        output
    }
}
