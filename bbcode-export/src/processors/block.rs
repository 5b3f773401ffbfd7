use super::ConversionResult;
use crate::converter::Walker;
use crate::error::ExportError;
use crate::model::Attributes;
use crate::position::{ModelPosition, ModelRange, TreeNode, ViewPosition, ViewRange};
use crate::rules::{BlockRule, RuleRegistry, Side, TagRule};
use tracing::{debug, warn};

/// Wraps elements with their block rule's tags, recursing into their content.
pub(crate) struct BlockProcessor<'a> {
    rules: &'a RuleRegistry,
}

impl<'a> BlockProcessor<'a> {
    pub(crate) fn new(rules: &'a RuleRegistry) -> Self {
        Self { rules }
    }

    pub(crate) fn process(
        &self,
        walker: &Walker<'_>,
        model_position: &ModelPosition,
        view_position: &ViewPosition,
    ) -> Result<ConversionResult, ExportError> {
        let model_name = model_position
            .node_after(walker.model_roots())
            .and_then(TreeNode::name);
        let view_name = view_position
            .node_after(walker.view_roots())
            .and_then(TreeNode::name);

        match self.rules.find_block(model_name, view_name) {
            Some(rule) => self.apply(rule, walker, model_position, view_position),
            None => {
                debug!(
                    model = model_name.unwrap_or("#text"),
                    view = view_name.unwrap_or("#text"),
                    "no block rule, skipping node"
                );
                Ok(self.skip(walker, model_position, view_position))
            }
        }
    }

    fn apply(
        &self,
        rule: &BlockRule,
        walker: &Walker<'_>,
        model_position: &ModelPosition,
        view_position: &ViewPosition,
    ) -> Result<ConversionResult, ExportError> {
        let mapper = walker.mapper();

        let (inner_model, inner_view, model_end, view_end) = match rule.side() {
            Side::Model => {
                let children = model_position
                    .node_after(walker.model_roots())
                    .map_or(0, |node| node.children().len());
                let inner_model = ModelRange::inside(model_position.path(), children);
                let inner_view = mapper.to_view_range(&inner_model);
                let model_end = ModelPosition::after(model_position.path());
                let view_end = mapper.to_view_position(&model_end);
                (inner_model, inner_view, model_end, view_end)
            }
            Side::View => {
                let children = view_position
                    .node_after(walker.view_roots())
                    .map_or(0, |node| node.children().len());
                let inner_view = ViewRange::inside(view_position.path(), children);
                let inner_model = mapper.to_model_range(&inner_view);
                let view_end = ViewPosition::after(view_position.path());
                let model_end = mapper.to_model_position(&view_end);
                (inner_model, inner_view, model_end, view_end)
            }
        };

        let content = walker.process_children(&inner_model, &inner_view)?;
        let none = Attributes::new();
        let text = format!(
            "{}{}{}",
            rule.opening_tag(&none),
            content.text,
            rule.closing_tag(&none)
        );
        Ok(ConversionResult::new(text, model_end, view_end))
    }

    /// Steps over a node without output, landing both sides on the later of
    /// the two independent ends.
    fn skip(
        &self,
        walker: &Walker<'_>,
        model_position: &ModelPosition,
        view_position: &ViewPosition,
    ) -> ConversionResult {
        let mapper = walker.mapper();
        let mut model_end = model_position.next();
        let mut view_end = match view_position.node_after(walker.view_roots()) {
            Some(_) => view_position.next(),
            None => view_position.clone(),
        };

        let view_model_end = mapper.to_model_position(&view_end);
        if view_model_end.is_before(&model_end) {
            view_end = mapper.to_view_position(&model_end);
            warn!(%model_end, %view_end, "view fell behind, resynchronizing");
        }
        if model_end.is_before(&view_model_end) {
            warn!(%model_end, %view_model_end, "model fell behind, resynchronizing");
            model_end = view_model_end;
        }

        ConversionResult::new(String::new(), model_end, view_end)
    }
}
