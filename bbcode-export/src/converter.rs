//! Lockstep conversion of a model/view fragment pair into BBCode.

use crate::error::ExportError;
use crate::mapping::PositionMapper;
use crate::model;
use crate::position::{ModelPosition, ModelRange, ViewPosition, ViewRange};
use crate::processors::{BlockProcessor, ConversionResult, InlineProcessor};
use crate::rules::RuleRegistry;
use crate::view;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when the model and view walks disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lockstep {
    /// Repair silently and keep converting.
    #[default]
    Resync,
    /// Fail with [`ExportError::Desynchronized`].
    Strict,
}

/// Converts model fragments into BBCode using a rule registry.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    rules: RuleRegistry,
    lockstep: Lockstep,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleRegistry) -> Self {
        Self {
            rules,
            lockstep: Lockstep::default(),
        }
    }

    pub fn with_lockstep(mut self, lockstep: Lockstep) -> Self {
        self.lockstep = lockstep;
        self
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    pub fn lockstep(&self) -> Lockstep {
        self.lockstep
    }

    /// Converts the pair, resynchronizing through any disagreement.
    ///
    /// Returns an empty string when either fragment is empty.
    pub fn convert(
        &self,
        model: &model::Fragment,
        view: &view::Fragment,
        mapper: &dyn PositionMapper,
    ) -> String {
        // Resync never reports desynchronization.
        self.run(model, view, mapper, Lockstep::Resync)
            .unwrap_or_else(|err| {
                warn!(%err, "conversion failed");
                String::new()
            })
    }

    /// Converts the pair under the configured lockstep policy.
    pub fn try_convert(
        &self,
        model: &model::Fragment,
        view: &view::Fragment,
        mapper: &dyn PositionMapper,
    ) -> Result<String, ExportError> {
        self.run(model, view, mapper, self.lockstep)
    }

    fn run(
        &self,
        model: &model::Fragment,
        view: &view::Fragment,
        mapper: &dyn PositionMapper,
        lockstep: Lockstep,
    ) -> Result<String, ExportError> {
        if model.is_empty() || view.is_empty() {
            return Ok(String::new());
        }

        let walker = Walker {
            model,
            view,
            mapper,
            lockstep,
            inline: InlineProcessor::new(&self.rules),
            block: BlockProcessor::new(&self.rules),
        };
        let model_range = ModelRange::inside(&[], model.children.len());
        let view_range = ViewRange::inside(&[], view.children.len());
        let result = walker.process_children(&model_range, &view_range)?;
        Ok(result.text.trim().to_string())
    }
}

/// State shared by one conversion walk.
pub(crate) struct Walker<'a> {
    model: &'a model::Fragment,
    view: &'a view::Fragment,
    mapper: &'a dyn PositionMapper,
    lockstep: Lockstep,
    inline: InlineProcessor<'a>,
    block: BlockProcessor<'a>,
}

impl<'a> Walker<'a> {
    pub(crate) fn model_roots(&self) -> &'a [model::Node] {
        &self.model.children
    }

    pub(crate) fn view_roots(&self) -> &'a [view::Node] {
        &self.view.children
    }

    pub(crate) fn mapper(&self) -> &'a dyn PositionMapper {
        self.mapper
    }

    /// Converts every node between the range starts and ends, advancing both
    /// trees together.
    pub(crate) fn process_children(
        &self,
        model_range: &ModelRange,
        view_range: &ViewRange,
    ) -> Result<ConversionResult, ExportError> {
        let mut model_position = model_range.start.clone();
        let mut view_position = view_range.start.clone();
        let mut output = String::new();

        while model_position.is_before(&model_range.end) && view_position.is_before(&view_range.end)
        {
            let Some(node) = model_position.node_after(self.model_roots()) else {
                break;
            };

            let result = if node.is_text() {
                self.inline
                    .process(self.model, self.mapper, &model_position)
                    .unwrap_or_else(|| self.stalled(&model_position, &view_position))
            } else {
                self.block.process(self, &model_position, &view_position)?
            };
            let result = self.check_progress(&model_position, result)?;

            output.push_str(&result.text);
            model_position = result.model_position;
            view_position = result.view_position;
        }

        Ok(ConversionResult::new(
            output,
            model_range.end.clone(),
            view_range.end.clone(),
        ))
    }

    fn stalled(&self, model: &ModelPosition, view: &ViewPosition) -> ConversionResult {
        ConversionResult::new(String::new(), model.clone(), view.clone())
    }

    /// Forces the walk past a step that did not move the model forward, and
    /// under strict lockstep verifies that both positions still agree.
    fn check_progress(
        &self,
        from: &ModelPosition,
        mut result: ConversionResult,
    ) -> Result<ConversionResult, ExportError> {
        if !from.is_before(&result.model_position) {
            if self.lockstep == Lockstep::Strict {
                return Err(self.desynchronized(&result.model_position, &result.view_position));
            }
            warn!(position = %from, "step did not advance, forcing past the node");
            result.model_position = from.next();
            result.view_position = self.mapper.to_view_position(&result.model_position);
            return Ok(result);
        }

        if self.lockstep == Lockstep::Strict {
            let expected = self.mapper.to_model_position(&result.view_position);
            if expected != result.model_position {
                return Err(self.desynchronized(&result.model_position, &result.view_position));
            }
        }

        debug!(model = %result.model_position, view = %result.view_position, "step");
        Ok(result)
    }

    fn desynchronized(&self, model: &ModelPosition, view: &ViewPosition) -> ExportError {
        ExportError::Desynchronized {
            model: model.to_string(),
            view: view.to_string(),
        }
    }
}
