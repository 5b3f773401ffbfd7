//! Translation of positions between the model and the view.
//!
//! The converter never looks at how a host lays out its view; everything it
//! needs is the [`PositionMapper`] contract. [`Mapper`] is the table-backed
//! implementation filled in by [`crate::render::render`].

use crate::position::{ModelPosition, ModelRange, ViewPosition, ViewRange};
use std::collections::HashMap;
use tracing::warn;

/// Bidirectional mapping between model and view positions.
pub trait PositionMapper {
    fn to_view_position(&self, position: &ModelPosition) -> ViewPosition;

    fn to_model_position(&self, position: &ViewPosition) -> ModelPosition;

    fn to_view_range(&self, range: &ModelRange) -> ViewRange {
        ViewRange::new(
            self.to_view_position(&range.start),
            self.to_view_position(&range.end),
        )
    }

    fn to_model_range(&self, range: &ViewRange) -> ModelRange {
        ModelRange::new(
            self.to_model_position(&range.start),
            self.to_model_position(&range.end),
        )
    }
}

/// Position tables recorded while rendering a view.
///
/// Every gap of every rendered container is bound in both directions.
/// Unknown positions clamp to the end of the root so a walk over them ends.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    model_to_view: HashMap<ModelPosition, ViewPosition>,
    view_to_model: HashMap<ViewPosition, ModelPosition>,
    model_root_len: usize,
    view_root_len: usize,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a model gap to a view gap in both directions.
    pub fn bind(&mut self, model: ModelPosition, view: ViewPosition) {
        self.bind_model(model.clone(), view.clone());
        self.bind_view(view, model);
    }

    pub fn bind_model(&mut self, model: ModelPosition, view: ViewPosition) {
        self.model_to_view.insert(model, view);
    }

    pub fn bind_view(&mut self, view: ViewPosition, model: ModelPosition) {
        self.view_to_model.insert(view, model);
    }

    pub(crate) fn set_root_lengths(&mut self, model: usize, view: usize) {
        self.model_root_len = model;
        self.view_root_len = view;
    }
}

impl PositionMapper for Mapper {
    fn to_view_position(&self, position: &ModelPosition) -> ViewPosition {
        match self.model_to_view.get(position) {
            Some(view) => view.clone(),
            None => {
                warn!(%position, "unmapped model position, clamping to the view end");
                ViewPosition::at(&[], self.view_root_len)
            }
        }
    }

    fn to_model_position(&self, position: &ViewPosition) -> ModelPosition {
        match self.view_to_model.get(position) {
            Some(model) => model.clone(),
            None => {
                warn!(%position, "unmapped view position, clamping to the model end");
                ModelPosition::at(&[], self.model_root_len)
            }
        }
    }
}
