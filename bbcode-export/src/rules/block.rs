use super::TagRule;
use crate::model::Attributes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tree a block rule reads its element name from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Model,
    View,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Model => "model",
            Side::View => "view",
        })
    }
}

/// Tags emitted around the content of one element.
///
/// Model-side rules match model element names (`paragraph`, `softBreak`);
/// view-side rules match view element names (`ul`, `li`) for structure that
/// only exists in the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    name: String,
    side: Side,
    opening: String,
    closing: String,
}

impl BlockRule {
    pub fn new(
        name: impl Into<String>,
        side: Side,
        opening: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            opening: opening.into(),
            closing: closing.into(),
        }
    }

    pub fn model(
        name: impl Into<String>,
        opening: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        Self::new(name, Side::Model, opening, closing)
    }

    pub fn view(
        name: impl Into<String>,
        opening: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        Self::new(name, Side::View, opening, closing)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

impl TagRule for BlockRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn opening_tag(&self, _attributes: &Attributes) -> String {
        self.opening.clone()
    }

    fn closing_tag(&self, _attributes: &Attributes) -> String {
        self.closing.clone()
    }
}
