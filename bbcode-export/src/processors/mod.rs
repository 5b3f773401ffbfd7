//! Processors for the two kinds of content met during the lockstep walk.
//!
//! - [`InlineProcessor`] renders a run of text nodes through the attribute tree
//! - `BlockProcessor` wraps one element with its block rule's tags, or skips
//!   it when no rule applies

mod block;
mod inline;

pub(crate) use block::BlockProcessor;
pub use inline::InlineProcessor;

use crate::position::{ModelPosition, ViewPosition};

/// Output of one processing step: the produced text and where the walk
/// resumes in each tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub text: String,
    pub model_position: ModelPosition,
    pub view_position: ViewPosition,
}

impl ConversionResult {
    pub fn new(text: String, model_position: ModelPosition, view_position: ViewPosition) -> Self {
        Self {
            text,
            model_position,
            view_position,
        }
    }
}
