//! Conversion rules and the registry that holds them.
//!
//! Inline rules turn attributed text into tags and are merged in priority
//! order. Block rules wrap the content of an element, matched by name on
//! either the model or the view side.

mod block;
mod inline;
mod priority;
mod registry;

pub use block::{BlockRule, Side};
pub use inline::{InlineRule, LinkRule, StaticInlineRule};
pub use priority::Priority;
pub use registry::RuleRegistry;

use crate::model::Attributes;

/// Shared contract of every tag-producing rule.
pub trait TagRule {
    fn name(&self) -> &str;

    fn opening_tag(&self, attributes: &Attributes) -> String;

    fn closing_tag(&self, attributes: &Attributes) -> String;
}
