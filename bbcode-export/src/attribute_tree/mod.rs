//! Interval tree of attributed text used to merge inline formatting.
//!
//! A text run is loaded as one leaf per model text node under a synthetic
//! root, then [`TreeMerger`] restructures it rule by rule so shared attributes
//! move up into wrapper nodes. Serializing the merged tree depth-first yields
//! correctly nested tags.

mod builder;
mod interval;
mod merger;
mod node;

pub use builder::TreeBuilder;
pub use interval::AttributeInterval;
pub use merger::{resolve_intervals, TreeMerger};
pub use node::{Node, NodeId};
