//! Inline formatting through the full pipeline.

mod formatting;
mod links;
