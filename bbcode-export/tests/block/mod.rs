//! Block structure: paragraphs, soft breaks and lists.

mod lists;
mod paragraphs;
