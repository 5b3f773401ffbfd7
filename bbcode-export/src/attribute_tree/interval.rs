use crate::model::Attributes;

/// A maximal run of consecutive matching nodes that share equal values for
/// one rule's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInterval {
    pub(super) start: usize,
    pub(super) end: usize,
    pub(super) attributes: Attributes,
    /// Set once a non-matching leaf has been seen after this interval.
    pub(super) broken: bool,
}

impl AttributeInterval {
    pub fn new(start: usize, end: usize, attributes: Attributes) -> Self {
        Self {
            start,
            end,
            attributes,
            broken: false,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
