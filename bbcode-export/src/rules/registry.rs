//! Rule registry for inline and block conversion rules
//!
//! This module provides the registry every conversion reads its rules from.
//! Inline rules keep their registration order, which is the merge order for
//! rules of equal priority. Block rules are looked up by element name.

use super::{BlockRule, InlineRule, LinkRule, Priority, Side, StaticInlineRule};
use std::collections::HashMap;

/// Registry of conversion rules
///
/// # Examples
///
/// ```ignore
/// let mut registry = RuleRegistry::new();
/// registry.register_inline(StaticInlineRule::new("bold", "[b]", "[/b]"));
/// registry.register_block(BlockRule::model("paragraph", "", "\n\n"));
///
/// let rule = registry.rule_for_attribute("bold");
/// ```
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    inline: Vec<InlineRule>,
    block: HashMap<String, BlockRule>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        RuleRegistry {
            inline: Vec::new(),
            block: HashMap::new(),
        }
    }

    /// Register an inline rule
    ///
    /// A rule with the same name is replaced in place, keeping its slot in
    /// the merge order.
    pub fn register_inline(&mut self, rule: impl Into<InlineRule>) {
        let rule = rule.into();
        match self
            .inline
            .iter_mut()
            .find(|existing| existing.name() == rule.name())
        {
            Some(existing) => *existing = rule,
            None => self.inline.push(rule),
        }
    }

    /// Register a block rule, replacing any rule with the same name
    pub fn register_block(&mut self, rule: BlockRule) {
        self.block.insert(rule.name().to_string(), rule);
    }

    /// Get an inline rule by name
    pub fn inline(&self, name: &str) -> Option<&InlineRule> {
        self.inline.iter().find(|rule| rule.name() == name)
    }

    /// Get a block rule by name
    pub fn block(&self, name: &str) -> Option<&BlockRule> {
        self.block.get(name)
    }

    /// All inline rules in registration order
    pub fn inline_rules(&self) -> &[InlineRule] {
        &self.inline
    }

    /// Inline rules of one priority, in registration order
    pub fn inline_by_priority(&self, priority: Priority) -> impl Iterator<Item = &InlineRule> {
        self.inline
            .iter()
            .filter(move |rule| rule.priority() == priority)
    }

    /// The inline rule whose primary attribute is `attribute`
    ///
    /// When several rules share a primary attribute the first registered wins.
    pub fn rule_for_attribute(&self, attribute: &str) -> Option<&InlineRule> {
        self.inline
            .iter()
            .find(|rule| rule.primary_attribute() == attribute)
    }

    /// Find the block rule for a position
    ///
    /// The model element name is tried against model-side rules first, then
    /// the view element name against view-side rules.
    pub fn find_block(&self, model_name: Option<&str>, view_name: Option<&str>) -> Option<&BlockRule> {
        let on_model = model_name
            .and_then(|name| self.block.get(name))
            .filter(|rule| rule.side() == Side::Model);
        on_model.or_else(|| {
            view_name
                .and_then(|name| self.block.get(name))
                .filter(|rule| rule.side() == Side::View)
        })
    }

    /// List all block rule names (sorted)
    pub fn list_block_rules(&self) -> Vec<&BlockRule> {
        let mut rules: Vec<_> = self.block.values().collect();
        rules.sort_by(|a, b| a.name().cmp(b.name()));
        rules
    }

    /// Create a registry with the default BBCode rules
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_inline(StaticInlineRule::new("bold", "[b]", "[/b]"));
        registry.register_inline(StaticInlineRule::new("underline", "[u]", "[/u]"));
        registry.register_inline(StaticInlineRule::new("italic", "[i]", "[/i]"));
        registry.register_inline(LinkRule::new("linkHref"));

        registry.register_block(BlockRule::model("paragraph", "", "\n\n"));
        registry.register_block(BlockRule::model("softBreak", "", "\n"));
        registry.register_block(BlockRule::view("ul", "[list]", "[/list]"));
        registry.register_block(BlockRule::view("ol", "[list=1]", "[/list]"));
        registry.register_block(BlockRule::view("li", "[*]", "\n"));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
