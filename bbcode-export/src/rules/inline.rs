use super::{Priority, TagRule};
use crate::error::ExportError;
use crate::model::Attributes;

/// A rule that turns attributed text into a pair of tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRule {
    Static(StaticInlineRule),
    Link(LinkRule),
}

/// Fixed opening and closing tags for one or more attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticInlineRule {
    name: String,
    attributes: Vec<String>,
    opening: String,
    closing: String,
    priority: Priority,
}

impl StaticInlineRule {
    /// A rule matching the attribute of the same name, at low priority.
    pub fn new(
        name: impl Into<String>,
        opening: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            attributes: vec![name.clone()],
            name,
            opening: opening.into(),
            closing: closing.into(),
            priority: Priority::Low,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the required attribute names. The first one is the primary
    /// attribute used to pick the rule when tags are emitted.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        if attributes.is_empty() {
            return Err(ExportError::EmptyRule(self.name));
        }
        self.attributes = attributes;
        Ok(self)
    }
}

/// `[url=VALUE]...[/url]` around text carrying a link attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRule {
    name: String,
    attribute: Vec<String>,
    priority: Priority,
}

impl LinkRule {
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        Self {
            name: attribute.clone(),
            attribute: vec![attribute],
            priority: Priority::Highest,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    fn href(&self, attributes: &Attributes) -> Option<String> {
        attributes.get(&self.attribute[0]).map(ToString::to_string)
    }
}

impl InlineRule {
    pub fn name(&self) -> &str {
        match self {
            InlineRule::Static(rule) => &rule.name,
            InlineRule::Link(rule) => &rule.name,
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            InlineRule::Static(rule) => rule.priority,
            InlineRule::Link(rule) => rule.priority,
        }
    }

    /// Attribute names a node must carry, all of them, to match this rule.
    pub fn required_attributes(&self) -> &[String] {
        match self {
            InlineRule::Static(rule) => &rule.attributes,
            InlineRule::Link(rule) => &rule.attribute,
        }
    }

    pub fn primary_attribute(&self) -> &str {
        &self.required_attributes()[0]
    }

    pub fn matches(&self, attributes: &Attributes) -> bool {
        self.required_attributes()
            .iter()
            .all(|name| attributes.contains(name))
    }

    /// The subset of `attributes` this rule looks at, in rule order.
    pub fn matched_values(&self, attributes: &Attributes) -> Attributes {
        self.required_attributes()
            .iter()
            .filter_map(|name| Some((name.clone(), attributes.get(name)?.clone())))
            .collect()
    }

    /// Whether two attribute sets agree on every attribute of this rule.
    pub fn same_values(&self, left: &Attributes, right: &Attributes) -> bool {
        self.required_attributes()
            .iter()
            .all(|name| left.get(name) == right.get(name))
    }
}

impl TagRule for InlineRule {
    fn name(&self) -> &str {
        InlineRule::name(self)
    }

    fn opening_tag(&self, attributes: &Attributes) -> String {
        match self {
            InlineRule::Static(rule) => rule.opening.clone(),
            InlineRule::Link(rule) => match rule.href(attributes) {
                Some(href) => format!("[url={href}]"),
                None => "[url]".to_string(),
            },
        }
    }

    fn closing_tag(&self, _attributes: &Attributes) -> String {
        match self {
            InlineRule::Static(rule) => rule.closing.clone(),
            InlineRule::Link(_) => "[/url]".to_string(),
        }
    }
}

impl From<StaticInlineRule> for InlineRule {
    fn from(rule: StaticInlineRule) -> Self {
        InlineRule::Static(rule)
    }
}

impl From<LinkRule> for InlineRule {
    fn from(rule: LinkRule) -> Self {
        InlineRule::Link(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_rule_defaults_to_its_own_attribute() {
        let rule: InlineRule = StaticInlineRule::new("bold", "[b]", "[/b]").into();
        assert_eq!(rule.required_attributes(), &["bold".to_string()]);
        assert_eq!(rule.priority(), Priority::Low);
        assert!(rule.matches(&Attributes::new().with("bold", true)));
        assert!(!rule.matches(&Attributes::new().with("italic", true)));
    }

    #[test]
    fn empty_attribute_list_is_rejected() {
        let result = StaticInlineRule::new("nothing", "", "").with_attributes(Vec::<String>::new());
        assert!(matches!(result, Err(ExportError::EmptyRule(name)) if name == "nothing"));
    }

    #[test]
    fn multi_attribute_rule_needs_every_attribute() {
        let rule: InlineRule = StaticInlineRule::new("color", "[color]", "[/color]")
            .with_attributes(["fontColor", "fontSize"])
            .unwrap()
            .into();
        let partial = Attributes::new().with("fontColor", "red");
        let full = partial.clone().with("fontSize", 3i64);
        assert!(!rule.matches(&partial));
        assert!(rule.matches(&full));
        assert_eq!(rule.primary_attribute(), "fontColor");
        assert_eq!(rule.matched_values(&full), full);
    }

    #[test]
    fn link_tags_carry_the_value() {
        let rule: InlineRule = LinkRule::new("linkHref").into();
        let attributes = Attributes::new().with("linkHref", "http://x");
        assert_eq!(rule.opening_tag(&attributes), "[url=http://x]");
        assert_eq!(rule.closing_tag(&attributes), "[/url]");
        assert_eq!(rule.priority(), Priority::Highest);
    }

    #[test]
    fn values_compare_strictly() {
        let rule: InlineRule = LinkRule::new("linkHref").into();
        let a = Attributes::new().with("linkHref", "a").with("bold", true);
        let b = Attributes::new().with("linkHref", "a");
        let c = Attributes::new().with("linkHref", "b");
        assert!(rule.same_values(&a, &b));
        assert!(!rule.same_values(&a, &c));
    }
}
