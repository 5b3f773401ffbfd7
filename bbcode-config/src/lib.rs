//! Shared configuration loader for the bbcode toolchain.
//!
//! `defaults/bbcode.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BbcodeConfig`].

use bbcode_export::{
    BlockRule, Converter, ExportError, InlineRule, LinkRule, Lockstep, Priority, RuleRegistry,
    Side, StaticInlineRule,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/bbcode.default.toml");

/// Top-level configuration consumed by bbcode applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BbcodeConfig {
    pub convert: ConvertConfig,
    pub rules: RulesConfig,
}

impl BbcodeConfig {
    /// Builds a converter carrying the configured rules and lockstep policy.
    pub fn converter(&self) -> Result<Converter, ExportError> {
        let rules = RuleRegistry::try_from(&self.rules)?;
        Ok(Converter::with_rules(rules).with_lockstep(self.convert.lockstep))
    }
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub lockstep: Lockstep,
}

/// Rule tables keyed by rule name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub inline: HashMap<String, InlineRuleConfig>,
    #[serde(default)]
    pub block: HashMap<String, BlockRuleConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineRuleKind {
    #[default]
    Static,
    Link,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineRuleConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub kind: InlineRuleKind,
    /// Defaults to `low` for static rules and `highest` for links.
    pub priority: Option<Priority>,
    /// Static rules: required attribute names, defaulting to the rule name.
    pub attributes: Option<Vec<String>>,
    /// Link rules: the attribute holding the target, defaulting to the rule name.
    pub attribute: Option<String>,
    #[serde(default)]
    pub opening: String,
    #[serde(default)]
    pub closing: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRuleConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
    pub side: Side,
    /// Element name to match, defaulting to the rule name.
    pub element: Option<String>,
    #[serde(default)]
    pub opening: String,
    #[serde(default)]
    pub closing: String,
}

fn enabled() -> bool {
    true
}

impl InlineRuleConfig {
    fn to_rule(&self, name: &str) -> Result<InlineRule, ExportError> {
        let rule: InlineRule = match self.kind {
            InlineRuleKind::Static => {
                let attributes = self
                    .attributes
                    .clone()
                    .unwrap_or_else(|| vec![name.to_string()]);
                StaticInlineRule::new(name, self.opening.as_str(), self.closing.as_str())
                    .with_priority(self.priority.unwrap_or(Priority::Low))
                    .with_attributes(attributes)?
                    .into()
            }
            InlineRuleKind::Link => {
                let attribute = self.attribute.as_deref().unwrap_or(name);
                LinkRule::new(attribute)
                    .named(name)
                    .with_priority(self.priority.unwrap_or(Priority::Highest))
                    .into()
            }
        };
        Ok(rule)
    }
}

impl TryFrom<&RulesConfig> for RuleRegistry {
    type Error = ExportError;

    fn try_from(config: &RulesConfig) -> Result<Self, Self::Error> {
        let mut registry = RuleRegistry::new();

        let mut inline: Vec<_> = config
            .inline
            .iter()
            .filter(|(_, rule)| rule.enabled)
            .collect();
        inline.sort_by(|(a_name, a), (b_name, b)| (a.order, a_name).cmp(&(b.order, b_name)));
        for (name, rule) in inline {
            registry.register_inline(rule.to_rule(name)?);
        }

        for (name, rule) in config.block.iter().filter(|(_, rule)| rule.enabled) {
            let element = rule.element.as_deref().unwrap_or(name);
            registry.register_block(BlockRule::new(
                element,
                rule.side,
                rule.opening.as_str(),
                rule.closing.as_str(),
            ));
        }

        Ok(registry)
    }
}

/// Failure to turn configuration into a working converter.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid rule definition: {0}")]
    Rules(#[from] ExportError),
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BbcodeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Build the configuration and turn it into a converter in one step.
    pub fn build_converter(self) -> Result<Converter, ConfigLoadError> {
        Ok(self.build()?.converter()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BbcodeConfig, ConfigError> {
    Loader::new().build()
}
