//! Grok pattern definitions as stored in the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category of a catalog pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Common application and system log formats.
    #[default]
    Standard,
    /// User-defined patterns created through the API.
    Custom,
    /// IDS/WAF/auth formats.
    Security,
    /// Cloud provider service formats.
    Cloud,
    /// Infrastructure-as-code and config management formats.
    Infrastructure,
    /// Streaming and messaging platform formats.
    Streaming,
    /// Blockchain node formats.
    Blockchain,
}

/// A named, prioritized Grok pattern.
///
/// `pattern` may reference `%{NAME}` / `%{NAME:capture}` placeholders;
/// `custom_patterns` defines placeholder names local to this pattern's
/// compilation scope. Higher `priority` patterns are tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrokPatternDefinition {
    /// Unique name within the catalog.
    pub name: String,
    /// The Grok pattern body.
    pub pattern: String,
    /// Matching priority; higher values are tried first.
    #[serde(default, skip_serializing_if = "priority_is_default")]
    pub priority: i32,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Pattern category.
    #[serde(rename = "type", default, skip_serializing_if = "type_is_default")]
    pub pattern_type: PatternType,
    /// Local placeholder definitions used only by this pattern.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_patterns: BTreeMap<String, String>,
}

fn priority_is_default(priority: &i32) -> bool {
    *priority == 0
}

fn type_is_default(pattern_type: &PatternType) -> bool {
    *pattern_type == PatternType::Standard
}

impl GrokPatternDefinition {
    /// Creates a definition with the given name and pattern body.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            priority: 0,
            description: String::new(),
            pattern_type: PatternType::default(),
            custom_patterns: BTreeMap::new(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the pattern type.
    #[must_use]
    pub const fn with_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = pattern_type;
        self
    }

    /// Adds a local custom placeholder definition.
    #[must_use]
    pub fn with_custom(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.custom_patterns.insert(name.into(), body.into());
        self
    }
}
