use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings of a [`SpanExtractor`](crate::extract::SpanExtractor).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorConfig {
    /// Rewrap merged comment lines that continue a sentence.
    #[serde(alias = "multi_line_merge")]
    pub multi_line_merge: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigSection {
    #[serde(default, alias = "multi_line_merge")]
    multi_line_merge: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    scopespan: Option<ConfigSection>,
    #[serde(flatten)]
    root: ConfigSection,
}

impl ExtractorConfig {
    pub fn multi_line_merge(mut self, enabled: bool) -> Self {
        self.multi_line_merge = enabled;
        self
    }

    /// Parse TOML. Keys may sit at the top level or in a `[scopespan]` table, the table wins.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).context("invalid scopespan configuration")?;
        let mut config = Self::default();
        config.apply(&file.root);
        if let Some(section) = &file.scopespan {
            config.apply(section);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("failed to load {}", path.display()))
    }

    fn apply(&mut self, section: &ConfigSection) {
        if let Some(v) = section.multi_line_merge {
            self.multi_line_merge = v;
        }
    }
}
