//! Banned-substring filter

use figment::Figment;
use serde::{Deserialize, Serialize};

/// `[censor]` configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CensorConfig {
    /// Substrings that mark a text as censored, compared case-insensitively
    #[serde(default = "default_banned")]
    pub banned: Vec<String>,
}

impl Default for CensorConfig {
    fn default() -> Self {
        Self {
            banned: default_banned(),
        }
    }
}

fn default_banned() -> Vec<String> {
    ["qwerty", "йцуке", "123"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl CensorConfig {
    /// Read the `[censor]` section, falling back to defaults when absent
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        figment.focus("censor").extract()
    }
}

/// Immutable banned-word filter, built once at startup
#[derive(Debug, Clone)]
pub struct Censor {
    // lower-cased, non-empty
    banned: Vec<String>,
}

impl Censor {
    pub fn new<I, S>(banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = banned
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { banned }
    }

    /// Whether `text` contains any banned substring, ignoring case
    pub fn is_censored(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.banned.iter().any(|word| text.contains(word.as_str()))
    }

    pub fn banned(&self) -> &[String] {
        &self.banned
    }
}

impl From<CensorConfig> for Censor {
    fn from(config: CensorConfig) -> Self {
        Self::new(config.banned)
    }
}

impl Default for Censor {
    fn default() -> Self {
        CensorConfig::default().into()
    }
}
