// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Runtime configuration for the text helpers.
//!
//! Everything is optional; missing fields fall back to the built-in defaults.
//!
//! ```json
//! {
//!   "link_rules": [{ "regex": "#(\\d+)", "url": "https://tracker.example/{1}" }],
//!   "platypus_base_url": "https://events.example.org",
//!   "token_max_attempts": 50
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::html::{HtmlLinker, Sanitizer};
use crate::models::{LinkRule, SanitizerPolicy};
use crate::utils::token::{DEFAULT_MAX_ATTEMPTS, make_unique_token_with};

/// Configuration shared by sanitizers, linker and token generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Policy used for rich-text HTML.
    pub sanitizer: SanitizerPolicy,
    /// Rules for the default auto-linker, applied in order.
    pub link_rules: Vec<LinkRule>,
    /// Base URL that root-relative image sources resolve against in PDFs.
    pub platypus_base_url: String,
    /// Upper bound on draws when generating unique tokens.
    pub token_max_attempts: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            sanitizer: SanitizerPolicy::html(),
            link_rules: Vec::new(),
            platypus_base_url: "http://localhost".to_string(),
            token_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl TextConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse text configuration JSON")
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read text configuration: {:?}", path))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("Invalid text configuration in {:?}", path))?;
        tracing::debug!(path = ?path, rules = config.link_rules.len(), "loaded text configuration");
        Ok(config)
    }

    /// Compile the configured link rules.
    pub fn linker(&self) -> crate::Result<HtmlLinker> {
        HtmlLinker::new(&self.link_rules)
    }

    /// Sanitizer for rich-text HTML using the configured policy.
    pub fn html_sanitizer(&self) -> Sanitizer {
        Sanitizer::new(self.sanitizer.clone())
    }

    /// Sanitizer for the PDF renderer resolving images against `platypus_base_url`.
    pub fn platypus_sanitizer(&self) -> Result<Sanitizer> {
        let base = Url::parse(&self.platypus_base_url)
            .with_context(|| format!("Invalid platypus base URL: {}", self.platypus_base_url))?;
        Ok(Sanitizer::for_pdf(base))
    }

    /// Generate a UUID token accepted by `is_free`, bounded by `token_max_attempts`.
    pub fn make_unique_token(&self, is_free: impl FnMut(&str) -> bool) -> crate::Result<String> {
        make_unique_token_with(
            || uuid::Uuid::new_v4().to_string(),
            is_free,
            self.token_max_attempts,
        )
    }
}
