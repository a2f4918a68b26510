// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Auto-link rule: a pattern plus the URL template its matches link to.

use serde::{Deserialize, Serialize};

/// Pattern/URL-template pair used by [`crate::html::HtmlLinker`].
///
/// `{N}` in `url` is replaced with capture group `N` of the match; `{0}` is
/// the whole match. Unknown groups expand to an empty string.
///
/// # Examples
///
/// ```
/// use textkit::LinkRule;
///
/// let rule = LinkRule::new(r"#(\d+)", "https://tracker.example/ticket/{1}");
/// assert_eq!(rule.regex, r"#(\d+)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub regex: String,
    pub url: String,
}

impl LinkRule {
    pub fn new(regex: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LinkRule;

    // Rules are read from plain `{regex, url}` JSON objects.
    #[test]
    fn link_rule_deserializes_from_regex_and_url_keys() {
        let json = r##"{"regex": "#(\\d+)", "url": "https://tracker.example/{1}"}"##;
        let rule: LinkRule = serde_json::from_str(json).unwrap();

        assert_eq!(rule, LinkRule::new(r"#(\d+)", "https://tracker.example/{1}"));
    }
}
