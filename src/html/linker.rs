// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn textual references (ticket numbers, identifiers) into links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Segment, segments, tag_name};
use crate::error::{Error, Result};
use crate::models::LinkRule;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("PLACEHOLDER regex should compile"));
static CHAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("CHAR_REF regex should compile")
});

#[derive(Clone, Debug)]
struct CompiledRule {
    pattern: Regex,
    template: String,
}

impl CompiledRule {
    fn href(&self, caps: &Captures<'_>) -> String {
        let url = PLACEHOLDER.replace_all(&self.template, |placeholder: &Captures<'_>| {
            placeholder[1]
                .parse::<usize>()
                .ok()
                .and_then(|group| caps.get(group))
                .map_or("", |m| m.as_str())
                .to_string()
        });
        // Captures come from HTML text and are already entity-escaped.
        let decoded = html_escape::decode_html_entities(&url);
        html_escape::encode_double_quoted_attribute(&decoded).into_owned()
    }
}

/// Applies an ordered list of [`LinkRule`]s to the text of an HTML document.
///
/// Text already inside an `<a>` element is never linked again, and text
/// linked by an earlier rule is not seen by later ones.
///
/// ```
/// use textkit::{HtmlLinker, LinkRule};
///
/// let linker = HtmlLinker::new(&[LinkRule::new(r"#(\d+)", "https://tracker.example/{1}")]).unwrap();
/// assert_eq!(
///     linker.process("see #12"),
///     r#"see <a href="https://tracker.example/12">#12</a>"#
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct HtmlLinker {
    rules: Vec<CompiledRule>,
}

impl HtmlLinker {
    /// Compile `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first rule whose pattern does
    /// not compile.
    pub fn new(rules: &[LinkRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let pattern = Regex::new(&rule.regex).map_err(|source| Error::InvalidPattern {
                    pattern: rule.regex.clone(),
                    source,
                })?;
                Ok(CompiledRule {
                    pattern,
                    template: rule.url.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Link every match in the text runs of `html` outside existing anchors.
    pub fn process(&self, html: &str) -> String {
        if self.rules.is_empty() {
            return html.to_string();
        }
        let mut out = String::with_capacity(html.len());
        let mut anchor_depth = 0usize;
        for segment in segments(html) {
            match segment {
                Segment::Tag(tag) => {
                    let (name, closing) = tag_name(tag);
                    if name == "a" {
                        if closing {
                            anchor_depth = anchor_depth.saturating_sub(1);
                        } else if !tag.ends_with("/>") {
                            anchor_depth += 1;
                        }
                    }
                    out.push_str(tag);
                }
                Segment::Text(text) if anchor_depth > 0 => out.push_str(text),
                Segment::Text(text) => link_text(text, &self.rules, &mut out),
            }
        }
        out
    }
}

fn link_text(text: &str, rules: &[CompiledRule], out: &mut String) {
    let Some((rule, remaining)) = rules.split_first() else {
        out.push_str(text);
        return;
    };
    let refs: Vec<_> = CHAR_REF.find_iter(text).map(|m| m.range()).collect();
    let splits_ref = |at: usize| refs.iter().any(|r| r.start < at && at < r.end);
    let mut last = 0;
    for caps in rule.pattern.captures_iter(text) {
        let Some(found) = caps.get(0) else {
            continue;
        };
        if found.as_str().is_empty() {
            continue;
        }
        // A match may wrap a whole character reference but never cut one.
        if splits_ref(found.start()) || splits_ref(found.end()) {
            continue;
        }
        link_text(&text[last..found.start()], remaining, out);
        let href = rule.href(&caps);
        tracing::debug!(text = found.as_str(), %href, "auto-linking match");
        out.push_str(&format!("<a href=\"{href}\">{}</a>", found.as_str()));
        last = found.end();
    }
    link_text(&text[last..], remaining, out);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::HtmlLinker;
    use crate::error::Error;
    use crate::models::LinkRule;

    fn ticket_linker() -> HtmlLinker {
        HtmlLinker::new(&[LinkRule::new(r"#(\d+)", "https://gitclub.in/ticket/{1}")]).unwrap()
    }

    #[rstest]
    #[case(r#"<a href="https://cern.ch">#1234</a>"#, r#"<a href="https://cern.ch">#1234</a>"#)]
    #[case(
        r#"<p><a href="https://cern.ch">#1234</a> and #1234</p>"#,
        r#"<p><a href="https://cern.ch">#1234</a> and <a href="https://gitclub.in/ticket/1234">#1234</a></p>"#
    )]
    #[case(
        "#1234 and #123455",
        r#"<a href="https://gitclub.in/ticket/1234">#1234</a> and <a href="https://gitclub.in/ticket/123455">#123455</a>"#
    )]
    fn process_links_text_outside_anchors(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ticket_linker().process(input), expected);
    }

    // Linking twice changes nothing the second time.
    #[test]
    fn process_is_idempotent() {
        let linker = ticket_linker();
        let once = linker.process("<p>#1 and #2</p>");

        assert_eq!(linker.process(&once), once);
    }

    // Later rules do not re-link what an earlier rule produced.
    #[test]
    fn process_applies_rules_in_order() {
        let linker = HtmlLinker::new(&[
            LinkRule::new(r"PR-(\d+)", "https://code.example/pull/{1}"),
            LinkRule::new(r"\d+", "https://numbers.example/{0}"),
        ])
        .unwrap();

        assert_eq!(
            linker.process("PR-7 and 8"),
            r#"<a href="https://code.example/pull/7">PR-7</a> and <a href="https://numbers.example/8">8</a>"#
        );
    }

    // Attribute values are never rewritten.
    #[test]
    fn process_leaves_tag_attributes_alone() {
        let input = r##"<img alt="#99" src="x.png"> #99"##;

        assert_eq!(
            ticket_linker().process(input),
            r##"<img alt="#99" src="x.png"> <a href="https://gitclub.in/ticket/99">#99</a>"##
        );
    }

    // Numeric and named character references are never split by a match.
    #[rstest]
    #[case(
        "<p>&#1234; and #5</p>",
        r#"<p>&#1234; and <a href="https://gitclub.in/ticket/5">#5</a></p>"#
    )]
    #[case("&#x1F600;#7", r#"&#x1F600;<a href="https://gitclub.in/ticket/7">#7</a>"#)]
    #[case(
        "&amp;#8 &lt;",
        r#"&amp;<a href="https://gitclub.in/ticket/8">#8</a> &lt;"#
    )]
    fn process_keeps_character_references_intact(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ticket_linker().process(input), expected);
    }

    #[test]
    fn new_rejects_invalid_patterns() {
        let err = HtmlLinker::new(&[LinkRule::new("(unclosed", "x")]).unwrap_err();

        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    // Template characters are escaped for the attribute.
    #[test]
    fn href_is_attribute_escaped() {
        let linker = HtmlLinker::new(&[LinkRule::new(r"T(\d+)", "https://x.example/?a=1&id={1}")]).unwrap();

        assert_eq!(linker.process("T5"), r#"<a href="https://x.example/?a=1&amp;id=5">T5</a>"#);
    }
}
