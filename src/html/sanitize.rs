// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Allow-list HTML sanitizer built on `ammonia`.
//!
//! Markup is parsed, filtered against a [`SanitizerPolicy`] and serialized
//! again. On top of what `ammonia` does this module:
//! - rebuilds `style` attributes from allow-listed declarations only;
//! - emits style values containing `"` single-quoted, so font lists stay
//!   readable (`style='font-family:"Liberation Serif",serif;'`);
//! - keeps `&quot;` in text content as written;
//! - optionally rewrites relative image URLs and emits XHTML void tags for the
//!   PDF renderer.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use super::{Segment, segments};
use crate::models::SanitizerPolicy;

/// Stand-in for `&quot;` in text runs while the fragment is re-serialized.
const QUOTE_SENTINEL: char = '\u{E000}';

/// Elements whose content `ammonia` always removes; they can never be allowed.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)style="([^"]*)""#).expect("STYLE_ATTR regex should compile"));
static VOID_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(br|hr|img)((?:\s+[^\s=>/]+(?:="[^"]*")?)*)\s*/?>"#)
        .expect("VOID_TAG regex should compile")
});
static LOCALHOST: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost").expect("localhost base URL should parse"));
static HTML: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::html);
static PLATYPUS: LazyLock<Sanitizer> = LazyLock::new(|| Sanitizer::for_pdf(LOCALHOST.clone()));

/// Sanitize rich-text HTML with the built-in policy.
///
/// Never fails: malformed markup is repaired by the parser. Idempotent.
///
/// ```
/// let clean = textkit::sanitize_html(r#"<p onclick="x()">hi<script>evil()</script></p>"#);
/// assert_eq!(clean, "<p>hi</p>");
/// ```
pub fn sanitize_html(html: &str) -> String {
    HTML.clean(html)
}

/// Sanitize HTML for the PDF paragraph renderer.
///
/// Root-relative and protocol-relative image sources become absolute
/// `http://` URLs and void elements are written as `<img .../>`.
pub fn sanitize_for_platypus(html: &str) -> String {
    PLATYPUS.clean(html)
}

/// A configured sanitizer.
#[derive(Clone, Debug)]
pub struct Sanitizer {
    policy: SanitizerPolicy,
    image_base: Option<Url>,
    xhtml: bool,
}

impl Sanitizer {
    pub fn new(policy: SanitizerPolicy) -> Self {
        Self {
            policy,
            image_base: None,
            xhtml: false,
        }
    }

    /// Rich-text policy, see [`SanitizerPolicy::html`].
    pub fn html() -> Self {
        Self::new(SanitizerPolicy::html())
    }

    /// Policy for rendered Markdown.
    pub fn markdown() -> Self {
        Self::new(SanitizerPolicy::markdown())
    }

    /// PDF renderer subset; relative image sources are resolved against `image_base`.
    pub fn for_pdf(image_base: Url) -> Self {
        Self {
            policy: SanitizerPolicy::platypus(),
            image_base: Some(image_base),
            xhtml: true,
        }
    }

    pub fn policy(&self) -> &SanitizerPolicy {
        &self.policy
    }

    /// Sanitize `html` according to this sanitizer's policy.
    pub fn clean(&self, html: &str) -> String {
        let protected = protect_text_quotes(html);
        let cleaned = self.builder().clean(&protected).to_string();

        let mut out = STYLE_ATTR
            .replace_all(&cleaned, |caps: &Captures| {
                let value = &caps[2];
                if value.contains("&quot;") && !value.contains('\'') {
                    format!("{}style='{}'", &caps[1], value.replace("&quot;", "\""))
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
        if self.xhtml {
            out = VOID_TAG.replace_all(&out, "<$1$2/>").trim().to_string();
        }
        out.replace(QUOTE_SENTINEL, "&quot;")
    }

    fn builder(&self) -> ammonia::Builder<'_> {
        let tags: HashSet<&str> = self
            .policy
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| {
                let stripped = CONTENT_STRIPPED_TAGS.contains(tag);
                if stripped {
                    tracing::warn!(tag, "ignoring allow-listed tag whose content is always removed");
                }
                !stripped
            })
            .collect();
        let generic: HashSet<&str> = self.policy.generic_attributes.iter().map(String::as_str).collect();
        let per_tag: HashMap<&str, HashSet<&str>> = self
            .policy
            .tag_attributes
            .iter()
            .map(|(tag, attrs)| (tag.as_str(), attrs.iter().map(String::as_str).collect()))
            .collect();

        let styles = self.policy.style_properties.clone();
        let image_base = self.image_base.clone();

        let mut builder = ammonia::Builder::default();
        builder
            .tags(tags)
            .generic_attributes(generic)
            .tag_attributes(per_tag)
            .link_rel(None)
            .url_relative(ammonia::UrlRelative::PassThrough)
            .attribute_filter(move |element, attribute, value| match (element, attribute) {
                (_, "style") => filter_style(value, &styles).map(Cow::Owned),
                ("img", "src") => Some(match &image_base {
                    Some(base) => absolutize_image_src(base, value),
                    None => Cow::Borrowed(value),
                }),
                _ => Some(Cow::Borrowed(value)),
            });
        builder
    }
}

/// Rebuild a `style` value from its allowed declarations.
///
/// Each kept declaration is written as `name:value;` with the value's
/// original spacing. Returns `None` when nothing survives.
pub(crate) fn filter_style(value: &str, allowed: &BTreeSet<String>) -> Option<String> {
    let mut out = String::with_capacity(value.len() + 1);
    for declaration in split_declarations(value) {
        let Some((name, val)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let val = val.trim_end();
        if val.trim().is_empty() {
            continue;
        }
        if !allowed.contains(&name) || is_unsafe_css_value(val) {
            tracing::debug!(property = %name, "dropping style declaration");
            continue;
        }
        out.push_str(&name);
        out.push(':');
        out.push_str(val);
        out.push(';');
    }
    (!out.is_empty()).then_some(out)
}

/// Split on `;` outside quotes and parentheses.
fn split_declarations(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in value.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

fn is_unsafe_css_value(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.contains("expression(") || lower.contains("javascript:") || lower.contains("url(")
}

fn absolutize_image_src<'u>(base: &Url, src: &'u str) -> Cow<'u, str> {
    if !src.starts_with('/') {
        return Cow::Borrowed(src);
    }
    match base.join(src) {
        Ok(url) => {
            tracing::debug!(%src, resolved = %url, "resolved relative image source");
            Cow::Owned(url.to_string())
        }
        Err(_) => Cow::Borrowed(src),
    }
}

fn protect_text_quotes(html: &str) -> Cow<'_, str> {
    if !html.contains("&quot;") {
        return Cow::Borrowed(html);
    }
    let sentinel = QUOTE_SENTINEL.to_string();
    let mut out = String::with_capacity(html.len());
    for segment in segments(html) {
        match segment {
            Segment::Tag(tag) => out.push_str(tag),
            Segment::Text(text) => out.push_str(&text.replace("&quot;", &sentinel)),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{Sanitizer, filter_style, sanitize_for_platypus, sanitize_html};
    use crate::models::SanitizerPolicy;

    // Well-formed image maps pass through byte for byte.
    #[test]
    fn sanitize_html_keeps_image_maps() {
        let html = r##"
        <img src="example.jpg" usemap="#image-map">
        <map name="image-map">
            <area alt="test" coords="1,2,3,4" href="//example.com" shape="rect" target="_blank" title="test">
        </map>
    "##;

        assert_eq!(sanitize_html(html), html);
    }

    // Escaped quotes inside style values become literal quotes in a single-quoted attribute.
    #[rstest]
    #[case(
        r#"<span style='font-family:"Liberation Serif",serif;'>test</span>"#,
        r#"<span style='font-family:"Liberation Serif",serif;'>test</span>"#
    )]
    #[case(
        r#"<span style="font-family:&quot;Liberation Serif&quot;,serif">test</span>"#,
        r#"<span style='font-family:"Liberation Serif",serif;'>test</span>"#
    )]
    #[case(
        r#"<span style="font-family:&quot;Liberation Serif&quot;,serif;font-size:14px">test</span>"#,
        r#"<span style='font-family:"Liberation Serif",serif;font-size:14px;'>test</span>"#
    )]
    #[case("<span>test &quot;</span>", "<span>test &quot;</span>")]
    fn sanitize_html_normalizes_style_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_html(input), expected);
    }

    // Unknown CSS properties are dropped while safe ones are kept.
    #[test]
    fn sanitize_html_filters_style_properties() {
        let out = sanitize_html(r#"<img src="foo.png" style="wtf: isthis; text-align: center;">"#);

        assert_eq!(out, r#"<img src="foo.png" style="text-align: center;">"#);
    }

    // Disallowed elements, attributes and script content disappear.
    #[test]
    fn sanitize_html_removes_scripts_and_handlers() {
        let out = sanitize_html(r#"<div onmouseover="steal()">ok<script>alert(1)</script><iframe src="x"></iframe></div>"#);

        assert_eq!(out, "<div>ok</div>");
    }

    #[test]
    fn sanitize_html_rejects_javascript_links() {
        let out = sanitize_html(r#"<a href="javascript:alert(1)">x</a>"#);

        assert_eq!(out, "<a>x</a>");
    }

    // Protocol- and root-relative image sources are made absolute.
    #[test]
    fn sanitize_for_platypus_resolves_relative_urls() {
        let html = "<p>\n    <img src=\"https://example.com/test.png\"/>\n    <img src=\"//example.com/test.png\"/>\n    <img src=\"/test.png\"/>\n</p>";
        let expected = "<p>\n    <img src=\"https://example.com/test.png\"/>\n    <img src=\"http://example.com/test.png\"/>\n    <img src=\"http://localhost/test.png\"/>\n</p>";

        assert_eq!(sanitize_for_platypus(html), expected);
    }

    // Tags outside the PDF subset are unwrapped.
    #[test]
    fn sanitize_for_platypus_unwraps_unsupported_tags() {
        let out = sanitize_for_platypus("  <table><tr><td><b>x</b><br></td></tr></table>  ");

        assert_eq!(out, "<b>x</b><br/>");
    }

    #[test]
    fn filter_style_returns_none_when_nothing_is_allowed() {
        let allowed = SanitizerPolicy::html().style_properties;

        assert_eq!(filter_style("position: fixed; z-index: 9", &allowed), None);
        assert_eq!(
            filter_style("color: red; background-color: url(x)", &allowed),
            Some("color: red;".to_string())
        );
    }

    // Semicolons inside quoted font names do not split declarations.
    #[test]
    fn filter_style_keeps_quoted_semicolons_together() {
        let allowed = SanitizerPolicy::html().style_properties;

        assert_eq!(
            filter_style(r#"font-family: "A;B", serif"#, &allowed),
            Some(r#"font-family: "A;B", serif;"#.to_string())
        );
    }

    // A custom policy only keeps what it lists.
    #[test]
    fn custom_policy_limits_tags() {
        let mut policy = SanitizerPolicy::html();
        policy.tags.retain(|t| t == "b");
        let sanitizer = Sanitizer::new(policy);

        assert_eq!(sanitizer.clean("<p><b>x</b><i>y</i></p>"), "<b>x</b>y");
    }

    proptest! {
        #[test]
        fn sanitize_html_is_idempotent(input in r#"[a-z <>/="&;]{0,40}"#) {
            let once = sanitize_html(&input);
            prop_assert_eq!(sanitize_html(&once), once);
        }

        // No generated input can smuggle a script element through.
        #[test]
        fn sanitize_html_never_emits_script(body in "[a-z<>/ ]{0,30}") {
            let out = sanitize_html(&format!("<script>{body}</script><p>{body}</p>"));
            prop_assert!(!out.contains("<script"));
        }
    }
}
