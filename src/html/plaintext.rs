// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reduce HTML to plain text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>").expect("LINE_BREAK regex should compile"));
static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("INLINE_SPACE regex should compile"));
static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?/?>|</[a-zA-Z][a-zA-Z0-9]*\s*>")
        .expect("TAG_TOKEN regex should compile")
});

/// Remove all markup and return the decoded text content.
///
/// The content of `script` and `style` elements is dropped as well.
///
/// ```
/// assert_eq!(textkit::strip_tags("foo <strong>bar</strong>"), "foo bar");
/// ```
pub fn strip_tags(html: &str) -> String {
    let escaped = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(html)
        .to_string();
    html_escape::decode_html_entities(&escaped).into_owned()
}

/// Convert HTML to plain text, keeping paragraph and line breaks.
///
/// `<br>` and `</p>` become newlines, other markup is removed, entities are
/// decoded and runs of spaces collapse to one.
///
/// ```
/// assert_eq!(textkit::html_to_plaintext("<p>hello</p> <p>world</p>"), "hello\n world");
/// ```
pub fn html_to_plaintext(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    let text = strip_tags(&with_breaks);
    INLINE_SPACE.replace_all(&text, " ").trim().to_string()
}

/// Guess whether `text` contains HTML markup.
///
/// ```
/// assert!(textkit::seems_html("a <b> c"));
/// assert!(!textkit::seems_html("a < b > c"));
/// ```
pub fn seems_html(text: &str) -> bool {
    TAG_TOKEN.is_match(text)
}
