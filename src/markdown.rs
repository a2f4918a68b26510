// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Markdown rendering to sanitized HTML.
//!
//! Raw HTML in the source is shown as text, never rendered. The rendered
//! output is passed through the Markdown sanitizer policy before returning.
//! `$…$` math spans are passed through literally so client-side math
//! renderers see the original TeX.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, html};
use regex::Regex;

use crate::html::{HtmlLinker, Sanitizer};

static MATH_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[^$\n]+\$").expect("MATH_SPAN regex should compile"));

/// Math spans are swapped for characters from Supplementary Private Use Area-A
/// while the Markdown is rendered.
const PLACEHOLDER_BASE: u32 = 0xF0000;
const PLACEHOLDER_LIMIT: u32 = 0xFFFFD;

/// Optional Markdown features.
#[derive(Clone, Debug)]
pub enum Extension {
    /// Pipe tables.
    Tables,
    /// `~~strikethrough~~`.
    Strikethrough,
    /// Every newline inside a paragraph becomes `<br>`.
    Nl2br,
    /// Auto-link rendered text with the given linker.
    AutoLink(HtmlLinker),
}

/// Render `text` as Markdown and return sanitized HTML.
///
/// ```
/// use textkit::render_markdown;
///
/// assert_eq!(render_markdown("*coconut*", &[]), "<p><em>coconut</em></p>");
/// assert_eq!(render_markdown("<b>hi</b>", &[]), "<p>&lt;b&gt;hi&lt;/b&gt;</p>");
/// ```
pub fn render_markdown(text: &str, extensions: &[Extension]) -> String {
    let mut options = Options::empty();
    let mut nl2br = false;
    let mut linkers = Vec::new();
    for extension in extensions {
        match extension {
            Extension::Tables => options.insert(Options::ENABLE_TABLES),
            Extension::Strikethrough => options.insert(Options::ENABLE_STRIKETHROUGH),
            Extension::Nl2br => nl2br = true,
            Extension::AutoLink(linker) => linkers.push(linker),
        }
    }

    let (source, math) = protect_math(&loosen_atx_headings(text));
    let parser = Parser::new_ext(&source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::SoftBreak if nl2br => Event::HardBreak,
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    for linker in linkers {
        html_output = linker.process(&html_output);
    }

    let cleaned = Sanitizer::markdown().clean(&html_output);
    restore_math(&cleaned, &math).trim().to_string()
}

fn placeholder(index: usize) -> Option<char> {
    u32::try_from(index)
        .ok()
        .and_then(|i| PLACEHOLDER_BASE.checked_add(i))
        .filter(|&code| code <= PLACEHOLDER_LIMIT)
        .and_then(char::from_u32)
}

fn is_placeholder(ch: char) -> bool {
    (PLACEHOLDER_BASE..=PLACEHOLDER_LIMIT).contains(&u32::from(ch))
}

/// Replace each unescaped `$…$` span on a single line with a placeholder char.
///
/// Input that already contains placeholder characters is returned unchanged.
fn protect_math(text: &str) -> (String, Vec<String>) {
    let mut spans = Vec::new();
    if text.chars().any(is_placeholder) {
        return (text.to_string(), spans);
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in MATH_SPAN.find_iter(text) {
        if text[..found.start()].ends_with('\\') {
            continue;
        }
        let Some(marker) = placeholder(spans.len()) else {
            break;
        };
        out.push_str(&text[last..found.start()]);
        out.push(marker);
        spans.push(found.as_str().to_string());
        last = found.end();
    }
    out.push_str(&text[last..]);
    if !spans.is_empty() {
        tracing::debug!(count = spans.len(), "passing math spans through literally");
    }
    (out, spans)
}

/// Put math spans back, escaping only `&` and `<`.
fn restore_math(html: &str, spans: &[String]) -> String {
    if spans.is_empty() {
        return html.to_string();
    }
    let mut out = String::with_capacity(html.len());
    for ch in html.chars() {
        let span = is_placeholder(ch)
            .then(|| spans.get((u32::from(ch) - PLACEHOLDER_BASE) as usize))
            .flatten();
        match span {
            Some(span) => out.push_str(&html_escape::encode_text_minimal(span)),
            None => out.push(ch),
        }
    }
    out
}

/// Insert the space CommonMark requires after heading hashes (`#1234` → `# 1234`).
///
/// Lines inside fenced code blocks and indented code are left alone.
fn loosen_atx_headings(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut fence: Option<&str> = None;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let trimmed = &line[indent..];

        if indent < 4 {
            for marker in ["```", "~~~"] {
                if trimmed.starts_with(marker) {
                    fence = match fence {
                        Some(open) if open == marker => None,
                        None => Some(marker),
                        open => open,
                    };
                }
            }
        }

        let hashes = trimmed.len() - trimmed.trim_start_matches('#').len();
        let needs_space = fence.is_none()
            && indent < 4
            && (1..=6).contains(&hashes)
            && trimmed[hashes..].starts_with(|c: char| !c.is_whitespace());
        if needs_space {
            out.push_str(&line[..indent + hashes]);
            out.push(' ');
            out.push_str(&trimmed[hashes..]);
        } else {
            out.push_str(line);
        }
    }
    out
}
