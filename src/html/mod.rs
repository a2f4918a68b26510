// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! HTML helpers: allow-list sanitizing, plaintext reduction and auto-linking.
//!
//! Sanitizing goes through a real parser (`ammonia`/html5ever). The small
//! markup scanner below is only used where the input must be preserved byte
//! for byte outside the touched text runs.

pub mod linker;
pub mod plaintext;
pub mod sanitize;

pub use linker::HtmlLinker;
pub use plaintext::{html_to_plaintext, seems_html, strip_tags};
pub use sanitize::{Sanitizer, sanitize_for_platypus, sanitize_html};

/// A run of raw markup or of text between tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Tag(&'a str),
}

/// Iterator splitting an HTML string into tags and text runs.
///
/// A tag starts at `<` followed by a letter, `/` or `!` and ends at the next
/// `>` outside a quoted attribute value. Comments end at `-->`. A stray `<`
/// (as in `1 < 2`) stays part of the text.
pub(crate) struct Segments<'a> {
    rest: &'a str,
}

pub(crate) fn segments(html: &str) -> Segments<'_> {
    Segments { rest: html }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (segment, len) = match tag_start(self.rest) {
            Some(0) => {
                let len = tag_len(self.rest);
                (Segment::Tag(&self.rest[..len]), len)
            }
            Some(start) => (Segment::Text(&self.rest[..start]), start),
            None => (Segment::Text(self.rest), self.rest.len()),
        };
        self.rest = &self.rest[len..];
        Some(segment)
    }
}

fn tag_start(html: &str) -> Option<usize> {
    let bytes = html.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let next = bytes.get(i + 1).copied();
        (b == b'<' && matches!(next, Some(c) if c.is_ascii_alphabetic() || c == b'/' || c == b'!'))
            .then_some(i)
    })
}

fn tag_len(tag: &str) -> usize {
    if tag.starts_with("<!--") {
        return tag.find("-->").map_or(tag.len(), |end| end + 3);
    }
    let mut quote: Option<u8> = None;
    let mut after_eq = false;
    for (i, &b) in tag.as_bytes().iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return i + 1,
                b'"' | b'\'' if after_eq => quote = Some(b),
                b'=' => after_eq = true,
                b if b.is_ascii_whitespace() => {}
                _ => after_eq = false,
            },
        }
    }
    tag.len()
}

/// Lowercased element name of a tag and whether it is a closing tag.
pub(crate) fn tag_name(tag: &str) -> (String, bool) {
    let inner = tag.trim_start_matches('<');
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (name, closing)
}
