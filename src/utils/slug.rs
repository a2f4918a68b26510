// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! URL-safe slugs built from free text.

use std::fmt::Display;

/// Options controlling [`slugify_parts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlugOptions {
    /// Truncate the slug to this many characters.
    pub maxlen: Option<usize>,
    /// Lowercase the result.
    pub lower: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            maxlen: None,
            lower: true,
        }
    }
}

impl SlugOptions {
    pub fn maxlen(mut self, maxlen: usize) -> Self {
        self.maxlen = Some(maxlen);
        self
    }

    pub fn keep_case(mut self) -> Self {
        self.lower = false;
        self
    }
}

/// Slugify a single string with default options.
///
/// ```
/// assert_eq!(textkit::slugify("this is a    test"), "this-is-a-test");
/// ```
pub fn slugify(text: &str) -> String {
    slugify_parts(&[&text], SlugOptions::default())
}

/// Produce a slug from one or more fragments.
///
/// # Steps
/// - Join fragments with `-`.
/// - Transliterate umlauts to their two-letter forms, everything else with `deunicode`.
/// - Drop characters other than ASCII alphanumerics, whitespace, `-` and `_`.
/// - Collapse runs of whitespace, `-` and `_` into a single `-`; trim hyphens.
/// - Lowercase unless disabled, then truncate to `maxlen`.
///
/// ```
/// use textkit::{SlugOptions, slugify_parts};
///
/// assert_eq!(slugify_parts(&[&"foo", &123, &"bar"], SlugOptions::default()), "foo-123-bar");
/// ```
pub fn slugify_parts(parts: &[&dyn Display], options: SlugOptions) -> String {
    let joined = parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join("-");
    let transliterated = deunicode::deunicode(&expand_umlauts(&joined));

    let mut out = String::with_capacity(transliterated.len());
    let mut pending_sep = false;
    for ch in transliterated.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(if options.lower {
                ch.to_ascii_lowercase()
            } else {
                ch
            });
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = true;
        }
        // Punctuation is dropped without acting as a separator.
    }

    if let Some(maxlen) = options.maxlen {
        out.truncate(maxlen);
    }
    out
}

fn expand_umlauts(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            c => out.push(c),
        }
    }
    out
}
