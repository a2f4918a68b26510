// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Text utilities for an event management application.
//!
//! Responsibilities:
//! - Build slugs and convert identifiers between `snake_case` and `camelCase`.
//! - Sanitize user-provided HTML against allow-lists and reduce it to plain text.
//! - Render Markdown safely, optionally auto-linking ticket-style references.
//! - Normalize e-mail addresses and phone numbers; compute CRC32 fingerprints.
//!
//! All functions are pure and safe to call from any thread.

pub mod config;
pub mod error;
pub mod html;
pub mod markdown;
pub mod models;
pub mod utils;

pub use config::TextConfig;
pub use error::{Error, Result};
pub use html::{
    HtmlLinker, Sanitizer, html_to_plaintext, sanitize_for_platypus, sanitize_html, seems_html,
    strip_tags,
};
pub use markdown::{Extension, render_markdown};
pub use models::{LinkRule, SanitizerPolicy};
pub use utils::{
    Repr, SlugOptions, camelize, camelize_keys, crc32, format_email_with_name, make_unique_token,
    normalize_phone_number, sanitize_email, slugify, slugify_parts, snakify, snakify_keys,
    text_to_repr,
};
