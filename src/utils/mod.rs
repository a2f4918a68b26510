// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Small string helpers: slugs, case conversion, e-mail, phone numbers,
//! checksums, tokens and reprs.

pub mod case;
pub mod email;
pub mod hash;
pub mod phone;
pub mod repr;
pub mod slug;
pub mod token;

pub use case::{camelize, camelize_keys, snakify, snakify_keys};
pub use email::{format_email_with_name, sanitize_email};
/// Compute the CRC32 of a string or byte slice.
pub use hash::crc32;
pub use phone::normalize_phone_number;
pub use repr::{Repr, text_to_repr};
pub use slug::{SlugOptions, slugify, slugify_parts};
pub use token::{DEFAULT_MAX_ATTEMPTS, make_unique_token, make_unique_token_with};
