// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error type shared by the fallible helpers.
//!
//! Most of the crate is total: sanitizers, strippers and formatters degrade
//! gracefully instead of failing. Only rule compilation and bounded token
//! generation can report an error.

use thiserror::Error;

/// Errors reported by `textkit`.
#[derive(Debug, Error)]
pub enum Error {
    /// A link rule carried a pattern the regex engine rejected.
    #[error("invalid link pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No free token was found within the attempt budget.
    #[error("no free token found after {attempts} attempts")]
    TokenSpaceExhausted { attempts: u32 },
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
