// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Random tokens checked against a caller-supplied availability predicate.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Attempts made by [`make_unique_token`] before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Draw random UUIDv4 tokens until `is_free` accepts one.
///
/// # Errors
///
/// Returns [`Error::TokenSpaceExhausted`] when no token is accepted within
/// [`DEFAULT_MAX_ATTEMPTS`] draws.
///
/// ```
/// let token = textkit::make_unique_token(|t| !t.is_empty()).unwrap();
/// assert_eq!(token.len(), 36);
/// ```
pub fn make_unique_token(is_free: impl FnMut(&str) -> bool) -> Result<String> {
    make_unique_token_with(|| Uuid::new_v4().to_string(), is_free, DEFAULT_MAX_ATTEMPTS)
}

/// Same as [`make_unique_token`] with an explicit generator and attempt budget.
pub fn make_unique_token_with<G, F>(mut generate: G, mut is_free: F, max_attempts: u32) -> Result<String>
where
    G: FnMut() -> String,
    F: FnMut(&str) -> bool,
{
    for attempt in 1..=max_attempts {
        let token = generate();
        if is_free(&token) {
            return Ok(token);
        }
        tracing::debug!(attempt, "generated token is taken, retrying");
    }
    tracing::warn!(attempts = max_attempts, "giving up on unique token generation");
    Err(Error::TokenSpaceExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use super::{make_unique_token, make_unique_token_with};
    use crate::error::Error;

    // Taken tokens are skipped and each accepted token becomes taken.
    #[test]
    fn make_unique_token_skips_taken_values() {
        let counter = RefCell::new(0u32);
        let generate = || {
            let mut n = counter.borrow_mut();
            let token = n.to_string();
            *n += 1;
            token
        };
        let mut taken: HashSet<String> = ["1", "3"].iter().map(|s| s.to_string()).collect();

        let mut next = || {
            let token = make_unique_token_with(generate, |t| !taken.contains(t), 10).unwrap();
            taken.insert(token.clone());
            token
        };

        assert_eq!(next(), "0");
        assert_eq!(next(), "2");
        assert_eq!(next(), "4");
        assert_eq!(next(), "5");
    }

    // An always-false predicate ends with an error instead of spinning.
    #[test]
    fn make_unique_token_is_bounded() {
        let err = make_unique_token_with(|| "same".to_string(), |_| false, 3).unwrap_err();

        assert!(matches!(err, Error::TokenSpaceExhausted { attempts: 3 }));
    }

    // Default tokens are hyphenated UUIDs.
    #[test]
    fn make_unique_token_returns_uuid() {
        let token = make_unique_token(|_| true).unwrap();

        assert!(uuid::Uuid::parse_str(&token).is_ok());
    }
}
