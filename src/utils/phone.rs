// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Phone number normalization.

/// Reduce a phone number to digits, `x` extension markers and one leading `+`.
///
/// Separators such as spaces, hyphens and parentheses are removed. A `+` is
/// kept only when the number starts with one; repeated leading `+` collapse.
///
/// ```
/// assert_eq!(textkit::normalize_phone_number("+48 785 326 691"), "+48785326691");
/// ```
pub fn normalize_phone_number(value: &str) -> String {
    let value = value.trim();
    let mut out = String::with_capacity(value.len());
    if value.starts_with('+') {
        out.push('+');
    }
    out.extend(value.chars().filter(|c| c.is_ascii_digit() || *c == 'x'));
    out
}
