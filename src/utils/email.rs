// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! E-mail address extraction and `Name <address>` formatting.

use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>]+)>").expect("BRACKETED regex should compile"));

/// Characters that force a display name into a quoted string.
const NAME_SPECIALS: &[char] = &['(', ')', '<', '>', '@', ',', ':', ';', '"', '.', '[', ']', '\\'];

/// Extract the first e-mail address from free text.
///
/// Addresses wrapped in angle brackets are tried first, then tokens containing
/// `@`; the first valid one wins. Returns an empty string when nothing valid is
/// found.
///
/// ```
/// assert_eq!(textkit::sanitize_email("foobar <foo@bar.fb> asdf"), "foo@bar.fb");
/// assert_eq!(textkit::sanitize_email("no address here"), "");
/// ```
pub fn sanitize_email(text: &str) -> String {
    let bracketed = BRACKETED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim());
    let bare = text
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|token| token.contains('@'))
        .map(|token| token.trim_matches(|c| matches!(c, '"' | '\'' | '(' | ')' | '<' | '>')));

    bracketed
        .chain(bare)
        .find(|candidate| EmailAddress::is_valid(candidate))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Format `name` and `address` as `Name <address>`.
///
/// The name is quoted when it contains RFC 5322 specials such as `,` or `"`;
/// embedded quotes and backslashes are escaped. Spaces alone do not trigger
/// quoting.
///
/// ```
/// assert_eq!(
///     textkit::format_email_with_name("Guinea,Pig", "test@example.com"),
///     "\"Guinea,Pig\" <test@example.com>"
/// );
/// ```
pub fn format_email_with_name(name: &str, address: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return address.to_string();
    }
    if !name.contains(NAME_SPECIALS) {
        return format!("{name} <{address}>");
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    format!("\"{quoted}\" <{address}>")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{format_email_with_name, sanitize_email};

    #[rstest]
    #[case("", "")]
    #[case("foo", "")]
    #[case("foo@bar.fb", "foo@bar.fb")]
    #[case("<foo@bar.fb>", "foo@bar.fb")]
    #[case("foobar <foo@bar.fb> asdf", "foo@bar.fb")]
    #[case("foobar <foo@bar.fb> <test@test.com>", "foo@bar.fb")]
    #[case("foo@bar.fb, test@test.com", "foo@bar.fb")]
    #[case("<not an address>", "")]
    #[case("<bogus> real@x.org", "real@x.org")]
    #[case("<nope@> <yes@x.org>", "yes@x.org")]
    fn sanitize_email_extracts_first_address(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_email(input), expected);
    }

    #[rstest]
    #[case("GuineaPig", "GuineaPig <test@example.com>")]
    #[case("Guinea Pig", "Guinea Pig <test@example.com>")]
    #[case("Guinea,Pig", "\"Guinea,Pig\" <test@example.com>")]
    #[case("John \"Guinea Pig\" Doe", "\"John \\\"Guinea Pig\\\" Doe\" <test@example.com>")]
    fn format_email_with_name_quotes_when_needed(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(format_email_with_name(name, "test@example.com"), expected);
    }

    // Without a name only the bare address is returned.
    #[test]
    fn format_email_with_name_falls_back_to_address() {
        assert_eq!(format_email_with_name("  ", "test@example.com"), "test@example.com");
    }
}
