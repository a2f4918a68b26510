// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Short, log-friendly representations of texts and domain objects.

use std::fmt::Display;

use crate::html::strip_tags;

/// Collapse `text` into a single line suitable for a `Debug`-style repr.
///
/// When `html` is set, markup is stripped first. Whitespace runs become one
/// space, and texts longer than `max_length` characters are cut and get `...`.
///
/// ```
/// assert_eq!(textkit::text_to_repr("Hello\n  \tWorld", false, None), "Hello World");
/// ```
pub fn text_to_repr(text: &str, html: bool, max_length: Option<usize>) -> String {
    let plain;
    let text = if html {
        plain = strip_tags(text);
        plain.as_str()
    } else {
        text
    };

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match max_length {
        Some(max) if collapsed.chars().count() > max => {
            let mut cut: String = collapsed.chars().take(max).collect();
            cut.push_str("...");
            cut
        }
        _ => collapsed,
    }
}

/// Builder for `<Type(arg, flag=value): "text">` strings.
///
/// Positional arguments are always shown; flags only when they differ from
/// their default, sorted by name.
///
/// ```
/// use textkit::Repr;
///
/// let repr = Repr::new("Event")
///     .arg(42)
///     .flag("is_deleted", true, false)
///     .text("Summer School")
///     .finish();
/// assert_eq!(repr, r#"<Event(42, is_deleted=true): "Summer School">"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Repr {
    name: String,
    args: Vec<String>,
    flags: Vec<(String, String)>,
    text: Option<String>,
}

impl Repr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, value: impl Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn flag<T: Display + PartialEq>(mut self, name: &str, value: T, default: T) -> Self {
        if value != default {
            self.flags.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text_to_repr(text, false, Some(50)));
        self
    }

    pub fn finish(mut self) -> String {
        self.flags.sort_by(|a, b| a.0.cmp(&b.0));
        let parts: Vec<String> = self
            .args
            .into_iter()
            .chain(self.flags.into_iter().map(|(name, value)| format!("{name}={value}")))
            .collect();
        let mut out = format!("<{}({})", self.name, parts.join(", "));
        if let Some(text) = self.text {
            out.push_str(&format!(": \"{text}\""));
        }
        out.push('>');
        out
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Repr, text_to_repr};

    #[rstest]
    #[case("Hello\n  \tWorld", false, None, "Hello World")]
    #[case("Hello<b>World</b>", false, None, "Hello<b>World</b>")]
    #[case("Hello<b>World</b>", true, None, "HelloWorld")]
    #[case("Hi <b>a</b> <br>", true, None, "Hi a")]
    fn text_to_repr_collapses_text(
        #[case] input: &str,
        #[case] html: bool,
        #[case] max_length: Option<usize>,
        #[case] expected: &str,
    ) {
        assert_eq!(text_to_repr(input, html, max_length), expected);
    }

    // Long texts are cut at `max_length` and marked with an ellipsis.
    #[test]
    fn text_to_repr_truncates_long_text() {
        let long = "x".repeat(60);
        let exact = "x".repeat(50);

        assert_eq!(text_to_repr(&long, false, None), long);
        assert_eq!(text_to_repr(&long, false, Some(50)), format!("{exact}..."));
        assert_eq!(text_to_repr(&exact, false, Some(50)), exact);
    }

    #[test]
    fn repr_without_args_is_empty_call() {
        assert_eq!(Repr::new("Foo").finish(), "<Foo()>");
    }

    // Flags equal to their default are hidden; the rest are sorted.
    #[test]
    fn repr_shows_only_non_default_flags_sorted() {
        let repr = Repr::new("Foo")
            .arg(1)
            .flag("flag1", true, false)
            .flag("flag0", false, true)
            .flag("hidden", 3, 3)
            .text("moo")
            .finish();

        assert_eq!(repr, r#"<Foo(1, flag0=false, flag1=true): "moo">"#);
    }
}
