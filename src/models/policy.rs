// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Allow-lists describing what a sanitizer keeps.
//!
//! Policies are plain owned data so they can be loaded from configuration;
//! [`crate::html::Sanitizer`] turns them into an `ammonia` builder per call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Tags, attributes and CSS properties permitted in sanitized markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerPolicy {
    /// Elements kept in the output; anything else is unwrapped.
    pub tags: BTreeSet<String>,
    /// Attributes allowed on every kept element.
    pub generic_attributes: BTreeSet<String>,
    /// Additional attributes allowed per element.
    pub tag_attributes: BTreeMap<String, BTreeSet<String>>,
    /// CSS properties kept inside `style` attributes.
    pub style_properties: BTreeSet<String>,
}

impl Default for SanitizerPolicy {
    fn default() -> Self {
        Self::html()
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn attr_map(entries: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<String>> {
    entries
        .iter()
        .map(|(tag, attrs)| ((*tag).to_string(), set(attrs)))
        .collect()
}

const STYLE_PROPERTIES: &[&str] = &[
    "background-color",
    "border",
    "border-bottom",
    "border-collapse",
    "border-color",
    "border-left",
    "border-right",
    "border-style",
    "border-top",
    "border-width",
    "clear",
    "color",
    "direction",
    "display",
    "float",
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "height",
    "letter-spacing",
    "line-height",
    "list-style-type",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-width",
    "min-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-align",
    "text-decoration",
    "text-indent",
    "vertical-align",
    "white-space",
    "width",
    "word-spacing",
];

impl SanitizerPolicy {
    /// Policy for rich-text fields edited through a WYSIWYG editor.
    pub fn html() -> Self {
        Self {
            tags: set(&[
                "a", "abbr", "acronym", "address", "area", "b", "bdo", "big", "blockquote",
                "br", "caption", "center", "cite", "code", "col", "colgroup", "dd", "del",
                "dfn", "dir", "div", "dl", "dt", "em", "font", "h1", "h2", "h3", "h4", "h5",
                "h6", "hr", "i", "img", "ins", "kbd", "li", "map", "ol", "p", "pre", "q", "s",
                "samp", "small", "span", "strike", "strong", "sub", "sup", "table", "tbody",
                "td", "tfoot", "th", "thead", "tr", "tt", "u", "ul", "var",
            ]),
            generic_attributes: set(&["align", "class", "dir", "lang", "style", "title"]),
            tag_attributes: attr_map(&[
                ("a", &["href", "name", "target"]),
                ("area", &["alt", "coords", "href", "shape", "target"]),
                ("col", &["span", "width"]),
                ("font", &["color", "face", "size"]),
                ("img", &["alt", "border", "height", "src", "usemap", "width"]),
                ("map", &["name"]),
                ("ol", &["start", "type"]),
                ("table", &["border", "cellpadding", "cellspacing", "width"]),
                ("td", &["colspan", "rowspan", "valign", "width"]),
                ("th", &["colspan", "rowspan", "valign", "width"]),
            ]),
            style_properties: set(STYLE_PROPERTIES),
        }
    }

    /// Policy applied to rendered Markdown.
    pub fn markdown() -> Self {
        Self {
            tags: set(&[
                "a", "abbr", "b", "blockquote", "br", "code", "del", "em", "h1", "h2", "h3",
                "h4", "h5", "h6", "hr", "i", "img", "li", "ol", "p", "pre", "strong", "sub",
                "sup", "table", "tbody", "td", "th", "thead", "tr", "ul",
            ]),
            generic_attributes: set(&["title"]),
            tag_attributes: attr_map(&[
                ("a", &["href"]),
                ("img", &["alt", "src"]),
                ("ol", &["start"]),
                ("td", &["style"]),
                ("th", &["style"]),
            ]),
            style_properties: set(&["text-align"]),
        }
    }

    /// Subset understood by the PDF paragraph renderer.
    pub fn platypus() -> Self {
        Self {
            tags: set(&[
                "b", "br", "div", "em", "font", "i", "img", "p", "span", "strike", "strong",
                "sub", "sup", "u",
            ]),
            generic_attributes: BTreeSet::new(),
            tag_attributes: attr_map(&[
                ("font", &["color", "face", "size"]),
                ("img", &["height", "src", "valign", "width"]),
            ]),
            style_properties: BTreeSet::new(),
        }
    }

    /// Whether `property` may appear inside a `style` attribute.
    pub fn allows_style_property(&self, property: &str) -> bool {
        self.style_properties.contains(property)
    }
}
