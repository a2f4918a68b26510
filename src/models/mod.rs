// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Value types shared by the text helpers and configuration.

pub mod link_rule;
pub mod policy;

pub use link_rule::LinkRule;
pub use policy::SanitizerPolicy;
