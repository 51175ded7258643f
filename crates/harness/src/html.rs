// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured lookups over captured output treated as an HTML document.
//!
//! The document is parsed on demand for every lookup; nothing is cached
//! between calls, and the returned fragment is an owned value with no
//! lifetime tied to the parse.

use crate::error::{HarnessError, Result};
use scraper::{Html, Selector};

/// Owned snapshot of one matched document fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlFragment {
    /// Concatenated text content of the fragment.
    pub text: String,
    /// Outer HTML of the fragment.
    pub html: String,
}

/// Find the element whose `id` attribute equals `id`.
///
/// Per-dependency report fragments carry the dependency name as their id.
/// Fails with [`HarnessError::Lookup`] when no such element exists.
pub fn find_by_id(output: &str, id: &str) -> Result<HtmlFragment> {
    let document = Html::parse_document(output);
    // The id is compared verbatim against the attribute rather than spliced
    // into a CSS selector, so names like `http-server` or ids starting with
    // a digit never collide with selector syntax.
    let any_id = Selector::parse("[id]")
        .map_err(|err| HarnessError::Lookup(format!("[id]: {err}")))?;
    document
        .select(&any_id)
        .find(|el| el.value().attr("id") == Some(id))
        .map(|el| HtmlFragment {
            text: el.text().collect(),
            html: el.html(),
        })
        .ok_or_else(|| HarnessError::Lookup(format!("#{id}")))
}

/// Find the first element with the given tag name, e.g. the `h1` title of a
/// scanner report.
pub fn find_tag(output: &str, tag: &str) -> Result<HtmlFragment> {
    let document = Html::parse_document(output);
    let selector =
        Selector::parse(tag).map_err(|err| HarnessError::Lookup(format!("{tag}: {err}")))?;
    document
        .select(&selector)
        .next()
        .map(|el| HtmlFragment {
            text: el.text().collect(),
            html: el.html(),
        })
        .ok_or_else(|| HarnessError::Lookup(tag.to_string()))
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
