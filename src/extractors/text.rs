//! Text flattening helpers
//!
//! Element text is built from its text nodes, each split on whitespace and
//! re-joined with single spaces. Script-like containers are skipped so that
//! broad selectors such as `main` do not drag inline JavaScript along.

use scraper::{ElementRef, Html};

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapse every whitespace run to one space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace collapsed
pub(crate) fn element_text(element: &ElementRef) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(|n| n.value().as_element())
            .any(|el| SKIPPED_TAGS.contains(&el.name()));

        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// The whole document flattened to one line of text
pub(crate) fn page_text(document: &Html) -> String {
    element_text(&document.root_element())
}
