//! Job posting extraction
//!
//! Two independent first-match-wins cascades run over one parsed page:
//! - description: selectors, then headings, then page-text patterns
//! - title: meta tags, then selectors, then `<title>`, then the URL slug
//!
//! All rules come from [`ExtractionRules`], compiled once into an [`Extractor`].

mod cleanup;
mod description;
mod rules;
mod text;
mod title;

pub use cleanup::*;
pub use rules::*;
pub use text::collapse_whitespace;
pub use title::title_case;

use std::path::PathBuf;

use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use thiserror::Error;

/// User-facing message when no description could be found
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not extract job description from the provided URL.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read rules file {path}: {source}")]
    RulesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which cascade step produced a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionPass {
    /// Matched CSS selector
    Selector(String),
    /// Heading keyword that opened the section
    Heading(String),
    /// Index into the pattern list
    Pattern(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub pass: ExtractionPass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    pub description: Option<Description>,
}

/// Compiled extraction rules
#[derive(Debug, Clone)]
pub struct Extractor {
    description_selectors: Vec<(String, Selector)>,
    heading_selector: Option<Selector>,
    section_break_tags: Vec<String>,
    heading_keywords: Vec<String>,
    stop_keywords: Vec<String>,
    patterns: Vec<Regex>,
    boilerplate: Boilerplate,
    meta_selector: Selector,
    page_title_selector: Selector,
    title_meta: Vec<MetaKey>,
    title_selectors: Vec<Selector>,
    fallback_title: String,
    min_slug_len: usize,
}

impl Extractor {
    pub fn new(rules: &ExtractionRules) -> Result<Self, ExtractError> {
        let description_selectors = rules
            .description_selectors
            .iter()
            .map(|s| Ok((s.clone(), parse_selector(s)?)))
            .collect::<Result<Vec<_>, ExtractError>>()?;

        let heading_selector = if rules.heading_tags.is_empty() {
            None
        } else {
            Some(parse_selector(&rules.heading_tags.join(", "))?)
        };

        let patterns = rules
            .description_patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .map_err(|source| ExtractError::InvalidPattern {
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let title_selectors = rules
            .title_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            description_selectors,
            heading_selector,
            section_break_tags: lowercase(&rules.section_break_tags),
            heading_keywords: lowercase(&rules.heading_keywords),
            stop_keywords: lowercase(&rules.stop_keywords),
            patterns,
            boilerplate: Boilerplate::new(&rules.boilerplate_phrases, rules.boilerplate_match)?,
            meta_selector: parse_selector("meta")?,
            page_title_selector: parse_selector("title")?,
            title_meta: rules.title_meta.clone(),
            title_selectors,
            fallback_title: rules.fallback_title.clone(),
            min_slug_len: rules.min_slug_len,
        })
    }

    /// Run both cascades over one parse of the page
    pub fn extract(&self, html: &str, url: Option<&str>) -> ExtractionResult {
        let document = Html::parse_document(html);
        ExtractionResult {
            title: self.title(&document, url),
            description: self.describe(&document),
        }
    }

    pub fn boilerplate(&self) -> &Boilerplate {
        &self.boilerplate
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractionRules::default()).expect("built-in extraction rules compile")
    }
}

/// Extract a job description using the built-in rules
pub fn extract_description(html: &str) -> Option<Description> {
    Extractor::default().extract_description(html)
}

/// Extract a job title using the built-in rules
pub fn extract_title(html: &str, url: Option<&str>) -> String {
    Extractor::default().extract_title(html, url)
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn lowercase(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
