//! Tunable extraction rules
//!
//! Selectors, keywords, patterns and boilerplate phrases driving both
//! extraction cascades. The defaults cover generic class names plus a few
//! job boards (LinkedIn, Indeed, Glassdoor, academic portals). A rule file
//! is plain JSON; any field it leaves out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractError;

const DESCRIPTION_SELECTORS: &[&str] = &[
    // Common job description containers
    "div.job-description",
    "div.description",
    "div.jobDescriptionText",
    "div[data-automation='jobDescription']",
    "div.job_description",
    "section#job-description",
    "div#job-details",
    "div.details",
    "div.job-details",
    "div.vacancy-description",
    "div.content",
    "div.job-info",
    "div.job-overview",
    "div.job-summary",
    // LinkedIn
    "div.description__text",
    "section.description",
    // Indeed
    "div#jobDescriptionText",
    "div.jobsearch-jobDescriptionText",
    // Glassdoor
    "div.jobDescriptionContent",
    "div.desc",
    // Academic job boards
    "div.job-description-container",
    "div.job-posting-body",
    // Generic content areas
    "article",
    "main",
    "div.main-content",
];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b"];

const SECTION_BREAK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const HEADING_KEYWORDS: &[&str] = &[
    "job description",
    "about the role",
    "about the job",
    "position details",
    "responsibilities",
    "requirements",
];

const STOP_KEYWORDS: &[&str] = &["apply now", "about the company", "about us"];

const DESCRIPTION_PATTERNS: &[&str] = &[
    r"(?:Job Description|Position Description|Role Description).*?(?:Requirements|Qualifications|About You|About the Company|Apply Now)",
    r"(?:Responsibilities|What You'll Do|The Role).*?(?:Requirements|Qualifications|Skills|Experience|Education)",
    r"(?:About the Role|About the Position).*?(?:Requirements|Qualifications|What You Bring|What You'll Need)",
];

const BOILERPLATE_PHRASES: &[&str] = &[
    "Please apply online",
    "Apply now",
    "Click to apply",
    "Submit your application",
    "Submit your resume",
    "Equal opportunity employer",
    "We are an equal opportunity employer",
];

const TITLE_SELECTORS: &[&str] = &[
    "h1.job-title",
    "h1.jobTitle",
    "h1.title",
    "h1.posting-headline",
    "h1.job-header__title",
    "h1.job-headline",
    "h1.job-details-title",
    "h1",
    "h2.job-title",
    "h2.title",
    ".job-title",
    ".jobTitle",
    ".position-title",
    ".listing-title",
    ".job-header-title",
];

pub const DEFAULT_FALLBACK_TITLE: &str = "Job Position";

/// How boilerplate phrases are matched before removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoilerplateMatch {
    /// Only whole-word occurrences are removed ("Apply now" leaves "Apply nowhere" alone)
    #[default]
    WordBoundary,
    /// Any literal occurrence is removed, even inside a longer word
    Substring,
}

/// A `<meta>` tag identified by one attribute, e.g. `property="og:title"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaKey {
    pub attribute: String,
    pub value: String,
}

impl MetaKey {
    pub fn new(attribute: &str, value: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ordered rule set for the description and title cascades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// CSS selectors tried in order by the selector pass
    pub description_selectors: Vec<String>,
    /// Elements inspected by the heading pass
    pub heading_tags: Vec<String>,
    /// Sibling tags that end a section during the heading pass
    pub section_break_tags: Vec<String>,
    /// Lowercase keywords marking a description heading
    pub heading_keywords: Vec<String>,
    /// Lowercase keywords that end a section
    pub stop_keywords: Vec<String>,
    /// Regex sources for the page-text pass, case-insensitive and dot-all
    pub description_patterns: Vec<String>,
    pub boilerplate_phrases: Vec<String>,
    pub boilerplate_match: BoilerplateMatch,
    pub title_meta: Vec<MetaKey>,
    pub title_selectors: Vec<String>,
    pub fallback_title: String,
    /// A URL path segment must be longer than this to count as a title slug
    pub min_slug_len: usize,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            description_selectors: owned(DESCRIPTION_SELECTORS),
            heading_tags: owned(HEADING_TAGS),
            section_break_tags: owned(SECTION_BREAK_TAGS),
            heading_keywords: owned(HEADING_KEYWORDS),
            stop_keywords: owned(STOP_KEYWORDS),
            description_patterns: owned(DESCRIPTION_PATTERNS),
            boilerplate_phrases: owned(BOILERPLATE_PHRASES),
            boilerplate_match: BoilerplateMatch::default(),
            title_meta: vec![MetaKey::new("property", "og:title"), MetaKey::new("name", "title")],
            title_selectors: owned(TITLE_SELECTORS),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            min_slug_len: 5,
        }
    }
}

impl ExtractionRules {
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ExtractError::RulesFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
