//! Boilerplate removal

use regex::Regex;

use super::rules::BoilerplateMatch;
use super::text::collapse_whitespace;
use super::ExtractError;

/// Compiled boilerplate filter
#[derive(Debug, Clone)]
pub struct Boilerplate {
    pattern: Option<Regex>,
}

impl Boilerplate {
    pub fn new(phrases: &[String], mode: BoilerplateMatch) -> Result<Self, ExtractError> {
        let mut phrases: Vec<&str> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so a phrase never pre-empts one that contains it
        phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));

        let alternatives: Vec<String> = phrases
            .iter()
            .map(|phrase| match mode {
                BoilerplateMatch::Substring => regex::escape(phrase),
                BoilerplateMatch::WordBoundary => word_bounded(phrase),
            })
            .collect();

        let source = alternatives.join("|");
        let pattern = Regex::new(&source).map_err(|source_err| ExtractError::InvalidPattern {
            pattern: source,
            source: source_err,
        })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Collapse whitespace and strip boilerplate until the text stops changing.
    ///
    /// Running `clean` on its own output returns the same string.
    pub fn clean(&self, text: &str) -> String {
        let mut current = collapse_whitespace(text);

        let Some(pattern) = &self.pattern else {
            return current;
        };

        loop {
            let next = collapse_whitespace(&pattern.replace_all(&current, ""));
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

fn word_bounded(phrase: &str) -> String {
    let starts_word = phrase.chars().next().is_some_and(is_word_char);
    let ends_word = phrase.chars().last().is_some_and(is_word_char);

    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
