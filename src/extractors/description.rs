//! Job description cascade
//!
//! Strictly first-success-wins: once a pass yields text, later passes are
//! never consulted, and there is no scoring between them.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::text::{element_text, page_text};
use super::{Description, ExtractionPass, Extractor};

impl Extractor {
    /// Best-effort plain-text job description, or `None` when no pass finds any
    pub fn extract_description(&self, html: &str) -> Option<Description> {
        let document = Html::parse_document(html);
        self.describe(&document)
    }

    pub(crate) fn describe(&self, document: &Html) -> Option<Description> {
        let (raw, pass) = self
            .selector_pass(document)
            .or_else(|| self.heading_pass(document))
            .or_else(|| self.pattern_pass(document))?;

        let text = self.boilerplate.clean(&raw);
        if text.is_empty() {
            debug!(?pass, "description was entirely boilerplate");
            return None;
        }

        debug!(?pass, chars = text.len(), "extracted job description");
        Some(Description { text, pass })
    }

    fn selector_pass(&self, document: &Html) -> Option<(String, ExtractionPass)> {
        for (source, selector) in &self.description_selectors {
            let texts: Vec<String> = document
                .select(selector)
                .map(|el| element_text(&el))
                .filter(|t| !t.is_empty())
                .collect();

            if !texts.is_empty() {
                return Some((texts.join(" "), ExtractionPass::Selector(source.clone())));
            }
        }
        None
    }

    fn heading_pass(&self, document: &Html) -> Option<(String, ExtractionPass)> {
        let selector = self.heading_selector.as_ref()?;

        for heading in document.select(selector) {
            let heading_text = element_text(&heading).to_lowercase();
            let Some(keyword) = self
                .heading_keywords
                .iter()
                .find(|k| heading_text.contains(k.as_str()))
            else {
                continue;
            };

            let section = self.section_after(&heading);
            if !section.is_empty() {
                return Some((section.join(" "), ExtractionPass::Heading(keyword.clone())));
            }
        }
        None
    }

    /// Texts of the element siblings following `heading`, up to the next
    /// section break or stop keyword
    fn section_after(&self, heading: &ElementRef) -> Vec<String> {
        let mut collected = Vec::new();

        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            let name = sibling.value().name();
            if self.section_break_tags.iter().any(|tag| tag == name) {
                break;
            }

            let text = element_text(&sibling);
            let lower = text.to_lowercase();
            if self.stop_keywords.iter().any(|k| lower.contains(k.as_str())) {
                break;
            }

            if !text.is_empty() {
                collected.push(text);
            }
        }

        collected
    }

    fn pattern_pass(&self, document: &Html) -> Option<(String, ExtractionPass)> {
        let text = page_text(document);

        self.patterns.iter().enumerate().find_map(|(index, pattern)| {
            pattern
                .find(&text)
                .map(|m| (m.as_str().to_string(), ExtractionPass::Pattern(index)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ExtractionRules;

    #[test]
    fn test_first_selector_wins() {
        let html = r#"
        <html><body>
            <main>Generic page chrome</main>
            <div class="description">Second choice</div>
            <div class="job-description">
                Design   the
                storage engine.
            </div>
        </body></html>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Design the storage engine.");
        assert_eq!(found.pass, ExtractionPass::Selector("div.job-description".into()));
    }

    #[test]
    fn test_multiple_matches_are_joined() {
        let html = r#"
        <div class="job-details">Part one.</div>
        <div class="job-details">   </div>
        <div class="job-details">Part two.</div>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Part one. Part two.");
    }

    #[test]
    fn test_blank_selector_falls_through() {
        let html = r#"
        <div class="job-description">   </div>
        <h3>About the role</h3>
        <p>Maintain the parser.</p>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Maintain the parser.");
        assert_eq!(found.pass, ExtractionPass::Heading("about the role".into()));
    }

    #[test]
    fn test_heading_section_stops_at_stop_keyword() {
        let html = r#"
        <div>
            <strong>Requirements</strong>
            <p>Five years of Rust.</p>
            <ul><li>Async</li><li>Unsafe</li></ul>
            <p>About us: we sell widgets.</p>
            <p>Never reached.</p>
        </div>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Five years of Rust. Async Unsafe");
    }

    #[test]
    fn test_heading_without_content_is_skipped() {
        let html = r#"
        <h2>Job description</h2>
        <h2>Responsibilities</h2>
        <p>Review pull requests.</p>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Review pull requests.");
        assert_eq!(found.pass, ExtractionPass::Heading("responsibilities".into()));
    }

    #[test]
    fn test_pattern_pass_spans_elements() {
        let html = r#"
        <p>The Role</p>
        <p>You will tune the garbage collector.</p>
        <p>Skills: profiling</p>
        "#;

        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "The Role You will tune the garbage collector. Skills");
        assert_eq!(found.pass, ExtractionPass::Pattern(1));
    }

    #[test]
    fn test_only_boilerplate_yields_none() {
        let html = r#"<div class="job-description">Apply now</div>"#;
        assert_eq!(Extractor::default().extract_description(html), None);
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<div class='job-description'><p>Unclosed <b>tags <i>everywhere";
        let found = Extractor::default().extract_description(html).unwrap();
        assert_eq!(found.text, "Unclosed tags everywhere");
    }

    #[test]
    fn test_custom_rules() {
        let rules = ExtractionRules {
            description_selectors: vec!["#posting".to_string()],
            heading_tags: vec![],
            description_patterns: vec![],
            boilerplate_phrases: vec!["Share this job".to_string()],
            ..ExtractionRules::default()
        };
        let extractor = Extractor::new(&rules).unwrap();

        let html = r#"<section id="posting">Operate clusters. Share this job</section>"#;
        assert_eq!(
            extractor.extract_description(html).unwrap().text,
            "Operate clusters."
        );

        let html = r#"<div class="job-description">Ignored by these rules</div><h2>Responsibilities</h2><p>x</p>"#;
        assert_eq!(extractor.extract_description(html), None);
    }
}
