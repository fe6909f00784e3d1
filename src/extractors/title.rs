//! Job title cascade
//!
//! meta tags -> title selectors -> `<title>` -> URL slug -> fallback.
//! Always produces a string.

use percent_encoding::percent_decode_str;
use scraper::Html;
use url::Url;

use super::text::element_text;
use super::Extractor;

impl Extractor {
    pub fn extract_title(&self, html: &str, url: Option<&str>) -> String {
        let document = Html::parse_document(html);
        self.title(&document, url)
    }

    pub(crate) fn title(&self, document: &Html, url: Option<&str>) -> String {
        self.meta_title(document)
            .or_else(|| self.selector_title(document))
            .or_else(|| self.page_title(document))
            .or_else(|| url.and_then(|u| slug_title(u, self.min_slug_len)))
            .unwrap_or_else(|| self.fallback_title.clone())
    }

    fn meta_title(&self, document: &Html) -> Option<String> {
        self.title_meta.iter().find_map(|key| {
            document
                .select(&self.meta_selector)
                .filter(|el| el.value().attr(&key.attribute) == Some(key.value.as_str()))
                .filter_map(|el| el.value().attr("content"))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(String::from)
        })
    }

    fn selector_title(&self, document: &Html) -> Option<String> {
        self.title_selectors.iter().find_map(|selector| {
            document
                .select(selector)
                .next()
                .map(|el| element_text(&el))
                .filter(|t| !t.is_empty())
        })
    }

    /// `<title>` text up to the first `-` or `|`, which usually separates
    /// the role from the company or site name
    fn page_title(&self, document: &Html) -> Option<String> {
        let title = document.select(&self.page_title_selector).next()?;
        element_text(&title)
            .split(['-', '|'])
            .map(str::trim)
            .find(|part| !part.is_empty())
            .map(String::from)
    }
}

/// Title from the first URL path segment that looks like a slug
/// (longer than `min_len` characters once percent-decoded, and hyphenated)
fn slug_title(url: &str, min_len: usize) -> Option<String> {
    let segments: Vec<String> = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .map(|segments| segments.map(decode_segment).collect())
            .unwrap_or_default(),
        Err(_) => url.split('/').map(decode_segment).collect(),
    };

    segments
        .iter()
        .find(|segment| segment.chars().count() > min_len && segment.contains('-'))
        .map(|segment| title_case(&segment.replace('-', " ")))
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Upper-case the first letter of each alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_title_wins() {
        let html = r#"
        <html><head>
            <meta name="title" content="Meta Name Title">
            <meta property="og:title" content="  Platform Engineer ">
            <title>Ignored - Company</title>
        </head><body><h1>Also ignored</h1></body></html>
        "#;

        assert_eq!(Extractor::default().extract_title(html, None), "Platform Engineer");
    }

    #[test]
    fn test_blank_meta_falls_through() {
        let html = r#"
        <html><head><meta property="og:title" content="   "></head>
        <body><div class="job-title">Data Engineer</div><h1>Careers</h1></body></html>
        "#;

        // "h1" precedes ".job-title" in the selector list
        assert_eq!(Extractor::default().extract_title(html, None), "Careers");
    }

    #[test]
    fn test_specific_selector_before_generic() {
        let html = r#"<h1>Acme Careers</h1><h1 class="job-title">SRE</h1>"#;
        assert_eq!(Extractor::default().extract_title(html, None), "SRE");
    }

    #[test]
    fn test_page_title_is_split() {
        let html = r#"<html><head><title>Backend Developer | Acme - Jobs</title></head></html>"#;
        assert_eq!(Extractor::default().extract_title(html, None), "Backend Developer");
    }

    #[test]
    fn test_url_slug() {
        let url = "https://jobs.example-board.com/careers/senior-backend-engineer/";
        assert_eq!(
            Extractor::default().extract_title("<p>nothing</p>", Some(url)),
            "Senior Backend Engineer"
        );
    }

    #[test]
    fn test_short_or_plain_segments_are_not_slugs() {
        assert_eq!(slug_title("https://example.com/a-b/jobs/12345", 5), None);
        assert_eq!(slug_title("not a url/rust-developer", 5), Some("Rust Developer".into()));
    }

    #[test]
    fn test_unicode_slug_is_decoded() {
        assert_eq!(
            Extractor::default().extract_title(
                "<p>x</p>",
                Some("https://example.com/jobs/ingénieur-logiciel/")
            ),
            "Ingénieur Logiciel"
        );
        assert_eq!(
            slug_title("https://example.com/jobs/d%C3%A9veloppeur-rust", 5),
            Some("Développeur Rust".into())
        );
    }

    #[test]
    fn test_short_unicode_segment_is_not_a_slug() {
        assert_eq!(slug_title("https://example.com/jobs/ü-ab/", 5), None);
        assert_eq!(
            Extractor::default().extract_title("<p>x</p>", Some("https://example.com/jobs/ü-ab/")),
            "Job Position"
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(Extractor::default().extract_title("", None), "Job Position");
        assert_eq!(
            Extractor::default().extract_title("", Some("https://example.com/jobs/42")),
            "Job Position"
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("senior backend engineer"), "Senior Backend Engineer");
        assert_eq!(title_case("SENIOR c++ dev"), "Senior C++ Dev");
        assert_eq!(title_case("2nd-line support"), "2Nd-Line Support");
    }
}
