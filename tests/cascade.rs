use jobletter::extractors::{
    extract_description, extract_title, BoilerplateMatch, Description, ExtractionPass,
    ExtractionRules, Extractor, EXTRACTION_FAILED_MESSAGE,
};

#[test]
fn test_known_selector_wins_over_later_passes() {
    let html = r#"
    <html><body>
        <h2>Responsibilities</h2>
        <p>Heading-pass text that must not be used.</p>
        <div class="job-description">
            We are hiring a
            <b>database</b>     engineer.
        </div>
        <p>Job Description: regex text. Requirements: none</p>
    </body></html>
    "#;

    let found = extract_description(html).unwrap();
    assert_eq!(found.text, "We are hiring a database engineer.");
    assert_eq!(found.pass, ExtractionPass::Selector("div.job-description".into()));
}

#[test]
fn test_heading_section_until_next_heading() {
    let html = r#"
    <html><body>
        <div>
            <h2>Key Responsibilities</h2>
            <p>Design the storage layer.</p>
            <p>Mentor two engineers.</p>
            <h2>Apply Now</h2>
            <p>Send us your CV.</p>
        </div>
    </body></html>
    "#;

    let found = extract_description(html).unwrap();
    assert_eq!(found.text, "Design the storage layer. Mentor two engineers.");
    assert_eq!(found.pass, ExtractionPass::Heading("responsibilities".into()));
}

#[test]
fn test_pattern_span() {
    let html = r#"
    <html><body>
        <p>Welcome to our careers site.</p>
        <p>job description: you will write the scheduler. REQUIREMENTS: Rust, Linux.</p>
    </body></html>
    "#;

    assert_eq!(
        extract_description(html),
        Some(Description {
            text: "job description: you will write the scheduler. REQUIREMENTS".to_string(),
            pass: ExtractionPass::Pattern(0),
        })
    );
}

#[test]
fn test_nothing_found() {
    let html = r#"<html><head><title>Careers</title></head><body><p>Lunch menu: soup.</p></body></html>"#;

    let found = extract_description(html);
    assert_eq!(found, None);

    let message = found.map(|d| d.text).unwrap_or_else(|| EXTRACTION_FAILED_MESSAGE.to_string());
    assert_eq!(message, "Could not extract job description from the provided URL.");
}

#[test]
fn test_post_processing_is_idempotent() {
    for mode in [BoilerplateMatch::WordBoundary, BoilerplateMatch::Substring] {
        let rules = ExtractionRules {
            boilerplate_match: mode,
            ..ExtractionRules::default()
        };
        let extractor = Extractor::new(&rules).unwrap();

        let html = r#"
        <div class="job-description">
            Tune   the JIT.  Apply now!  Click to apply
            Equal opportunity employer.
        </div>
        "#;

        let first = extractor.extract_description(html).unwrap().text;
        assert_eq!(first, "Tune the JIT. ! .");
        assert_eq!(extractor.boilerplate().clean(&first), first);
    }
}

#[test]
fn test_title_from_url_slug() {
    let html = "<html><body><p>No title anywhere.</p></body></html>";
    let title = extract_title(html, Some("https://careers.example.com/jobs/senior-backend-engineer/"));
    assert_eq!(title, "Senior Backend Engineer");
}

#[test]
fn test_full_extraction() {
    let html = r#"
    <html>
    <head>
        <title>Staff Engineer | Example Corp</title>
        <meta name="description" content="Join us">
    </head>
    <body>
        <nav>Home Jobs</nav>
        <article>
            <h1 class="posting-headline">Staff Engineer, Compilers</h1>
            <p>Lead the optimizer team.</p>
            <script>window.dataLayer = [];</script>
        </article>
    </body>
    </html>
    "#;

    let result = Extractor::default().extract(html, Some("https://example.com/jobs/staff-engineer"));
    assert_eq!(result.title, "Staff Engineer, Compilers");

    let description = result.description.unwrap();
    assert_eq!(description.text, "Staff Engineer, Compilers Lead the optimizer team.");
    assert_eq!(description.pass, ExtractionPass::Selector("article".into()));
}

#[test]
fn test_rules_from_json() {
    let rules = ExtractionRules::from_json(
        r##"{
            "description_selectors": ["#vacancy"],
            "heading_keywords": ["your mission"],
            "stop_keywords": ["benefits"],
            "description_patterns": [],
            "fallback_title": "Unknown Role"
        }"##,
    )
    .unwrap();
    let extractor = Extractor::new(&rules).unwrap();

    let html = r#"
    <div class="job-description">not in these rules</div>
    <h3>Your mission</h3>
    <p>Keep the fleet healthy.</p>
    <p>Benefits: snacks</p>
    "#;

    let result = extractor.extract(html, None);
    assert_eq!(result.description.unwrap().text, "Keep the fleet healthy.");
    assert_eq!(result.title, "Unknown Role");
}
