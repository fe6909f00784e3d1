//! End-to-end workflows
//!
//! URL: fetch -> extract -> save description -> prompt -> generate -> write letter.
//! File: read -> prompt -> generate -> write letter.
//! Either may then compile the letter to PDF. Every failure ends the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::extractors::{Extractor, EXTRACTION_FAILED_MESSAGE};
use crate::fetch::{FetchError, PageFetcher};
use crate::jobfile::read_single_line;
use crate::latex::{compile_pdf, default_output_dir, write_cover_letter, LatexError, PdfOptions};
use crate::llm::{strip_code_fences, LlmError, TextGenerator};
use crate::prompts::{cover_letter_prompt, job_summary_prompt, SYSTEM_PROMPT};
use crate::store::{JobStore, StoreError};

pub const SUMMARY_FILE: &str = "summary.md";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{} ({url})", EXTRACTION_FAILED_MESSAGE)]
    NoDescription { url: String },

    #[error("failed to read job description file {path}: {source}")]
    ReadJobFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("job description file {0} is empty")]
    EmptyJobFile(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("text generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Latex(#[from] LatexError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cancelled")]
    Cancelled,
}

/// Everything a run needs
pub struct Context {
    pub extractor: Extractor,
    pub fetcher: PageFetcher,
    pub store: JobStore,
    pub generator: Box<dyn TextGenerator>,
    pub resume: String,
    pub template_dir: Option<PathBuf>,
    /// Compile to PDF after writing the letter
    pub pdf: Option<PdfOptions>,
    /// Also generate a skills summary next to the letter
    pub summarize: bool,
    /// Drop a surrounding Markdown code fence from the generated body;
    /// otherwise the body is written verbatim
    pub strip_fences: bool,
    pub cancel: CancelToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub title: Option<String>,
    /// Saved description text file (URL runs only)
    pub description_path: Option<PathBuf>,
    pub letter_dir: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

/// Process a job posting URL
pub fn process_url(
    url: &str,
    output: Option<&Path>,
    ctx: &Context,
) -> Result<JobOutcome, PipelineError> {
    let html = ctx.fetcher.fetch(url)?;
    checkpoint(ctx)?;
    process_page(url, &html, output, ctx)
}

/// Process an already fetched posting
pub fn process_page(
    url: &str,
    html: &str,
    output: Option<&Path>,
    ctx: &Context,
) -> Result<JobOutcome, PipelineError> {
    let extracted = ctx.extractor.extract(html, Some(url));
    let Some(description) = extracted.description else {
        return Err(PipelineError::NoDescription {
            url: url.to_string(),
        });
    };
    info!(title = %extracted.title, pass = ?description.pass, "extracted job posting");

    let record = ctx.store.save(&description.text, Some(&extracted.title))?;

    let letter_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_dir(&record.key));

    let mut outcome = write_letter(&description.text, &letter_dir, ctx)?;
    outcome.title = Some(extracted.title);
    outcome.description_path = Some(record.path);
    Ok(outcome)
}

/// Process a local job-description text file
pub fn process_file(
    path: &Path,
    output: Option<&Path>,
    ctx: &Context,
) -> Result<JobOutcome, PipelineError> {
    let description = read_single_line(path).map_err(|source| PipelineError::ReadJobFile {
        path: path.to_path_buf(),
        source,
    })?;
    if description.is_empty() {
        return Err(PipelineError::EmptyJobFile(path.to_path_buf()));
    }

    let letter_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            default_output_dir(&stem)
        }
    };

    write_letter(&description, &letter_dir, ctx)
}

fn write_letter(
    description: &str,
    letter_dir: &Path,
    ctx: &Context,
) -> Result<JobOutcome, PipelineError> {
    checkpoint(ctx)?;

    let prompt = cover_letter_prompt(&ctx.resume, description);
    let generated = ctx.generator.generate(SYSTEM_PROMPT, &prompt)?;
    checkpoint(ctx)?;

    let body = if ctx.strip_fences {
        strip_code_fences(&generated)
    } else {
        generated.as_str()
    };
    write_cover_letter(ctx.template_dir.as_deref(), letter_dir, body)?;

    let summary_path = if ctx.summarize {
        let summary = ctx
            .generator
            .generate(SYSTEM_PROMPT, &job_summary_prompt(description))?;
        let path = letter_dir.join(SUMMARY_FILE);
        fs::write(&path, summary.trim()).map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;
        checkpoint(ctx)?;
        Some(path)
    } else {
        None
    };

    let pdf_path = match &ctx.pdf {
        Some(options) => match compile_pdf(letter_dir, options, &ctx.cancel) {
            Ok(pdf) => Some(pdf),
            Err(LatexError::Cancelled) => return Err(PipelineError::Cancelled),
            Err(e) => {
                warn!(error = %e, dir = %letter_dir.display(), "PDF compilation failed; LaTeX sources are kept");
                None
            }
        },
        None => None,
    };

    Ok(JobOutcome {
        title: None,
        description_path: None,
        letter_dir: letter_dir.to_path_buf(),
        summary_path,
        pdf_path,
    })
}

fn checkpoint(ctx: &Context) -> Result<(), PipelineError> {
    if ctx.cancel.is_cancelled() {
        Err(PipelineError::Cancelled)
    } else {
        Ok(())
    }
}
