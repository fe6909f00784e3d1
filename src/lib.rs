//! Cover letters from job postings
//!
//! Scrapes a job posting (or reads a local description), asks a
//! text-generation service for a tailored cover letter and writes it as LaTeX:
//! - extractors: best-effort description and title extraction from HTML
//! - fetch: blocking page fetcher with timeouts
//! - store: saved descriptions and the title -> description mapping
//! - prompts, llm: prompt templates and generation backends
//! - latex: letter folder output and PDF compilation
//! - pipeline: the URL and file workflows

pub mod cancel;
pub mod config;
pub mod extractors;
pub mod fetch;
pub mod jobfile;
pub mod latex;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod store;

pub use extractors::*;
