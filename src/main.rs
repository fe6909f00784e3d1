use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobletter::cancel::CancelToken;
use jobletter::config::Config;
use jobletter::extractors::{ExtractionRules, Extractor};
use jobletter::fetch::{FetchConfig, PageFetcher, BROWSER_USER_AGENT};
use jobletter::latex::PdfOptions;
use jobletter::llm::{ChatCompletionsClient, OllamaClient, TextGenerator, DEFAULT_OLLAMA_MODEL};
use jobletter::pipeline::{self, Context, JobOutcome};
use jobletter::store::JobStore;

/// Generate a LaTeX cover letter from a job posting
#[derive(Debug, Parser)]
#[command(name = "jobletter", version, about)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Folder to write the LaTeX letter into
    #[arg(long)]
    output: Option<PathBuf>,

    /// Use a local Ollama model instead of the chat-completions API
    #[arg(long)]
    use_ollama: bool,

    /// Ollama model name
    #[arg(long, default_value = DEFAULT_OLLAMA_MODEL)]
    model: String,

    /// Compile the letter to PDF with pdflatex
    #[arg(long)]
    pdf: bool,

    /// Also write a skills summary of the posting next to the letter
    #[arg(long)]
    summary: bool,

    /// Remove a Markdown code fence wrapped around the generated letter
    #[arg(long)]
    strip_fences: bool,

    /// JSON file overriding the extraction rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// URL of the job posting
    #[arg(long)]
    url: Option<String>,

    /// Path to a job description text file
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cancel = CancelToken::new();
    cancel
        .install_ctrlc()
        .context("failed to install Ctrl-C handler")?;

    let ctx = build_context(&cli, &config, cancel)?;

    let outcome = match (&cli.source.url, &cli.source.file) {
        (Some(url), _) => pipeline::process_url(url, cli.output.as_deref(), &ctx)?,
        (None, Some(file)) => pipeline::process_file(file, cli.output.as_deref(), &ctx)?,
        (None, None) => unreachable!("clap requires --url or --file"),
    };

    report(&outcome);
    Ok(())
}

fn build_context(cli: &Cli, config: &Config, cancel: CancelToken) -> Result<Context> {
    let rules = match &cli.rules {
        Some(path) => ExtractionRules::from_json_file(path)?,
        None => ExtractionRules::default(),
    };
    let extractor = Extractor::new(&rules)?;

    let fetcher = PageFetcher::new(&FetchConfig {
        timeout: config.fetch_timeout,
        user_agent: BROWSER_USER_AGENT.to_string(),
    });

    let generator: Box<dyn TextGenerator> = if cli.use_ollama {
        Box::new(OllamaClient::new(
            &config.ollama_url,
            cli.model.clone(),
            config.llm_timeout,
        )?)
    } else {
        Box::new(ChatCompletionsClient::new(
            &config.llm_base_url,
            config.require_api_key()?.to_string(),
            config.llm_model.clone(),
            config.llm_temperature,
            config.llm_timeout,
        )?)
    };
    info!(model = generator.model(), "generation backend ready");

    let resume = fs::read_to_string(&config.resume_path).with_context(|| {
        format!(
            "failed to read resume from {} (set RESUME_PATH)",
            config.resume_path.display()
        )
    })?;

    Ok(Context {
        extractor,
        fetcher,
        store: JobStore::new(&config.job_txt_dir, &config.work_info_path),
        generator,
        resume,
        template_dir: Some(config.template_dir.clone()),
        pdf: cli.pdf.then(|| PdfOptions {
            timeout: config.pdf_timeout,
            ..PdfOptions::default()
        }),
        summarize: cli.summary,
        strip_fences: cli.strip_fences,
        cancel,
    })
}

fn report(outcome: &JobOutcome) {
    if let Some(path) = &outcome.description_path {
        println!("Job description saved to: {}", path.display());
    }
    println!("Cover letter generated at: {}", outcome.letter_dir.display());
    if let Some(path) = &outcome.summary_path {
        println!("Job summary written to: {}", path.display());
    }
    if let Some(path) = &outcome.pdf_path {
        println!("PDF generated at: {}", path.display());
    }
}
