//! LaTeX cover-letter output
//!
//! A letter is a folder: the files of a template directory (if any), plus a
//! `body.tex` holding the generated paragraphs. `main.tex` is expected to
//! `\input{body}`; when the template provides none, a minimal one is written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;

pub const BODY_FILE: &str = "body.tex";
pub const MAIN_FILE: &str = "main.tex";
pub const PDF_FILE: &str = "main.pdf";

const FALLBACK_MAIN: &str = r"\documentclass[11pt]{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage[margin=1in]{geometry}
\setlength{\parskip}{0.8em}
\setlength{\parindent}{0pt}

\begin{document}
\input{body}
\end{document}
";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum LatexError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{0}` not found; install a LaTeX distribution (TeX Live, MacTeX or MiKTeX) or compile manually")]
    CompilerMissing(String),

    #[error("LaTeX compilation timed out after {0:?}")]
    Timeout(Duration),

    #[error("LaTeX compilation cancelled")]
    Cancelled,

    #[error("no PDF produced in {dir} (compiler exited with {status})")]
    NoOutput { dir: PathBuf, status: ExitStatus },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LatexError + '_ {
    move |source| LatexError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `cover_letter_<stem>` with spaces replaced by underscores
pub fn default_output_dir(stem: &str) -> PathBuf {
    PathBuf::from(format!("cover_letter_{}", stem.trim().replace(' ', "_")))
}

/// Create the letter folder and write `body` verbatim into `body.tex`
pub fn write_cover_letter(
    template_dir: Option<&Path>,
    output_dir: &Path,
    body: &str,
) -> Result<PathBuf, LatexError> {
    fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

    match template_dir {
        Some(dir) if dir.is_dir() => copy_template(dir, output_dir)?,
        Some(dir) => warn!(template = %dir.display(), "template directory not found; using built-in main.tex"),
        None => {}
    }

    let main = output_dir.join(MAIN_FILE);
    if !main.exists() {
        fs::write(&main, FALLBACK_MAIN).map_err(io_error(&main))?;
    }

    let body_path = output_dir.join(BODY_FILE);
    fs::write(&body_path, body).map_err(io_error(&body_path))?;

    info!(dir = %output_dir.display(), "wrote cover letter");
    Ok(output_dir.to_path_buf())
}

/// Copy the regular files at the top level of `template_dir`
fn copy_template(template_dir: &Path, output_dir: &Path) -> Result<(), LatexError> {
    for entry in fs::read_dir(template_dir).map_err(io_error(template_dir))? {
        let entry = entry.map_err(io_error(template_dir))?;
        let src = entry.path();
        if !src.is_file() {
            continue;
        }

        let dst = output_dir.join(entry.file_name());
        fs::copy(&src, &dst).map_err(io_error(&src))?;
        debug!(file = %dst.display(), "copied template file");
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            args: vec!["-interaction=nonstopmode".to_string(), MAIN_FILE.to_string()],
            timeout: Duration::from_secs(120),
        }
    }
}

/// Compile the letter in `dir`, returning the path of `main.pdf`.
///
/// The compiler is killed when `options.timeout` elapses or `cancel` fires.
pub fn compile_pdf(
    dir: &Path,
    options: &PdfOptions,
    cancel: &CancelToken,
) -> Result<PathBuf, LatexError> {
    info!(dir = %dir.display(), program = %options.program, "compiling PDF");

    let mut child = match Command::new(&options.program)
        .args(&options.args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LatexError::CompilerMissing(options.program.clone()));
        }
        Err(source) => {
            return Err(LatexError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let deadline = Instant::now() + options.timeout;
    let status = loop {
        if let Some(status) = child.try_wait().map_err(io_error(dir))? {
            break status;
        }

        let failure = if cancel.is_cancelled() {
            Some(LatexError::Cancelled)
        } else if Instant::now() >= deadline {
            Some(LatexError::Timeout(options.timeout))
        } else {
            None
        };

        if let Some(err) = failure {
            if let Err(e) = child.kill() {
                warn!(error = %e, "failed to kill LaTeX compiler");
            }
            let _ = child.wait();
            return Err(err);
        }

        thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        // nonstopmode exits non-zero on recoverable errors but may still produce a PDF
        warn!(%status, "LaTeX compiler reported errors; see main.log");
    }

    let pdf = dir.join(PDF_FILE);
    if pdf.exists() {
        info!(pdf = %pdf.display(), "PDF generated");
        Ok(pdf)
    } else {
        Err(LatexError::NoOutput {
            dir: dir.to_path_buf(),
            status,
        })
    }
}
