//! Environment-driven configuration
//!
//! Values come from the process environment, with a `.env` file loaded
//! first when present. Empty values count as unset.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TEMPERATURE};

/// Runtime configuration loaded from environment variables (and `.env`).
///
/// Only the API key is secret; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Required only when the chat-completions backend is used
    pub api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub ollama_url: String,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub pdf_timeout: Duration,
    pub resume_path: PathBuf,
    pub template_dir: PathBuf,
    pub job_txt_dir: PathBuf,
    pub work_info_path: PathBuf,
    /// Level for this crate's logs when `RUST_LOG` is unset or is not a
    /// valid filter directive; a valid `RUST_LOG` is used as the filter as is
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            api_key: get("DEEPSEEK_API_KEY"),
            llm_base_url: or("LLM_BASE_URL", DEFAULT_BASE_URL),
            llm_model: or("LLM_MODEL", DEFAULT_MODEL),
            llm_temperature: match get("LLM_TEMPERATURE") {
                Some(v) => v
                    .trim()
                    .parse::<f32>()
                    .context("LLM_TEMPERATURE must be a number")?,
                None => DEFAULT_TEMPERATURE,
            },
            ollama_url: or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            fetch_timeout: seconds(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", 30)?,
            llm_timeout: seconds(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 120)?,
            pdf_timeout: seconds(get("PDF_TIMEOUT_SECS"), "PDF_TIMEOUT_SECS", 120)?,
            resume_path: or("RESUME_PATH", "resume.txt").into(),
            template_dir: or("TEMPLATE_DIR", "cover_letter_template").into(),
            job_txt_dir: or("JOB_TXT_DIR", "job_txt").into(),
            work_info_path: or("WORK_INFO_PATH", "work_info.json").into(),
            rust_log: or("RUST_LOG", "info"),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("Required environment variable 'DEEPSEEK_API_KEY' is not set (or pass --use-ollama)")
    }
}

fn seconds(value: Option<String>, key: &str, default: u64) -> Result<Duration> {
    let secs = match value {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds"))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.llm_base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.llm_model, "deepseek-chat");
        assert_eq!(config.llm_temperature, 1.3);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.job_txt_dir, PathBuf::from("job_txt"));
        assert_eq!(config.work_info_path, PathBuf::from("work_info.json"));
        assert_eq!(config.rust_log, "info");
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DEEPSEEK_API_KEY", "sk-test"),
            ("LLM_TEMPERATURE", "0.7"),
            ("FETCH_TIMEOUT_SECS", " 5 "),
            ("RESUME_PATH", "/tmp/cv.txt"),
            ("OLLAMA_URL", ""),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.llm_temperature, 0.7);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.resume_path, PathBuf::from("/tmp/cv.txt"));
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(Config::from_lookup(lookup(&[("PDF_TIMEOUT_SECS", "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[("LLM_TEMPERATURE", "hot")])).is_err());
    }
}
