//! Default LLM configs loaded from environment variables.
//!
//! Two roles are supported, each served by the provider named in
//! `EMBEDDING_PROVIDER` (`openai` by default, or `ollama`):
//!
//! - **Embedding** → turns movie descriptions and search queries into vectors
//! - **Chat**      → answers free-form questions on `/api/chat`
//!
//! # Environment variables
//!
//! Common:
//! - `EMBEDDING_PROVIDER` = provider kind (`openai`, `ollama`)
//! - `EMBEDDING_MODEL`    = embedding model (default `text-embedding-ada-002` for OpenAI)
//! - `CHAT_MODEL`         = chat model (default `gpt-3.5-turbo` for OpenAI)
//! - `LLM_MAX_TOKENS`     = optional max tokens for chat (u32)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY` (mandatory)
//! - `OPENAI_URL`     (default `https://api.openai.com`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        ConfigError, LlmError, env_opt_u32, env_or, must_env, validate_http_endpoint,
    },
};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Reads `EMBEDDING_PROVIDER`, defaulting to OpenAI.
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for unknown values.
pub fn provider_from_env() -> Result<LlmProvider, LlmError> {
    Ok(env_or("EMBEDDING_PROVIDER", "openai").parse::<LlmProvider>()?)
}

/// Resolves the OpenAI endpoint (`OPENAI_URL` or the public API).
fn openai_endpoint() -> Result<String, LlmError> {
    let url = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url)
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, LlmError> {
    resolve_ollama_endpoint(
        std::env::var("OLLAMA_URL").ok().as_deref(),
        std::env::var("OLLAMA_PORT").ok().as_deref(),
    )
}

fn resolve_ollama_endpoint(url: Option<&str>, port: Option<&str>) -> Result<String, LlmError> {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        validate_http_endpoint("OLLAMA_URL", url)?;
        return Ok(url.to_string());
    }
    if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
        let port = port.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
            var: "OLLAMA_PORT",
            reason: "expected u16 (1..=65535)",
        })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(LlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the **embedding** profile.
///
/// # Defaults
/// - OpenAI: `EMBEDDING_MODEL` falls back to `text-embedding-ada-002`
/// - Ollama: `EMBEDDING_MODEL` is required
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    match provider_from_env()? {
        LlmProvider::OpenAI => Ok(LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            endpoint: openai_endpoint()?,
            api_key: Some(must_env("OPENAI_API_KEY")?),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(30),
        }),
        LlmProvider::Ollama => Ok(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: must_env("EMBEDDING_MODEL")?,
            endpoint: ollama_endpoint()?,
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(30),
        }),
    }
}

/// Constructs the **chat** profile.
///
/// # Defaults
/// - OpenAI: `CHAT_MODEL` falls back to `gpt-3.5-turbo`
/// - Ollama: `CHAT_MODEL` is required
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(60)`
pub fn config_chat() -> Result<LlmModelConfig, LlmError> {
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    match provider_from_env()? {
        LlmProvider::OpenAI => Ok(LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            endpoint: openai_endpoint()?,
            api_key: Some(must_env("OPENAI_API_KEY")?),
            max_tokens,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(60),
        }),
        LlmProvider::Ollama => Ok(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: must_env("CHAT_MODEL")?,
            endpoint: ollama_endpoint()?,
            api_key: None,
            max_tokens,
            temperature: Some(0.7),
            top_p: Some(0.9),
            timeout_secs: Some(60),
        }),
    }
}
