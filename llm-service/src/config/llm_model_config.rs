use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM profile (chat or embedding).
///
/// # Fields
///
/// - `provider`: which backend serves the profile.
/// - `model`: model identifier (e.g., `"text-embedding-ada-002"`, `"gpt-3.5-turbo"`).
/// - `endpoint`: base URL of the provider, without the `/v1/...` suffix.
/// - `api_key`: API key for providers that require authentication.
/// - `max_tokens`: maximum number of tokens to generate (chat only).
/// - `temperature`: sampling temperature (chat only).
/// - `top_p`: nucleus sampling cutoff (chat only).
/// - `timeout_secs`: per-request timeout in seconds.
///
/// # Examples
///
/// ```
/// use llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "text-embedding-ada-002".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(30),
/// };
/// assert_eq!(cfg.provider, LlmProvider::OpenAI);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Provider base URL.
    pub endpoint: String,

    /// Optional API key for authentication (required by OpenAI).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
