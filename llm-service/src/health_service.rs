//! Health probes for the LLM backends (Ollama, OpenAI).
//!
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth (best-effort model existence check)
//!
//! The returned [`HealthStatus`] is JSON-serializable and backs the `/health`
//! endpoint. [`HealthService::check`] never fails; errors map to `ok=false`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{HealthError, HttpError, LlmError, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: cfg.provider.to_string(),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`LlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        debug!(default_timeout_secs = timeout.as_secs(), "HealthService initialized");

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks a single config. Never returns an error.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            warn!(provider = %cfg.provider, endpoint = %cfg.endpoint, "invalid endpoint");
            return HealthStatus::new(cfg, false, 0, "endpoint is empty or missing http/https");
        }

        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
            LlmProvider::OpenAI => self.try_probe_openai(cfg).await,
        };
        let latency = start.elapsed().as_millis();

        match result {
            Ok((ok, message)) => {
                info!(provider = %cfg.provider, model = %cfg.model, ok, latency_ms = latency, "health probe completed");
                HealthStatus::new(cfg, ok, latency, message)
            }
            Err(err) => {
                warn!(provider = %cfg.provider, model = %cfg.model, error = %err, latency_ms = latency, "health probe failed");
                HealthStatus::new(cfg, false, latency, err.to_string())
            }
        }
    }

    /// Checks several configs sequentially.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Probe: `GET /api/tags`, then look for `cfg.model` in `models[].name`.
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<(bool, String), LlmError> {
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let url = format!("{}/api/tags", cfg.endpoint.trim().trim_end_matches('/'));
        let resp = self.get(cfg, &url, None).await?;

        Ok(match resp.json::<Tags>().await {
            Ok(Tags { models: Some(models) }) => {
                if models.iter().any(|m| m.name == cfg.model || m.name.starts_with(&format!("{}:", cfg.model))) {
                    (true, "Ollama is healthy; model is available".into())
                } else {
                    (false, "Ollama is up, but model not found in /api/tags".into())
                }
            }
            Ok(Tags { models: None }) => (true, "Ollama is healthy; tags without `models`".into()),
            Err(e) => (true, format!("Ollama is reachable; failed to decode /api/tags: {e}")),
        })
    }

    /// Probe: `GET /v1/models` with Bearer auth, then look for `cfg.model` in `data[].id`.
    async fn try_probe_openai(&self, cfg: &LlmModelConfig) -> Result<(bool, String), LlmError> {
        #[derive(Deserialize)]
        struct ModelItem {
            id: String,
        }
        #[derive(Deserialize)]
        struct Models {
            data: Vec<ModelItem>,
        }

        let api_key = cfg
            .api_key
            .as_deref()
            .ok_or_else(|| HealthError::Decode("missing OpenAI API key".into()))?;
        let auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;

        let url = format!("{}/v1/models", cfg.endpoint.trim().trim_end_matches('/'));
        let resp = self.get(cfg, &url, Some(auth)).await?;

        Ok(match resp.json::<Models>().await {
            Ok(models) if models.data.iter().any(|m| m.id == cfg.model) => {
                (true, "OpenAI is healthy; model is available".into())
            }
            Ok(_) => (false, "OpenAI is up, but model not found in /v1/models".into()),
            Err(e) => (true, format!("OpenAI is reachable; failed to decode /v1/models: {e}")),
        })
    }

    /// Probes never outlast the health timeout, even when the profile
    /// allows its own calls to run longer.
    fn probe_timeout(&self, cfg: &LlmModelConfig) -> Duration {
        cfg.timeout_secs
            .map(Duration::from_secs)
            .map_or(self.default_timeout, |t| t.min(self.default_timeout))
    }

    async fn get(
        &self,
        cfg: &LlmModelConfig,
        url: &str,
        auth: Option<header::HeaderValue>,
    ) -> Result<reqwest::Response, LlmError> {
        let timeout = self.probe_timeout(cfg);

        debug!(provider = %cfg.provider, "GET {}", url);
        let mut req = self.client.get(url).timeout(timeout);
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url: url.to_string(),
                snippet: make_snippet(&text),
            })
            .into());
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_endpoint_is_reported_without_network() {
        let svc = HealthService::new(Some(1)).unwrap();
        let cfg = LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "nomic-embed-text".into(),
            endpoint: "localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };

        let status = svc.check(&cfg).await;
        assert!(!status.ok);
        assert_eq!(status.provider, "Ollama");
        assert_eq!(status.latency_ms, 0);
    }

    #[test]
    fn probe_timeout_is_capped_by_health_timeout() {
        let svc = HealthService::new(Some(5)).unwrap();
        let mut cfg = LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-3.5-turbo".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(60),
        };
        assert_eq!(svc.probe_timeout(&cfg), Duration::from_secs(5));

        cfg.timeout_secs = Some(2);
        assert_eq!(svc.probe_timeout(&cfg), Duration::from_secs(2));

        cfg.timeout_secs = None;
        assert_eq!(svc.probe_timeout(&cfg), Duration::from_secs(5));
    }
}
