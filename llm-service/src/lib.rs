//! Shared LLM access for the movie library backend.
//!
//! Wraps the two providers the backend talks to (OpenAI and a local Ollama
//! runtime) behind [`service_profiles::LlmServiceProfiles`], which exposes a
//! **chat** profile and an **embedding** profile.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{LlmError, Result};
pub use health_service::{HealthService, HealthStatus};
pub use service_profiles::LlmServiceProfiles;
