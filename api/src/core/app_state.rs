use std::sync::Arc;

use llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_chat, config_embedding},
    error_handler::{env_opt_u32, env_or},
};
use movie_catalog::{OmdbClient, OmdbConfig};
use movie_library::{MovieLibrary, VectorIndex, adapters::LlmEmbedder};
use tracing::info;
use vector_store::{InMemoryIndex, QdrantFacade, VectorStoreConfig};

use crate::error_handler::AppError;

/// Vector index implementation selected by `VECTOR_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorBackend {
    Qdrant,
    Memory,
}

impl std::str::FromStr for VectorBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qdrant" => Ok(Self::Qdrant),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(AppError::Config(format!(
                "VECTOR_BACKEND must be `qdrant` or `memory`, got `{other}`"
            ))),
        }
    }
}

/// Process-level settings read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub address: String,
    pub http_timeout_secs: u64,
    pub embedding_dim: usize,
    pub vector_backend: VectorBackend,
}

impl AppConfig {
    /// Reads `API_ADDRESS`, `HTTP_TIMEOUT_SECS`, `EMBEDDING_DIM` and `VECTOR_BACKEND`.
    pub fn from_env() -> Result<Self, AppError> {
        let http_timeout_secs = env_opt_u32("HTTP_TIMEOUT_SECS")?.unwrap_or(30);
        let embedding_dim = env_opt_u32("EMBEDDING_DIM")?.unwrap_or(1536);
        if http_timeout_secs == 0 || embedding_dim == 0 {
            return Err(AppError::Config(
                "HTTP_TIMEOUT_SECS and EMBEDDING_DIM must be > 0".into(),
            ));
        }

        Ok(Self {
            address: env_or("API_ADDRESS", "0.0.0.0:3000"),
            http_timeout_secs: u64::from(http_timeout_secs),
            embedding_dim: embedding_dim as usize,
            vector_backend: env_or("VECTOR_BACKEND", "qdrant").parse()?,
        })
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<MovieLibrary>,
    /// Chat and embedding profiles; also probed by `/health`.
    pub llm: Arc<LlmServiceProfiles>,
}

impl AppState {
    pub fn new(library: Arc<MovieLibrary>, llm: Arc<LlmServiceProfiles>) -> Self {
        Self { library, llm }
    }

    /// Builds every client from the environment and wires the library.
    ///
    /// With the Qdrant backend the collection is created when missing.
    pub async fn from_env(cfg: &AppConfig) -> Result<Self, AppError> {
        let llm = Arc::new(LlmServiceProfiles::new(
            config_chat()?,
            config_embedding()?,
            Some(cfg.http_timeout_secs),
        )?);
        let (chat, embedding) = llm.profiles();
        info!(
            provider = %embedding.provider,
            embedding_model = %embedding.model,
            chat_model = %chat.model,
            "LLM profiles loaded"
        );

        let catalog = Arc::new(OmdbClient::new(&OmdbConfig::from_env(cfg.http_timeout_secs)?)?);
        let embedder = Arc::new(LlmEmbedder::new(llm.clone(), cfg.embedding_dim));

        let index: Arc<dyn VectorIndex> = match cfg.vector_backend {
            VectorBackend::Qdrant => {
                let vcfg = VectorStoreConfig::from_env(cfg.embedding_dim, cfg.http_timeout_secs)?;
                let facade = QdrantFacade::new(&vcfg)?;
                facade.ensure_collection().await?;
                info!(collection = facade.collection(), dim = facade.dim(), "using Qdrant index");
                Arc::new(facade)
            }
            VectorBackend::Memory => {
                let memory = InMemoryIndex::new(cfg.embedding_dim);
                info!(dim = memory.dim(), "using in-memory index");
                Arc::new(memory)
            }
        };

        let library = Arc::new(MovieLibrary::new(catalog, embedder, index));
        Ok(Self::new(library, llm))
    }
}
