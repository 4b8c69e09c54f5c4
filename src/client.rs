//! Unified client facade over the available backends.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::backend::VectorBackend;
use crate::config::ClientConfig;
use crate::error::{DbError, Result};
use crate::memory::MemoryBackend;
#[cfg(feature = "qdrant")]
use crate::qdrant::QdrantBackend;
use crate::types::{DistanceMetric, PointId, SearchHit, VectorRecord};

/// A unified client for interacting with vector databases.
///
/// Resolves a backend selector string to a concrete [`VectorBackend`] at
/// construction time and forwards every call to it unchanged. The client
/// holds no vector data and performs no validation beyond backend
/// selection; all failures propagate to the caller as
/// [`DbError`](crate::error::DbError).
///
/// # Example
///
/// ```rust,ignore
/// use vecdb::{ClientConfig, DbClient, DistanceMetric};
///
/// let client = DbClient::new(ClientConfig::default())?;
/// client.connect().await?;
/// client.create_collection("my_vectors", 128, DistanceMetric::Cosine).await?;
/// ```
pub struct DbClient {
    backend: Box<dyn VectorBackend>,
}

impl fmt::Debug for DbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbClient").field("backend", &self.backend.name()).finish()
    }
}

impl DbClient {
    /// Construct a client for the backend named in `config`.
    ///
    /// Supported selectors: `"qdrant"` (with the `qdrant` feature) and
    /// `"memory"`. No network call is made here; sessions are established
    /// by [`connect`](Self::connect).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] for an unknown selector.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let backend: Box<dyn VectorBackend> = match config.backend.as_str() {
            #[cfg(feature = "qdrant")]
            "qdrant" => Box::new(QdrantBackend::new(config)),
            #[cfg(not(feature = "qdrant"))]
            "qdrant" => {
                return Err(DbError::Config(
                    "backend 'qdrant' requires the 'qdrant' feature".to_string(),
                ));
            }
            "memory" => Box::new(MemoryBackend::new()),
            other => {
                return Err(DbError::Config(format!("Backend '{other}' is not supported")));
            }
        };
        Ok(Self { backend })
    }

    /// Construct a client around a caller-supplied backend implementation.
    pub fn from_backend(backend: Box<dyn VectorBackend>) -> Self {
        Self { backend }
    }

    /// The name of the backend this client was constructed with.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Establish a connection to the vector database.
    pub async fn connect(&self) -> Result<()> {
        self.backend.connect().await?;
        info!(backend = self.backend.name(), "connected to the vector database");
        Ok(())
    }

    /// Create a new collection. A no-op if the collection already exists.
    pub async fn create_collection(
        &self,
        name: &str,
        vector_size: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        self.backend.create_collection(name, vector_size, metric).await?;
        info!(collection = name, "collection created");
        Ok(())
    }

    /// Delete a collection and all its vectors.
    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        self.backend.delete_collection(name).await?;
        info!(collection = name, "collection deleted");
        Ok(())
    }

    /// Insert a vector into a collection, overwriting any existing record
    /// with the same identifier.
    pub async fn insert_vector(
        &self,
        collection: &str,
        id: impl Into<PointId>,
        vector: Vec<f32>,
        payload: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<()> {
        let record = VectorRecord {
            id: id.into(),
            vector,
            payload: payload.unwrap_or_default(),
        };
        self.backend.insert_vector(collection, &record).await?;
        info!(collection, id = %record.id, "vector inserted");
        Ok(())
    }

    /// Search a collection for the `top_k` vectors most similar to the
    /// query, ordered by non-increasing score.
    pub async fn search_vectors(
        &self,
        collection: &str,
        query: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        let hits = self.backend.search_vectors(collection, query, top_k).await?;
        info!(collection, count = hits.len(), "search completed");
        Ok(hits)
    }
}
