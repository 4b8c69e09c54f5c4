//! Backend trait: the capability contract every vector database adapter
//! must satisfy.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DistanceMetric, SearchHit, VectorRecord};

/// A vector database backend.
///
/// Implementations manage named collections of vector records and support
/// inserting and searching by vector similarity. Adapters are constructed
/// disconnected; every operation other than [`connect`](Self::connect)
/// fails with a connection error until a session is established.
///
/// This is a pure contract: no shared state, no default behavior. Backend
/// failures are translated into the [`DbError`](crate::error::DbError)
/// taxonomy at the adapter boundary with the original message preserved.
///
/// # Example
///
/// ```rust,ignore
/// use vecdb::{MemoryBackend, VectorBackend, VectorRecord, DistanceMetric};
///
/// let backend = MemoryBackend::new();
/// backend.connect().await?;
/// backend.create_collection("docs", 3, DistanceMetric::Cosine).await?;
/// backend.insert_vector("docs", &VectorRecord::new(1u64, vec![0.1, 0.2, 0.3])).await?;
/// let hits = backend.search_vectors("docs", &[0.1, 0.2, 0.3], 1).await?;
/// ```
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Identifier of this backend, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Establish a session with the backend service.
    async fn connect(&self) -> Result<()>;

    /// Create a named collection with the given vector size and metric.
    ///
    /// Creation is idempotent: if a collection of the same name already
    /// exists, the call is a no-op.
    async fn create_collection(
        &self,
        name: &str,
        vector_size: usize,
        metric: DistanceMetric,
    ) -> Result<()>;

    /// Delete a named collection and all its vectors.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Insert a vector record into a collection, overwriting any existing
    /// record with the same identifier.
    async fn insert_vector(&self, collection: &str, record: &VectorRecord) -> Result<()>;

    /// Search a collection for the `top_k` records most similar to the
    /// query vector.
    ///
    /// Returns results ordered by non-increasing similarity score, with at
    /// most `top_k` entries.
    async fn search_vectors(
        &self,
        collection: &str,
        query: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>>;
}
