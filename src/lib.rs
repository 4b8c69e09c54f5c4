//! # vecdb
//!
//! A thin, pluggable async client facade over vector database backends.
//!
//! One capability contract ([`VectorBackend`]) covers connecting, creating
//! collections, inserting vectors, and similarity search. The
//! [`DbClient`] facade resolves a backend selector string to a concrete
//! adapter; backend-native failures are translated into the closed
//! [`DbError`] taxonomy with their diagnostic messages preserved.
//!
//! Backends:
//! - [`QdrantBackend`] — [Qdrant](https://qdrant.tech/) over gRPC via the
//!   `qdrant-client` crate (feature `qdrant`, enabled by default).
//! - [`MemoryBackend`] — local scoring over a `HashMap`, for development
//!   and testing.
//!
//! # Example
//!
//! ```rust,ignore
//! use vecdb::{ClientConfig, DbClient, DistanceMetric};
//!
//! let client = DbClient::new(ClientConfig::default())?;
//! client.connect().await?;
//! client.create_collection("my_vectors", 3, DistanceMetric::Cosine).await?;
//! client.insert_vector("my_vectors", 1u64, vec![0.1, 0.2, 0.3], None).await?;
//! let hits = client.search_vectors("my_vectors", &[0.1, 0.2, 0.3], 1).await?;
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;
#[cfg(feature = "qdrant")]
pub mod qdrant;
pub mod types;

pub use backend::VectorBackend;
pub use client::DbClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{DbError, Result};
pub use memory::MemoryBackend;
#[cfg(feature = "qdrant")]
pub use qdrant::QdrantBackend;
pub use types::{DistanceMetric, PointId, SearchHit, VectorRecord};
