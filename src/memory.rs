//! In-memory backend scoring vectors locally.
//!
//! This module provides [`MemoryBackend`], a zero-dependency backend backed
//! by a `HashMap` protected by a `tokio::sync::RwLock`. It enforces the same
//! contract as a networked backend (connect-before-use, dimension checks,
//! upsert semantics) and is suitable for development and testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::VectorBackend;
use crate::error::{DbError, Result};
use crate::types::{DistanceMetric, PointId, SearchHit, VectorRecord};

const BACKEND_NAME: &str = "memory";

struct Collection {
    vector_size: usize,
    metric: DistanceMetric,
    points: HashMap<PointId, VectorRecord>,
}

/// An in-memory [`VectorBackend`] with local similarity scoring.
///
/// Collections are stored as nested `HashMap`s: collection name → point ID
/// → record. All operations are async-safe via `tokio::sync::RwLock`.
#[derive(Default)]
pub struct MemoryBackend {
    connected: AtomicBool,
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryBackend {
    /// Create a new, disconnected in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(DbError::Connection {
                backend: BACKEND_NAME.to_string(),
                message: "not connected; call connect() first".to_string(),
            })
        }
    }
}

/// Similarity score between two equal-length vectors under the given metric.
///
/// Euclidean distance is negated so that a higher score always means more
/// similar, matching the ordering contract of `search_vectors`.
fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        DistanceMetric::Cosine => cosine_similarity(a, b),
        DistanceMetric::Dot => dot(a, b),
        DistanceMetric::Euclid => {
            let dist: f32 =
                a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt();
            -dist
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity; returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}

#[async_trait]
impl VectorBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::Release);
        debug!("in-memory backend connected");
        Ok(())
    }

    async fn create_collection(
        &self,
        name: &str,
        vector_size: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        self.ensure_connected()?;
        if vector_size == 0 {
            return Err(DbError::CollectionCreation {
                backend: BACKEND_NAME.to_string(),
                message: "vector size must be greater than zero".to_string(),
            });
        }

        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            debug!(collection = name, "collection already exists, skipping creation");
            return Ok(());
        }
        collections.insert(
            name.to_string(),
            Collection { vector_size, metric, points: HashMap::new() },
        );
        debug!(collection = name, vector_size, metric = %metric, "created collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.ensure_connected()?;
        let mut collections = self.collections.write().await;
        collections.remove(name);
        debug!(collection = name, "deleted collection");
        Ok(())
    }

    async fn insert_vector(&self, collection: &str, record: &VectorRecord) -> Result<()> {
        self.ensure_connected()?;
        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| DbError::Insertion {
            backend: BACKEND_NAME.to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;
        if record.vector.len() != store.vector_size {
            return Err(DbError::Insertion {
                backend: BACKEND_NAME.to_string(),
                message: format!(
                    "vector dimension {} does not match collection size {}",
                    record.vector.len(),
                    store.vector_size
                ),
            });
        }
        store.points.insert(record.id.clone(), record.clone());
        debug!(collection, id = %record.id, "inserted vector");
        Ok(())
    }

    async fn search_vectors(
        &self,
        collection: &str,
        query: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        self.ensure_connected()?;
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| DbError::Search {
            backend: BACKEND_NAME.to_string(),
            message: format!("collection '{collection}' does not exist"),
        })?;
        if query.len() != store.vector_size {
            return Err(DbError::Search {
                backend: BACKEND_NAME.to_string(),
                message: format!(
                    "query dimension {} does not match collection size {}",
                    query.len(),
                    store.vector_size
                ),
            });
        }

        let mut hits: Vec<SearchHit> = store
            .points
            .values()
            .map(|record| SearchHit {
                id: record.id.clone(),
                score: score(store.metric, &record.vector, query),
                payload: record.payload.clone(),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        debug!(collection, count = hits.len(), "search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.1f32, 0.2, 0.3];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn euclid_score_is_highest_at_zero_distance() {
        let a = [1.0f32, 0.0];
        let near = [1.0f32, 0.1];
        let far = [3.0f32, 4.0];
        let exact = score(DistanceMetric::Euclid, &a, &a);
        assert_eq!(exact, 0.0);
        assert!(score(DistanceMetric::Euclid, &a, &near) > score(DistanceMetric::Euclid, &a, &far));
    }

    #[test]
    fn dot_score_matches_dot_product() {
        assert_eq!(score(DistanceMetric::Dot, &[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }
}
