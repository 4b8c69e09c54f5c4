//! Data types for collections, vector records, and search results.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// Distance metric used to rank similarity between embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cosine similarity (higher is more similar).
    #[default]
    Cosine,
    /// Euclidean (L2) distance, reported as a negated distance so that
    /// higher scores always mean more similar.
    #[serde(rename = "euclidean")]
    Euclid,
    /// Dot product.
    Dot,
}

impl DistanceMetric {
    /// The canonical lowercase name of this metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclid => "euclidean",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" | "euclid" => Ok(Self::Euclid),
            "dot" => Ok(Self::Dot),
            other => Err(DbError::Config(format!("Unsupported distance metric: {other}"))),
        }
    }
}

/// Identifier of a vector record, unique within its collection.
///
/// Backends accept either numeric or string identifiers; string IDs are
/// passed through as-is (Qdrant requires them to be UUIDs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    /// A numeric identifier.
    Num(u64),
    /// A string identifier.
    Str(String),
}

impl From<u64> for PointId {
    fn from(n: u64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// A vector record to insert: identifier, embedding, and optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier within the collection.
    pub id: PointId,
    /// The embedding. Its length must match the collection's declared
    /// vector size; a mismatch is reported by the backend as an
    /// insertion error.
    pub vector: Vec<f32>,
    /// Key-value metadata stored alongside the vector.
    pub payload: HashMap<String, serde_json::Value>,
}

impl VectorRecord {
    /// Create a record with no metadata.
    pub fn new(id: impl Into<PointId>, vector: Vec<f32>) -> Self {
        Self { id: id.into(), vector, payload: HashMap::new() }
    }

    /// Attach a metadata payload to the record.
    pub fn with_payload(mut self, payload: HashMap<String, serde_json::Value>) -> Self {
        self.payload = payload;
        self
    }
}

/// A single search result: identifier, similarity score, and metadata.
///
/// Higher scores are more similar for every metric; backends normalize
/// direction so result ordering is always non-increasing by score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Identifier of the matched vector.
    pub id: PointId,
    /// Similarity score (higher is more relevant).
    pub score: f32,
    /// Metadata stored with the vector at insert time.
    pub payload: HashMap<String, serde_json::Value>,
}
