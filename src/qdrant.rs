//! Qdrant backend adapter.
//!
//! Provides [`QdrantBackend`] which implements [`VectorBackend`] using the
//! [qdrant-client](https://docs.rs/qdrant-client) crate over gRPC. Each
//! contract operation maps 1:1 onto a Qdrant client call; every
//! `QdrantError` is caught here and re-raised as the matching
//! [`DbError`](crate::error::DbError) variant with its message preserved.
//!
//! # Example
//!
//! ```rust,ignore
//! use vecdb::{ClientConfig, QdrantBackend, VectorBackend, DistanceMetric};
//!
//! let backend = QdrantBackend::new(ClientConfig::default());
//! backend.connect().await?;
//! backend.create_collection("docs", 384, DistanceMetric::Cosine).await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::VectorBackend;
use crate::config::ClientConfig;
use crate::error::{DbError, Result};
use crate::types::{DistanceMetric, PointId, SearchHit, VectorRecord};

const BACKEND_NAME: &str = "qdrant";

/// A [`VectorBackend`] backed by [Qdrant](https://qdrant.tech/).
///
/// Constructed disconnected; [`connect`](VectorBackend::connect) builds the
/// gRPC client from the configured URL and API key and verifies the server
/// is reachable. `insert_vector` upserts, so an existing identifier is
/// overwritten, and `create_collection` skips collections that already
/// exist.
pub struct QdrantBackend {
    config: ClientConfig,
    client: RwLock<Option<Qdrant>>,
}

impl QdrantBackend {
    /// Create a new, disconnected Qdrant backend from connection parameters.
    pub fn new(config: ClientConfig) -> Self {
        Self { config, client: RwLock::new(None) }
    }

    fn not_connected() -> DbError {
        DbError::Connection {
            backend: BACKEND_NAME.to_string(),
            message: "not connected; call connect() first".to_string(),
        }
    }
}

fn to_distance(metric: DistanceMetric) -> Distance {
    match metric {
        DistanceMetric::Cosine => Distance::Cosine,
        DistanceMetric::Euclid => Distance::Euclid,
        DistanceMetric::Dot => Distance::Dot,
    }
}

fn to_qdrant_id(id: &PointId) -> qdrant_client::qdrant::PointId {
    match id {
        PointId::Num(n) => (*n).into(),
        PointId::Str(s) => s.clone().into(),
    }
}

fn from_qdrant_id(id: Option<&qdrant_client::qdrant::PointId>) -> PointId {
    match id.and_then(|pid| pid.point_id_options.as_ref()) {
        Some(PointIdOptions::Num(n)) => PointId::Num(*n),
        Some(PointIdOptions::Uuid(s)) => PointId::Str(s.clone()),
        None => {
            debug!("scored point arrived without an id");
            PointId::Str(String::new())
        }
    }
}

/// Convert a Qdrant payload value into its JSON equivalent.
fn value_to_json(value: QdrantValue) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(i),
        Some(Kind::DoubleValue(d)) => {
            serde_json::Number::from_f64(d).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => serde_json::Value::Object(
            s.fields.into_iter().map(|(k, v)| (k, value_to_json(v))).collect(),
        ),
    }
}

fn to_payload(payload: &HashMap<String, serde_json::Value>) -> Payload {
    let map: serde_json::Map<String, serde_json::Value> =
        payload.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    Payload::try_from(serde_json::Value::Object(map)).unwrap_or_default()
}

#[async_trait]
impl VectorBackend for QdrantBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn connect(&self) -> Result<()> {
        let mut builder = Qdrant::from_url(&self.config.url()).skip_compatibility_check();
        if let Some(api_key) = &self.config.api_key {
            builder = builder.api_key(api_key.clone());
        }
        let client = builder.build().map_err(|e| DbError::Connection {
            backend: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })?;

        // Verify the server is actually reachable before declaring success.
        client.health_check().await.map_err(|e| DbError::Connection {
            backend: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })?;

        *self.client.write().await = Some(client);
        debug!(url = %self.config.url(), "connected to qdrant");
        Ok(())
    }

    async fn create_collection(
        &self,
        name: &str,
        vector_size: usize,
        metric: DistanceMetric,
    ) -> Result<()> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(Self::not_connected)?;

        let collections =
            client.list_collections().await.map_err(|e| DbError::CollectionCreation {
                backend: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;
        if collections.collections.iter().any(|c| c.name == name) {
            debug!(collection = name, "qdrant collection already exists, skipping creation");
            return Ok(());
        }

        client
            .create_collection(
                CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
                    vector_size as u64,
                    to_distance(metric),
                )),
            )
            .await
            .map_err(|e| DbError::CollectionCreation {
                backend: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        debug!(collection = name, vector_size, metric = %metric, "created qdrant collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(Self::not_connected)?;

        client.delete_collection(name).await.map_err(|e| DbError::CollectionDeletion {
            backend: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })?;
        debug!(collection = name, "deleted qdrant collection");
        Ok(())
    }

    async fn insert_vector(&self, collection: &str, record: &VectorRecord) -> Result<()> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(Self::not_connected)?;

        let point = PointStruct::new(
            to_qdrant_id(&record.id),
            record.vector.clone(),
            to_payload(&record.payload),
        );
        client
            .upsert_points(UpsertPointsBuilder::new(collection, vec![point]).wait(true))
            .await
            .map_err(|e| DbError::Insertion {
                backend: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        debug!(collection, id = %record.id, "upserted vector into qdrant");
        Ok(())
    }

    async fn search_vectors(
        &self,
        collection: &str,
        query: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or_else(Self::not_connected)?;

        let response = client
            .search_points(
                SearchPointsBuilder::new(collection, query.to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DbError::Search {
                backend: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        let hits = response
            .result
            .into_iter()
            .map(|scored| SearchHit {
                id: from_qdrant_id(scored.id.as_ref()),
                score: scored.score,
                payload: scored
                    .payload
                    .into_iter()
                    .map(|(k, v)| (k, value_to_json(v)))
                    .collect(),
            })
            .collect();

        debug!(collection, top_k, "qdrant search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_marshals_to_qdrant_distance() {
        assert_eq!(to_distance(DistanceMetric::Cosine), Distance::Cosine);
        assert_eq!(to_distance(DistanceMetric::Euclid), Distance::Euclid);
        assert_eq!(to_distance(DistanceMetric::Dot), Distance::Dot);
    }

    #[test]
    fn point_ids_round_trip_through_qdrant_form() {
        let num = to_qdrant_id(&PointId::Num(42));
        assert_eq!(from_qdrant_id(Some(&num)), PointId::Num(42));

        let uuid = to_qdrant_id(&PointId::from("6c9bd5a0-0a39-4a7c-9bd1-0f2f3f0a1b2c"));
        assert_eq!(
            from_qdrant_id(Some(&uuid)),
            PointId::from("6c9bd5a0-0a39-4a7c-9bd1-0f2f3f0a1b2c")
        );
    }

    #[test]
    fn missing_point_id_maps_to_an_empty_string_id() {
        assert_eq!(from_qdrant_id(None), PointId::Str(String::new()));
    }

    #[test]
    fn payload_values_convert_to_json() {
        let nested = QdrantValue::from(serde_json::json!({
            "text": "hello",
            "rank": 3,
            "tags": ["a", "b"],
        }));
        let json = value_to_json(nested);
        assert_eq!(json["text"], "hello");
        assert_eq!(json["rank"], 3);
        assert_eq!(json["tags"][1], "b");
    }

    #[tokio::test]
    async fn operations_before_connect_fail_with_connection_error() {
        let backend = QdrantBackend::new(ClientConfig::default());
        let err = backend
            .create_collection("docs", 3, DistanceMetric::Cosine)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Connection { .. }));
    }
}
