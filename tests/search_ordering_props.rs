//! Property tests for search result ordering across metrics.

use proptest::prelude::*;
use vecdb::backend::VectorBackend;
use vecdb::memory::MemoryBackend;
use vecdb::types::{DistanceMetric, VectorRecord};

/// Generate a non-zero embedding of the given dimension.
///
/// Magnitudes are deliberately left unnormalized: dot and negated-Euclidean
/// scores then span a wide range, so the ordering property is exercised well
/// beyond the unit sphere.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-5.0f32..5.0f32, dim).prop_filter("non-zero embedding", |v| {
        v.iter().map(|x| x * x).sum::<f32>().sqrt() > 1e-3
    })
}

fn arb_metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::Cosine),
        Just(DistanceMetric::Euclid),
        Just(DistanceMetric::Dot),
    ]
}

/// For any set of stored vectors and any metric, search results are ordered
/// by non-increasing score and bounded by both `top_k` and the number of
/// distinct stored identifiers.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            vectors in proptest::collection::vec(arb_embedding(DIM), 1..20),
            query in arb_embedding(DIM),
            metric in arb_metric(),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (hits, stored) = rt.block_on(async {
                let backend = MemoryBackend::new();
                backend.connect().await.unwrap();
                backend.create_collection("props", DIM, metric).await.unwrap();

                for (i, vector) in vectors.iter().enumerate() {
                    let record = VectorRecord::new(i as u64, vector.clone());
                    backend.insert_vector("props", &record).await.unwrap();
                }

                let hits = backend.search_vectors("props", &query, top_k).await.unwrap();
                (hits, vectors.len())
            });

            prop_assert!(hits.len() <= top_k);
            prop_assert!(hits.len() <= stored);

            for window in hits.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
