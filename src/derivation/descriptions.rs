//! Batched time series description lookup
//!
//! The Publish API caps how many ids one description request may carry, so
//! ids are fetched in consecutive chunks and merged. The merged map must hold
//! exactly one description per requested id; anything else is a hard failure.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Result, RetrievalError};
use crate::sources::DescriptionSource;
use crate::types::{SeriesId, TimeSeriesDescription};

/// Descriptions keyed by unique id
pub type DescriptionMap = HashMap<SeriesId, TimeSeriesDescription>;

/// Fetch descriptions for `ids` in chunks of at most `max_batch`
pub async fn fetch_descriptions<S>(
    source: &S,
    ids: &[SeriesId],
    max_batch: usize,
) -> Result<DescriptionMap>
where
    S: DescriptionSource + ?Sized,
{
    debug_assert!(max_batch > 0, "description batch size must be at least 1");
    let requested: HashSet<&SeriesId> = ids.iter().collect();
    let mut received = Vec::with_capacity(ids.len());
    let mut remaining = ids.len();

    for chunk in ids.chunks(max_batch) {
        remaining -= chunk.len();
        debug!(
            "Fetching {} time series descriptions, remaining to fetch: {}",
            chunk.len(),
            remaining
        );

        let descriptions = source
            .descriptions(chunk)
            .await
            .map_err(|err| RetrievalError::Descriptions { source: err })?;
        received.extend(descriptions);
    }

    if received.len() != ids.len() {
        return Err(RetrievalError::DescriptionCount {
            requested: ids.len(),
            received: received.len(),
        });
    }

    let mut map = DescriptionMap::with_capacity(received.len());
    for desc in received {
        if !requested.contains(&desc.unique_id) {
            return Err(RetrievalError::UnrequestedDescription(desc.unique_id));
        }
        map.insert(desc.unique_id.clone(), desc);
    }

    // Duplicates collapse in the map and leave a requested id uncovered
    if map.len() != ids.len() {
        return Err(RetrievalError::DescriptionCount {
            requested: ids.len(),
            received: map.len(),
        });
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{InMemorySource, SourceCall};
    use async_trait::async_trait;
    use proptest::prelude::*;

    fn source_with(count: usize) -> (InMemorySource, Vec<SeriesId>) {
        let ids: Vec<SeriesId> = (0..count).map(|i| SeriesId::new(format!("ts-{i:03}"))).collect();
        let source = ids.iter().fold(InMemorySource::new(), |source, id| {
            source.with_description(TimeSeriesDescription::new(
                id.clone(),
                format!("Discharge.{}@01234567", id),
                "01234567",
            ))
        });
        (source, ids)
    }

    struct UnavailableSource;

    #[async_trait]
    impl DescriptionSource for UnavailableSource {
        async fn descriptions(
            &self,
            _ids: &[SeriesId],
        ) -> anyhow::Result<Vec<TimeSeriesDescription>> {
            Err(anyhow::anyhow!("503 Service Unavailable"))
        }
    }

    /// Answers every request with the description of the first requested id
    struct RepeatingSource;

    #[async_trait]
    impl DescriptionSource for RepeatingSource {
        async fn descriptions(
            &self,
            ids: &[SeriesId],
        ) -> anyhow::Result<Vec<TimeSeriesDescription>> {
            Ok(ids
                .iter()
                .map(|_| {
                    TimeSeriesDescription::new(
                        ids[0].clone(),
                        "Stage.Telemetry@01234567",
                        "01234567",
                    )
                })
                .collect())
        }
    }

    /// Answers with descriptions for ids nobody asked for
    struct StrangerSource;

    #[async_trait]
    impl DescriptionSource for StrangerSource {
        async fn descriptions(
            &self,
            ids: &[SeriesId],
        ) -> anyhow::Result<Vec<TimeSeriesDescription>> {
            Ok(ids
                .iter()
                .map(|id| {
                    TimeSeriesDescription::new(
                        format!("{}-other", id),
                        "Stage.Telemetry@01234567",
                        "01234567",
                    )
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_fetch_in_batches() {
        let (source, ids) = source_with(65);

        let map = fetch_descriptions(&source, &ids, 30).await.unwrap();

        assert_eq!(map.len(), 65);
        assert_eq!(
            source.calls(),
            vec![
                SourceCall::Descriptions(30),
                SourceCall::Descriptions(30),
                SourceCall::Descriptions(5),
            ]
        );
        assert_eq!(map[&ids[64]].unique_id, ids[64]);
    }

    #[tokio::test]
    async fn test_empty_request_issues_no_fetch() {
        let (source, ids) = source_with(0);

        let map = fetch_descriptions(&source, &ids, 30).await.unwrap();

        assert!(map.is_empty());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_short_result_is_failure() {
        let (source, mut ids) = source_with(3);
        ids.push(SeriesId::from("unknown"));

        let err = fetch_descriptions(&source, &ids, 30).await.unwrap_err();

        assert!(matches!(
            err,
            RetrievalError::DescriptionCount {
                requested: 4,
                received: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_descriptions_are_failure() {
        let ids = vec![SeriesId::from("a"), SeriesId::from("b")];

        let err = fetch_descriptions(&RepeatingSource, &ids, 30)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetrievalError::DescriptionCount {
                requested: 2,
                received: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_duplicates_across_batches_are_failure() {
        let ids = vec![SeriesId::from("a"), SeriesId::from("b"), SeriesId::from("c")];

        // [a, b] comes back as [a, a]; [c] comes back as [c]
        let err = fetch_descriptions(&RepeatingSource, &ids, 2)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetrievalError::DescriptionCount {
                requested: 3,
                received: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_unrequested_description_is_failure() {
        let err = fetch_descriptions(&StrangerSource, &[SeriesId::from("a")], 30)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetrievalError::UnrequestedDescription(id) if id == SeriesId::from("a-other")
        ));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let err = fetch_descriptions(&UnavailableSource, &[SeriesId::from("a")], 30)
            .await
            .unwrap_err();

        assert!(matches!(err, RetrievalError::Descriptions { .. }));
    }

    proptest! {
        #[test]
        fn batches_never_exceed_ceiling(count in 0usize..150, max_batch in 1usize..70) {
            let (source, ids) = source_with(count);
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

            let map = runtime.block_on(fetch_descriptions(&source, &ids, max_batch)).unwrap();

            prop_assert_eq!(map.len(), count);
            let calls = source.calls();
            prop_assert_eq!(calls.len(), count.div_ceil(max_batch));
            for call in calls {
                match call {
                    SourceCall::Descriptions(n) => prop_assert!(n >= 1 && n <= max_batch),
                    other => prop_assert!(false, "unexpected call {:?}", other),
                }
            }
        }
    }
}
