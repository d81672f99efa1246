use std::sync::Arc;

use chunkscribe::application::ports::MediaStore;
use chunkscribe::application::services::{ExtractionError, SegmentExtractor};
use chunkscribe::domain::{BatchId, MediaId, PartitionPlan, SourceMedia, StorageArea, StoragePath};

use crate::helpers::{FakeSlicer, create_test_store};

fn source(batch_id: BatchId, size_bytes: u64, duration_secs: f64) -> SourceMedia {
    let id = MediaId::new();
    SourceMedia {
        id,
        batch_id,
        filename: "talk.mp3".to_string(),
        location: StoragePath::new(StorageArea::Uploads, &batch_id, &format!("{}-talk.mp3", id)),
        size_bytes,
        duration_secs,
    }
}

#[tokio::test]
async fn given_slices_finishing_out_of_order_when_extracting_then_artifacts_are_in_plan_order() {
    let (_dir, store) = create_test_store();
    let slicer = Arc::new(FakeSlicer::new().with_reverse_delays(4));
    let extractor = SegmentExtractor::new(slicer.clone(), store.clone());
    let media = source(BatchId::new(), 4000, 40.0);
    let plan = PartitionPlan::compute(media.size_bytes, media.duration_secs, 1000).unwrap();

    let artifacts = extractor
        .extract(&media, &plan, StorageArea::Staging)
        .await
        .unwrap();

    assert_eq!(slicer.completed(), vec![4, 3, 2, 1]);
    let ordinals: Vec<usize> = artifacts.iter().map(|a| a.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4]);
    for artifact in &artifacts {
        assert!(artifact.filename.starts_with(&media.id.to_string()));
        assert!(artifact.filename.ends_with(&format!("-part{}.mp3", artifact.ordinal)));
        assert_eq!(artifact.location.batch_id(), Some(media.batch_id));
    }
}

#[tokio::test]
async fn given_plan_when_extracting_then_one_file_per_span_with_matching_range() {
    let (_dir, store) = create_test_store();
    let extractor = SegmentExtractor::new(Arc::new(FakeSlicer::new()), store.clone());
    let media = source(BatchId::new(), 3000, 90.0);
    let plan = PartitionPlan::compute(media.size_bytes, media.duration_secs, 1000).unwrap();

    let artifacts = extractor
        .extract(&media, &plan, StorageArea::Staging)
        .await
        .unwrap();

    assert_eq!(artifacts.len(), plan.segment_count());
    let second = store.fetch(&artifacts[1].location).await.unwrap();
    assert_eq!(String::from_utf8(second).unwrap(), "segment 2 30.000-60.000");
}

#[tokio::test]
async fn given_several_failing_slices_when_extracting_then_lowest_ordinal_failure_is_reported() {
    let (_dir, store) = create_test_store();
    let slicer = FakeSlicer::new()
        .with_reverse_delays(3)
        .failing_on(2)
        .failing_on(3);
    let extractor = SegmentExtractor::new(Arc::new(slicer), store.clone());
    let media = source(BatchId::new(), 3000, 30.0);
    let plan = PartitionPlan::compute(media.size_bytes, media.duration_secs, 1000).unwrap();

    let result = extractor.extract(&media, &plan, StorageArea::Staging).await;

    assert!(matches!(
        result,
        Err(ExtractionError::Segment { ordinal: 2, .. })
    ));
}

#[tokio::test]
async fn given_one_failing_slice_when_extracting_then_other_slices_still_complete() {
    let (_dir, store) = create_test_store();
    let slicer = Arc::new(FakeSlicer::new().failing_on(1));
    let extractor = SegmentExtractor::new(slicer.clone(), store.clone());
    let media = source(BatchId::new(), 3000, 30.0);
    let plan = PartitionPlan::compute(media.size_bytes, media.duration_secs, 1000).unwrap();

    let result = extractor.extract(&media, &plan, StorageArea::Staging).await;

    assert!(result.is_err());
    assert_eq!(slicer.completed().len(), 3);
    let staged = store
        .list(&StorageArea::Staging.batch_prefix(&media.batch_id))
        .await
        .unwrap();
    assert_eq!(staged.len(), 2);
}
