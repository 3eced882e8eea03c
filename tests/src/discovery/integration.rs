use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use qrs_common::catalog::{AvailabilityMap, Region, Service, paths};
use qrs_common::config::Config;
use qrs_common::error::{ProbeError, QueryError};
use qrs_core::discovery::DiscoveryService;
use qrs_core::prober::{AvailabilityProber, ProbeOptions};
use qrs_core::progress::ProgressSink;
use qrs_core::stub::StubParameterStore;
use tokio_util::sync::CancellationToken;

fn discovery(store: Arc<StubParameterStore>, concurrency: usize) -> DiscoveryService {
    let cfg = Config {
        concurrency,
        ..Config::default()
    };
    DiscoveryService::new(store, &cfg, CancellationToken::new())
}

fn regions(ids: &[&str]) -> Vec<Region> {
    ids.iter().map(|id| Region::from(*id)).collect()
}

fn many_regions(store: StubParameterStore, count: usize, services: &[&str]) -> StubParameterStore {
    (0..count).fold(store, |store, idx| {
        store.with_region(&format!("zz-region-{idx:02}"), services)
    })
}

/// This test mirrors the canonical lookup: one service present in one of two regions.
#[tokio::test]
async fn lambda_only_in_us_east_1() {
    let store = Arc::new(
        StubParameterStore::new()
            .with_region("eu-west-1", &["ec2", "s3"])
            .with_region("us-east-1", &["ec2", "lambda", "s3"]),
    );

    let map = discovery(store, 3)
        .availability(&Service::from("lambda"), ProgressSink::Discard)
        .await
        .unwrap();

    let expected = AvailabilityMap::from_iter([
        (Region::from("eu-west-1"), false),
        (Region::from("us-east-1"), true),
    ]);
    assert_eq!(map, expected);
}

#[tokio::test]
async fn empty_region_list_emits_nothing() {
    let store = Arc::new(StubParameterStore::new());
    let (sink, mut rx) = ProgressSink::reliable(4);

    let map = discovery(store.clone(), 3)
        .availability(&Service::from("lambda"), sink)
        .await
        .unwrap();

    assert!(map.is_empty());
    assert_eq!(rx.recv().await, None);
    assert_eq!(store.requests_for(paths::REGIONS_PATH), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_region_reported_exactly_once() {
    for count in [1, 2, 5, 17] {
        let store = Arc::new(
            many_regions(StubParameterStore::new(), count, &["ec2", "s3"])
                .with_default_page_size(1)
                .with_jitter(Duration::from_millis(3)),
        );
        let discovery = discovery(store, 3);

        let regions = discovery.regions().await.unwrap();
        let map = discovery
            .probe(&Service::from("s3"), &regions, ProgressSink::Discard)
            .await
            .unwrap();

        let expected: BTreeSet<&Region> = regions.iter().collect();
        let actual: BTreeSet<&Region> = map.regions().collect();
        assert_eq!(map.len(), count);
        assert_eq!(actual, expected);
    }
}

#[tokio::test]
async fn service_missing_from_reference_region_is_unavailable_everywhere() {
    let store = Arc::new(
        StubParameterStore::new()
            .with_region("us-east-1", &["ec2", "s3"])
            .with_region("eu-west-1", &["ec2"])
            .with_region("ap-south-1", &["s3"]),
    );
    let discovery = discovery(store, 2);

    let services = discovery.services().await.unwrap();
    let missing = Service::from("quantum-ledger");
    assert!(!services.contains(&missing));

    let map = discovery
        .availability(&missing, ProgressSink::Discard)
        .await
        .unwrap();
    assert_eq!(map.len(), 3);
    assert!(map.iter().all(|(_, available)| !available));
}

#[tokio::test]
async fn progress_events_arrive_before_result() {
    let store = Arc::new(many_regions(StubParameterStore::new(), 9, &["s3"]));
    let discovery = discovery(store, 2);
    let regions = discovery.regions().await.unwrap();
    let (sink, mut rx) = ProgressSink::reliable(1);

    let consumer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while let Some(region) = rx.recv().await {
            seen.push(region);
        }
        seen
    });

    let map = discovery
        .probe(&Service::from("s3"), &regions, sink)
        .await
        .unwrap();
    let seen = tokio::time::timeout(Duration::from_secs(5), consumer)
        .await
        .expect("progress stream did not close")
        .unwrap();

    assert_eq!(seen, regions);
    assert_eq!(map.len(), regions.len());
}

#[tokio::test]
async fn lossy_progress_without_consumer_does_not_stall() {
    let store = Arc::new(many_regions(StubParameterStore::new(), 12, &["s3"]));
    let discovery = discovery(store, 3);
    let (sink, _rx) = ProgressSink::lossy(2);

    let map = tokio::time::timeout(
        Duration::from_secs(5),
        discovery.availability(&Service::from("s3"), sink),
    )
    .await
    .expect("probe stalled on progress queue")
    .unwrap();

    assert_eq!(map.available_count(), 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_probes_stay_within_bound() {
    for concurrency in [1, 2, 4] {
        let store = Arc::new(
            many_regions(StubParameterStore::new(), 10, &["ec2", "lambda", "s3"])
                .with_default_page_size(1)
                .with_latency(Duration::from_millis(4)),
        );
        let regions: Vec<Region> = (0..10)
            .map(|idx| Region::new(format!("zz-region-{idx:02}")))
            .collect();
        let prober = AvailabilityProber::with_options(
            store.clone(),
            ProbeOptions::default().with_concurrency(concurrency),
        );

        let map = prober
            .probe(&Service::from("s3"), &regions, ProgressSink::Discard)
            .await
            .unwrap();

        assert_eq!(map.available_count(), 10);
        assert!(
            store.max_in_flight() <= concurrency,
            "concurrency {concurrency}, saw {}",
            store.max_in_flight()
        );
    }
}

#[tokio::test]
async fn transport_error_on_one_region_fails_the_run() {
    let failing = paths::services_path(&Region::from("us-east-1"));
    let store = Arc::new(
        StubParameterStore::new()
            .with_default_page_size(1)
            .with_region("eu-west-1", &["ec2", "s3"])
            .with_region("us-east-1", &["ec2", "s3", "sqs"])
            .with_region("us-west-2", &["ec2", "s3"])
            .fail_on_page(&failing, 2),
    );

    let err = discovery(store, 3)
        .probe(
            &Service::from("lambda"),
            &regions(&["eu-west-1", "us-east-1", "us-west-2"]),
            ProgressSink::Discard,
        )
        .await
        .unwrap_err();

    match err {
        ProbeError::Region { region, source } => {
            assert_eq!(region, Region::from("us-east-1"));
            assert!(matches!(source, QueryError::Remote { .. }));
        }
        other => panic!("expected a region failure, got {other:?}"),
    }
}

#[tokio::test]
async fn cancelled_run_reports_cancellation() {
    let store = Arc::new(
        many_regions(StubParameterStore::new(), 4, &["s3"]).with_latency(Duration::from_secs(60)),
    );
    let cancel = CancellationToken::new();
    let cfg = Config::default();
    let discovery = DiscoveryService::new(store, &cfg, cancel.clone());
    let regions: Vec<Region> = (0..4)
        .map(|idx| Region::new(format!("zz-region-{idx:02}")))
        .collect();

    cancel.cancel();
    let err = discovery
        .probe(&Service::from("s3"), &regions, ProgressSink::Discard)
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::Cancelled));
}
