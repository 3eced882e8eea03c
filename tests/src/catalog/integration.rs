use std::sync::Arc;

use qrs_common::catalog::{Region, Service, paths};
use qrs_common::config::Config;
use qrs_common::error::QueryError;
use qrs_core::catalog::Catalog;
use qrs_core::stub::StubParameterStore;

fn published() -> StubParameterStore {
    StubParameterStore::new()
        .with_default_page_size(3)
        .with_region("us-west-2", &["ec2", "s3"])
        .with_region("eu-central-1", &["ec2", "lambda", "s3"])
        .with_region("us-east-1", &["sqs", "s3", "lambda", "ec2", "bedrock", "athena", "sns"])
        .with_region("af-south-1", &["ec2"])
        .with_region("ap-southeast-2", &["ec2", "s3"])
}

fn catalog(store: StubParameterStore) -> Catalog {
    let cfg = Config::default();
    Catalog::new(Arc::new(store), cfg.reference_region).with_page_size(cfg.page_size)
}

#[tokio::test]
async fn region_listing_is_sorted_and_stable() {
    let catalog = catalog(published());

    let first = catalog.list_regions().await.unwrap();
    let second = catalog.list_regions().await.unwrap();

    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0] <= pair[1]));
    let ids: Vec<&str> = first.iter().map(Region::as_str).collect();
    assert_eq!(
        ids,
        ["af-south-1", "ap-southeast-2", "eu-central-1", "us-east-1", "us-west-2"]
    );
}

#[tokio::test]
async fn service_listing_is_sorted_and_stable() {
    let catalog = catalog(published());

    let first = catalog.list_services().await.unwrap();
    let second = catalog.list_services().await.unwrap();

    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(first.len(), 7);
    assert!(first.contains(&Service::from("bedrock")));
}

#[tokio::test]
async fn service_listing_uses_small_pages() {
    let store = Arc::new(published());
    let catalog = Catalog::new(store.clone(), Region::from("us-east-1")).with_page_size(2);

    let services = catalog.list_services().await.unwrap();

    assert_eq!(services.len(), 7);
    let path = paths::services_path(&Region::from("us-east-1"));
    assert_eq!(store.requests_for(&path), 4);
}

#[tokio::test]
async fn failures_surface_without_partial_results() {
    let path = paths::services_path(&Region::from("us-east-1"));
    let catalog = catalog(published().fail_on_page(&path, 1));

    let err = catalog.list_services().await.unwrap_err();

    assert_eq!(
        err,
        QueryError::Remote {
            path,
            message: "injected transport failure".to_string(),
        }
    );
}
