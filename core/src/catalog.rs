//! # Region and Service Catalogs
//!
//! Both listings are fetched fresh on every call and returned sorted, which downstream
//! rendering relies on for deterministic output.

use std::sync::Arc;

use qrs_common::catalog::{Region, Service, paths};
use qrs_common::config::MAX_PAGE_SIZE;
use qrs_common::error::QueryError;
use qrs_common::store::ParameterStore;
use tracing::debug;

use crate::paginator::Paginator;

pub struct Catalog {
    store: Arc<dyn ParameterStore>,
    reference_region: Region,
    page_size: i32,
}

impl Catalog {
    pub fn new(store: Arc<dyn ParameterStore>, reference_region: Region) -> Self {
        Self {
            store,
            reference_region,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Page size requested when listing services, clamped to what the store accepts.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn reference_region(&self) -> &Region {
        &self.reference_region
    }

    /// Lists every region identifier, sorted.
    pub async fn list_regions(&self) -> Result<Vec<Region>, QueryError> {
        let mut regions: Vec<Region> = Paginator::new(self.store.as_ref(), paths::REGIONS_PATH)
            .collect_segments()
            .await?
            .into_iter()
            .map(Region::from)
            .collect();

        regions.sort();
        debug!(count = regions.len(), "listed regions");
        Ok(regions)
    }

    /// Lists the services published for the reference region, sorted.
    ///
    /// A service offered only outside the reference region will be missing.
    pub async fn list_services(&self) -> Result<Vec<Service>, QueryError> {
        let path = paths::services_path(&self.reference_region);
        let mut services: Vec<Service> = Paginator::new(self.store.as_ref(), path)
            .with_page_size(self.page_size)
            .collect_segments()
            .await?
            .into_iter()
            .map(Service::from)
            .collect();

        services.sort();
        debug!(
            count = services.len(),
            reference_region = %self.reference_region,
            "listed services"
        );
        Ok(services)
    }
}
