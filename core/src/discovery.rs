//! # Region Discovery Service
//!
//! Implements the "where is this service available" use case.
//!
//! Orchestrates the process by:
//! 1. listing regions and services through the [`Catalog`].
//! 2. delegating the per-region checks to the [`AvailabilityProber`].
//!
//! The store handle is created once by the caller and shared by both.

use std::sync::Arc;

use qrs_common::catalog::{AvailabilityMap, Region, Service};
use qrs_common::config::Config;
use qrs_common::error::{ProbeError, QueryError};
use qrs_common::store::ParameterStore;
use tokio_util::sync::CancellationToken;

use crate::catalog::Catalog;
use crate::prober::{AvailabilityProber, ProbeOptions};
use crate::progress::ProgressSink;

/// Why [`DiscoveryService::availability`] failed.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Catalog(#[from] QueryError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

pub struct DiscoveryService {
    catalog: Catalog,
    prober: AvailabilityProber,
}

impl DiscoveryService {
    pub fn new(store: Arc<dyn ParameterStore>, cfg: &Config, cancel: CancellationToken) -> Self {
        let catalog = Catalog::new(Arc::clone(&store), cfg.reference_region.clone())
            .with_page_size(cfg.page_size);
        let options = ProbeOptions::default()
            .with_concurrency(cfg.concurrency)
            .with_cancel(cancel);

        Self {
            catalog,
            prober: AvailabilityProber::with_options(store, options),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn regions(&self) -> Result<Vec<Region>, QueryError> {
        self.catalog.list_regions().await
    }

    pub async fn services(&self) -> Result<Vec<Service>, QueryError> {
        self.catalog.list_services().await
    }

    /// Probes `service` in every known region.
    pub async fn availability(
        &self,
        service: &Service,
        progress: ProgressSink,
    ) -> Result<AvailabilityMap, DiscoveryError> {
        let regions = self.regions().await?;
        Ok(self.probe(service, &regions, progress).await?)
    }

    /// Probes `service` in the given regions only.
    pub async fn probe(
        &self,
        service: &Service,
        regions: &[Region],
        progress: ProgressSink,
    ) -> Result<AvailabilityMap, ProbeError> {
        self.prober.probe(service, regions, progress).await
    }
}
