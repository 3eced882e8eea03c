//! # Availability Prober
//!
//! Checks one service against many regions at once.
//!
//! Each region gets its own task which pages through that region's services namespace until
//! the service shows up or the listing runs out. At most `concurrency` tasks run at the same
//! time: the dispatcher takes a semaphore permit before spawning, so it only waits when every
//! slot is busy. Tasks hand their verdict back through the [`JoinSet`], which keeps the
//! result map owned by the dispatcher alone.
//!
//! The first failing region cancels the run, whether its probe returned an error or panicked.
//! Remaining tasks stop at their next await point and the failure is returned; no partial map
//! is produced.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use qrs_common::catalog::{AvailabilityMap, Region, Service, paths};
use qrs_common::config::DEFAULT_CONCURRENCY;
use qrs_common::error::{ProbeError, QueryError};
use qrs_common::store::ParameterStore;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, info, warn};

use crate::paginator::Paginator;
use crate::progress::ProgressSink;

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Upper bound on simultaneously running region probes. Values below one are treated
    /// as one.
    pub concurrency: usize,
    /// Cancelling this token stops the run; it then fails with [`ProbeError::Cancelled`].
    pub cancel: CancellationToken,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }
}

impl ProbeOptions {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

type ProbeOutcome = Result<Option<(Region, bool)>, ProbeError>;

pub struct AvailabilityProber {
    store: Arc<dyn ParameterStore>,
    options: ProbeOptions,
}

impl AvailabilityProber {
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self::with_options(store, ProbeOptions::default())
    }

    pub fn with_options(store: Arc<dyn ParameterStore>, options: ProbeOptions) -> Self {
        Self { store, options }
    }

    pub fn concurrency(&self) -> usize {
        self.options.concurrency.max(1)
    }

    /// Determines for every region in `regions` whether `service` is offered there.
    ///
    /// Regions are dispatched in input order, a progress event preceding each dispatch.
    /// Repeated regions are probed once. The returned map has exactly one entry per distinct
    /// input region. `progress` is dropped before this returns.
    pub async fn probe(
        &self,
        service: &Service,
        regions: &[Region],
        progress: ProgressSink,
    ) -> Result<AvailabilityMap, ProbeError> {
        let cancel = self.options.cancel.child_token();
        let permits = Arc::new(Semaphore::new(self.concurrency()));
        let mut tasks: JoinSet<ProbeOutcome> = JoinSet::new();
        let mut dispatched: HashMap<task::Id, Region> = HashMap::new();
        let mut seen: HashSet<&Region> = HashSet::new();

        for region in regions {
            if !seen.insert(region) {
                debug!(%region, "region listed twice, probing once");
                continue;
            }
            if cancel.is_cancelled() {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = progress.emit(region.clone()) => {}
            }

            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                permit = permits.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let store = Arc::clone(&self.store);
            let task_service = service.clone();
            let task_region = region.clone();
            let task_cancel = cancel.clone();
            let span = debug_span!("probe", region = %region);

            let handle = tasks.spawn(
                async move {
                    let _permit = permit;
                    // Dropped before the permit, so a panicking probe cancels the run
                    // before its slot frees up.
                    let abort_on_unwind = task_cancel.clone().drop_guard();
                    let outcome = tokio::select! {
                        biased;
                        _ = task_cancel.cancelled() => return Ok(None),
                        outcome = probe_region(store.as_ref(), &task_service, &task_region) => outcome,
                    };
                    abort_on_unwind.disarm();
                    match outcome {
                        Ok(available) => Ok(Some((task_region, available))),
                        Err(source) => {
                            task_cancel.cancel();
                            Err(ProbeError::Region { region: task_region, source })
                        }
                    }
                }
                .instrument(span),
            );
            dispatched.insert(handle.id(), region.clone());
        }
        drop(progress);

        let mut availability: BTreeMap<Region, bool> = BTreeMap::new();
        let mut failure: Option<ProbeError> = None;

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Ok(Some((region, available))))) => {
                    dispatched.remove(&id);
                    availability.insert(region, available);
                }
                Ok((id, Ok(None))) => {
                    dispatched.remove(&id);
                }
                Ok((id, Err(err))) => {
                    dispatched.remove(&id);
                    warn!(error = %err, "aborting availability probe");
                    failure.get_or_insert(err);
                }
                Err(join_err) => {
                    cancel.cancel();
                    let region = dispatched.remove(&join_err.id());
                    failure.get_or_insert(ProbeError::TaskFailed {
                        region,
                        message: join_err.to_string(),
                    });
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }
        if self.options.cancel.is_cancelled() {
            return Err(ProbeError::Cancelled);
        }

        let availability = AvailabilityMap::from(availability);
        info!(
            %service,
            regions = availability.len(),
            available = availability.available_count(),
            "availability probe finished"
        );
        Ok(availability)
    }
}

/// Pages through `region`'s services until `service` turns up.
async fn probe_region(
    store: &dyn ParameterStore,
    service: &Service,
    region: &Region,
) -> Result<bool, QueryError> {
    let mut pages = Paginator::new(store, paths::services_path(region));
    while pages.has_more_pages() {
        let names = pages.next_page().await?;
        if names
            .iter()
            .any(|name| paths::last_segment(name) == service.as_str())
        {
            debug!(pages = pages.pages_fetched(), "service found");
            return Ok(true);
        }
    }
    debug!(pages = pages.pages_fetched(), "service not offered");
    Ok(false)
}
