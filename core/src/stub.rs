//! In-memory [`ParameterStore`] for tests.
//!
//! Serves a fixed tree of parameter names with real pagination, and records enough about
//! each call (request log, concurrent callers high-water mark) to assert on how the core
//! drives the store. Failures and panics can be injected per path.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use qrs_common::catalog::{Region, paths};
use qrs_common::error::QueryError;
use qrs_common::store::{PageRequest, ParameterPage, ParameterStore};

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Default)]
pub struct StubParameterStore {
    children: HashMap<String, Vec<String>>,
    default_page_size: Option<usize>,
    failures: HashMap<String, usize>,
    panics: HashSet<String>,
    terminal_token: Option<String>,
    latency: Duration,
    jitter: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<PageRequest>>,
}

impl StubParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size used when a request does not ask for one.
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = Some(page_size.max(1));
        self
    }

    /// Adds `children` as parameters directly under `path`.
    pub fn with_children(mut self, path: &str, children: &[&str]) -> Self {
        let names = self.children.entry(path.to_string()).or_default();
        names.extend(children.iter().map(|child| format!("{path}{child}")));
        self
    }

    /// Publishes `region` in the region namespace together with the services it offers.
    pub fn with_region(self, region: &str, services: &[&str]) -> Self {
        let services_path = paths::services_path(&Region::from(region));
        self.with_children(paths::REGIONS_PATH, &[region])
            .with_children(&services_path, services)
    }

    /// Makes the `page`-th page (1-based) of `path` fail with a transport error.
    pub fn fail_on_page(mut self, path: &str, page: usize) -> Self {
        self.failures.insert(path.to_string(), page);
        self
    }

    /// Makes every request for `path` panic.
    pub fn panic_on(mut self, path: &str) -> Self {
        self.panics.insert(path.to_string());
        self
    }

    /// Token handed back on the last page of a listing instead of none.
    pub fn with_terminal_token(mut self, token: &str) -> Self {
        self.terminal_token = Some(token.to_string());
        self
    }

    /// Fixed delay applied to every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Random extra delay of up to `jitter` per request.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn requests_for(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    /// Highest number of requests that were ever being served at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.latency;
        }
        self.latency + Duration::from_millis(rand::random_range(0..=jitter_ms))
    }
}

/// Tracks concurrent callers; decrements even when the request future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, high_water: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        high_water.fetch_max(now, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ParameterStore for StubParameterStore {
    async fn parameters_by_path(&self, request: &PageRequest) -> Result<ParameterPage, QueryError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        let _in_flight = InFlight::enter(&self.in_flight, &self.max_in_flight);

        let delay = self.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let path = request.path.as_str();
        if self.panics.contains(path) {
            panic!("stub store asked to panic for {path}");
        }

        let offset: usize = match request.next_token.as_deref() {
            Some(token) => token.parse().map_err(|_| QueryError::Remote {
                path: path.to_string(),
                message: format!("invalid next token '{token}'"),
            })?,
            None => 0,
        };

        let page_size = request
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .filter(|size| *size > 0)
            .or(self.default_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        if self.failures.get(path) == Some(&(offset / page_size + 1)) {
            return Err(QueryError::Remote {
                path: path.to_string(),
                message: "injected transport failure".to_string(),
            });
        }

        let names = self.children.get(path).map(Vec::as_slice).unwrap_or_default();
        let start = offset.min(names.len());
        let end = (start + page_size).min(names.len());
        let next_token = if end < names.len() {
            Some(end.to_string())
        } else {
            self.terminal_token.clone()
        };

        Ok(ParameterPage {
            names: names[start..end].to_vec(),
            next_token,
        })
    }
}
