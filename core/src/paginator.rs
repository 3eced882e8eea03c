//! Drives a [`ParameterStore`] page by page.
//!
//! The store only answers single pages; this module owns the continuation token and gives
//! the two listing shapes the catalogs and the prober need: page-at-a-time with early exit,
//! and "everything under this path".

use qrs_common::catalog::paths;
use qrs_common::error::QueryError;
use qrs_common::store::{PageRequest, ParameterStore};
use tracing::debug;

pub struct Paginator<'a> {
    store: &'a dyn ParameterStore,
    request: PageRequest,
    started: bool,
    pages: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(store: &'a dyn ParameterStore, path: impl Into<String>) -> Self {
        Self {
            store,
            request: PageRequest::new(path),
            started: false,
            pages: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.request.page_size = Some(page_size);
        self
    }

    /// The first page is always pending; later pages only while the store hands back a
    /// non-empty continuation token.
    pub fn has_more_pages(&self) -> bool {
        !self.started || self.request.next_token.is_some()
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Fetches the next page of parameter names.
    ///
    /// Calling this after the listing is exhausted returns an empty page without touching
    /// the store.
    pub async fn next_page(&mut self) -> Result<Vec<String>, QueryError> {
        if !self.has_more_pages() {
            return Ok(Vec::new());
        }

        let page = self.store.parameters_by_path(&self.request).await?;
        self.started = true;
        self.pages += 1;
        self.request.next_token = page.next_token.filter(|token| !token.is_empty());

        debug!(
            path = %self.request.path,
            page = self.pages,
            parameters = page.names.len(),
            more = self.request.next_token.is_some(),
            "fetched parameter page"
        );

        Ok(page.names)
    }

    /// Consumes every page and returns the last path segment of each parameter name.
    pub async fn collect_segments(mut self) -> Result<Vec<String>, QueryError> {
        let mut segments = Vec::new();
        while self.has_more_pages() {
            let names = self.next_page().await?;
            segments.extend(names.iter().map(|name| paths::last_segment(name).to_owned()));
        }
        Ok(segments)
    }
}
