use crate::catalog::Region;

/// A failure reaching or reading the remote parameter store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("failed to list parameters under '{path}': {message}")]
    Remote { path: String, message: String },

    #[error("malformed response for '{path}': parameter without a name")]
    MalformedResponse { path: String },

    #[error("failed to read the service directory: {0}")]
    Directory(String),
}

/// Why an availability probe run did not produce a result set.
///
/// The first failure observed aborts the whole run; no partial map is returned.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe for region '{region}' failed")]
    Region {
        region: Region,
        #[source]
        source: QueryError,
    },

    #[error("probe task{} terminated abnormally: {message}", fmt_region(.region))]
    TaskFailed {
        region: Option<Region>,
        message: String,
    },

    #[error("probe run was cancelled")]
    Cancelled,
}

impl ProbeError {
    /// The region whose probe caused the run to fail, if known.
    pub fn region(&self) -> Option<&Region> {
        match self {
            ProbeError::Region { region, .. } => Some(region),
            ProbeError::TaskFailed { region, .. } => region.as_ref(),
            ProbeError::Cancelled => None,
        }
    }
}

fn fmt_region(region: &Option<Region>) -> String {
    region
        .as_ref()
        .map(|region| format!(" for region '{region}'"))
        .unwrap_or_default()
}
