use crate::catalog::Region;

/// Default number of regions probed at the same time.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Largest page the parameter store accepts.
pub const MAX_PAGE_SIZE: i32 = 10;

/// Region whose service list stands in for the full catalog. It tends to carry every
/// service and to receive new ones first.
pub const DEFAULT_REFERENCE_REGION: &str = "us-east-1";

pub struct Config {
    /// Upper bound on simultaneously running region probes.
    pub concurrency: usize,
    /// Region the service catalog is read from.
    pub reference_region: Region,
    /// Page size requested when listing services.
    pub page_size: i32,
    /// Suppresses headers and progress output when greater than zero.
    pub quiet: u8,
    /// Prints results as JSON instead of a table.
    pub json: bool,
    /// Named credentials profile; the default provider chain is used when unset.
    pub profile: Option<String>,
    /// Region of the API endpoint queried; resolved from the environment when unset.
    pub api_region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            reference_region: Region::from(DEFAULT_REFERENCE_REGION),
            page_size: MAX_PAGE_SIZE,
            quiet: 0,
            json: false,
            profile: None,
            api_region: None,
        }
    }
}
