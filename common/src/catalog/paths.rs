//! Layout of the public global-infrastructure namespace in the parameter store.

use super::Region;

/// Every region is published as a direct child of this path.
pub const REGIONS_PATH: &str = "/aws/service/global-infrastructure/regions/";

/// Path listing the services offered in `region`.
pub fn services_path(region: &Region) -> String {
    format!("{REGIONS_PATH}{region}/services/")
}

/// Returns the identifier at the end of a parameter name.
///
/// `/aws/service/global-infrastructure/regions/us-east-1` becomes `us-east-1`.
pub fn last_segment(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, tail)| tail)
}
