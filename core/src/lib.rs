//! # qrs core
//!
//! Finds the regions in which a cloud service is offered by reading the public
//! global-infrastructure namespace of a parameter store.
//!
//! * **[`catalog`]**: region and service listings.
//! * **[`prober`]**: the concurrent per-region availability check.
//! * **[`progress`]**: region-started notifications for the caller.
//! * **[`discovery`]**: use case tying catalog and prober to one store handle.
//! * **[`ssm`]**: the AWS-backed store adapter.
//! * **[`directory`]**: human-readable service names from the regional-services table.

pub mod catalog;
pub mod directory;
pub mod discovery;
pub mod paginator;
pub mod prober;
pub mod progress;
pub mod ssm;

#[cfg(any(test, feature = "test-util"))]
pub mod stub;
