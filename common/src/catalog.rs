//! # Catalog Models
//!
//! Identifiers read from the parameter store and the per-region result set built from them.

pub mod availability;
pub mod paths;
pub mod region;
pub mod service;

pub use availability::AvailabilityMap;
pub use region::Region;
pub use service::Service;
