//! # qrs common
//!
//! Shared vocabulary of the workspace.
//!
//! * **[`catalog`]**: domain models (`Region`, `Service`, `AvailabilityMap`) and the parameter
//!   paths they live under.
//! * **[`store`]**: the outbound port used to read the remote parameter store.
//! * **[`error`]**: error taxonomy shared by the catalogs and the prober.
//! * **[`config`]**: runtime knobs assembled by the command line.

pub mod catalog;
pub mod config;
pub mod error;
pub mod macros;
pub mod store;

#[doc(hidden)]
pub use tracing as __tracing;
