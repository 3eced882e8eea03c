//! Logging shorthands layered on `tracing`.
//!
//! Each macro emits under a fixed target so the terminal formatter can pick a symbol for it.

/// Target used for results the user asked for.
pub const SUCCESS_TARGET: &str = "qrs::success";

/// Target used for raw, undecorated terminal lines.
pub const PRINT_TARGET: &str = "qrs::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "qrs::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
