//! In-process metadata cache
//!
//! This crate provides a process-wide cache keyed by Rust type, where each
//! entry is computed at most once no matter how many threads ask for it first.

#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod type_cache;

pub use type_cache::{CacheStats, TypeCache};
