//! Shared helpers for unit and integration tests.

#[cfg(any(test, debug_assertions))]
pub mod fixtures;

#[cfg(any(test, debug_assertions))]
pub mod runner;
