//! Crate-internal integration tests and shared fixtures.

pub mod helpers;
