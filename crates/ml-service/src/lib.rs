//! HTTP service exposing the waste prediction models
//!
//! The router and configuration live in the library so integration tests
//! can drive the real routes with in-memory models.

pub mod api;
pub mod config;
