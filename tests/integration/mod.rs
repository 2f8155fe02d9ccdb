//! Integration test suite for parcelgen.
//!
//! End-to-end tests exercising the public API: declaration metadata parsed
//! from JSON, driven through the generation task executor and the
//! single-flight transaction cache.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **executor**: Directive discovery, resolution defaults, result assembly
//! - **transaction**: Single-flight caching, result sharing, failure handling

#[path = "../common/mod.rs"]
mod common;

mod executor;
