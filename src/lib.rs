//! parcelgen - serialization code generation task core
//!
//! The task body of a code-generation pipeline: given a type declaration
//! annotated for serialization-code generation, parcelgen resolves the
//! generation directives attached to it, delegates semantic analysis and code
//! emission to collaborator engines, and returns the generated artifacts as a
//! map keyed by target type.
//!
//! # Architecture Overview
//!
//! parcelgen is built around one stateless executor that a memoizing scheduler
//! invokes once per distinct declaration:
//!
//! - A declaration may carry generation directives in two independent shapes:
//!   a **list-form** group (an ordered sequence of directives) and a
//!   **single-form** group (one directive declared directly). Both may be
//!   present at once; their outputs are unioned.
//! - Each directive names a target type and optionally a converter override
//!   and a parcels-index flag. Missing configuration is filled from documented
//!   defaults at resolution time, never at use sites.
//! - For every directive the executor performs exactly one
//!   [`ParcelAnalysis::analyze`](engine::ParcelAnalysis::analyze) +
//!   [`ParcelGeneration::generate`](engine::ParcelGeneration::generate) call
//!   pair and records the result under the directive's target type.
//!
//! The executor itself never caches: deduplication and result sharing belong
//! to [`cache::TransactionCache`], a single-flight memoizing wrapper keyed by
//! declaration identity. The first caller for a key computes; concurrent
//! callers for the same key wait and receive the shared result.
//!
//! # Core Modules
//!
//! - [`metadata`] - Raw directive metadata schema and declaration identity
//! - [`resolver`] - Directive configuration resolution with explicit defaults
//! - [`engine`] - Collaborator interfaces for analysis and code emission
//! - [`executor`] - The generation task executor (the pure task body)
//! - [`cache`] - Single-flight transaction cache over the executor
//! - [`core`] - Error types shared across the crate
//!
//! # Example
//!
//! ```rust,no_run
//! use parcelgen::executor::{GenerationTaskExecutor, LazyRef};
//! use parcelgen::metadata::{SourceDeclaration, TypeRef};
//! # use parcelgen::engine::{ParcelAnalysis, ParcelGeneration};
//! # fn run(analysis: impl ParcelAnalysis, generation: impl ParcelGeneration) -> anyhow::Result<()> {
//! let executor = GenerationTaskExecutor::new(analysis, generation);
//! let declaration = SourceDeclaration::from_json(
//!     r#"{ "id": "example.Module", "directive": { "value": "example.Person" } }"#,
//! )?;
//! let results = executor.execute(LazyRef::from(declaration))?;
//! assert!(results.contains_key(&TypeRef::new("example.Person")));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod constants;
pub mod core;
pub mod engine;
pub mod executor;
pub mod metadata;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
