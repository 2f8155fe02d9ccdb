//! Error handling for parcelgen.
//!
//! The error design follows a two-layer split:
//!
//! - [`ParcelgenError`] is the strongly-typed enum for failures that originate
//!   inside this crate (currently: declaration metadata that cannot be
//!   deserialized into the directive schema).
//! - Collaborator failures (analysis rejecting an unsupported target type,
//!   generation failing to emit code) are *not* wrapped into this enum. They
//!   flow out as [`anyhow::Error`] values with context attached, because the
//!   task core deliberately does not recover from them: the scheduling layer
//!   attributes them to the originating declaration and aborts that key's
//!   execution. See [`crate::cache::TransactionCache::run`].

use thiserror::Error;

/// The main error type for parcelgen operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParcelgenError {
    /// Declaration metadata could not be deserialized into the directive
    /// schema (missing required `value`, wrong field types, malformed JSON).
    #[error("invalid declaration metadata: {0}")]
    MetadataParse(#[from] serde_json::Error),
}
