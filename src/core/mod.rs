//! Core types shared across the parcelgen crate.
//!
//! Currently this is the crate's typed error surface. Operational code paths
//! return [`anyhow::Result`] and convert into [`ParcelgenError`] at the seams
//! where a failure originates.

pub mod error;

pub use error::ParcelgenError;
