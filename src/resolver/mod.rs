//! Directive configuration resolution.
//!
//! Pure functions that turn one raw [`DirectiveMetadata`] record into resolved
//! configuration with the documented defaults applied:
//!
//! - a converter equal to the sentinel empty-converter marker resolves to
//!   `None` (no override);
//! - an unset parcels-index flag resolves to `true` (targets are registered in
//!   the index unless explicitly suppressed).
//!
//! Resolution never fails: absent fields silently take their defaults.

use crate::metadata::{DirectiveMetadata, TypeRef};

/// A directive with its optional configuration resolved against the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirective {
    /// The target type to generate serialization code for.
    pub target: TypeRef,
    /// Converter override, `None` when the raw metadata carried the sentinel.
    pub converter: Option<TypeRef>,
    /// Whether the target should be registered in the parcels index.
    pub parcels_index: bool,
}

/// Resolve the declared converter override.
///
/// The sentinel marker means "no converter configured" and resolves to
/// `None`; any other declared type is passed through as the override.
pub fn resolve_converter(directive: &DirectiveMetadata) -> Option<TypeRef> {
    if directive.converter.is_empty_converter() {
        None
    } else {
        Some(directive.converter.clone())
    }
}

/// Resolve the parcels-index flag, defaulting to `true` when unset.
pub fn resolve_index_flag(directive: &DirectiveMetadata) -> bool {
    directive.parcels_index.unwrap_or(true)
}

/// Resolve a raw directive into its full configuration.
pub fn resolve(directive: &DirectiveMetadata) -> ResolvedDirective {
    ResolvedDirective {
        target: directive.value.clone(),
        converter: resolve_converter(directive),
        parcels_index: resolve_index_flag(directive),
    }
}
