//! Metadata schema for annotated source declarations.
//!
//! An upstream annotation reader hands this crate a [`SourceDeclaration`]: the
//! identity of an annotated declaration plus the raw directive metadata groups
//! attached to it. The raw schema mirrors what is written in source metadata,
//! including its legacy quirks: an absent converter is stored as the sentinel
//! empty-converter marker type rather than as a missing value, and an absent
//! parcels-index flag is distinguishable from an explicit `true`. Resolution
//! of those quirks into proper optionals and defaults happens in
//! [`crate::resolver`], never here.
//!
//! Declarations also deserialize from JSON metadata dumps via
//! [`SourceDeclaration::from_json`], which is how test fixtures and external
//! readers feed the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::ParcelgenError;

/// Canonical name of the well-known marker type that raw metadata uses to
/// mean "no converter configured".
///
/// The marker exists only for compatibility with the raw metadata format;
/// resolved configuration represents the absence of a converter as `None`.
pub const EMPTY_CONVERTER_MARKER: &str = "parcel.EmptyConverter";

/// A reference to a type by canonical name.
///
/// Equality and hashing are structural over the canonical name, so two
/// directives naming the same target compare equal regardless of where their
/// metadata came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Create a type reference from a canonical name.
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self(canonical_name.into())
    }

    /// The sentinel marker type meaning "no converter configured".
    pub fn empty_converter() -> Self {
        Self(EMPTY_CONVERTER_MARKER.to_string())
    }

    /// Whether this reference is the sentinel empty-converter marker.
    pub fn is_empty_converter(&self) -> bool {
        self.0 == EMPTY_CONVERTER_MARKER
    }

    /// The canonical name this reference points at.
    pub fn canonical_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(canonical_name: &str) -> Self {
        Self::new(canonical_name)
    }
}

/// Identity of an annotated source declaration.
///
/// This is the key the scheduling layer dedupes and caches on: two requests
/// with the same `DeclarationId` describe the same declaration and share one
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(String);

impl DeclarationId {
    /// Create a declaration identity from a qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self(qualified_name.into())
    }

    /// The qualified name of the declaration.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeclarationId {
    fn from(qualified_name: &str) -> Self {
        Self::new(qualified_name)
    }
}

/// One raw generation directive (the single-form metadata group).
///
/// Field semantics follow the metadata format: `converter` defaults to the
/// sentinel marker when not written out, and `parcelsIndex` is `None` when the
/// author did not spell out a flag. Use [`crate::resolver`] to turn this into
/// a [`crate::resolver::ResolvedDirective`] with the defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveMetadata {
    /// The target type to generate serialization code for.
    pub value: TypeRef,

    /// Declared converter type; the sentinel marker means none was configured.
    #[serde(default = "TypeRef::empty_converter")]
    pub converter: TypeRef,

    /// Declared parcels-index flag; `None` means the author left it unset.
    #[serde(default, rename = "parcelsIndex", skip_serializing_if = "Option::is_none")]
    pub parcels_index: Option<bool>,
}

impl DirectiveMetadata {
    /// A directive for `target` with no converter and no explicit index flag.
    pub fn for_target(target: impl Into<TypeRef>) -> Self {
        Self {
            value: target.into(),
            converter: TypeRef::empty_converter(),
            parcels_index: None,
        }
    }
}

/// The list-form metadata group: an ordered sequence of directives.
///
/// The sequence order is the order collaborators are invoked in, so it must
/// be preserved for reproducible builds. The sequence may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveListMetadata {
    /// The directives, in declared order.
    pub value: Vec<DirectiveMetadata>,
}

/// An annotated source declaration together with its directive-bearing
/// metadata groups.
///
/// Both groups are independent and non-exclusive: a declaration may carry a
/// list-form group, a single-form group, both, or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeclaration {
    /// Identity of the declaration the directives are attached to.
    pub id: DeclarationId,

    /// The list-form group, if present.
    #[serde(default, rename = "directives", skip_serializing_if = "Option::is_none")]
    pub directive_list: Option<DirectiveListMetadata>,

    /// The single-form group, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<DirectiveMetadata>,
}

impl SourceDeclaration {
    /// A declaration with no directive metadata attached.
    pub fn new(id: impl Into<DeclarationId>) -> Self {
        Self {
            id: id.into(),
            directive_list: None,
            directive: None,
        }
    }

    /// Attach the single-form directive group.
    #[must_use]
    pub fn with_directive(mut self, directive: DirectiveMetadata) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Attach the list-form directive group.
    #[must_use]
    pub fn with_directive_list(mut self, directives: Vec<DirectiveMetadata>) -> Self {
        self.directive_list = Some(DirectiveListMetadata { value: directives });
        self
    }

    /// Parse a declaration from a JSON metadata dump.
    pub fn from_json(json: &str) -> Result<Self, ParcelgenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether any directive metadata group is present.
    ///
    /// Note that a present-but-empty list-form group counts as metadata being
    /// present even though it yields no generated output.
    pub fn has_directives(&self) -> bool {
        self.directive_list.is_some() || self.directive.is_some()
    }
}
