//! Collaborator interfaces for semantic analysis and code emission.
//!
//! The task executor orchestrates two engines it does not implement: an
//! analysis engine that inspects a target type's structure and a generation
//! engine that emits serialization code from the analysis result. Both are
//! specified here as traits so the executor stays testable with recording
//! stubs and so real engines can live in separate crates.
//!
//! Both engines may fail (unresolvable target type, unsupported construct).
//! The executor does not recover from those failures; they propagate to the
//! scheduling layer as the whole invocation's failure.

use anyhow::Result;
use std::sync::Arc;

use crate::metadata::TypeRef;

/// Semantic description of one target type, produced by analysis.
///
/// Opaque to the executor apart from [`is_parcels_index`], which the executor
/// copies into the result entry. Note the descriptor's flag is the analysis
/// engine's *decision*, which may diverge from the flag the directive
/// requested (for example when analysis rejects index registration for types
/// it cannot look up by name).
///
/// [`is_parcels_index`]: SemanticDescriptor::is_parcels_index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDescriptor {
    parcels_index: bool,
    converter: Option<TypeRef>,
}

impl SemanticDescriptor {
    /// Create a descriptor with the analysis engine's decisions.
    pub fn new(parcels_index: bool, converter: Option<TypeRef>) -> Self {
        Self {
            parcels_index,
            converter,
        }
    }

    /// Whether the target should be registered in the parcels index.
    pub fn is_parcels_index(&self) -> bool {
        self.parcels_index
    }

    /// The converter the analysis settled on, if any.
    pub fn converter(&self) -> Option<&TypeRef> {
        self.converter.as_ref()
    }
}

/// Generated serialization code for one target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    target: TypeRef,
    code: String,
}

impl GeneratedArtifact {
    /// Wrap the code emitted for `target`.
    pub fn new(target: TypeRef, code: impl Into<String>) -> Self {
        Self {
            target,
            code: code.into(),
        }
    }

    /// The target type this artifact was generated for.
    pub fn target(&self) -> &TypeRef {
        &self.target
    }

    /// The emitted code text.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Semantic analysis of one parcel target type.
pub trait ParcelAnalysis: Send + Sync {
    /// Analyze `target` under the resolved directive configuration.
    ///
    /// # Errors
    ///
    /// Fails when the target type cannot be resolved or uses constructs the
    /// engine does not support.
    fn analyze(
        &self,
        target: &TypeRef,
        converter: Option<&TypeRef>,
        parcels_index: bool,
    ) -> Result<SemanticDescriptor>;
}

/// Emission of serialization code for an analyzed target type.
pub trait ParcelGeneration: Send + Sync {
    /// Generate code for `target` from its semantic descriptor.
    ///
    /// # Errors
    ///
    /// Fails when the descriptor describes a shape the emitter cannot render.
    fn generate(&self, target: &TypeRef, descriptor: &SemanticDescriptor)
    -> Result<GeneratedArtifact>;
}

// Shared engines: an executor and a scheduling layer frequently hold the same
// engine instance behind an Arc.
impl<A: ParcelAnalysis + ?Sized> ParcelAnalysis for Arc<A> {
    fn analyze(
        &self,
        target: &TypeRef,
        converter: Option<&TypeRef>,
        parcels_index: bool,
    ) -> Result<SemanticDescriptor> {
        (**self).analyze(target, converter, parcels_index)
    }
}

impl<G: ParcelGeneration + ?Sized> ParcelGeneration for Arc<G> {
    fn generate(
        &self,
        target: &TypeRef,
        descriptor: &SemanticDescriptor,
    ) -> Result<GeneratedArtifact> {
        (**self).generate(target, descriptor)
    }
}
