//! Recording stub engines for tests.
//!
//! These stubs record every invocation so tests can assert on exactly which
//! collaborator calls the executor made, in which order, and with which
//! resolved configuration. They can also be configured to fail for specific
//! targets or to override the index decision, simulating analysis policy
//! divergence.

use anyhow::{Result, bail};
use std::sync::Mutex;

use crate::engine::{GeneratedArtifact, ParcelAnalysis, ParcelGeneration, SemanticDescriptor};
use crate::metadata::TypeRef;

/// One recorded analysis invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCall {
    /// The target type handed to the analysis engine.
    pub target: TypeRef,
    /// The resolved converter override the executor passed along.
    pub converter: Option<TypeRef>,
    /// The resolved parcels-index flag the executor passed along.
    pub parcels_index: bool,
}

/// [`ParcelAnalysis`] stub that records invocations and echoes the requested
/// index flag back in its descriptor.
#[derive(Debug, Default)]
pub struct RecordingAnalysis {
    calls: Mutex<Vec<AnalysisCall>>,
    fail_for: Vec<TypeRef>,
    suppress_index_for: Vec<TypeRef>,
}

impl RecordingAnalysis {
    /// A stub that succeeds for every target.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub that fails when asked to analyze `target`.
    pub fn failing_for(target: impl Into<TypeRef>) -> Self {
        Self {
            fail_for: vec![target.into()],
            ..Self::default()
        }
    }

    /// A stub that reports `parcels_index = false` for `target` regardless of
    /// the requested flag, simulating analysis overriding the directive.
    pub fn suppressing_index_for(target: impl Into<TypeRef>) -> Self {
        Self {
            suppress_index_for: vec![target.into()],
            ..Self::default()
        }
    }

    /// Snapshot of the recorded invocations, in call order.
    pub fn calls(&self) -> Vec<AnalysisCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ParcelAnalysis for RecordingAnalysis {
    fn analyze(
        &self,
        target: &TypeRef,
        converter: Option<&TypeRef>,
        parcels_index: bool,
    ) -> Result<SemanticDescriptor> {
        self.calls.lock().unwrap().push(AnalysisCall {
            target: target.clone(),
            converter: converter.cloned(),
            parcels_index,
        });

        if self.fail_for.contains(target) {
            bail!("unsupported parcel target '{target}'");
        }

        let parcels_index = parcels_index && !self.suppress_index_for.contains(target);
        Ok(SemanticDescriptor::new(parcels_index, converter.cloned()))
    }
}

/// [`ParcelGeneration`] stub that records targets and the descriptors handed
/// to it, and emits placeholder code.
#[derive(Debug, Default)]
pub struct RecordingGeneration {
    calls: Mutex<Vec<TypeRef>>,
    descriptors: Mutex<Vec<SemanticDescriptor>>,
    fail_for: Vec<TypeRef>,
}

impl RecordingGeneration {
    /// A stub that succeeds for every target.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub that fails when asked to generate code for `target`.
    pub fn failing_for(target: impl Into<TypeRef>) -> Self {
        Self {
            fail_for: vec![target.into()],
            ..Self::default()
        }
    }

    /// Snapshot of the recorded targets, in call order.
    pub fn calls(&self) -> Vec<TypeRef> {
        self.calls.lock().unwrap().clone()
    }

    /// Snapshot of the descriptors analysis handed to generation, in call order.
    pub fn descriptors(&self) -> Vec<SemanticDescriptor> {
        self.descriptors.lock().unwrap().clone()
    }
}

impl ParcelGeneration for RecordingGeneration {
    fn generate(
        &self,
        target: &TypeRef,
        descriptor: &SemanticDescriptor,
    ) -> Result<GeneratedArtifact> {
        self.calls.lock().unwrap().push(target.clone());
        self.descriptors.lock().unwrap().push(descriptor.clone());

        if self.fail_for.contains(target) {
            bail!("generation failed for parcel target '{target}'");
        }

        Ok(GeneratedArtifact::new(
            target.clone(),
            format!("// generated parcel code for {target}"),
        ))
    }
}
