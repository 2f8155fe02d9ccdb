//! Common test utilities and fixtures for parcelgen integration tests.

// Allow dead code because these utilities are shared across test files and
// not every test file uses every utility.
#![allow(dead_code)]

use anyhow::{Result, bail};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parcelgen::engine::{GeneratedArtifact, ParcelAnalysis, ParcelGeneration, SemanticDescriptor};
use parcelgen::metadata::{DirectiveMetadata, SourceDeclaration, TypeRef};

/// Initialize tracing output for tests, honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Analysis engine that counts invocations and can simulate slow or failing
/// analysis, for exercising the single-flight path.
#[derive(Debug, Default)]
pub struct CountingAnalysis {
    calls: AtomicUsize,
    delay: Option<Duration>,
    delay_first_call_only: bool,
    fail: bool,
}

impl CountingAnalysis {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An engine that blocks for `delay` on every call, widening race windows.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// An engine whose first call blocks for `delay` and whose later calls
    /// return immediately, simulating one hung execution.
    pub fn slow_once(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            delay_first_call_only: true,
            ..Self::default()
        })
    }

    /// An engine that fails every call.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ParcelAnalysis for CountingAnalysis {
    fn analyze(
        &self,
        target: &TypeRef,
        converter: Option<&TypeRef>,
        parcels_index: bool,
    ) -> Result<SemanticDescriptor> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            if !self.delay_first_call_only || call == 0 {
                std::thread::sleep(delay);
            }
        }
        if self.fail {
            bail!("unsupported parcel target '{target}'");
        }
        Ok(SemanticDescriptor::new(parcels_index, converter.cloned()))
    }
}

/// Generation engine that counts invocations and emits placeholder code.
#[derive(Debug, Default)]
pub struct CountingGeneration {
    calls: AtomicUsize,
}

impl CountingGeneration {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ParcelGeneration for CountingGeneration {
    fn generate(
        &self,
        target: &TypeRef,
        _descriptor: &SemanticDescriptor,
    ) -> Result<GeneratedArtifact> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedArtifact::new(
            target.clone(),
            format!("// generated parcel code for {target}"),
        ))
    }
}

/// A declaration with a single-form directive for `target`.
pub fn single_directive_declaration(id: &str, target: &str) -> SourceDeclaration {
    SourceDeclaration::new(id).with_directive(DirectiveMetadata::for_target(target))
}

/// A declaration with a list-form group naming `targets` in order.
pub fn list_directive_declaration(id: &str, targets: &[&str]) -> SourceDeclaration {
    SourceDeclaration::new(id)
        .with_directive_list(targets.iter().map(|t| DirectiveMetadata::for_target(*t)).collect())
}
