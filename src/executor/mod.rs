//! The generation task executor: the pure task body the scheduling layer
//! invokes once per distinct declaration.
//!
//! [`GenerationTaskExecutor::execute`] evaluates a lazily-supplied declaration
//! exactly once, discovers its directive metadata groups, resolves each
//! directive's configuration, and performs exactly one analysis + generation
//! call pair per directive. The result is a fresh map from target type to
//! generated entry.
//!
//! The executor is stateless and performs no locking or I/O. It never
//! memoizes; two concurrent executions of the same declaration run fully
//! independently. Deduplication, caching, and result sharing belong to
//! [`crate::cache::TransactionCache`].
//!
//! # Failure semantics
//!
//! Configuration resolution never fails. Analysis or generation failure is
//! not caught here: the whole invocation returns `Err` and entries generated
//! before the failure are discarded with it, so no caller ever observes a
//! partial map.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::engine::{GeneratedArtifact, ParcelAnalysis, ParcelGeneration};
use crate::metadata::{DirectiveMetadata, SourceDeclaration, TypeRef};
use crate::resolver;


/// A reference to a value that is evaluated at most once.
///
/// The scheduling layer hands declarations to the executor lazily so that
/// declaration lookup cost is only paid by the caller that actually computes.
/// Evaluation consumes the reference, which makes "exactly once" a
/// compile-time guarantee rather than a runtime check.
pub struct LazyRef<T> {
    thunk: Box<dyn FnOnce() -> T + Send>,
}

impl<T> LazyRef<T> {
    /// Create a lazy reference from a thunk.
    pub fn new(thunk: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// Evaluate the reference, consuming it.
    pub fn resolve(self) -> T {
        (self.thunk)()
    }
}

impl<T: Send + 'static> From<T> for LazyRef<T> {
    fn from(value: T) -> Self {
        Self::new(move || value)
    }
}

impl<T> fmt::Debug for LazyRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyRef(..)")
    }
}

/// One generated result: the artifact plus whether its target joins the
/// parcels index.
///
/// The flag is copied from the [`SemanticDescriptor`] the analysis engine
/// produced, not from the directive, so it reflects the analysis decision.
///
/// [`SemanticDescriptor`]: crate::engine::SemanticDescriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// The generated code payload.
    pub artifact: GeneratedArtifact,
    /// Whether the target is registered in the parcels index.
    pub parcels_index: bool,
}

/// Output of one executor invocation, keyed structurally by target type.
///
/// When two directives name the same target (one from each metadata group,
/// say), the directive processed last wins the key.
pub type ResultMap = HashMap<TypeRef, ResultEntry>;

/// Executes the analysis and generation of one annotated declaration.
#[derive(Debug)]
pub struct GenerationTaskExecutor<A, G> {
    analysis: A,
    generation: G,
}

impl<A: ParcelAnalysis, G: ParcelGeneration> GenerationTaskExecutor<A, G> {
    /// Create an executor over the given engines.
    pub fn new(analysis: A, generation: G) -> Self {
        Self {
            analysis,
            generation,
        }
    }

    /// Execute the generation task for one declaration.
    ///
    /// Processes list-form directives in their declared order, then the
    /// single-form directive if present. Call ordering is deterministic for
    /// reproducible builds; it does not affect which entries end up in the
    /// map except when targets collide (last write wins). A declaration with
    /// neither metadata group yields an empty map without invoking either
    /// engine.
    ///
    /// # Errors
    ///
    /// Propagates the first analysis or generation failure; no partial map is
    /// returned.
    pub fn execute(&self, declaration: LazyRef<SourceDeclaration>) -> Result<ResultMap> {
        let declaration = declaration.resolve();
        let mut generated = ResultMap::new();

        if !declaration.has_directives() {
            debug!(
                target: "executor",
                "No directive metadata on {}; nothing to generate",
                declaration.id
            );
            return Ok(generated);
        }

        if let Some(list) = &declaration.directive_list {
            for directive in &list.value {
                self.process_directive(&declaration, directive, &mut generated)?;
            }
        }

        if let Some(directive) = &declaration.directive {
            self.process_directive(&declaration, directive, &mut generated)?;
        }

        Ok(generated)
    }

    fn process_directive(
        &self,
        declaration: &SourceDeclaration,
        directive: &DirectiveMetadata,
        generated: &mut ResultMap,
    ) -> Result<()> {
        let resolved = resolver::resolve(directive);
        debug!(
            target: "executor",
            "Generating parcel code for {} (declared on {})",
            resolved.target,
            declaration.id
        );

        let descriptor = self.analysis.analyze(
            &resolved.target,
            resolved.converter.as_ref(),
            resolved.parcels_index,
        )?;
        let artifact = self.generation.generate(&resolved.target, &descriptor)?;

        generated.insert(
            resolved.target,
            ResultEntry {
                artifact,
                parcels_index: descriptor.is_parcels_index(),
            },
        );
        Ok(())
    }
}
