//! End-to-end executor tests over JSON declaration metadata.

use crate::common::{CountingAnalysis, CountingGeneration, init_tracing};
use parcelgen::executor::{GenerationTaskExecutor, LazyRef};
use parcelgen::metadata::{SourceDeclaration, TypeRef};

#[test]
fn json_declaration_flows_through_to_generated_artifacts() {
    init_tracing();

    let declaration = SourceDeclaration::from_json(
        r#"{
            "id": "example.ParcelModule",
            "directives": {
                "value": [
                    { "value": "example.Address" },
                    { "value": "example.Order", "parcelsIndex": false }
                ]
            },
            "directive": {
                "value": "example.Person",
                "converter": "example.PersonConverter"
            }
        }"#,
    )
    .unwrap();

    let analysis = CountingAnalysis::new();
    let generation = CountingGeneration::new();
    let executor = GenerationTaskExecutor::new(analysis.clone(), generation.clone());

    let results = executor.execute(LazyRef::from(declaration)).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(analysis.call_count(), 3);
    assert_eq!(generation.call_count(), 3);

    let person = &results[&TypeRef::new("example.Person")];
    assert!(person.parcels_index);
    assert_eq!(person.artifact.target(), &TypeRef::new("example.Person"));
    assert!(person.artifact.code().contains("example.Person"));

    let address = &results[&TypeRef::new("example.Address")];
    assert!(address.parcels_index);

    let order = &results[&TypeRef::new("example.Order")];
    assert!(!order.parcels_index);
}

#[test]
fn declaration_without_metadata_groups_is_a_no_op() {
    init_tracing();

    let declaration =
        SourceDeclaration::from_json(r#"{ "id": "example.PlainType" }"#).unwrap();

    let analysis = CountingAnalysis::new();
    let generation = CountingGeneration::new();
    let executor = GenerationTaskExecutor::new(analysis.clone(), generation.clone());

    let results = executor.execute(LazyRef::from(declaration)).unwrap();

    assert!(results.is_empty());
    assert_eq!(analysis.call_count(), 0);
    assert_eq!(generation.call_count(), 0);
}

#[test]
fn failing_analysis_fails_the_whole_invocation() {
    init_tracing();

    let analysis = CountingAnalysis::failing();
    let generation = CountingGeneration::new();
    let executor = GenerationTaskExecutor::new(analysis, generation.clone());

    let declaration = crate::common::list_directive_declaration(
        "example.ParcelModule",
        &["example.A", "example.B"],
    );

    assert!(executor.execute(LazyRef::from(declaration)).is_err());
    // The first directive already failed analysis, so generation never ran.
    assert_eq!(generation.call_count(), 0);
}
