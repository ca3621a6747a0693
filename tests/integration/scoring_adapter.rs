//! The scoring adapter as a host drives it: setup once, leaf per segment,
//! score per document.

use serde_json::{json, Value};
use skipset::{
    encode_base64, score_segments, ScorePolicy, ScriptParams, SetupError, SkipListFactory,
    Unresolved, Verdict, SCRIPT_NAME,
};

use crate::common::{encode, SAMPLE_IDS};

fn params_for(ids: &[u32], field: &str) -> Value {
    json!({ "skip": encode_base64(&encode(ids)), "field_name": field })
}

fn factory(params: Value) -> Result<SkipListFactory, SetupError> {
    SkipListFactory::from_param_map(params.as_object().unwrap())
}

#[test]
fn test_end_to_end_sample() {
    let leaf = factory(params_for(&SAMPLE_IDS, "doc_id")).unwrap().new_leaf();

    for id in SAMPLE_IDS {
        assert_eq!(leaf.score(&json!({ "doc_id": id })), 0.0, "member {}", id);
    }
    for id in [0u32, 4, 6, 65535, 65536, 69999, 70001, 131070, 131072, u32::MAX] {
        assert_eq!(leaf.score(&json!({ "doc_id": id })), 1.0, "non-member {}", id);
    }
}

#[test]
fn test_keyword_ids_resolve() {
    let leaf = factory(params_for(&SAMPLE_IDS, "doc_id")).unwrap().new_leaf();
    assert_eq!(leaf.score(&json!({ "doc_id": "70000" })), 0.0);
    assert_eq!(leaf.score(&json!({ "doc_id": ["131071", "1"] })), 0.0);
    assert_eq!(leaf.score(&json!({ "doc_id": "70001" })), 1.0);
}

#[test]
fn test_unresolvable_documents_get_baseline() {
    let leaf = factory(params_for(&SAMPLE_IDS, "doc_id")).unwrap().new_leaf();
    let cases = [
        (json!({}), Unresolved::MissingField),
        (json!({ "doc_id": null }), Unresolved::MissingField),
        (json!({ "doc_id": "abc" }), Unresolved::NotAnInteger),
        (json!({ "doc_id": 5.5 }), Unresolved::NotAnInteger),
        (json!({ "doc_id": " 5" }), Unresolved::NotAnInteger),
        (json!({ "doc_id": -5 }), Unresolved::OutOfRange),
        (json!({ "doc_id": "4294967296" }), Unresolved::OutOfRange),
    ];
    for (doc, reason) in cases {
        assert_eq!(leaf.explain(&doc), Verdict::Unresolved(reason), "{}", doc);
        assert_eq!(leaf.score(&doc), 1.0, "{}", doc);
    }
}

#[test]
fn test_nested_keyword_field() {
    let params = json!({
        "skip": encode_base64(&encode(&SAMPLE_IDS)),
        "field_name": "kw.id",
        "baseline_score": 10,
        "member_score": 0
    });
    let leaf = factory(params).unwrap().new_leaf();
    assert_eq!(leaf.score(&json!({ "kw": { "id": "5" } })), 0.0);
    assert_eq!(leaf.score(&json!({ "kw.id": 70000 })), 0.0);
    assert_eq!(leaf.score(&json!({ "kw": { "id": "6" } })), 10.0);
    assert_eq!(leaf.score(&json!({ "kw": "5" })), 10.0);
}

#[test]
fn test_empty_skip_set() {
    let leaf = factory(params_for(&[], "id")).unwrap().new_leaf();
    for id in [0u32, 5, 70000, u32::MAX] {
        assert_eq!(leaf.explain(&json!({ "id": id })), Verdict::NonMember(id));
    }
}

#[test]
fn test_setup_failures() {
    assert!(matches!(
        factory(json!({ "field_name": "id" })),
        Err(SetupError::MissingParameter("skip"))
    ));
    assert!(matches!(
        factory(json!({ "skip": encode_base64(&encode(&[1])) })),
        Err(SetupError::MissingParameter("field_name"))
    ));
    assert!(matches!(
        factory(json!({ "skip": "***", "field_name": "id" })),
        Err(SetupError::Base64(_))
    ));
    assert!(matches!(
        factory(json!({ "skip": encode_base64(b"not a bitmap"), "field_name": "id" })),
        Err(SetupError::Malformed(_))
    ));
}

#[test]
fn test_factory_contract() {
    let factory = factory(params_for(&SAMPLE_IDS, "id")).unwrap();
    assert_eq!(SCRIPT_NAME, "skip_list");
    assert!(!factory.needs_score());
    assert!(factory.is_result_deterministic());
    assert_eq!(factory.skip_set().len(), 3);
    assert_eq!(factory.policy(), ScorePolicy::default());
}

#[test]
fn test_typed_params_path() {
    let params = ScriptParams {
        skip: encode_base64(&encode(&SAMPLE_IDS)),
        field_name: "id".to_string(),
        policy: ScorePolicy {
            member_score: -1.0,
            baseline_score: 2.5,
        },
    };
    let leaf = SkipListFactory::new(&params).unwrap().new_leaf();
    assert_eq!(leaf.score(&json!({ "id": 5 })), -1.0);
    assert_eq!(leaf.score(&json!({ "id": 7 })), 2.5);
}

#[test]
fn test_segments_scored_independently() {
    let factory = factory(params_for(&SAMPLE_IDS, "id")).unwrap();
    let segments: Vec<Vec<Value>> = (0..8)
        .map(|s| {
            (0..100)
                .map(|i| json!({ "id": if i == s { 70000 } else { 1_000_000 + i } }))
                .collect()
        })
        .collect();

    let scores = score_segments(&factory, &segments);
    assert_eq!(scores.len(), 8);
    for (s, segment) in scores.iter().enumerate() {
        assert_eq!(segment.len(), 100);
        for (i, &score) in segment.iter().enumerate() {
            assert_eq!(score, if i == s { 0.0 } else { 1.0 });
        }
    }

    #[cfg(feature = "parallel")]
    assert_eq!(skipset::score_segments_parallel(&factory, &segments), scores);
}
