//! Property-based tests for the target token grammar

use graphbatch::request::{parse, OperationKind, Request};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{0,8}"
}

/// Parsed ids are exactly the distinct ids written in the token
#[test]
fn test_parsed_ids_match_token_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(type_name(), prop::collection::vec(any::<u64>(), 1..8)),
            |(name, ids)| {
                let joined: Vec<String> = ids.iter().map(u64::to_string).collect();
                let token = format!("{}:{}", name, joined.join(","));

                let request = parse(&token, OperationKind::Delete).unwrap();
                let expected: BTreeSet<u64> = ids.into_iter().collect();

                assert!(matches!(request, Request::Graph(_)));
                assert_eq!(request.graph().target_objects[&name], expected);

                Ok(())
            },
        )
        .unwrap();
}

/// Rendering a parsed request back to tokens and parsing again is stable
#[test]
fn test_tokens_reparse_to_same_request_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(type_name(), 1..4),
                prop::collection::btree_set(0u64..1000, 1..6),
            ),
            |(path, ids)| {
                let joined: Vec<String> = ids.iter().map(u64::to_string).collect();
                let token = format!("{}:{}", path.join("/"), joined.join(","));

                let first = parse(&token, OperationKind::DiskUsage).unwrap();
                let tokens = first.to_tokens();
                prop_assert_eq!(tokens.len(), 1);

                let second = parse(&tokens[0], OperationKind::DiskUsage).unwrap();
                prop_assert_eq!(first, second);

                Ok(())
            },
        )
        .unwrap();
}

/// Anything without a ':' is rejected rather than guessed at
#[test]
fn test_missing_separator_rejected_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[A-Za-z0-9/,+ ]{0,20}", |token| {
            prop_assert!(parse(&token, OperationKind::Delete).is_err());
            Ok(())
        })
        .unwrap();
}
