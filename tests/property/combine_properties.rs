//! Property-based tests for request combining

use graphbatch::request::{combine, GraphRequest, OperationKind, Request, SkipHeadRequest};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const TYPES: &[&str] = &["Image", "Dataset", "Project", "Plate"];
const LEAVES: &[&str] = &["Dataset", "Image", "Well"];

fn request() -> impl Strategy<Value = Request> {
    (
        0..TYPES.len(),
        prop::option::of(0..LEAVES.len()),
        prop::collection::btree_set(0u64..50, 1..4),
    )
        .prop_map(|(type_index, leaf, ids)| {
            let graph = GraphRequest::for_type(OperationKind::Delete, TYPES[type_index], ids);
            match leaf {
                Some(leaf) => Request::SkipHead(SkipHeadRequest::new(
                    TYPES[type_index],
                    LEAVES[leaf],
                    graph,
                )),
                None => Request::Graph(graph),
            }
        })
}

fn batch() -> impl Strategy<Value = Vec<Request>> {
    prop::collection::vec(request(), 0..12)
}

/// Every (type, id) pair is kept for each start point
fn union_by_leaf(requests: &[Request]) -> BTreeMap<Option<String>, BTreeMap<String, BTreeSet<u64>>> {
    let mut union: BTreeMap<Option<String>, BTreeMap<String, BTreeSet<u64>>> = BTreeMap::new();
    for request in requests {
        let leaf = match request {
            Request::SkipHead(skip) => Some(skip.start_from.clone()),
            Request::Graph(_) => None,
        };
        let slot = union.entry(leaf).or_default();
        for (type_name, ids) in &request.graph().target_objects {
            slot.entry(type_name.clone()).or_default().extend(ids);
        }
    }
    union
}

/// Combining never loses or invents targets
#[test]
fn test_combine_preserves_targets_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&batch(), |requests| {
            let combined = combine(requests.clone(), false);
            prop_assert_eq!(union_by_leaf(&combined), union_by_leaf(&requests));
            Ok(())
        })
        .unwrap();
}

/// Output has at most one plain request and one skip-head per start point
#[test]
fn test_combine_groups_by_start_point_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&batch(), |requests| {
            let combined = combine(requests, false);

            let plain = combined
                .iter()
                .filter(|r| matches!(r, Request::Graph(_)))
                .count();
            prop_assert!(plain <= 1);
            if plain == 1 {
                prop_assert!(matches!(combined[0], Request::Graph(_)));
            }

            let leaves: Vec<&str> = combined
                .iter()
                .filter_map(|r| match r {
                    Request::SkipHead(skip) => Some(skip.start_from.as_str()),
                    Request::Graph(_) => None,
                })
                .collect();
            let distinct: BTreeSet<&str> = leaves.iter().copied().collect();
            prop_assert_eq!(leaves.len(), distinct.len());

            Ok(())
        })
        .unwrap();
}

/// Combining an already combined batch changes nothing
#[test]
fn test_combine_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&batch(), |requests| {
            let once = combine(requests, false);
            let twice = combine(once.clone(), false);
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// Strict ordering returns the input untouched
#[test]
fn test_strict_order_is_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&batch(), |requests| {
            prop_assert_eq!(combine(requests.clone(), true), requests);
            Ok(())
        })
        .unwrap();
}
