//! Request combiner: merge compatible requests to cut remote round trips.
//!
//! Plain requests collapse into one. Skip-head requests collapse per
//! `start_from` type, since requests with different leaves cannot share a
//! single walk from anchor to leaf.

use crate::request::types::{GraphRequest, Request, SkipHeadRequest};
use tracing::debug;

/// Merge `requests` into the smallest equivalent list.
///
/// With `strict_order` the input is returned unchanged: the caller needs each
/// request's side effects visible to the next. Otherwise the result is the
/// merged plain request (if any) followed by one skip-head request per distinct
/// `start_from`, in first-seen order. Kind, child options and dry-run of a
/// merged request come from the first request merged into it.
pub fn combine(requests: Vec<Request>, strict_order: bool) -> Vec<Request> {
    if strict_order {
        debug!(count = requests.len(), "Strict ordering requested; requests left uncombined");
        return requests;
    }

    let input_count = requests.len();
    let mut plain: Option<GraphRequest> = None;
    let mut skip_heads: Vec<SkipHeadRequest> = Vec::new();

    for request in requests {
        match request {
            Request::Graph(graph) => {
                plain = Some(match plain {
                    Some(merged) => merged.merged_with(&graph.target_objects),
                    None => graph,
                });
            }
            Request::SkipHead(skip) => {
                match skip_heads
                    .iter()
                    .position(|existing| existing.start_from == skip.start_from)
                {
                    Some(index) => {
                        skip_heads[index] =
                            skip_heads[index].merged_with(&skip.request.target_objects);
                    }
                    None => skip_heads.push(skip),
                }
            }
        }
    }

    let combined: Vec<Request> = plain
        .map(Request::Graph)
        .into_iter()
        .chain(skip_heads.into_iter().map(Request::SkipHead))
        .collect();

    debug!(
        input = input_count,
        output = combined.len(),
        "Combined graph requests"
    );
    combined
}
