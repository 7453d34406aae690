//! Response reporter: render a finished request as diagnosable text.
//!
//! Pure formatting; nothing here performs I/O or mutates its inputs.

use crate::request::{CompositeRequest, Request, TargetObjects};
use crate::service::{Response, Status};
use crate::tracker::Completion;
use std::collections::BTreeSet;

/// Marker appended for successful responses.
pub const SUCCESS_MARKER: &str = "ok";

/// One line per request: kind, hierarchy for skip-heads, per-type id counts.
pub fn describe(request: &Request) -> String {
    let graph = request.graph();
    let mut line = match request {
        Request::Graph(_) => format!("{} {}", graph.kind, counts(&graph.target_objects)),
        Request::SkipHead(skip) => format!(
            "{} {}/{} {}",
            graph.kind,
            skip.anchor,
            skip.start_from,
            counts(&graph.target_objects)
        ),
    };
    if graph.dry_run {
        line.push_str(" (dry run)");
    }
    line
}

/// Render a terminal response and status for `request`.
///
/// `detailed` adds steps, elapsed time, flags and the affected-object counts.
pub fn report(
    request: &CompositeRequest,
    response: &Response,
    status: &Status,
    detailed: bool,
) -> String {
    let mut lines = describe_all(request);
    lines.extend(outcome_lines(response));
    if detailed {
        lines.extend(detail_lines(response, status));
    }
    lines.join("\n")
}

/// Render any tracker outcome, including the non-terminal ones.
pub fn report_completion(
    request: &CompositeRequest,
    completion: &Completion,
    detailed: bool,
) -> String {
    match completion {
        Completion::Completed { response, status } => report(request, response, status, detailed),
        Completion::Cancelled { response, status } => {
            let mut lines = describe_all(request);
            lines.push("cancelled".to_string());
            if let (true, Some(response), Some(status)) = (detailed, response, status) {
                lines.extend(detail_lines(response, status));
            }
            lines.join("\n")
        }
        Completion::TimedOut { polls } => {
            let mut lines = describe_all(request);
            lines.push(format!(
                "timed out after {} polls; the operation may still be running",
                polls
            ));
            lines.join("\n")
        }
        Completion::Detached => {
            let mut lines = describe_all(request);
            lines.push("submitted; not waiting for completion".to_string());
            lines.join("\n")
        }
    }
}

fn describe_all(request: &CompositeRequest) -> Vec<String> {
    request.requests().iter().map(describe).collect()
}

fn counts(targets: &TargetObjects) -> String {
    targets
        .iter()
        .map(|(type_name, ids)| format!("{}:{}", type_name, ids.len()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn outcome_lines(response: &Response) -> Vec<String> {
    match response {
        Response::Ok { .. } => vec![SUCCESS_MARKER.to_string()],
        Response::Err {
            category,
            name,
            parameters,
        } => {
            let mut lines = vec![format!("failed: {} {}", category, name)];
            lines.extend(
                parameters
                    .iter()
                    .map(|(key, value)| format!("  {}={}", key, value)),
            );
            lines
        }
    }
}

fn detail_lines(response: &Response, status: &Status) -> Vec<String> {
    let mut lines = vec![format!("steps: {}", status.steps)];
    lines.push(match status.elapsed() {
        Some(elapsed) => format!(
            "elapsed: {:.3}s",
            elapsed.num_milliseconds() as f64 / 1000.0
        ),
        None => "elapsed: unfinished".to_string(),
    });
    lines.push(format!("flags: {}", flags(&status.flags)));

    if let Response::Ok { affected } = response {
        if !affected.is_empty() {
            lines.push("affected:".to_string());
            lines.extend(
                affected
                    .iter()
                    .map(|(type_name, ids)| format!("  {}: {}", type_name, ids.len())),
            );
        }
    }
    lines
}

fn flags(flags: &BTreeSet<crate::service::Flag>) -> String {
    if flags.is_empty() {
        return "none".to_string();
    }
    flags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
