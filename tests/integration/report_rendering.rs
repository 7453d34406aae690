//! Report output for each kind of tracker outcome.

use chrono::{TimeZone, Utc};
use graphbatch::report::{report, report_completion, SUCCESS_MARKER};
use graphbatch::request::{parse, CompositeRequest, OperationKind};
use graphbatch::service::{Flag, Response, Status};
use graphbatch::tracker::Completion;

fn single(token: &str) -> CompositeRequest {
    CompositeRequest::new(vec![parse(token, OperationKind::DiskUsage).unwrap()]).unwrap()
}

fn finished_status(flags: &[Flag]) -> Status {
    Status {
        steps: 2,
        start_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        stop_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 2).unwrap()),
        flags: flags.iter().copied().collect(),
    }
}

#[test]
fn test_error_report_lists_every_parameter() {
    let request = single("Image:1");
    let response = Response::error(
        "Graph",
        "Constraint",
        [("constraints", "Roi"), ("reason", "in use")],
    );

    let text = report(&request, &response, &finished_status(&[Flag::Failure]), false);

    assert_eq!(
        text,
        "DiskUsage Image:1\nfailed: Graph Constraint\n  constraints=Roi\n  reason=in use"
    );
}

#[test]
fn test_detailed_success_report() {
    let request = single("Image:1,2");
    let response = Response::Ok {
        affected: request.requests()[0].graph().target_objects.clone(),
    };

    let text = report(&request, &response, &finished_status(&[]), true);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[1], SUCCESS_MARKER);
    assert!(lines.contains(&"steps: 2"));
    assert!(lines.contains(&"elapsed: 2.000s"));
    assert!(lines.contains(&"flags: none"));
    assert!(lines.contains(&"  Image: 2"));
}

#[test]
fn test_cancelled_report_shows_flags_when_detailed() {
    let request = single("Project/Dataset:9");
    let completion = Completion::Cancelled {
        response: Some(Response::error(
            "Graph",
            "Cancelled",
            std::iter::empty::<(String, String)>(),
        )),
        status: Some(finished_status(&[Flag::Cancelled])),
    };

    let brief = report_completion(&request, &completion, false);
    let detailed = report_completion(&request, &completion, true);

    assert_eq!(brief, "DiskUsage Project/Dataset Project:1\ncancelled");
    assert!(detailed.contains("flags: CANCELLED"));
}

#[test]
fn test_timed_out_report_names_poll_count() {
    let text = report_completion(&single("Image:4"), &Completion::TimedOut { polls: 10 }, true);
    assert!(text.ends_with("timed out after 10 polls; the operation may still be running"));
}
