//! Completion tracker driven end to end through the in-process service.

use graphbatch::request::{CompositeRequest, GraphRequest, OperationKind, Request};
use graphbatch::service::{
    Flag, GraphService, HandleProbe, InMemoryGraphService, MemoryServiceOptions, Response,
};
use graphbatch::tracker::{Completion, CompletionTracker, TrackerState, WaitMode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

async fn tracker_for(options: MemoryServiceOptions, loops: u32) -> (CompletionTracker, HandleProbe) {
    let service = InMemoryGraphService::new(options);
    let request = CompositeRequest::new(vec![Request::Graph(GraphRequest::for_type(
        OperationKind::Delete,
        "Image",
        [1],
    ))])
    .unwrap();
    let handle = service.submit(request).await.unwrap();
    let tracker = CompletionTracker::new(handle, loops, Duration::from_millis(100));
    (tracker, service.last_probe().unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_never_completing_handle_times_out_after_three_polls() {
    let (mut tracker, probe) = tracker_for(
        MemoryServiceOptions {
            steps_to_complete: 0,
            ..Default::default()
        },
        10,
    )
    .await;

    let completion = tracker
        .await_completion(
            WaitMode::Bounded {
                loops: 3,
                interval: Duration::from_millis(100),
            },
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(completion, Completion::TimedOut { polls: 3 });
    assert_eq!(probe.polls(), 3);
    assert!(!probe.is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_indefinite_wait_reaches_completion() {
    let (mut tracker, probe) = tracker_for(
        MemoryServiceOptions {
            steps_to_complete: 25,
            ..Default::default()
        },
        2,
    )
    .await;

    let completion = tracker
        .await_completion(WaitMode::Indefinite, &CancellationToken::new())
        .await;

    match completion {
        Completion::Completed { response, status } => {
            assert!(matches!(response, Response::Ok { .. }));
            assert!(!status.flags.contains(&Flag::Failure));
        }
        other => panic!("unexpected completion {:?}", other),
    }
    assert_eq!(probe.polls(), 25);
    assert_eq!(probe.cancel_calls(), 0);
    assert_eq!(tracker.state(), TrackerState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_tracker_keeps_cancelled_result() {
    let (mut tracker, probe) = tracker_for(
        MemoryServiceOptions {
            steps_to_complete: 0,
            ..Default::default()
        },
        2,
    )
    .await;
    let token = CancellationToken::new();
    token.cancel();

    let first = tracker.await_completion(WaitMode::Indefinite, &token).await;
    let second = tracker.await_completion(WaitMode::Indefinite, &token).await;

    assert!(matches!(first, Completion::Cancelled { .. }));
    assert_eq!(first, second);
    assert_eq!(probe.cancel_calls(), 1);
    let handle = tracker.handle().expect("terminal handle is readable");
    assert!(handle.status().await.unwrap().flags.contains(&Flag::Cancelled));
}
