//! Graph command service: one entry point per graph operation command.
//!
//! Owns the submit-and-wait workflow; the CLI parses arguments, calls
//! [`GraphCommandService::run`] or [`GraphCommandService::plan`] and prints
//! the text it gets back.

use crate::config::TrackerConfig;
use crate::error::GraphError;
use crate::report::report_completion;
use crate::request::parse::parse_all;
use crate::request::{combine, ChildOption, CompositeRequest, OperationKind};
use crate::service::GraphService;
use crate::tracker::{Completion, CompletionTracker, TrackerNotice, WaitMode};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Caller-facing options shared by every graph command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Negative waits indefinitely, zero does not wait, positive is a limit in seconds
    pub wait_secs: i64,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Keep requests separate and in order
    pub ordered: bool,
    pub dry_run: bool,
    /// Detailed report
    pub report: bool,
}

impl GraphOptions {
    pub fn wait_mode(&self) -> WaitMode {
        WaitMode::from_wait_secs(self.wait_secs)
    }

    fn child_options(&self) -> Option<ChildOption> {
        ChildOption::from_lists(self.include.iter().cloned(), self.exclude.iter().cloned())
    }
}

/// Outcome of one submitted command.
#[derive(Debug, Clone)]
pub struct GraphRunResult {
    pub request: CompositeRequest,
    pub completion: Completion,
    pub report: String,
}

type NoticeHandler = Arc<dyn Fn(&TrackerNotice) + Send + Sync>;

/// Builds, submits, awaits and reports graph operations.
pub struct GraphCommandService {
    service: Arc<dyn GraphService>,
    tracker: TrackerConfig,
    notice_handler: Option<NoticeHandler>,
}

impl GraphCommandService {
    pub fn new(service: Arc<dyn GraphService>, tracker: TrackerConfig) -> Self {
        Self {
            service,
            tracker,
            notice_handler: None,
        }
    }

    /// Forward tracker notices (e.g. refused cancellation) to the caller.
    pub fn with_notice_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&TrackerNotice) + Send + Sync + 'static,
    {
        self.notice_handler = Some(Arc::new(handler));
        self
    }

    /// Parse, apply options uniformly, and combine unless ordering is required.
    pub fn plan<S: AsRef<str>>(
        &self,
        targets: &[S],
        kind: &OperationKind,
        options: &GraphOptions,
    ) -> Result<CompositeRequest, GraphError> {
        build_composite(targets, kind, options)
    }

    /// Submit the planned request and wait according to `options.wait_secs`.
    ///
    /// Errors only before or at submission; everything afterwards is in the result.
    pub async fn run<S: AsRef<str>>(
        &self,
        targets: &[S],
        kind: &OperationKind,
        options: &GraphOptions,
        cancel: &CancellationToken,
    ) -> Result<GraphRunResult, GraphError> {
        let request = build_composite(targets, kind, options)?;
        info!(
            operation = kind.name(),
            requests = request.len(),
            dry_run = options.dry_run,
            "Submitting graph request"
        );

        let handle = self.service.submit(request.clone()).await?;
        let mut tracker =
            CompletionTracker::new(handle, self.tracker.loops, self.tracker.interval());
        if let Some(handler) = &self.notice_handler {
            let handler = Arc::clone(handler);
            tracker = tracker.with_notifier(move |notice| handler(notice));
        }

        let completion = tracker.await_completion(options.wait_mode(), cancel).await;
        let report = report_completion(&request, &completion, options.report);

        Ok(GraphRunResult {
            request,
            completion,
            report,
        })
    }
}

/// Parse every target, apply child options and dry-run to each request, then
/// combine unless `options.ordered`.
pub fn build_composite<S: AsRef<str>>(
    targets: &[S],
    kind: &OperationKind,
    options: &GraphOptions,
) -> Result<CompositeRequest, GraphError> {
    let child_options = options.child_options();
    let requests = parse_all(targets, kind)?
        .into_iter()
        .map(|request| request.with_options(child_options.clone(), options.dry_run))
        .collect();
    CompositeRequest::new(combine(requests, options.ordered))
}
