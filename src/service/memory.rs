//! In-process graph service.
//!
//! Stands in for the remote: a handle turns terminal after a configured number
//! of response polls. Requests touching a protected type finish with a
//! security error. Nothing is actually modified.

use crate::error::SubmissionError;
use crate::request::types::merge_targets;
use crate::request::{CompositeRequest, Request, TargetObjects, TypeName};
use crate::service::{Flag, GraphHandle, GraphService, Response, Status};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Behaviour knobs for the in-process service.
#[derive(Debug, Clone)]
pub struct MemoryServiceOptions {
    /// Response polls before a handle turns terminal; 0 never completes.
    pub steps_to_complete: u32,
    /// Whether `cancel` is accepted on a running handle.
    pub cancellable: bool,
    /// Types whose presence in a request makes it fail.
    pub protected_types: BTreeSet<TypeName>,
}

impl Default for MemoryServiceOptions {
    fn default() -> Self {
        Self {
            steps_to_complete: 1,
            cancellable: true,
            protected_types: BTreeSet::new(),
        }
    }
}

#[derive(Debug)]
struct HandleState {
    request: CompositeRequest,
    started: DateTime<Utc>,
    polls: u32,
    cancel_calls: u32,
    terminal: Option<(Response, Status)>,
}

/// Read-only view on a handle's bookkeeping, for callers that want to inspect
/// how the handle was driven.
#[derive(Debug, Clone)]
pub struct HandleProbe {
    state: Arc<Mutex<HandleState>>,
}

impl HandleProbe {
    /// Number of `response` calls so far.
    pub fn polls(&self) -> u32 {
        self.state.lock().polls
    }

    pub fn cancel_calls(&self) -> u32 {
        self.state.lock().cancel_calls
    }

    pub fn is_terminal(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    pub fn request(&self) -> CompositeRequest {
        self.state.lock().request.clone()
    }
}

/// Graph service executing nothing, answering from configuration.
#[derive(Debug, Default)]
pub struct InMemoryGraphService {
    options: MemoryServiceOptions,
    probes: Mutex<Vec<HandleProbe>>,
}

impl InMemoryGraphService {
    pub fn new(options: MemoryServiceOptions) -> Self {
        Self {
            options,
            probes: Mutex::new(Vec::new()),
        }
    }

    /// Probe of the most recently submitted handle.
    pub fn last_probe(&self) -> Option<HandleProbe> {
        self.probes.lock().last().cloned()
    }

    pub fn submission_count(&self) -> usize {
        self.probes.lock().len()
    }

    fn validate(request: &CompositeRequest) -> Result<(), SubmissionError> {
        for entry in request.requests() {
            let targets = &entry.graph().target_objects;
            if targets.is_empty() {
                return Err(SubmissionError::Rejected(
                    "request has an empty target map".to_string(),
                ));
            }
            if let Some((type_name, _)) = targets.iter().find(|(_, ids)| ids.is_empty()) {
                return Err(SubmissionError::Rejected(format!(
                    "no ids given for type {}",
                    type_name
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GraphService for InMemoryGraphService {
    async fn submit(
        &self,
        request: CompositeRequest,
    ) -> Result<Box<dyn GraphHandle>, SubmissionError> {
        Self::validate(&request)?;
        let state = Arc::new(Mutex::new(HandleState {
            request,
            started: Utc::now(),
            polls: 0,
            cancel_calls: 0,
            terminal: None,
        }));
        self.probes.lock().push(HandleProbe {
            state: Arc::clone(&state),
        });
        Ok(Box::new(InMemoryHandle {
            state,
            options: self.options.clone(),
        }))
    }
}

struct InMemoryHandle {
    state: Arc<Mutex<HandleState>>,
    options: MemoryServiceOptions,
}

impl InMemoryHandle {
    fn finish(&self, state: &mut HandleState) {
        let protected = protected_type(&state.request, &self.options.protected_types);
        let mut status = Status {
            steps: state.request.len() as u32,
            start_time: Some(state.started),
            stop_time: Some(Utc::now()),
            flags: BTreeSet::new(),
        };
        let response = match protected {
            Some(type_name) => {
                status.flags.insert(Flag::Failure);
                Response::error(
                    "Security",
                    "Violation",
                    [("reason", "denied".to_string()), ("type", type_name)],
                )
            }
            None => Response::Ok {
                affected: affected_objects(&state.request),
            },
        };
        debug!(polls = state.polls, failed = status.has_failed(), "In-memory handle finished");
        state.terminal = Some((response, status));
    }
}

#[async_trait]
impl GraphHandle for InMemoryHandle {
    async fn response(&self) -> Option<Response> {
        let mut state = self.state.lock();
        state.polls += 1;
        if state.terminal.is_none()
            && self.options.steps_to_complete > 0
            && state.polls >= self.options.steps_to_complete
        {
            self.finish(&mut state);
        }
        state.terminal.as_ref().map(|(response, _)| response.clone())
    }

    async fn status(&self) -> Option<Status> {
        self.state
            .lock()
            .terminal
            .as_ref()
            .map(|(_, status)| status.clone())
    }

    async fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        state.cancel_calls += 1;
        if state.terminal.is_some() || !self.options.cancellable {
            return false;
        }
        let status = Status {
            steps: 0,
            start_time: Some(state.started),
            stop_time: Some(Utc::now()),
            flags: [Flag::Cancelled].into_iter().collect(),
        };
        let response = Response::error(
            "Graph",
            "Cancelled",
            std::iter::empty::<(String, String)>(),
        );
        state.terminal = Some((response, status));
        true
    }
}

fn protected_type(request: &CompositeRequest, protected: &BTreeSet<TypeName>) -> Option<TypeName> {
    request.requests().iter().find_map(|entry| {
        let leaf = match entry {
            Request::SkipHead(skip) => Some(&skip.start_from),
            Request::Graph(_) => None,
        };
        entry
            .graph()
            .target_objects
            .keys()
            .chain(leaf)
            .find(|type_name| protected.contains(*type_name))
            .cloned()
    })
}

fn affected_objects(request: &CompositeRequest) -> TargetObjects {
    request
        .requests()
        .iter()
        .fold(TargetObjects::new(), |acc, entry| {
            merge_targets(&acc, &entry.graph().target_objects)
        })
}
