//! Remote graph service boundary.
//!
//! The remote executes composite requests; this crate only submits them and
//! polls the returned handle. Transport lives behind [`GraphService`].

pub mod memory;

use crate::error::SubmissionError;
use crate::request::{CompositeRequest, TargetObjects};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use memory::{HandleProbe, InMemoryGraphService, MemoryServiceOptions};

/// Status flags reported by the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    Failure,
    Cancelled,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Failure => write!(f, "FAILURE"),
            Flag::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Progress and timing of a submitted request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub steps: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub stop_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flags: BTreeSet<Flag>,
}

impl Status {
    /// `stop_time - start_time`, when both are known.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.stop_time) {
            (Some(start), Some(stop)) => Some(stop - start),
            _ => None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.flags.contains(&Flag::Failure)
    }
}

/// Terminal outcome of a composite request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    Ok {
        /// Objects the remote reports as processed; empty if it reports none.
        #[serde(default)]
        affected: TargetObjects,
    },
    Err {
        category: String,
        name: String,
        #[serde(default)]
        parameters: BTreeMap<String, String>,
    },
}

impl Response {
    pub fn ok() -> Self {
        Response::Ok {
            affected: TargetObjects::new(),
        }
    }

    pub fn error<I, K, V>(category: impl Into<String>, name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Response::Err {
            category: category.into(),
            name: name.into(),
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Response::Err { .. })
    }
}

/// Client-side reference to a submitted request.
///
/// `response` and `status` return `None` until the request is terminal, and
/// identical values afterwards.
#[async_trait]
pub trait GraphHandle: Send + Sync {
    async fn response(&self) -> Option<Response>;

    async fn status(&self) -> Option<Status>;

    /// Best-effort cancellation; returns whether the remote accepted it.
    async fn cancel(&self) -> bool;
}

/// Accepts composite requests for execution.
#[async_trait]
pub trait GraphService: Send + Sync {
    async fn submit(
        &self,
        request: CompositeRequest,
    ) -> Result<Box<dyn GraphHandle>, SubmissionError>;
}
