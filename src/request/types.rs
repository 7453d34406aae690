//! Request value types: graph, skip-head and composite requests plus child options.

use crate::error::GraphError;
use crate::request::kind::OperationKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Model type name, e.g. `Image` or `Dataset`.
pub type TypeName = String;

/// Server-side object identifier.
pub type ObjectId = u64;

/// Mapping from a type name to the ids of that type targeted by an operation.
pub type TargetObjects = BTreeMap<TypeName, BTreeSet<ObjectId>>;

/// Union of two target maps, key by key. Neither input is modified.
pub fn merge_targets(left: &TargetObjects, right: &TargetObjects) -> TargetObjects {
    let mut merged = left.clone();
    for (type_name, ids) in right {
        merged
            .entry(type_name.clone())
            .or_default()
            .extend(ids.iter().copied());
    }
    merged
}

/// Type filters applied to objects reached transitively from the targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOption {
    #[serde(default)]
    pub include_types: BTreeSet<TypeName>,
    #[serde(default)]
    pub exclude_types: BTreeSet<TypeName>,
}

impl ChildOption {
    /// Build a child option from include/exclude lists; `None` when both are empty.
    pub fn from_lists<I, E>(include: I, exclude: E) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<TypeName>,
        E: IntoIterator,
        E::Item: Into<TypeName>,
    {
        let option = ChildOption {
            include_types: include.into_iter().map(Into::into).collect(),
            exclude_types: exclude.into_iter().map(Into::into).collect(),
        };
        if option.include_types.is_empty() && option.exclude_types.is_empty() {
            None
        } else {
            Some(option)
        }
    }
}

/// A single graph operation over a target object map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub kind: OperationKind,
    pub target_objects: TargetObjects,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_options: Option<ChildOption>,
    #[serde(default)]
    pub dry_run: bool,
}

impl GraphRequest {
    pub fn new(kind: OperationKind, target_objects: TargetObjects) -> Self {
        Self {
            kind,
            target_objects,
            child_options: None,
            dry_run: false,
        }
    }

    /// Convenience constructor for a single type.
    pub fn for_type<I>(kind: OperationKind, type_name: impl Into<TypeName>, ids: I) -> Self
    where
        I: IntoIterator<Item = ObjectId>,
    {
        let mut target_objects = TargetObjects::new();
        target_objects.insert(type_name.into(), ids.into_iter().collect());
        Self::new(kind, target_objects)
    }

    pub fn with_child_options(mut self, child_options: Option<ChildOption>) -> Self {
        self.child_options = child_options;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Total number of targeted ids across all types.
    pub fn object_count(&self) -> usize {
        self.target_objects.values().map(BTreeSet::len).sum()
    }

    /// A new request with `other` unioned into this request's targets.
    /// Kind, child options and dry-run are taken from `self`.
    pub fn merged_with(&self, other: &TargetObjects) -> Self {
        Self {
            kind: self.kind.clone(),
            target_objects: merge_targets(&self.target_objects, other),
            child_options: self.child_options.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// A request reached through a hierarchy path whose operation applies only to
/// the path's leaf type.
///
/// The inner request's targets are keyed by the path head (`anchor`); the
/// remote walks from there down to `start_from` and operates on those objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipHeadRequest {
    pub anchor: TypeName,
    pub start_from: TypeName,
    pub request: GraphRequest,
}

impl SkipHeadRequest {
    pub fn new(anchor: impl Into<TypeName>, start_from: impl Into<TypeName>, request: GraphRequest) -> Self {
        Self {
            anchor: anchor.into(),
            start_from: start_from.into(),
            request,
        }
    }

    pub fn merged_with(&self, other: &TargetObjects) -> Self {
        Self {
            anchor: self.anchor.clone(),
            start_from: self.start_from.clone(),
            request: self.request.merged_with(other),
        }
    }
}

/// Closed union of submittable requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Graph(GraphRequest),
    SkipHead(SkipHeadRequest),
}

impl Request {
    /// The graph request carrying kind, targets and options.
    pub fn graph(&self) -> &GraphRequest {
        match self {
            Request::Graph(request) => request,
            Request::SkipHead(skip) => &skip.request,
        }
    }

    pub fn is_skip_head(&self) -> bool {
        matches!(self, Request::SkipHead(_))
    }

    /// Apply caller-wide options. Every request in a batch gets the same values.
    pub fn with_options(self, child_options: Option<ChildOption>, dry_run: bool) -> Self {
        match self {
            Request::Graph(request) => Request::Graph(
                request
                    .with_child_options(child_options)
                    .with_dry_run(dry_run),
            ),
            Request::SkipHead(skip) => Request::SkipHead(SkipHeadRequest {
                request: skip
                    .request
                    .with_child_options(child_options)
                    .with_dry_run(dry_run),
                ..skip
            }),
        }
    }

    /// Render back into path-expression tokens, one per target type.
    pub fn to_tokens(&self) -> Vec<String> {
        let (leaf, targets) = match self {
            Request::Graph(request) => (None, &request.target_objects),
            Request::SkipHead(skip) => (Some(skip.start_from.as_str()), &skip.request.target_objects),
        };
        targets
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(type_name, ids)| {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                match leaf {
                    Some(leaf) => format!("{}/{}:{}", type_name, leaf, ids.join(",")),
                    None => format!("{}:{}", type_name, ids.join(",")),
                }
            })
            .collect()
    }
}

/// One or more requests submitted to the remote service as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRequest {
    requests: Vec<Request>,
}

impl CompositeRequest {
    /// Fails on an empty request list.
    pub fn new(requests: Vec<Request>) -> Result<Self, GraphError> {
        if requests.is_empty() {
            return Err(GraphError::InvalidRequest(
                "A composite request needs at least one request".to_string(),
            ));
        }
        Ok(Self { requests })
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn dry_run(&self) -> bool {
        self.requests.iter().any(|r| r.graph().dry_run)
    }
}
