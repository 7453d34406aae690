//! Operation kinds a graph request can carry.

use crate::request::types::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The bulk action applied to the target objects and, transitively, to what they reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationKind {
    Delete,
    /// Move into another group.
    Chgrp { group_id: ObjectId },
    /// Give to another user.
    Chown { user_id: ObjectId },
    /// Change group permissions, e.g. `rwr---`.
    Chmod { permissions: String },
    DiskUsage,
}

impl OperationKind {
    /// Short stable name used in logs and command names.
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Delete => "delete",
            OperationKind::Chgrp { .. } => "chgrp",
            OperationKind::Chown { .. } => "chown",
            OperationKind::Chmod { .. } => "chmod",
            OperationKind::DiskUsage => "disk-usage",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Delete => write!(f, "Delete"),
            OperationKind::Chgrp { group_id } => write!(f, "Chgrp(group={})", group_id),
            OperationKind::Chown { user_id } => write!(f, "Chown(user={})", user_id),
            OperationKind::Chmod { permissions } => write!(f, "Chmod({})", permissions),
            OperationKind::DiskUsage => write!(f, "DiskUsage"),
        }
    }
}
