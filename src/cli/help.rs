//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;
use crate::request::OperationKind;

/// Command name string for logs (e.g. "delete", "plan").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Delete { .. } => "delete",
        Commands::Chgrp { .. } => "chgrp",
        Commands::Chown { .. } => "chown",
        Commands::Chmod { .. } => "chmod",
        Commands::DiskUsage { .. } => "disk-usage",
        Commands::Plan { .. } => "plan",
    }
}

/// Operation kind for a submitting command; `None` for `plan`.
pub fn operation_kind(command: &Commands) -> Option<OperationKind> {
    match command {
        Commands::Delete { .. } => Some(OperationKind::Delete),
        Commands::Chgrp { group, .. } => Some(OperationKind::Chgrp { group_id: *group }),
        Commands::Chown { user, .. } => Some(OperationKind::Chown { user_id: *user }),
        Commands::Chmod { perms, .. } => Some(OperationKind::Chmod {
            permissions: perms.clone(),
        }),
        Commands::DiskUsage { .. } => Some(OperationKind::DiskUsage),
        Commands::Plan { .. } => None,
    }
}
