//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GraphError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &GraphError) -> String {
    match e {
        GraphError::Parse(_) => format!(
            "{}\nTargets look like Type[/Type...]:id[,id...], e.g. Image:1,2 or Project/Dataset:5",
            e
        ),
        _ => e.to_string(),
    }
}
