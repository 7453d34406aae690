//! Plan presentation: the requests a command would submit.

use crate::error::GraphError;
use crate::request::{CompositeRequest, Request};

fn request_shape(request: &Request) -> (&'static str, String) {
    match request {
        Request::Graph(_) => ("graph", "-".to_string()),
        Request::SkipHead(skip) => ("skip-head", format!("{}/{}", skip.anchor, skip.start_from)),
    }
}

fn join_types<'a, I: IntoIterator<Item = &'a String>>(types: I) -> String {
    let joined: Vec<&str> = types.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(",")
    }
}

pub fn format_plan_text(plan: &CompositeRequest) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Request", "Hierarchy", "Targets", "Include", "Exclude", "Dry Run"]);
    for (index, request) in plan.requests().iter().enumerate() {
        let (kind, hierarchy) = request_shape(request);
        let graph = request.graph();
        let (include, exclude) = match &graph.child_options {
            Some(child) => (
                join_types(&child.include_types),
                join_types(&child.exclude_types),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            (index + 1).to_string(),
            kind.to_string(),
            hierarchy,
            request.to_tokens().join(" "),
            include,
            exclude,
            if graph.dry_run { "yes" } else { "no" }.to_string(),
        ]);
    }
    format!(
        "{}\n{} request(s) in one submission",
        table,
        plan.len()
    )
}

pub fn format_plan_json(plan: &CompositeRequest) -> Result<String, GraphError> {
    let requests: Vec<serde_json::Value> = plan
        .requests()
        .iter()
        .map(|request| {
            let graph = request.graph();
            let mut value = serde_json::json!({
                "type": request_shape(request).0,
                "targets": request.to_tokens(),
                "dry_run": graph.dry_run,
                "child_options": graph.child_options,
            });
            if let Request::SkipHead(skip) = request {
                value["anchor"] = serde_json::json!(skip.anchor);
                value["start_from"] = serde_json::json!(skip.start_from);
            }
            value
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "requests": requests }))
        .map_err(|e| GraphError::InvalidRequest(e.to_string()))
}
