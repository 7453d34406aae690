//! CLI presentation: text and json formatters per command family.

mod plan;

pub use plan::{format_plan_json, format_plan_text};
