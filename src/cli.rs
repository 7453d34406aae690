//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the command service.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, operation_kind};
pub use output::map_error;
pub use parse::{Cli, Commands, SubmitArgs, TargetArgs};
pub use presentation::{format_plan_json, format_plan_text};
pub use route::{CommandOutput, RunContext};
