//! CLI route: single route table and run context. Dispatches to the command service and presentation.

use crate::cli::parse::{Commands, SubmitArgs, TargetArgs};
use crate::cli::presentation::{format_plan_json, format_plan_text};
use crate::cli::{command_name, operation_kind};
use crate::command::{GraphCommandService, GraphOptions};
use crate::config::{ConfigLoader, GraphbatchConfig};
use crate::error::GraphError;
use crate::request::OperationKind;
use crate::service::{GraphService, InMemoryGraphService, Response};
use crate::tracker::{Completion, TrackerNotice};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Text to print plus the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn success(text: String) -> Self {
        Self { text, exit_code: 0 }
    }
}

/// Runtime context for CLI execution: loaded configuration and the command service.
pub struct RunContext {
    config: GraphbatchConfig,
    commands: GraphCommandService,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GraphError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        let service: Arc<dyn GraphService> = Arc::new(InMemoryGraphService::new(
            config.service.to_memory_options(),
        ));
        Self::with_service(config, service)
    }

    /// Create run context over an explicit graph service.
    pub fn with_service(
        config: GraphbatchConfig,
        service: Arc<dyn GraphService>,
    ) -> Result<Self, GraphError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            GraphError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let commands = GraphCommandService::new(service, config.tracker.clone())
            .with_notice_handler(|notice| match notice {
                TrackerNotice::CancellationFailed { .. } => {
                    eprintln!("Cancellation was not accepted by the server; still waiting.")
                }
            });

        Ok(Self { config, commands })
    }

    pub fn config(&self) -> &GraphbatchConfig {
        &self.config
    }

    /// Execute a command. `cancel` interrupts an indefinite wait.
    pub async fn execute(
        &self,
        command: &Commands,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, GraphError> {
        let started = Instant::now();
        let result = match (command, operation_kind(command)) {
            (Commands::Plan { target, format }, _) => self.handle_plan(target, format),
            (
                Commands::Delete { args }
                | Commands::Chgrp { args, .. }
                | Commands::Chown { args, .. }
                | Commands::Chmod { args, .. }
                | Commands::DiskUsage { args },
                Some(kind),
            ) => self.handle_submit(args, &kind, cancel).await,
            (_, None) => Err(GraphError::InvalidRequest(format!(
                "{} does not submit an operation",
                command_name(command)
            ))),
        };
        info!(
            command = command_name(command),
            duration_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }

    fn options(&self, target: &TargetArgs, wait: Option<i64>, report: bool) -> GraphOptions {
        let defaults = &self.config.defaults;
        GraphOptions {
            wait_secs: wait.unwrap_or(defaults.wait_secs),
            include: target.include.clone(),
            exclude: target.exclude.clone(),
            ordered: target.ordered || defaults.ordered,
            dry_run: target.dry_run,
            report: report || defaults.report,
        }
    }

    fn handle_plan(&self, target: &TargetArgs, format: &str) -> Result<CommandOutput, GraphError> {
        let options = self.options(target, None, false);
        let plan = self
            .commands
            .plan(&target.targets, &OperationKind::Delete, &options)?;
        let text = match format {
            "json" => format_plan_json(&plan)?,
            "text" => format_plan_text(&plan),
            other => {
                return Err(GraphError::InvalidRequest(format!(
                    "Unknown format '{}' (expected text or json)",
                    other
                )))
            }
        };
        Ok(CommandOutput::success(text))
    }

    async fn handle_submit(
        &self,
        args: &SubmitArgs,
        kind: &OperationKind,
        cancel: &CancellationToken,
    ) -> Result<CommandOutput, GraphError> {
        let options = self.options(&args.target, args.wait, args.report);
        let result = self
            .commands
            .run(&args.target.targets, kind, &options, cancel)
            .await?;
        Ok(CommandOutput {
            text: result.report,
            exit_code: exit_code(&result.completion),
        })
    }
}

/// Non-zero when the operation failed, was cancelled, or is still running.
fn exit_code(completion: &Completion) -> i32 {
    match completion {
        Completion::Completed {
            response: Response::Ok { .. },
            ..
        }
        | Completion::Detached => 0,
        Completion::Completed { .. } | Completion::Cancelled { .. } | Completion::TimedOut { .. } => 1,
    }
}
