//! Integration tests for graph request batching, submission and reporting

mod binary_logging;
mod config_integration;
mod report_rendering;
mod test_utils;
mod tracker_modes;

pub use test_utils::with_xdg_env;
