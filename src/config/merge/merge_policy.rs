//! Merge rules: defaults applied beneath every other source.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("tracker.loops", 10)?
        .set_default("tracker.interval_ms", 500)?
        .set_default("defaults.wait_secs", -1)?
        .set_default("defaults.report", false)?
        .set_default("defaults.ordered", false)?
        .set_default("service.steps_to_complete", 1)?
        .set_default("service.cancellable", true)
}
