//! Environment source: GRAPHBATCH__SECTION__KEY=value
//!
//! List keys take comma separated values, e.g.
//! `GRAPHBATCH__SERVICE__PROTECTED_TYPES=Experimenter,Group`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add environment overrides; they take precedence over every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("GRAPHBATCH")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("service.protected_types"),
    )
}
