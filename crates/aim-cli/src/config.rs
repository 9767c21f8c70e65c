//! Migration options from a TOML file plus command line overrides

use aim_core::MigrationOptions;
use anyhow::Context;
use std::path::Path;

/// Flags that override the options file
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionOverrides {
    pub preserve_ids: bool,
}

/// Load options from `path` (or defaults) and apply `overrides`
///
/// Missing keys in the file keep their defaults.
pub fn load_options(path: Option<&Path>, overrides: OptionOverrides) -> anyhow::Result<MigrationOptions> {
    let mut options = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_options(&text).with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MigrationOptions::default(),
    };

    if overrides.preserve_ids {
        options = options.with_preserve_original_id(true);
    }

    tracing::debug!(?options, "Loaded migration options");
    Ok(options)
}

/// Parse options from TOML text
pub fn parse_options(text: &str) -> Result<MigrationOptions, toml::de::Error> {
    toml::from_str(text)
}
