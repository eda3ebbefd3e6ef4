use std::path::Path;

use crate::input::InputError;
use crate::input::cache::read_to_string_maybe_gz;
use crate::model::weights::EngineConfig;

/// Reads a JSON config; absent keys keep their `default_v1` values.
pub fn load_config(path: &Path) -> Result<EngineConfig, InputError> {
    let text = read_to_string_maybe_gz(path)?;
    let config: EngineConfig = serde_json::from_str(&text)?;
    config
        .validate()
        .map_err(|e| InputError::InvalidInput(e.to_string()))?;
    Ok(config)
}
