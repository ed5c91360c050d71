// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MdbridgeError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MdbridgeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.tasks, raw.convert, raw.worker))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_markers(cfg)?;
    validate_convert(cfg)?;
    validate_worker(cfg)?;
    Ok(())
}

fn validate_markers(cfg: &RawConfigFile) -> Result<()> {
    let markers = [
        ("section_marker", &cfg.tasks.section_marker),
        ("id_header", &cfg.tasks.id_header),
        ("status_header", &cfg.tasks.status_header),
        ("id_prefix", &cfg.tasks.id_prefix),
    ];
    for (key, value) in markers {
        if value.trim().is_empty() {
            return Err(MdbridgeError::ConfigError(format!(
                "[tasks].{key} must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_convert(cfg: &RawConfigFile) -> Result<()> {
    if cfg.convert.max_batch_size == 0 {
        return Err(MdbridgeError::ConfigError(
            "[convert].max_batch_size must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_worker(cfg: &RawConfigFile) -> Result<()> {
    if cfg.worker.program.trim().is_empty() {
        return Err(MdbridgeError::ConfigError(
            "[worker].program must not be empty".to_string(),
        ));
    }
    if cfg.worker.timeout_secs == 0 {
        return Err(MdbridgeError::ConfigError(
            "[worker].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
