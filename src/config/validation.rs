use crate::config::types::CheckConfig;
use crate::ConfigError;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

/// Validates the entire configuration
///
/// Runs before any URL is processed; every failure here is fatal and maps
/// to the UNKNOWN exit code.
pub fn validate(config: &CheckConfig) -> Result<(), ConfigError> {
    validate_input_file(&config.input_file)?;
    validate_limits(config)?;
    Ok(())
}

/// Validates the input file: it must exist, be a readable regular file,
/// and be non-empty
fn validate_input_file(path: &Path) -> Result<(), ConfigError> {
    let display = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::MissingFile(display.clone()),
        ErrorKind::PermissionDenied => ConfigError::NotReadable(display.clone()),
        _ => ConfigError::Io(e),
    })?;

    if metadata.is_dir() {
        return Err(ConfigError::IsDirectory(display));
    }

    if metadata.len() == 0 {
        return Err(ConfigError::EmptyFile(display));
    }

    // Metadata alone does not prove read permission
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => ConfigError::NotReadable(display.clone()),
        _ => ConfigError::Io(e),
    })?;

    Ok(())
}

/// Validates numeric limits
fn validate_limits(config: &CheckConfig) -> Result<(), ConfigError> {
    if config.max_error_messages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_error_messages must be >= 1, got {}",
            config.max_error_messages
        )));
    }

    if config.max_concurrent_checks < 1 || config.max_concurrent_checks > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_checks must be between 1 and 100, got {}",
            config.max_concurrent_checks
        )));
    }

    if config.fetch_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "fetch_timeout must be non-zero".to_string(),
        ));
    }

    Ok(())
}
