//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GranthaConfig;
use crate::domain::errors::GranthaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GranthaConfig
/// 4. Applies environment variable overrides (GRANTHA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use grantha_export::config::loader::load_config;
///
/// let config = load_config("grantha.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GranthaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GranthaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GranthaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying the same steps as [`load_config`]
///
/// # Errors
///
/// Returns a configuration error on substitution, parse or validation failure.
pub fn parse_config(contents: &str) -> Result<GranthaConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GranthaConfig = toml::from_str(&contents)
        .map_err(|e| GranthaError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GranthaError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GranthaError::Internal(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GranthaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using GRANTHA_* prefix
///
/// Environment variables follow the pattern: GRANTHA_<SECTION>_<KEY>
/// For example: GRANTHA_OUTPUT_DIRECTORY, GRANTHA_EXPORT_DEFAULT_OWNER
fn apply_env_overrides(config: &mut GranthaConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GRANTHA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("GRANTHA_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("GRANTHA_APPLICATION_DRY_RUN", &val)?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("GRANTHA_OUTPUT_DIRECTORY") {
        config.output.directory = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("GRANTHA_OUTPUT_WRITE_TIMEOUT_SECS") {
        config.output.write_timeout_secs = val.parse().map_err(|_| {
            GranthaError::Configuration(format!(
                "GRANTHA_OUTPUT_WRITE_TIMEOUT_SECS must be a whole number, got '{val}'"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("GRANTHA_OUTPUT_SERIALIZE_PER_OWNER") {
        config.output.serialize_per_owner =
            parse_bool("GRANTHA_OUTPUT_SERIALIZE_PER_OWNER", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("GRANTHA_EXPORT_REJECT_DUPLICATE_IDS") {
        config.export.reject_duplicate_ids =
            parse_bool("GRANTHA_EXPORT_REJECT_DUPLICATE_IDS", &val)?;
    }
    if let Ok(val) = std::env::var("GRANTHA_EXPORT_DEFAULT_OWNER") {
        config.export.default_owner = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GRANTHA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("GRANTHA_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("GRANTHA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GRANTHA_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(GranthaError::Configuration(format!(
            "{name} must be true or false, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GRANTHA_TEST_SUB_DIR", "/srv/csv");
        let input = "directory = \"${GRANTHA_TEST_SUB_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "directory = \"/srv/csv\"\n");
        std::env::remove_var("GRANTHA_TEST_SUB_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GRANTHA_TEST_MISSING_VAR");
        let input = "directory = \"${GRANTHA_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("GRANTHA_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("GRANTHA_TEST_COMMENTED");
        let input = "# directory = \"${GRANTHA_TEST_COMMENTED}\"\n[output]";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${GRANTHA_TEST_COMMENTED}"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", " YES ").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("nonexistent-grantha.toml").unwrap_err();
        assert!(matches!(err, GranthaError::Configuration(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[output]
directory = "/tmp/grantha-csv"
write_timeout_secs = 5

[export]
default_owner = "u42"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.output.write_timeout_secs, 5);
        assert_eq!(config.export.default_owner, "u42");
    }

    #[test]
    fn test_parse_config_rejects_invalid() {
        let err = parse_config("[output]\nwrite_timeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("write_timeout_secs"));
    }
}
