use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a
/// `HashMap` without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("BUTTERBOOK_ENV", "development"))?;
    let log_level = or_default("BUTTERBOOK_LOG_LEVEL", "info");
    let base_origin = parse_base_origin(&or_default(
        "BUTTERBOOK_BASE_ORIGIN",
        "http://localhost:8000",
    ))?;
    let max_columns = parse_usize("BUTTERBOOK_MAX_COLUMNS", "3")?;

    Ok(AppConfig {
        env,
        log_level,
        base_origin,
        max_columns,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BUTTERBOOK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the origin as an absolute http(s) URL and strips any trailing
/// slash so paths can be appended directly.
fn parse_base_origin(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "BUTTERBOOK_BASE_ORIGIN".to_string(),
        reason,
    };

    let trimmed = raw.trim();
    let url = url::Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
