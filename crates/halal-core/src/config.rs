use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_USER_AGENT: &str = "halal-finder/0.1 (places-search)";

/// Largest `maxwidth` the upstream photo endpoint accepts.
const MAX_PHOTO_WIDTH: u32 = 1600;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("HALAL_ENV", "development"))?;

    let bind_addr = or_default("HALAL_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("HALAL_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("HALAL_LOG_LEVEL", "info");

    // An empty key is as good as no key.
    let places_api_key = lookup("GOOGLE_PLACES_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let places_base_url = or_default("HALAL_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    if !(places_base_url.starts_with("http://") || places_base_url.starts_with("https://")) {
        return Err(invalid(
            "HALAL_PLACES_BASE_URL",
            format!("expected an http(s) URL, got \"{places_base_url}\""),
        ));
    }

    let places_request_timeout_secs = or_default("HALAL_PLACES_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("HALAL_PLACES_TIMEOUT_SECS", e.to_string()))?;
    if places_request_timeout_secs == 0 {
        return Err(invalid(
            "HALAL_PLACES_TIMEOUT_SECS",
            "must be at least 1 second".to_string(),
        ));
    }

    let places_user_agent = or_default("HALAL_PLACES_USER_AGENT", DEFAULT_USER_AGENT);

    let photo_max_width = or_default("HALAL_PHOTO_MAX_WIDTH", "400")
        .parse::<u32>()
        .map_err(|e| invalid("HALAL_PHOTO_MAX_WIDTH", e.to_string()))?;
    if !(1..=MAX_PHOTO_WIDTH).contains(&photo_max_width) {
        return Err(invalid(
            "HALAL_PHOTO_MAX_WIDTH",
            format!("must be between 1 and {MAX_PHOTO_WIDTH}"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        places_api_key,
        places_base_url,
        places_request_timeout_secs,
        places_user_agent,
        photo_max_width,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HALAL_ENV".to_string(),
            reason: format!("expected development, test, or production, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
