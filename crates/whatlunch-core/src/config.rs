use crate::app_config::{AppConfig, Environment, SearchStrategy};
use crate::geo::Radius;
use crate::ConfigError;

/// Kakao caps search radius at 20 km.
const MAX_RADIUS_M: u32 = 20_000;
/// Kakao serves at most 45 pages per query.
const MAX_PAGES: u32 = 45;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32_in = |var: &str, default: &str, max: u32| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 || value > max {
            return Err(invalid(var, format!("must be between 1 and {max}, got {value}")));
        }
        Ok(value)
    };

    let kakao_rest_api_key = require("KAKAO_REST_API_KEY")?;

    let env = parse_environment(&or_default("WHATLUNCH_ENV", "development"))?;

    let bind_addr = or_default("WHATLUNCH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("WHATLUNCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("WHATLUNCH_LOG_LEVEL", "info");
    let kakao_base_url = or_default("WHATLUNCH_KAKAO_BASE_URL", "https://dapi.kakao.com");
    if env == Environment::Production && !kakao_base_url.starts_with("https://") {
        return Err(invalid(
            "WHATLUNCH_KAKAO_BASE_URL",
            format!("must be an https URL in production, got '{kakao_base_url}'"),
        ));
    }

    let request_timeout_secs = or_default("WHATLUNCH_REQUEST_TIMEOUT_SECS", "10")
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid("WHATLUNCH_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    let user_agent = or_default("WHATLUNCH_USER_AGENT", "whatlunch/0.1 (lunch-picker)");

    let search_radius = Radius::from_meters(parse_u32_in(
        "WHATLUNCH_SEARCH_RADIUS_M",
        "1000",
        MAX_RADIUS_M,
    )?);
    let search_strategy = or_default("WHATLUNCH_SEARCH_STRATEGY", "keyword")
        .parse::<SearchStrategy>()
        .map_err(|reason| invalid("WHATLUNCH_SEARCH_STRATEGY", reason))?;
    let max_pages = parse_u32_in("WHATLUNCH_MAX_PAGES", "1", MAX_PAGES)?;

    let rate_limit_per_minute = or_default("WHATLUNCH_RATE_LIMIT_PER_MINUTE", "120")
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid("WHATLUNCH_RATE_LIMIT_PER_MINUTE", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        kakao_rest_api_key,
        kakao_base_url,
        request_timeout_secs,
        user_agent,
        search_radius,
        search_strategy,
        max_pages,
        rate_limit_per_minute,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WHATLUNCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
