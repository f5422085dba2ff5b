use crate::app_config::{AppConfig, Environment};
use crate::geo::RegionBounds;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://localhost:5174,http://localhost:3000";

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
/// Decoupled from the process environment so it can be tested with a plain
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

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MANDIR_ENV", "development"));

    let google_places_api_key = lookup("GOOGLE_PLACES_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if google_places_api_key.is_none() && env == Environment::Production {
        return Err(ConfigError::MissingEnvVar(
            "GOOGLE_PLACES_API_KEY".to_string(),
        ));
    }

    let bind_addr = parse_addr("MANDIR_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("MANDIR_LOG_LEVEL", "info");
    let places_base_url = or_default("MANDIR_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let places_timeout_secs = parse_u64("MANDIR_PLACES_TIMEOUT_SECS", "10")?;
    if places_timeout_secs == 0 {
        return Err(invalid(
            "MANDIR_PLACES_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let public_base_url = or_default("MANDIR_PUBLIC_BASE_URL", "http://localhost:3001")
        .trim_end_matches('/')
        .to_string();

    let allowed_origins = or_default("MANDIR_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let rate_limit_max_requests = parse_usize("MANDIR_RATE_LIMIT_MAX_REQUESTS", "100")?;
    let rate_limit_window_secs = parse_u64("MANDIR_RATE_LIMIT_WINDOW_SECS", "900")?;

    let parse_bound = |var: &str, default: &str, limit: f64| -> Result<f64, ConfigError> {
        let value = parse_f64(var, default)?;
        if value.is_finite() && (-limit..=limit).contains(&value) {
            Ok(value)
        } else {
            Err(invalid(var, format!("{value} is outside -{limit}..={limit}")))
        }
    };

    let min_lat = parse_bound("MANDIR_REGION_MIN_LAT", "6", 90.0)?;
    let max_lat = parse_bound("MANDIR_REGION_MAX_LAT", "37", 90.0)?;
    let min_lng = parse_bound("MANDIR_REGION_MIN_LNG", "67", 180.0)?;
    let max_lng = parse_bound("MANDIR_REGION_MAX_LNG", "98", 180.0)?;
    if min_lat > max_lat {
        return Err(invalid(
            "MANDIR_REGION_MIN_LAT",
            format!("{min_lat} is greater than MANDIR_REGION_MAX_LAT {max_lat}"),
        ));
    }
    if min_lng > max_lng {
        return Err(invalid(
            "MANDIR_REGION_MIN_LNG",
            format!("{min_lng} is greater than MANDIR_REGION_MAX_LNG {max_lng}"),
        ));
    }
    // Every bound is range-checked and ordered above.
    let region = RegionBounds::new(min_lat, max_lat, min_lng, max_lng)
        .map_err(|e| invalid("MANDIR_REGION_MIN_LAT", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_places_api_key,
        places_base_url,
        places_timeout_secs,
        public_base_url,
        allowed_origins,
        rate_limit_max_requests,
        rate_limit_window_secs,
        region,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
