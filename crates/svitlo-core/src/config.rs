use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default User-Agent sent on every provider request. DTEK serves a bot
/// challenge to obviously non-browser agents, so this mirrors a real one.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("SVITLO_LOG_LEVEL", "info");
    let addresses_path = PathBuf::from(or_default(
        "SVITLO_ADDRESSES_PATH",
        "./config/addresses.yaml",
    ));
    let fetch_timeout_secs = parse_u64("SVITLO_FETCH_TIMEOUT_SECS", "40")?;
    let fetch_max_retries = parse_u32("SVITLO_FETCH_MAX_RETRIES", "2")?;
    let fetch_retry_delay_secs = parse_u64("SVITLO_FETCH_RETRY_DELAY_SECS", "1")?;
    let user_agent = or_default("SVITLO_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        log_level,
        addresses_path,
        fetch_timeout_secs,
        fetch_max_retries,
        fetch_retry_delay_secs,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.addresses_path,
            std::path::PathBuf::from("./config/addresses.yaml")
        );
        assert_eq!(cfg.fetch_timeout_secs, 40);
        assert_eq!(cfg.fetch_max_retries, 2);
        assert_eq!(cfg.fetch_retry_delay_secs, 1);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn overrides_are_honored() {
        let mut map = HashMap::new();
        map.insert("SVITLO_LOG_LEVEL", "debug");
        map.insert("SVITLO_FETCH_TIMEOUT_SECS", "15");
        map.insert("SVITLO_FETCH_MAX_RETRIES", "5");
        map.insert("SVITLO_FETCH_RETRY_DELAY_SECS", "3");
        map.insert("SVITLO_USER_AGENT", "svitlo-test/0.1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.fetch_timeout_secs, 15);
        assert_eq!(cfg.fetch_max_retries, 5);
        assert_eq!(cfg.fetch_retry_delay_secs, 3);
        assert_eq!(cfg.user_agent, "svitlo-test/0.1");
    }

    #[test]
    fn invalid_timeout_fails() {
        let mut map = HashMap::new();
        map.insert("SVITLO_FETCH_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SVITLO_FETCH_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SVITLO_FETCH_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn invalid_max_retries_fails() {
        let mut map = HashMap::new();
        map.insert("SVITLO_FETCH_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SVITLO_FETCH_MAX_RETRIES"),
            "expected InvalidEnvVar(SVITLO_FETCH_MAX_RETRIES), got: {result:?}"
        );
    }
}
