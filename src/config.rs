use anyhow::{Context, Result};
use std::{env, str::FromStr, time::Duration};

use crate::services::{poller::OverlapPolicy, reconcile::IdentityPolicy};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,

    // Spreadsheet feeds
    pub sheet_id: String,
    pub sheets_api_key: String,
    pub sheets_base_url: String,
    pub employees_range: String,
    pub attendance_range: String,

    // Polling
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub identity_policy: IdentityPolicy,
    pub overlap_policy: OverlapPolicy,

    pub backend_base_url: String,
    pub api_prefix: String,
    pub rate_dashboard_per_min: u32,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Self {
            server_addr: required("SERVER_ADDR")?,
            sheet_id: required("SHEET_ID")?,
            sheets_api_key: required("SHEETS_API_KEY")?,
            sheets_base_url: or_default("SHEETS_BASE_URL", "https://sheets.googleapis.com"),
            employees_range: or_default("EMPLOYEES_RANGE", "Employees!A2:D"),
            attendance_range: or_default("ATTENDANCE_RANGE", "Attendance!A2:D"),

            poll_interval: Duration::from_secs(parse(&lookup, "POLL_INTERVAL_SECS", "30")?),
            http_timeout: Duration::from_secs(parse(&lookup, "HTTP_TIMEOUT_SECS", "10")?),
            identity_policy: parse(&lookup, "IDENTITY_POLICY", "session")?,
            overlap_policy: parse(&lookup, "OVERLAP_POLICY", "allow")?,

            backend_base_url: or_default("BACKEND_BASE_URL", "http://localhost:8080/api"),
            api_prefix: or_default("API_PREFIX", "/api"),
            rate_dashboard_per_min: parse(&lookup, "RATE_DASHBOARD_PER_MIN", "600")?,
            log_dir: or_default("LOG_DIR", "logs"),
        };

        anyhow::ensure!(
            !config.poll_interval.is_zero(),
            "POLL_INTERVAL_SECS must be greater than zero"
        );
        Ok(config)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{key} has invalid value {raw:?}: {e}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("SERVER_ADDR", "127.0.0.1:8080"),
        ("SHEET_ID", "sheet-1"),
        ("SHEETS_API_KEY", "secret"),
    ];

    pub(crate) fn test_config() -> Config {
        Config::from_lookup(lookup_from(REQUIRED)).unwrap()
    }

    #[test]
    fn defaults_match_the_bundled_sheet_layout() {
        let config = test_config();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.employees_range, "Employees!A2:D");
        assert_eq!(config.attendance_range, "Attendance!A2:D");
        assert_eq!(config.identity_policy, IdentityPolicy::Session);
        assert_eq!(config.overlap_policy, OverlapPolicy::Allow);
        assert_eq!(config.backend_base_url, "http://localhost:8080/api");
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn missing_api_key_is_reported_by_name() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(err.to_string().contains("SHEETS_API_KEY"));
    }

    #[test]
    fn policies_and_interval_are_overridable() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("POLL_INTERVAL_SECS", "5"),
            ("IDENTITY_POLICY", "evict_absent"),
            ("OVERLAP_POLICY", "skip"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.identity_policy, IdentityPolicy::EvictAbsent);
        assert_eq!(config.overlap_policy, OverlapPolicy::Skip);
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("POLL_INTERVAL_SECS", "soon"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("POLL_INTERVAL_SECS"));
    }
}
