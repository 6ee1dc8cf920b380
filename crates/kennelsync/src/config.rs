use std::env;
use std::path::PathBuf;

use crate::cached::CachePolicy;

const APP_NAME: &str = "kennelsync";
const DB_FILE: &str = "kennelsync.db";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Profile name, one database per profile (default: "default")
    pub profile: String,
    /// Path to the SQLite database file (default: per-profile data dir)
    pub db_path: PathBuf,
    /// Base URL of the boarding API (default: "http://localhost:3000")
    pub api_url: String,
    /// Bearer token sent with every API request
    pub api_token: Option<String>,
    /// Maximum pending background refreshes (default: 64)
    pub refresh_queue_size: usize,
    /// Which remote results are written to the local store (default: none)
    pub cache_policy: CachePolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KENNELSYNC_PROFILE` - Profile name (default: "default")
    /// - `KENNELSYNC_DB_PATH` - Database path (default: `<data_dir>/kennelsync/<profile>/kennelsync.db`)
    /// - `KENNELSYNC_API_URL` - API base URL (default: "http://localhost:3000")
    /// - `KENNELSYNC_API_TOKEN` - API bearer token (default: unset)
    /// - `KENNELSYNC_REFRESH_QUEUE_SIZE` - Refresh queue capacity (default: 64)
    /// - `KENNELSYNC_WRITE_BACK_COLD_READS` - Store cold read results (default: false)
    /// - `KENNELSYNC_PERSIST_REFRESH` - Store background refresh results (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let profile = lookup("KENNELSYNC_PROFILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "default".to_string());
        let db_path = lookup("KENNELSYNC_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_db_path(&profile));

        Self {
            db_path,
            api_url: lookup("KENNELSYNC_API_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            api_token: lookup("KENNELSYNC_API_TOKEN").filter(|v| !v.is_empty()),
            refresh_queue_size: lookup("KENNELSYNC_REFRESH_QUEUE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            cache_policy: CachePolicy {
                write_back_cold_reads: lookup("KENNELSYNC_WRITE_BACK_COLD_READS")
                    .is_some_and(|v| parse_flag(&v)),
                persist_background_refresh: lookup("KENNELSYNC_PERSIST_REFRESH")
                    .is_some_and(|v| parse_flag(&v)),
            },
            profile,
        }
    }

    /// Switches profile. The database path follows unless it was set explicitly.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        if self.db_path == default_db_path(&self.profile) {
            self.db_path = default_db_path(&profile);
        }
        self.profile = profile;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// `<data_dir>/kennelsync/<profile>/kennelsync.db`, relative to the working
/// directory when the platform has no data dir.
pub fn default_db_path(profile: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(profile)
        .join(DB_FILE)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.profile, "default");
        assert_eq!(config.db_path, default_db_path("default"));
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.api_token, None);
        assert_eq!(config.refresh_queue_size, 64);
        assert_eq!(config.cache_policy, CachePolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("KENNELSYNC_PROFILE", "staff"),
            ("KENNELSYNC_DB_PATH", "/tmp/k.db"),
            ("KENNELSYNC_API_URL", "https://api.example.com"),
            ("KENNELSYNC_API_TOKEN", "secret"),
            ("KENNELSYNC_REFRESH_QUEUE_SIZE", "8"),
            ("KENNELSYNC_WRITE_BACK_COLD_READS", "true"),
            ("KENNELSYNC_PERSIST_REFRESH", "1"),
        ]);

        assert_eq!(config.profile, "staff");
        assert_eq!(config.db_path, PathBuf::from("/tmp/k.db"));
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.refresh_queue_size, 8);
        assert!(config.cache_policy.write_back_cold_reads);
        assert!(config.cache_policy.persist_background_refresh);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[("KENNELSYNC_REFRESH_QUEUE_SIZE", "lots")]);

        assert_eq!(config.refresh_queue_size, 64);
    }

    #[test]
    fn test_profile_selects_db_path() {
        let config = config_from(&[("KENNELSYNC_PROFILE", "front-desk")]);

        assert!(config.db_path.ends_with("kennelsync/front-desk/kennelsync.db"));
    }

    #[test]
    fn test_with_profile_keeps_explicit_path() {
        let derived = config_from(&[]).with_profile("staff");
        assert_eq!(derived.db_path, default_db_path("staff"));

        let explicit = config_from(&[("KENNELSYNC_DB_PATH", "/tmp/k.db")]).with_profile("staff");
        assert_eq!(explicit.db_path, PathBuf::from("/tmp/k.db"));
        assert_eq!(explicit.profile, "staff");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
