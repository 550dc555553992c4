//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone the instants are expressed in. Falls back to the system
    /// zone, then UTC.
    pub timezone: Option<String>,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: defaults, `config.toml` in the platform config
    /// directory, the given file, then `DATE_RANGE_*` environment variables.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("DATE_RANGE_"));

        figment.extract()
    }

    /// The zone to use: `flag` if given, else the configured zone, else the
    /// system zone, else UTC.
    pub fn timezone(&self, flag: Option<&str>) -> anyhow::Result<Tz> {
        if let Some(name) = flag.or(self.timezone.as_deref()) {
            return name
                .parse::<Tz>()
                .map_err(|_| anyhow::anyhow!("invalid time zone '{name}'"));
        }
        Ok(system_timezone())
    }
}

/// The system zone, or UTC when it cannot be determined.
fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            tracing::debug!(zone = %name, "system zone unknown to tz database, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            tracing::debug!(error = %e, "cannot determine system zone, using UTC");
            Tz::UTC
        }
    }
}

/// Returns the platform-specific config directory for date-range.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("date-range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            timezone: Some("Asia/Tokyo".into()),
        };
        let tz = config.timezone(Some("Europe/Berlin")).unwrap();
        assert_eq!(tz, Tz::Europe__Berlin);
    }

    #[test]
    fn test_configured_zone_used_without_flag() {
        let config = Config {
            timezone: Some("Asia/Tokyo".into()),
        };
        assert_eq!(config.timezone(None).unwrap(), Tz::Asia__Tokyo);
    }

    #[test]
    fn test_invalid_zone_is_an_error() {
        let config = Config::default();
        let err = config.timezone(Some("Nowhere/Land")).unwrap_err();
        assert!(err.to_string().contains("Nowhere/Land"), "got: {err}");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"America/New_York\"\n").unwrap();
        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.timezone.as_deref(), Some("America/New_York"));
    }

    #[test]
    fn test_dirs_config_path_ends_with_crate_name() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "date-range");
        }
    }
}
