use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_label(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_label(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // Logging
    pub log_format: LogFormat,

    // Application metadata
    pub deployment: Deployment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // The station dataset lives next to the service checkout and is opened read-only
            database_url: "sqlite://../hydrology_data.db?mode=ro".to_string(),
            db_max_connections: 8,
            run_migrations: false,
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            disable_rate_limiting: false,
            rate_limit_per_second: 10,
            rate_limit_burst: 60,
            log_format: LogFormat::Text,
            deployment: Deployment::Local,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Unset or unparsable values fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `DATABASE_URL` is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `DATABASE_URL` is present but blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = match lookup("DATABASE_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Invalid("DATABASE_URL", url));
            }
            Some(url) => url.trim().to_string(),
            None => defaults.database_url,
        };

        Ok(Self {
            database_url,
            db_max_connections: parsed_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections),
            run_migrations: parsed_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations),

            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed_or(&lookup, "API_PORT", defaults.api_port),

            disable_rate_limiting: parsed_or(
                &lookup,
                "DISABLE_RATE_LIMITING",
                defaults.disable_rate_limiting,
            ),
            rate_limit_per_second: parsed_or(
                &lookup,
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            ),
            rate_limit_burst: parsed_or(&lookup, "RATE_LIMIT_BURST", defaults.rate_limit_burst),

            log_format: lookup("LOG_FORMAT")
                .map_or(defaults.log_format, |s| LogFormat::from_label(&s)),

            deployment: lookup("DEPLOYMENT")
                .map_or(defaults.deployment, |s| Deployment::from_label(&s)),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, "sqlite://../hydrology_data.db?mode=ro");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(!config.run_migrations);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.deployment, Deployment::Local);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://hydro@localhost/hydro"),
            ("API_PORT", "8080"),
            ("DISABLE_RATE_LIMITING", "true"),
            ("LOG_FORMAT", "JSON"),
            ("DEPLOYMENT", "production"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://hydro@localhost/hydro");
        assert_eq!(config.api_port, 8080);
        assert!(config.disable_rate_limiting);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.deployment, Deployment::Prod);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_PORT", "not-a-port"),
            ("RATE_LIMIT_BURST", "-1"),
        ]))
        .unwrap();
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.rate_limit_burst, 60);
    }

    #[test]
    fn blank_database_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DATABASE_URL", _)));
    }
}
