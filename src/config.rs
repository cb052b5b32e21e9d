//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::questions::{FileSource, HttpSource, QuestionSource};

const DEFAULT_PORT: u16 = 8080;

/// Where category data files are read from
#[derive(Debug, Clone, PartialEq)]
pub enum DataLocation {
    Dir(PathBuf),
    Url(String),
}

impl DataLocation {
    pub fn build_source(&self) -> Box<dyn QuestionSource> {
        match self {
            DataLocation::Dir(dir) => Box::new(FileSource::new(dir.clone())),
            DataLocation::Url(url) => Box::new(HttpSource::new(url.clone())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub data: DataLocation,
    pub static_dir: PathBuf,
    /// Fixed RNG seed for reproducible games (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data: DataLocation::Dir(PathBuf::from("data")),
            static_dir: PathBuf::from("static"),
            seed: None,
        }
    }
}

/// Non-empty, trimmed value of an env var
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Parse an env var, warning and falling back on garbage
fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_value(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables
    ///
    /// QUIZBOARD_DATA_URL takes precedence over QUIZBOARD_DATA_DIR.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data = match env_value("QUIZBOARD_DATA_URL") {
            Some(url) => DataLocation::Url(url),
            None => env_value("QUIZBOARD_DATA_DIR")
                .map(|dir| DataLocation::Dir(PathBuf::from(dir)))
                .unwrap_or(defaults.data),
        };

        let config = Self {
            bind: env_parsed("QUIZBOARD_BIND").unwrap_or(defaults.bind),
            port: env_parsed("QUIZBOARD_PORT").unwrap_or(defaults.port),
            data,
            static_dir: env_value("QUIZBOARD_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            seed: env_parsed("QUIZBOARD_SEED"),
        };

        if let Some(seed) = config.seed {
            tracing::info!("Using fixed RNG seed {}", seed);
        }
        config
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "QUIZBOARD_BIND",
        "QUIZBOARD_PORT",
        "QUIZBOARD_DATA_DIR",
        "QUIZBOARD_DATA_URL",
        "QUIZBOARD_STATIC_DIR",
        "QUIZBOARD_SEED",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ServerConfig::from_env();

        assert_eq!(config.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data, DataLocation::Dir(PathBuf::from("data")));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.seed.is_none());
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_env();
        std::env::set_var("QUIZBOARD_BIND", "127.0.0.1");
        std::env::set_var("QUIZBOARD_PORT", "9000");
        std::env::set_var("QUIZBOARD_DATA_DIR", " /srv/quiz ");
        std::env::set_var("QUIZBOARD_SEED", "42");

        let config = ServerConfig::from_env();
        clear_env();

        assert_eq!(config.addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data, DataLocation::Dir(PathBuf::from("/srv/quiz")));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    #[serial]
    fn test_data_url_wins_over_dir() {
        clear_env();
        std::env::set_var("QUIZBOARD_DATA_DIR", "/srv/quiz");
        std::env::set_var("QUIZBOARD_DATA_URL", "https://example.org/quiz");

        let config = ServerConfig::from_env();
        clear_env();

        assert_eq!(
            config.data,
            DataLocation::Url("https://example.org/quiz".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        std::env::set_var("QUIZBOARD_PORT", "not-a-port");
        std::env::set_var("QUIZBOARD_SEED", "-1");

        let config = ServerConfig::from_env();
        clear_env();

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed.is_none());
    }
}
