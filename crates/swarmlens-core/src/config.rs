//! Configuration loading and typed config structures for the swarmlens facade.
//!
//! The configuration lives in a YAML file (`swarmlens.yaml` by default).
//! Every field has a default, so an absent file or an empty document yields
//! a working setup: listen on `0.0.0.0:8888`, talk to the local Docker
//! socket at API version `1.39`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Docker Engine API version the facade pins when none is configured.
pub const DEFAULT_API_VERSION: &str = "1.39";

/// Docker host used when neither the config file nor `DOCKER_HOST` names one.
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The Docker API version is not of the form `<major>.<minor>`.
    #[error("invalid Docker API version {value:?}: expected <major>.<minor>")]
    InvalidApiVersion {
        /// The rejected value.
        value: String,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {message}")]
    InvalidEnv {
        /// The environment variable name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level facade configuration.
///
/// Mirrors the structure of `swarmlens.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FacadeConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Docker daemon connection settings.
    #[serde(default)]
    pub docker: DockerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FacadeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SWARMLENS_HOST` overrides `server.host`
    /// - `SWARMLENS_PORT` overrides `server.port`
    /// - `DOCKER_HOST` overrides `docker.host`
    /// - `DOCKER_API_VERSION` overrides `docker.api_version`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error if the resulting values are unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise start from
    /// defaults. Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Same as [`FacadeConfig::from_file`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override settings from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override settings from an arbitrary variable lookup.
    ///
    /// Empty values are ignored, matching how the Docker CLI treats an
    /// empty `DOCKER_HOST`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(val) = get("SWARMLENS_HOST") {
            self.server.host = val;
        }
        if let Some(val) = get("SWARMLENS_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::InvalidEnv {
                name: String::from("SWARMLENS_PORT"),
                message: format!("{e}"),
            })?;
        }
        if let Some(val) = get("DOCKER_HOST") {
            self.docker.host = Some(val);
        }
        if let Some(val) = get("DOCKER_API_VERSION") {
            self.docker.api_version = val;
        }
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.docker.api_version()?;
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_http_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

/// Docker daemon connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockerConfig {
    /// Daemon address: `unix:///path`, `tcp://host:port`, or
    /// `http://host:port`. Falls back to [`DEFAULT_DOCKER_HOST`].
    #[serde(default)]
    pub host: Option<String>,

    /// Pinned Engine API version, `<major>.<minor>`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout the Docker client enforces, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DockerConfig {
    /// The daemon address to connect to.
    pub fn resolved_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_DOCKER_HOST)
    }

    /// The parsed API version.
    pub fn api_version(&self) -> Result<ApiVersion, ConfigError> {
        self.api_version.parse()
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: None,
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// A Docker Engine API version such as `1.39`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    /// Major component.
    pub major: usize,
    /// Minor component.
    pub minor: usize,
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidApiVersion {
            value: s.to_owned(),
        };
        let trimmed = s.trim().trim_start_matches('v');
        let (major, minor) = trimmed.split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_e| invalid())?,
            minor: minor.parse().map_err(|_e| invalid())?,
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_http_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_http_port() -> u16 {
    8888
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

const fn default_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = FacadeConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.docker.api_version, "1.39");
        assert_eq!(config.docker.resolved_host(), DEFAULT_DOCKER_HOST);
        assert_eq!(config.docker.timeout_secs, 120);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9000

docker:
  host: "tcp://swarm-manager:2375"
  api_version: "1.41"
  timeout_secs: 30

logging:
  level: "debug"
  json: true
"#;

        let config = FacadeConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.docker.resolved_host(), "tcp://swarm-manager:2375");
        assert_eq!(config.docker.api_version, "1.41");
        assert_eq!(config.docker.timeout_secs, 30);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "server:\n  port: 7000\n";
        let config = FacadeConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.docker.api_version, "1.39");
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(FacadeConfig::parse("").is_ok());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        let result = FacadeConfig::parse("server:\n  port: not-a-port\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_replace_yaml_values() {
        let mut config = FacadeConfig::default();
        let result = config.apply_overrides(lookup(&[
            ("SWARMLENS_HOST", "127.0.0.1"),
            ("SWARMLENS_PORT", "9999"),
            ("DOCKER_HOST", "unix:///run/user/1000/docker.sock"),
            ("DOCKER_API_VERSION", "1.43"),
        ]));
        assert!(result.is_ok());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(
            config.docker.resolved_host(),
            "unix:///run/user/1000/docker.sock"
        );
        assert_eq!(config.docker.api_version, "1.43");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = FacadeConfig::default();
        let result = config.apply_overrides(lookup(&[("DOCKER_HOST", "")]));
        assert!(result.is_ok());
        assert_eq!(config.docker.host, None);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = FacadeConfig::default();
        let result = config.apply_overrides(lookup(&[("SWARMLENS_PORT", "eighty")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { ref name, .. }) if name == "SWARMLENS_PORT"
        ));
    }

    #[test]
    fn api_version_parses() {
        let version: Result<ApiVersion, _> = "1.39".parse();
        assert_eq!(version.ok(), Some(ApiVersion { major: 1, minor: 39 }));

        let prefixed: Result<ApiVersion, _> = "v1.41".parse();
        assert_eq!(prefixed.ok(), Some(ApiVersion { major: 1, minor: 41 }));
    }

    #[test]
    fn api_version_display_round_trips() {
        let version = ApiVersion { major: 1, minor: 39 };
        assert_eq!(version.to_string(), "1.39");
    }

    #[test]
    fn api_version_rejects_garbage() {
        for bad in ["", "1", "one.two", "1.", ".39"] {
            let parsed: Result<ApiVersion, _> = bad.parse();
            assert!(
                matches!(parsed, Err(ConfigError::InvalidApiVersion { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("does-not-exist.yaml");
        let mut expected = FacadeConfig::default();
        assert!(expected.apply_env_overrides().is_ok());

        let config = FacadeConfig::load(&path);
        assert!(config.is_ok());
        assert_eq!(config.ok(), Some(expected));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("swarmlens.yaml");
        if path.exists() {
            let config = FacadeConfig::parse(&std::fs::read_to_string(&path).unwrap_or_default());
            assert!(config.is_ok(), "Failed to parse project config: {config:?}");
            let config = config.ok().unwrap_or_default();
            assert_eq!(config.server.port, 8888);
            assert_eq!(config.docker.api_version, DEFAULT_API_VERSION);
        }
    }

    #[test]
    fn validate_catches_bad_api_version() {
        let mut config = FacadeConfig::default();
        config.docker.api_version = String::from("latest");
        assert!(config.validate().is_err());
    }
}
