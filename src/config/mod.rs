use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different deployment stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scorer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub reference: ReferenceConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("TACF_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let thresholds_path = match env::var("TACF_THRESHOLDS_PATH") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyThresholdsPath),
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeThresholdsPath),
        };

        let log_level = env::var("TACF_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            reference: ReferenceConfig { thresholds_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the threshold tables come from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceConfig {
    /// CSV file overriding the embedded tables.
    pub thresholds_path: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyThresholdsPath,
    NonUnicodeThresholdsPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyThresholdsPath => {
                write!(f, "TACF_THRESHOLDS_PATH is set but empty")
            }
            ConfigError::NonUnicodeThresholdsPath => {
                write!(f, "TACF_THRESHOLDS_PATH must be valid unicode")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("TACF_ENV");
        env::remove_var("TACF_THRESHOLDS_PATH");
        env::remove_var("TACF_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert!(config.reference.thresholds_path.is_none());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_thresholds_path_and_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TACF_ENV", "prod");
        env::set_var("TACF_THRESHOLDS_PATH", " /etc/tacf/thresholds.csv ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.reference.thresholds_path,
            Some(PathBuf::from("/etc/tacf/thresholds.csv"))
        );
        reset_env();
    }

    #[test]
    fn rejects_blank_thresholds_path() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("TACF_THRESHOLDS_PATH", "  ");
        let err = AppConfig::load().expect_err("blank path rejected");
        assert!(matches!(err, ConfigError::EmptyThresholdsPath));
        reset_env();
    }
}
