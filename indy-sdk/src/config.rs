use indy_common::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper configuration applied by [`Indy::with_config`](crate::Indy::with_config)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndyConfig {
    /// Logging backend to install (None = leave process logging alone)
    #[serde(default)]
    pub logging_config: Option<LoggingConfig>,
}

impl IndyConfig {
    /// Configuration with Info-level logging
    pub fn new() -> Self {
        Self {
            logging_config: Some(LoggingConfig::default_info()),
        }
    }

    /// Replace the logging configuration
    pub fn with_logging_config(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// Do not install a logging backend
    pub fn without_logging(mut self) -> Self {
        self.logging_config = None;
        self
    }
}

impl fmt::Display for IndyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.logging_config {
            Some(logging) => write!(f, "IndyConfig: logging default:{:?}", logging.default_level),
            None => write!(f, "IndyConfig: logging disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indy_common::logging::{Component, LogLevel};

    #[test]
    fn test_builder_sets_logging() {
        let config = IndyConfig::new().with_logging_config(
            LoggingConfig::new().with_component_level(Component::Registry, LogLevel::Debug),
        );
        let logging = config.logging_config.as_ref().expect("logging configured");
        assert_eq!(logging.level_for(Component::Registry), LogLevel::Debug);
        assert_eq!(IndyConfig::new().without_logging().to_string(), "IndyConfig: logging disabled");
    }

    #[test]
    fn test_config_from_json() {
        let config: IndyConfig = serde_json::from_str(
            r#"{"logging_config":{"default_level":"Debug","component_levels":{"Wallet":"Off"}}}"#,
        )
        .expect("config should parse");
        let logging = config.logging_config.expect("logging configured");
        assert_eq!(logging.default_level, LogLevel::Debug);
        assert_eq!(logging.level_for(Component::Wallet), LogLevel::Off);

        let empty: IndyConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(empty, IndyConfig::default());
    }
}
