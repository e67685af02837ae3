// Logging utilities for the Indy SDK wrapper
//
// This module provides component-scoped structured logging:
// - Every record carries the component as its `log` target (`indy::<component>`)
// - Loggers can be narrowed to a native operation and a pending command handle
// - `LoggingConfig` installs an `env_logger` backend with per-component levels

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Arguments, Display, Formatter};

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Registry,
    Callback,
    Native,
    Anoncreds,
    Did,
    Crypto,
    Ledger,
    Pool,
    Wallet,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Registry => "Registry",
            Component::Callback => "Callback",
            Component::Native => "Native",
            Component::Anoncreds => "Anoncreds",
            Component::Did => "Did",
            Component::Crypto => "Crypto",
            Component::Ledger => "Ledger",
            Component::Pool => "Pool",
            Component::Wallet => "Wallet",
            Component::Custom(name) => *name,
        }
    }

    /// The `log` target records of this component are emitted under.
    ///
    /// Custom components get their own target below `indy::custom`.
    pub fn target(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            Component::Registry => "indy::registry",
            Component::Callback => "indy::callback",
            Component::Native => "indy::native",
            Component::Anoncreds => "indy::anoncreds",
            Component::Did => "indy::did",
            Component::Crypto => "indy::crypto",
            Component::Ledger => "indy::ledger",
            Component::Pool => "indy::pool",
            Component::Wallet => "indy::wallet",
            Component::Custom(name) => return Cow::Owned(format!("indy::custom::{name}")),
        })
    }
}

// Lightweight Display helper to avoid prefix String allocations
struct PrefixDisplay<'a> {
    component: Component,
    operation: Option<&'a str>,
    command: Option<i32>,
}

impl Display for PrefixDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component.as_str())?;
        if let Some(op) = self.operation {
            write!(f, "|op={op}")?;
        }
        if let Some(handle) = self.command {
            write!(f, "|cmd={handle}")?;
        }
        Ok(())
    }
}

/// A component-specific logger carrying optional operation context
#[derive(Debug, Clone)]
pub struct Logger {
    /// Component this logger is for
    component: Component,
    /// Native entry point being driven (if any)
    operation: Option<&'static str>,
    /// Pending command handle (if any)
    command: Option<i32>,
}

impl Logger {
    /// Create a new root logger for a specific component
    pub fn new_root(component: Component) -> Self {
        Self {
            component,
            operation: None,
            command: None,
        }
    }

    /// Create a child logger with the same context but a different component
    pub fn with_component(&self, component: Component) -> Self {
        Self {
            component,
            ..self.clone()
        }
    }

    /// Create a logger tagged with the native operation it traces
    pub fn with_operation(&self, operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            ..self.clone()
        }
    }

    /// Create a logger tagged with a pending command handle
    pub fn with_command(&self, handle: i32) -> Self {
        Self {
            command: Some(handle),
            ..self.clone()
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn operation(&self) -> Option<&str> {
        self.operation
    }

    pub fn command(&self) -> Option<i32> {
        self.command
    }

    fn prefix(&self) -> PrefixDisplay<'_> {
        PrefixDisplay {
            component: self.component,
            operation: self.operation,
            command: self.command,
        }
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Debug) {
            debug!(target: target, "[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log a debug message using fmt::Arguments (avoids allocating message String)
    pub fn debug_args(&self, args: Arguments) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Debug) {
            debug!(target: target, "[{}] {}", self.prefix(), args);
        }
    }

    /// Log an info message
    pub fn info(&self, message: impl Into<String>) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Info) {
            info!(target: target, "[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Warn) {
            warn!(target: target, "[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log a warning using fmt::Arguments
    pub fn warn_args(&self, args: Arguments) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Warn) {
            warn!(target: target, "[{}] {}", self.prefix(), args);
        }
    }

    /// Log an error message
    pub fn error(&self, message: impl Into<String>) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Error) {
            error!(target: target, "[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log an error using fmt::Arguments
    pub fn error_args(&self, args: Arguments) {
        let target = self.component.target();
        let target = &*target;
        if log::log_enabled!(target: target, log::Level::Error) {
            error!(target: target, "[{}] {}", self.prefix(), args);
        }
    }
}

/// Log levels understood by [`LoggingConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Serializable key naming a [`Component`] in a logging configuration.
///
/// Serialized as the component name, so it can key a JSON object. Names
/// other than the built-in components are custom components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ComponentKey {
    Registry,
    Callback,
    Native,
    Anoncreds,
    Did,
    Crypto,
    Ledger,
    Pool,
    Wallet,
    Custom(String),
}

impl ComponentKey {
    fn component(&self) -> Option<Component> {
        match self {
            ComponentKey::Registry => Some(Component::Registry),
            ComponentKey::Callback => Some(Component::Callback),
            ComponentKey::Native => Some(Component::Native),
            ComponentKey::Anoncreds => Some(Component::Anoncreds),
            ComponentKey::Did => Some(Component::Did),
            ComponentKey::Crypto => Some(Component::Crypto),
            ComponentKey::Ledger => Some(Component::Ledger),
            ComponentKey::Pool => Some(Component::Pool),
            ComponentKey::Wallet => Some(Component::Wallet),
            ComponentKey::Custom(_) => None,
        }
    }

    /// Component name as written in a configuration
    pub fn as_str(&self) -> &str {
        match (self, self.component()) {
            (ComponentKey::Custom(name), _) => name.as_str(),
            (_, Some(component)) => component.as_str(),
            (_, None) => "",
        }
    }

    fn target(&self) -> String {
        match self {
            ComponentKey::Custom(name) => format!("indy::custom::{name}"),
            _ => self.component().map(|c| c.target().into_owned()).unwrap_or_default(),
        }
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> Self {
        key.as_str().to_string()
    }
}

impl From<String> for ComponentKey {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Registry" => ComponentKey::Registry,
            "Callback" => ComponentKey::Callback,
            "Native" => ComponentKey::Native,
            "Anoncreds" => ComponentKey::Anoncreds,
            "Did" => ComponentKey::Did,
            "Crypto" => ComponentKey::Crypto,
            "Ledger" => ComponentKey::Ledger,
            "Pool" => ComponentKey::Pool,
            "Wallet" => ComponentKey::Wallet,
            _ => ComponentKey::Custom(name),
        }
    }
}

impl From<Component> for ComponentKey {
    fn from(component: Component) -> Self {
        match component {
            Component::Registry => ComponentKey::Registry,
            Component::Callback => ComponentKey::Callback,
            Component::Native => ComponentKey::Native,
            Component::Anoncreds => ComponentKey::Anoncreds,
            Component::Did => ComponentKey::Did,
            Component::Crypto => ComponentKey::Crypto,
            Component::Ledger => ComponentKey::Ledger,
            Component::Pool => ComponentKey::Pool,
            Component::Wallet => ComponentKey::Wallet,
            Component::Custom(name) => ComponentKey::Custom(name.to_string()),
        }
    }
}

/// Logging configuration applied once per process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default_level: LogLevel,
    pub component_levels: HashMap<ComponentKey, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingConfig {
    /// Warn-level default with no component overrides
    pub fn new() -> Self {
        Self {
            default_level: LogLevel::Warn,
            component_levels: HashMap::new(),
        }
    }

    pub fn default_info() -> Self {
        Self::new().with_default_level(LogLevel::Info)
    }

    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_component_level(mut self, component: impl Into<ComponentKey>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Level effective for a component
    pub fn level_for(&self, component: Component) -> LogLevel {
        self.component_levels
            .get(&ComponentKey::from(component))
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Install an `env_logger` backend for this configuration.
    ///
    /// Only the first call in a process installs a logger; later calls leave
    /// the existing backend in place.
    pub fn apply(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(self.default_level.to_level_filter());
        for (key, level) in &self.component_levels {
            builder.filter_module(&key.target(), level.to_level_filter());
        }
        let _ = builder.is_test(cfg!(test)).try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_targets_are_namespaced() {
        assert_eq!(Component::Pool.target(), "indy::pool");
        assert_eq!(Component::Callback.as_str(), "Callback");
        assert_eq!(Component::Custom("Bench").as_str(), "Bench");
    }

    #[test]
    fn test_logger_context_is_inherited() {
        let logger = Logger::new_root(Component::Anoncreds)
            .with_operation("indy_issuer_create_schema")
            .with_command(42);
        let child = logger.with_component(Component::Callback);

        assert_eq!(child.component(), Component::Callback);
        assert_eq!(child.operation(), Some("indy_issuer_create_schema"));
        assert_eq!(child.command(), Some(42));
        assert_eq!(
            logger.prefix().to_string(),
            "Anoncreds|op=indy_issuer_create_schema|cmd=42"
        );
    }

    #[test]
    fn test_component_level_overrides_default() {
        let config = LoggingConfig::new()
            .with_default_level(LogLevel::Warn)
            .with_component_level(Component::Registry, LogLevel::Trace);

        assert_eq!(config.level_for(Component::Registry), LogLevel::Trace);
        assert_eq!(config.level_for(Component::Wallet), LogLevel::Warn);
    }

    #[test]
    fn test_logging_config_serializes() {
        let config = LoggingConfig::default_info().with_component_level(Component::Ledger, LogLevel::Debug);
        let json = serde_json::to_string(&config).expect("serialize logging config");
        let back: LoggingConfig = serde_json::from_str(&json).expect("deserialize logging config");
        assert_eq!(back, config);
    }

    #[test]
    fn test_custom_component_levels_serialize_by_name() {
        let config = LoggingConfig::new()
            .with_component_level(Component::Custom("MockLibrary"), LogLevel::Debug)
            .with_component_level(Component::Custom("Bench"), LogLevel::Off)
            .with_component_level(Component::Wallet, LogLevel::Error);

        let json = serde_json::to_value(&config).expect("serialize logging config");
        assert_eq!(json["component_levels"]["MockLibrary"], "Debug");
        assert_eq!(json["component_levels"]["Bench"], "Off");
        assert_eq!(json["component_levels"]["Wallet"], "Error");

        let back: LoggingConfig = serde_json::from_value(json).expect("deserialize logging config");
        assert_eq!(back, config);
        assert_eq!(back.level_for(Component::Custom("MockLibrary")), LogLevel::Debug);
        assert_eq!(back.level_for(Component::Custom("Bench")), LogLevel::Off);
    }

    #[test]
    fn test_custom_components_have_distinct_targets() {
        assert_eq!(Component::Custom("MockLibrary").target(), "indy::custom::MockLibrary");
        assert_eq!(
            ComponentKey::from(Component::Custom("Bench")).target(),
            "indy::custom::Bench"
        );
        assert_eq!(ComponentKey::from("Ledger".to_string()), ComponentKey::Ledger);
    }
}
