//! Dashboard configuration.
//!
//! # Responsibility
//! - Hold tunables shared by the service and front-ends.
//! - Apply `PROCDASH_*` environment overrides on top of defaults.
//!
//! # Invariants
//! - A validated config has `sla_max_days >= 1`.
//! - A validated link template contains the `{number}` placeholder.

use crate::filter::criteria::SearchScope;
use crate::logging::{default_log_level, normalize_level};
use crate::model::marker::{MARKER_ADMIN_MANAGEMENT, MARKER_AWAITING_RESPONSE};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Placeholder replaced by the process number in link templates.
pub const NUMBER_PLACEHOLDER: &str = "{number}";
/// Deep link into the external process viewer.
pub const DEFAULT_LINK_TEMPLATE: &str =
    "https://sei.sistem.gov.br/sei/controlador.php?acao=processo_visualizar&id_procedimento={number}";
pub const DEFAULT_SLA_MAX_DAYS: u32 = 120;

pub const ENV_SLA_MAX_DAYS: &str = "PROCDASH_SLA_MAX_DAYS";
pub const ENV_LINK_TEMPLATE: &str = "PROCDASH_LINK_TEMPLATE";
pub const ENV_SEARCH_SCOPE: &str = "PROCDASH_SEARCH_SCOPE";
pub const ENV_LOG_LEVEL: &str = "PROCDASH_LOG_LEVEL";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSlaMaxDays(String),
    MissingLinkPlaceholder(String),
    UnknownSearchScope(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSlaMaxDays(value) => {
                write!(f, "SLA max days must be a positive integer, got `{value}`")
            }
            Self::MissingLinkPlaceholder(value) => {
                write!(f, "link template `{value}` has no `{NUMBER_PLACEHOLDER}` placeholder")
            }
            Self::UnknownSearchScope(value) => {
                write!(f, "unknown search scope `{value}`; expected number|text")
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Tunables for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub sla_max_days: u32,
    pub link_template: String,
    /// Markers with a dedicated summary counter, in display order.
    pub highlighted_markers: Vec<String>,
    pub search_scope: SearchScope,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sla_max_days: DEFAULT_SLA_MAX_DAYS,
            link_template: DEFAULT_LINK_TEMPLATE.to_string(),
            highlighted_markers: vec![
                MARKER_ADMIN_MANAGEMENT.to_string(),
                MARKER_AWAITING_RESPONSE.to_string(),
            ],
            search_scope: SearchScope::default(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup(key)` values; blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(raw) = value(ENV_SLA_MAX_DAYS) {
            config.sla_max_days = parse_sla_max_days(&raw)?;
        }
        if let Some(raw) = value(ENV_LINK_TEMPLATE) {
            config.link_template = raw.trim().to_string();
        }
        if let Some(raw) = value(ENV_SEARCH_SCOPE) {
            config.search_scope =
                SearchScope::parse(&raw).ok_or(ConfigError::UnknownSearchScope(raw))?;
        }
        if let Some(raw) = value(ENV_LOG_LEVEL) {
            config.log_level = raw;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants and normalizes the log level in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.sla_max_days == 0 {
            return Err(ConfigError::InvalidSlaMaxDays("0".to_string()));
        }
        if !self.link_template.contains(NUMBER_PLACEHOLDER) {
            return Err(ConfigError::MissingLinkPlaceholder(
                self.link_template.clone(),
            ));
        }
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::InvalidLogLevel)?
            .to_string();
        Ok(())
    }
}

/// Parses a positive day count.
pub fn parse_sla_max_days(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(ConfigError::InvalidSlaMaxDays(raw.trim().to_string())),
    }
}
