//! # objinspect-config
//!
//! Layered configuration loading for objinspect using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OBJINSPECT_*` prefix, `__` as separator)
//! 2. Project-level `.objinspect/config.toml`
//! 3. User-level `~/.config/objinspect/config.toml`
//! 4. Built-in defaults
//!
//! `OBJINSPECT_DISPLAY__MAX_WIDTH=100` sets `display.max_width`, and
//! `OBJINSPECT_MEMBERS__PROTECTED=true` sets `members.protected`.
//!
//! # Usage
//!
//! ```no_run
//! use objinspect_config::ObjinspectConfig;
//!
//! let config = ObjinspectConfig::load().expect("config");
//! let filter = config.member_filter();
//! let options = config.display.format_options(false);
//! ```

mod display;
mod error;
mod members;

pub use display::{ColorChoice, DisplayConfig, MIN_WIDTH};
pub use error::ConfigError;
pub use members::MembersConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use objinspect_inspect::MemberFilter;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "OBJINSPECT_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjinspectConfig {
    #[serde(default)]
    pub members: MembersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ObjinspectConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// # Errors
    /// `Figment` when a source is malformed, `InvalidValue` when a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from a caller-built provider chain.
    ///
    /// # Errors
    /// See [`ObjinspectConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.display.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".objinspect/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Member filter described by `[members]`.
    #[must_use]
    pub fn member_filter(&self) -> MemberFilter {
        MemberFilter::from(&self.members)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("objinspect").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = ObjinspectConfig::default();
        assert!(config.members.include_inherited);
        assert!(!config.members.dunders);
        assert_eq!(config.display.indent, 2);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: ObjinspectConfig = ObjinspectConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert!(config.members.public);
        assert_eq!(config.display.color, ColorChoice::Auto);
    }
}
