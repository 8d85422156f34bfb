//! `[members]`: which class members a walk lists.

use objinspect_inspect::MemberFilter;
use serde::{Deserialize, Serialize};

const fn yes() -> bool {
    true
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MembersConfig {
    /// List members defined by ancestor classes.
    #[serde(default = "yes")]
    pub include_inherited: bool,

    /// List the constructor.
    #[serde(default = "yes")]
    pub init: bool,

    #[serde(default = "yes")]
    pub public: bool,

    /// `_name` members.
    #[serde(default)]
    pub protected: bool,

    /// `__name` members.
    #[serde(default)]
    pub private: bool,

    /// `__name__` members other than the constructor.
    #[serde(default)]
    pub dunders: bool,

    #[serde(default = "yes")]
    pub static_methods: bool,

    #[serde(default = "yes")]
    pub class_methods: bool,

    #[serde(default = "yes")]
    pub properties: bool,
}

impl Default for MembersConfig {
    fn default() -> Self {
        Self::from(&MemberFilter::default())
    }
}

impl From<&MemberFilter> for MembersConfig {
    fn from(filter: &MemberFilter) -> Self {
        Self {
            include_inherited: filter.include_inherited,
            init: filter.init,
            public: filter.public,
            protected: filter.protected,
            private: filter.private,
            dunders: filter.dunders,
            static_methods: filter.static_methods,
            class_methods: filter.class_methods,
            properties: filter.properties,
        }
    }
}

impl From<&MembersConfig> for MemberFilter {
    fn from(config: &MembersConfig) -> Self {
        Self {
            include_inherited: config.include_inherited,
            init: config.init,
            public: config.public,
            protected: config.protected,
            private: config.private,
            dunders: config.dunders,
            static_methods: config.static_methods,
            class_methods: config.class_methods,
            properties: config.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_member_filter() {
        let config = MembersConfig::default();
        assert!(config.include_inherited);
        assert!(!config.protected);
        assert_eq!(MemberFilter::from(&config), MemberFilter::default());
    }
}
