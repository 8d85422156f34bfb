use objinspect_core::{MethodBinding, Visibility};

/// Which class members an inspection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MemberFilter {
    /// Walk ancestors in resolution order, not just the class body.
    pub include_inherited: bool,
    /// List the constructor (`__init__`), whatever its visibility.
    pub init: bool,
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    pub dunders: bool,
    pub static_methods: bool,
    pub class_methods: bool,
    pub properties: bool,
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self {
            include_inherited: true,
            init: true,
            public: true,
            protected: false,
            private: false,
            dunders: false,
            static_methods: true,
            class_methods: true,
            properties: true,
        }
    }
}

/// What a candidate member is, for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method(MethodBinding),
    Property,
}

pub(crate) const CONSTRUCTOR: &str = "__init__";

impl MemberFilter {
    /// Everything, inherited members included.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            include_inherited: true,
            init: true,
            public: true,
            protected: true,
            private: true,
            dunders: true,
            static_methods: true,
            class_methods: true,
            properties: true,
        }
    }

    #[must_use]
    pub const fn with_inherited(mut self, include_inherited: bool) -> Self {
        self.include_inherited = include_inherited;
        self
    }

    /// Whether a member named `name` of the given kind passes the filter.
    #[must_use]
    pub fn allows(&self, name: &str, kind: MemberKind) -> bool {
        let kind_allowed = match kind {
            MemberKind::Method(MethodBinding::Instance) => true,
            MemberKind::Method(MethodBinding::Class) => self.class_methods,
            MemberKind::Method(MethodBinding::Static) => self.static_methods,
            MemberKind::Property => self.properties,
        };
        if !kind_allowed {
            return false;
        }
        if name == CONSTRUCTOR {
            return self.init;
        }
        match Visibility::of(name) {
            Visibility::Public => self.public,
            Visibility::Protected => self.protected,
            Visibility::Private => self.private,
            Visibility::Dunder => self.dunders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const INSTANCE: MemberKind = MemberKind::Method(MethodBinding::Instance);

    #[rstest]
    #[case("run", true)]
    #[case("_helper", false)]
    #[case("__hidden", false)]
    #[case("__repr__", false)]
    #[case("__init__", true)]
    fn default_filter_by_name(#[case] name: &str, #[case] allowed: bool) {
        assert_eq!(MemberFilter::default().allows(name, INSTANCE), allowed);
    }

    #[test]
    fn init_flag_overrides_dunder_rule() {
        let filter = MemberFilter {
            init: false,
            dunders: true,
            ..MemberFilter::default()
        };
        assert!(!filter.allows("__init__", INSTANCE));
        assert!(filter.allows("__repr__", INSTANCE));
    }

    #[test]
    fn kind_flags() {
        let filter = MemberFilter {
            static_methods: false,
            properties: false,
            ..MemberFilter::default()
        };
        assert!(!filter.allows("make", MemberKind::Method(MethodBinding::Static)));
        assert!(!filter.allows("size", MemberKind::Property));
        assert!(filter.allows("build", MemberKind::Method(MethodBinding::Class)));
    }
}
