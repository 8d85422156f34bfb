use clap::Args;
use objinspect_inspect::MemberFilter;

/// Member selection flags. Each one overrides the `[members]` config value.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Args)]
pub struct MemberArgs {
    /// Leave out members defined by ancestor classes
    #[arg(long)]
    pub no_inherited: bool,

    /// Leave out the constructor
    #[arg(long)]
    pub no_init: bool,

    /// Include `_protected` members
    #[arg(long)]
    pub protected: bool,

    /// Include `__private` members
    #[arg(long)]
    pub private: bool,

    /// Include `__dunder__` members
    #[arg(long)]
    pub dunders: bool,

    /// Leave out static methods
    #[arg(long)]
    pub no_static: bool,

    /// Leave out class methods
    #[arg(long)]
    pub no_classmethods: bool,

    /// Leave out properties
    #[arg(long)]
    pub no_properties: bool,
}

impl MemberArgs {
    /// Layer the flags that were given over `filter`.
    #[must_use]
    pub const fn apply(&self, mut filter: MemberFilter) -> MemberFilter {
        if self.no_inherited {
            filter.include_inherited = false;
        }
        if self.no_init {
            filter.init = false;
        }
        if self.protected {
            filter.protected = true;
        }
        if self.private {
            filter.private = true;
        }
        if self.dunders {
            filter.dunders = true;
        }
        if self.no_static {
            filter.static_methods = false;
        }
        if self.no_classmethods {
            filter.class_methods = false;
        }
        if self.no_properties {
            filter.properties = false;
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_flags_keep_filter() {
        let filter = MemberFilter::all();
        assert_eq!(MemberArgs::default().apply(filter), filter);
    }

    #[test]
    fn flags_override_filter() {
        let args = MemberArgs {
            no_inherited: true,
            protected: true,
            no_properties: true,
            ..MemberArgs::default()
        };
        let filter = args.apply(MemberFilter::default());
        assert!(!filter.include_inherited);
        assert!(filter.protected);
        assert!(!filter.properties);
        assert!(filter.init);
    }
}
