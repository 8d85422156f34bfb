pub(crate) mod google;
pub(crate) mod numpy;
pub(crate) mod sphinx;
