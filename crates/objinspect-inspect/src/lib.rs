//! # objinspect-inspect
//!
//! Turns reflection objects into inspection models and renders them:
//! - Signature extraction (`Inspector::function`, `Inspector::signature`)
//!   merging declared parameters with parsed documentation
//! - Member walking over the method-resolution order (`Inspector::class`)
//!   under a [`MemberFilter`]
//! - `inspect()` dispatch over any [`Object`](objinspect_core::Object)
//! - Sectioned namespace listings and terminal formatting

mod dispatch;
mod filter;
pub mod format;
mod namespace;
mod signature;
mod walker;

pub use dispatch::inspect;
pub use filter::{MemberFilter, MemberKind};
pub use format::FormatOptions;
pub use namespace::{ClassEntry, Listing};
pub use signature::Inspector;
