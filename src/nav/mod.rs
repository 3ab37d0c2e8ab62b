//! Cursors over a [`LineStore`](crate::store::LineStore).
//!
//! Both navigators are detached from the store: each call borrows it, and
//! a version [`Stamp`](crate::store::Stamp) recorded at reset detects edits
//! made in between. A stale navigator resets itself before doing anything
//! else, so cached line text or segments never outlive the content they
//! were computed from.
//!
//! - [`CharNavigator`]: one code point at a time.
//! - [`WrapNavigator`]: one soft-wrapped segment at a time.

mod chars;
mod wrap;

pub use chars::CharNavigator;
pub use wrap::{Segment, WrapNavigator};
