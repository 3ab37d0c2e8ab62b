// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::StoreError)
    clippy::module_name_repetitions
)]

//! # Linewise
//!
//! The text core of a terminal editor: a line store with pad-on-write
//! edits, plus cursors that walk it one code point or one soft-wrapped
//! segment at a time.
//!
//! ## Architecture
//!
//! - **Store**: an arena-backed doubly linked chain of lines, each ending in
//!   a terminator. Rows are derived by walking the chain.
//! - **Navigators**: detached cursors that borrow the store per call and
//!   reset themselves when its version stamp changes.
//! - **Viewport**: scrolling and cursor fitting in wrap segments, built on
//!   the wrap navigator.
//!
//! ```
//! use linewise::{LineStore, Position, WrapNavigator};
//!
//! let mut store = LineStore::new();
//! store.insert_text(Position::ORIGIN, "hello world");
//! let mut nav = WrapNavigator::new(&store, 6);
//! assert!(nav.seek(&store, Position::new(8, 0)));
//! assert_eq!(nav.text(), "world");
//! ```
//!
//! ## Modules
//!
//! - [`store`]: the line store and its edit, range and file operations
//! - [`nav`]: character and wrap navigators
//! - [`viewport`]: wrap-segment scrolling
//! - [`layout`]: tab stops and display columns
//! - [`config`]: flag-file defaults for the `linewise` binary
//! - [`perf`]: timing scopes and the debug event log

pub mod config;
pub mod error;
pub mod layout;
pub mod nav;
pub mod perf;
pub mod position;
pub mod store;
pub mod viewport;

pub use error::{Result, StoreError};
pub use layout::TabStops;
pub use nav::{CharNavigator, Segment, WrapNavigator};
pub use position::{ParsePositionError, Position};
pub use store::{Clip, LineId, LineStore, Stamp, TERMINATOR};
pub use viewport::Viewport;
