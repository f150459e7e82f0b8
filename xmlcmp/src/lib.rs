//! Terminal front end for `xml-compare-core`.
//!
//! The binary parses two documents, runs the comparison engine over them and
//! renders what it found. The parts useful beyond argument handling live
//! here:
//!
//! - [`profile`] — TOML profiles bundling engine options, an element
//!   selector and outcome rewrites
//! - [`report`] — colored terminal rendering of differences
//! - [`inspect`] — parsed-tree and node-count views of a single document

pub mod inspect;
pub mod profile;
pub mod report;
