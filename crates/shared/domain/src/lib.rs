//! # Domain Models
//!
//! Pure data shared by every `moitt` crate: the component/operation selectors,
//! the tool configuration tree and the fixed names the test environment relies on.
//! Keep it lean: no I/O, no process spawning, just types and defaults.

pub mod component;
pub mod config;
pub mod constants;
pub mod users;
