//! Testing utilities for code built on holocron.
//!
//! This module provides:
//! - A scripted, in-memory `PageTransport`
//! - Sample characters and pagination helpers
//! - Assertions over search state

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_names, assert_phase, assert_sorted_by_name};
pub use fixtures::{character, paginate, sample_cast};
pub use mocks::{page_locator, ScriptedTransport};
