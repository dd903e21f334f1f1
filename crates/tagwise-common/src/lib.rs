//! Common utilities for the tagwise markup tools.
//!
//! This crate provides shared infrastructure for the command-line host and
//! the tests that check what reaches the terminal:
//! - **Warning System** - deduplicated, colored terminal output for recovered
//!   parse problems

pub mod warning;
