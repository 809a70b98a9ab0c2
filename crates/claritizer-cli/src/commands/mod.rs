//! CLI command implementations.

pub mod common;
pub mod modes;
pub mod process;
pub mod tuning;
