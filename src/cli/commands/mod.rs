//! Command implementations.

pub mod completions;
pub mod config;
pub mod menu;
pub mod send;
