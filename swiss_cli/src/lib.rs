//! Command-line front end for the Swiss tournament store.
//!
//! - [`commands`]: command parsing, execution and output rendering
//! - [`config`]: configuration from flags and environment
//! - [`logging`]: tracing subscriber setup

pub mod commands;
pub mod config;
pub mod logging;
