//! claimcheck: command-line runner for the claims billing validation engine.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
