//! Taskq client: command line, settings and the terminal front end.
pub mod cli;
pub mod config;
pub mod platform;
