pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod prompt;
pub mod pull;
pub mod store;
