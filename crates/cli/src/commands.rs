/// Authentication commands for configuring GitHub access
pub mod auth;
/// Configuration management commands
pub mod config_cmd;
/// Growth forecast from the stored history
pub mod forecast;
/// Star tracking runs
pub mod track;
