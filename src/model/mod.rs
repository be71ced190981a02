pub mod config;
pub mod env;
pub mod paths;
pub mod platform;
pub mod shell;
