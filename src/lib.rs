pub mod cli;
pub mod clipboard;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod stamp;
