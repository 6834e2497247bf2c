//! Soundfeed Tools
//!
//! Lookup and writing utilities for independent music releases: artist search
//! across platforms, artwork and ISRC/UPC lookup, streaming links, social
//! profile search and length-constrained song descriptions.

pub mod config;
pub mod description;
pub mod links;
pub mod llm;
pub mod search;
pub mod server;
pub mod services;
pub mod tools;
pub mod upstream;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, Credentials, FileConfig};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig, Services};
