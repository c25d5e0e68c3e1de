pub mod config;
pub mod context_cache;
pub mod error;
pub mod init;
pub mod network_server;
pub mod shared_catalog;
