//! # Cafe HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/random/`, `/all`, `/search` - Reads
//! - `/add`, `/update-price/:id`, `/report-closed/:id` - Mutations

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
