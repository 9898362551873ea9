//! cafedb - A small self-hostable directory service for cafés
//!
//! Stores cafe records and serves them over a JSON HTTP API: random pick,
//! full listing, location lookup, creation, price updates and key-gated
//! deletion.

pub mod cli;
pub mod http_server;
pub mod rest_api;
pub mod store;
