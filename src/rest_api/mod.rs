//! # Cafe REST API Module
//!
//! Request handling for the cafe directory: parameter coercion, store
//! calls, response envelopes and error rendering.

pub mod coercion;
pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use coercion::{str_to_bool, TRUTHY_TOKENS};
pub use errors::{ApiError, ApiResult, ErrorMode};
pub use handler::CafeHandler;
pub use response::{AckResponse, CafeListResponse, CafeResponse};
pub use server::CafeServer;
