//! HTTP gateway that renders chat messages for browser clients.

mod error;
pub mod protocol;
pub mod rate_limit;
mod server;

pub use error::ApiError;
pub use server::{AppState, router, run};
