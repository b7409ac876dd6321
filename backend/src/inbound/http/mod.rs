//! HTTP inbound adapter: the HAL responder and the security meta endpoints.

pub mod error;
pub mod hal;
pub mod schemas;
pub mod security;
pub mod state;

pub use error::ApiResult;
pub use hal::{HAL_JSON, Hal};
