//! HTTP gateway and backend payload types for Voucherify

pub mod client;
pub mod types;

pub use client::{ApiGateway, ApiGatewayBuilder, ApiRequest, ClientError, SESSION_EXPIRED_MESSAGE};
