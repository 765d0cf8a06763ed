//! Voucherify browser front-end

pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod pages;
pub mod toast;

pub use app::{App, Route};
