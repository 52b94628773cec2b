//! Utilities Module
//!
//! HTTP transport, JSON extraction and logging shared by the crate.

mod http;
mod json;
pub mod logging;

pub use http::*;
pub use json::*;
