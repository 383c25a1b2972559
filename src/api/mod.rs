//! Upstream API client.
//!
//! This module owns everything HTTP-facing about the Dynamic Mockups REST
//! API: per-invocation client construction, the fixed header set and
//! deadline, and the error taxonomy for calls that never produced a usable
//! response.

mod client;
mod error;

pub use client::{ApiClient, ApiResponse, HttpMethod, UpstreamRequest, REQUEST_TIMEOUT};
pub use error::{ApiError, ApiResult};
