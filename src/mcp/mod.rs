//! Model Context Protocol (MCP) server implementation.
//!
//! This module implements the MCP specification for exposing mockup
//! rendering operations as tools to AI assistants. Two transports deliver
//! invocations into the shared tool router:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          MCP Server                          │
//! │                                                              │
//! │   ┌─────────────┐                                            │
//! │   │   stdio     │──┐                                         │
//! │   │ (one client)│  │   ┌─────────────┐    ┌─────────────┐    │
//! │   └─────────────┘  ├──▶│   Handler   │───▶│ Tool Router │    │
//! │   ┌─────────────┐  │   │ (lifecycle) │    │ (dispatch)  │    │
//! │   │  HTTP/SSE   │──┘   └─────────────┘    └─────────────┘    │
//! │   │(per session)│                                            │
//! │   └─────────────┘                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod http;
pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::{McpHandler, StdioServer};
pub use transport::StdioTransport;
