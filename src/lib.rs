//! dynamic-mockups-mcp: MCP server for the Dynamic Mockups rendering API
//!
//! This library exposes the Dynamic Mockups REST API as a set of schema-described
//! tools over the Model Context Protocol, so AI assistants can browse mockup
//! catalogs, queue renders, and manage PSD templates without speaking raw HTTP.
//!
//! # Architecture
//!
//! The server is a thin adapter. The upstream API does the actual rendering;
//! this crate handles:
//!
//! - **Credential resolution**: per-request `Authorization: Bearer` / `x-api-key`
//!   headers, falling back to a process-wide configured key
//! - **Request projection**: declarative per-tool field tables mapping tool
//!   arguments 1:1 onto upstream query/body payloads
//! - **Response normalisation**: every upstream outcome (2xx, 4xx, 5xx, timeout,
//!   network failure) becomes one uniform tool result shape
//! - **Transports**: a stdio loop for single-client use and an HTTP binding with
//!   per-session routing for multi-client use
//!
//! # Modules
//!
//! - [`api`] — Upstream HTTP client bound per-invocation to a credential
//! - [`auth`] — Transport context and credential resolution
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`mcp`] — MCP protocol implementation (stdio and HTTP bindings)
//! - [`tools`] — Tool catalog, router, and response normalisation
//! - [`usage`] — Fire-and-forget usage reporting

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod usage;
