//! Transport context and credential resolution.
//!
//! Every invocation carries a [`TransportContext`]: the request headers the
//! transport saw, if any. Credential resolution is a pure function of that
//! context plus the process-wide fallback key, with a fixed precedence:
//!
//! 1. `Authorization: Bearer <key>` header (header name case-insensitive,
//!    `Bearer ` prefix case-sensitive)
//! 2. `x-api-key` header (name case-insensitive)
//! 3. The process-wide fallback key
//! 4. No credential
//!
//! A request-scoped credential always wins outright; there is never a
//! partial or merged credential.
//!
//! # Security Note
//!
//! Resolved keys live only for the duration of the invocation and are never
//! logged or embedded in error messages.

use std::collections::HashMap;

/// Header carrying a bearer credential.
const AUTHORIZATION_HEADER: &str = "authorization";

/// Prefix marking a bearer credential. The prefix match is case-sensitive.
const BEARER_PREFIX: &str = "Bearer ";

/// Dedicated API key header, as the upstream itself names it.
const API_KEY_HEADER: &str = "x-api-key";

/// Request-scoped transport metadata.
///
/// Header names are stored lowercased so lookups are case-insensitive, as
/// HTTP requires. The stdio transport has no headers and uses
/// [`TransportContext::empty`].
#[derive(Debug, Clone, Default)]
pub struct TransportContext {
    headers: HashMap<String, String>,
}

impl TransportContext {
    /// Creates a context with no transport metadata.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a context from header name/value pairs.
    ///
    /// Names are lowercased on insertion; for repeated headers the first
    /// value wins.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut headers = HashMap::new();
        for (name, value) in pairs {
            headers
                .entry(name.as_ref().to_ascii_lowercase())
                .or_insert_with(|| value.into());
        }
        Self { headers }
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Resolves the API key for one invocation.
///
/// First match wins; see the module docs for the precedence order. Pure
/// function of the context and the fallback — no side effects.
#[must_use]
pub fn resolve_api_key(context: &TransportContext, fallback: Option<&str>) -> Option<String> {
    if let Some(value) = context.header(AUTHORIZATION_HEADER) {
        if let Some(key) = value.strip_prefix(BEARER_PREFIX) {
            return Some(key.to_string());
        }
    }

    if let Some(value) = context.header(API_KEY_HEADER) {
        return Some(value.to_string());
    }

    fallback.map(String::from)
}
