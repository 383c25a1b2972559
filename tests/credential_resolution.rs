//! Integration tests for credential resolution precedence.
//!
//! The contract: a request-scoped credential always overrides the
//! process-wide fallback, `Authorization: Bearer` beats `x-api-key`, and
//! resolution is a pure function of headers plus fallback.

use dynamic_mockups_mcp::auth::{resolve_api_key, TransportContext};

#[test]
fn test_bearer_beats_api_key_header_and_fallback() {
    let ctx = TransportContext::from_pairs([
        ("Authorization", "Bearer bearer-key"),
        ("x-api-key", "header-key"),
    ]);

    assert_eq!(
        resolve_api_key(&ctx, Some("fallback-key")),
        Some("bearer-key".to_string())
    );
}

#[test]
fn test_api_key_header_beats_fallback() {
    let ctx = TransportContext::from_pairs([("x-api-key", "header-key")]);

    assert_eq!(
        resolve_api_key(&ctx, Some("fallback-key")),
        Some("header-key".to_string())
    );
}

#[test]
fn test_fallback_used_when_no_headers() {
    let ctx = TransportContext::empty();

    assert_eq!(
        resolve_api_key(&ctx, Some("fallback-key")),
        Some("fallback-key".to_string())
    );
}

#[test]
fn test_no_credential_anywhere() {
    let ctx = TransportContext::empty();

    assert_eq!(resolve_api_key(&ctx, None), None);
}

#[test]
fn test_header_name_case_is_ignored() {
    for name in ["authorization", "Authorization", "AUTHORIZATION"] {
        let ctx = TransportContext::from_pairs([(name, "Bearer k")]);
        assert_eq!(resolve_api_key(&ctx, None), Some("k".to_string()));
    }

    for name in ["x-api-key", "X-Api-Key", "X-API-KEY"] {
        let ctx = TransportContext::from_pairs([(name, "k")]);
        assert_eq!(resolve_api_key(&ctx, None), Some("k".to_string()));
    }
}

#[test]
fn test_bearer_scheme_is_case_sensitive() {
    // A lowercase scheme is not a bearer credential; resolution moves on.
    let ctx = TransportContext::from_pairs([("Authorization", "bearer k")]);
    assert_eq!(
        resolve_api_key(&ctx, Some("fallback-key")),
        Some("fallback-key".to_string())
    );
}

#[test]
fn test_non_bearer_authorization_is_ignored() {
    let ctx = TransportContext::from_pairs([("Authorization", "Basic dXNlcjpwYXNz")]);
    assert_eq!(resolve_api_key(&ctx, None), None);
}

#[test]
fn test_bearer_value_is_taken_verbatim() {
    // Everything after the prefix is the key, whitespace included.
    let ctx = TransportContext::from_pairs([("Authorization", "Bearer  padded")]);
    assert_eq!(resolve_api_key(&ctx, None), Some(" padded".to_string()));
}

#[test]
fn test_resolution_is_pure() {
    let ctx = TransportContext::from_pairs([("x-api-key", "stable")]);
    let first = resolve_api_key(&ctx, Some("fallback"));
    let second = resolve_api_key(&ctx, Some("fallback"));
    assert_eq!(first, second);
}
