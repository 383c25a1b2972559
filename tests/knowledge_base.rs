//! Integration tests for the local knowledge base tool.
//!
//! The knowledge base must answer without a credential and without any
//! network traffic, and identical calls must produce byte-identical
//! output.

mod common;

use serde_json::json;

use dynamic_mockups_mcp::auth::TransportContext;
use dynamic_mockups_mcp::tools::ToolRouter;
use dynamic_mockups_mcp::usage::UsageReporter;

use common::spawn_fake_upstream;

#[tokio::test]
async fn lookup_is_idempotent_and_offline() {
    let upstream = spawn_fake_upstream().await;
    let router = ToolRouter::new(
        upstream.base_url.clone(),
        None, // no credential anywhere: the tool must not need one
        UsageReporter::disabled(),
    );
    let ctx = TransportContext::empty();
    let args = json!({"topic": "smart_objects"});

    let first = router.dispatch("knowledge_base", &args, &ctx).await;
    let second = router.dispatch("knowledge_base", &args, &ctx).await;

    assert!(!first.is_error);
    assert_eq!(first.text_content(), second.text_content());
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn every_advertised_topic_resolves() {
    let router = ToolRouter::new(
        "http://127.0.0.1:9".to_string(),
        None,
        UsageReporter::disabled(),
    );
    let ctx = TransportContext::empty();

    for topic in [
        "getting_started",
        "authentication",
        "smart_objects",
        "render_options",
        "batch_rendering",
        "print_files",
        "psd_requirements",
        "troubleshooting",
    ] {
        let result = router
            .dispatch("knowledge_base", &json!({"topic": topic}), &ctx)
            .await;
        assert!(!result.is_error, "topic {topic} should resolve");
        assert!(result.text_content().contains(topic));
    }
}

#[tokio::test]
async fn unknown_topic_is_an_error_listing_topics() {
    let upstream = spawn_fake_upstream().await;
    let router = ToolRouter::new(
        upstream.base_url.clone(),
        None,
        UsageReporter::disabled(),
    );

    let result = router
        .dispatch(
            "knowledge_base",
            &json!({"topic": "quantum_rendering"}),
            &TransportContext::empty(),
        )
        .await;

    assert!(result.is_error);
    assert!(result.text_content().contains("Unknown topic"));
    assert!(result.text_content().contains("smart_objects"));
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn missing_topic_argument_is_an_error() {
    let router = ToolRouter::new(
        "http://127.0.0.1:9".to_string(),
        None,
        UsageReporter::disabled(),
    );

    let result = router
        .dispatch("knowledge_base", &json!({}), &TransportContext::empty())
        .await;

    assert!(result.is_error);
    assert!(result
        .text_content()
        .contains("Missing required parameter: topic"));
}
