use std::sync::Arc;
use std::time::Duration;

use lingo_core::session::Session;
use lingo_core::types::AppEvent;

use super::support::*;
use lingo_core::catalog::LanguageCatalog;

fn catalog() -> LanguageCatalog {
    LanguageCatalog::new(vec![
        lang("en", "English", &["fr"]),
        lang("fr", "French", &["en"]),
    ])
}

#[tokio::test]
async fn stale_response_never_clobbers_the_latest_output() {
    let translator = Arc::new(MockTranslator {
        delays: [("slow text".to_string(), Duration::from_millis(150))]
            .into_iter()
            .collect(),
        ..Default::default()
    });
    let mut harness = Harness::new(
        Session::new("en", "fr"),
        catalog(),
        Arc::new(MockDetector::default()),
        translator.clone(),
        Arc::new(MockSearch::default()),
        settings(5),
    );

    // R1 goes out and sits in the slow backend call
    harness.send(AppEvent::InputChanged("slow text".to_string())).await;
    harness.pump_for(Duration::from_millis(40)).await;

    // R2 supersedes it and completes quickly
    harness.send(AppEvent::InputChanged("fast".to_string())).await;
    let ui = harness
        .pump_until(|e| output_text(e).is_some_and(|t| !t.is_empty()))
        .await;
    assert_eq!(output_text(&ui), Some("[en->fr] fast"));

    // R1's response arrives afterwards and must be dropped silently
    let later = harness.pump_for(Duration::from_millis(250)).await;
    assert!(
        later.iter().all(|e| output_text(e).is_none()),
        "superseded response mutated the output: {later:?}"
    );
    assert_eq!(harness.controller.session().output_text, "[en->fr] fast");

    // both requests did reach the backend; supersession is response
    // filtering, not network-level cancellation
    let calls = translator.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn rapid_keystrokes_issue_one_authoritative_request() {
    let translator = Arc::new(MockTranslator::default());
    let mut harness = Harness::new(
        Session::new("en", "fr"),
        catalog(),
        Arc::new(MockDetector::default()),
        translator.clone(),
        Arc::new(MockSearch::default()),
        settings(10),
    );

    for text in ["a", "ab", "abc"] {
        harness.send(AppEvent::InputChanged(text.to_string())).await;
        harness.pump_for(Duration::from_millis(2)).await;
    }

    let ui = harness
        .pump_until(|e| output_text(e).is_some_and(|t| !t.is_empty()))
        .await;
    assert_eq!(output_text(&ui), Some("[en->fr] abc"));

    let later = harness.pump_for(Duration::from_millis(50)).await;
    assert!(later.iter().all(|e| output_text(e).is_none()));
    let calls = translator.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("abc".into(), "en".into(), "fr".into())]);
}
