//! Message-passing boundary between the UI and the engine

pub mod dispatch;
pub mod protocol;
pub mod stdio;

pub use dispatch::{EMPTY_SELECTION_MESSAGE, UiSink, handle_request};
pub use protocol::{UiEvent, UiRequest};
pub use stdio::run_stdio;

#[cfg(test)]
mod tests {
    use super::*;
    use copyguard_core::DecisionState;
    use copyguard_engine::{Engine, EngineOptions, Pacing};
    use copyguard_host::{DocumentFixture, MemoryDocument, UnitFixture};
    use copyguard_store::MemoryBackend;

    #[derive(Default)]
    struct VecSink {
        events: Vec<UiEvent>,
    }

    impl UiSink for VecSink {
        fn send(&mut self, event: UiEvent) -> anyhow::Result<()> {
            self.events.push(event);
            Ok(())
        }
    }

    fn fixture(selection: &[&str]) -> DocumentFixture {
        DocumentFixture {
            name: "test doc".to_string(),
            selection: selection.iter().map(|s| s.to_string()).collect(),
            units: vec![
                UnitFixture {
                    id: "1".to_string(),
                    content: "This is spam content".to_string(),
                    typefaces: Vec::new(),
                    opaque_runs: false,
                },
                UnitFixture {
                    id: "2".to_string(),
                    content: "Buy buy now".to_string(),
                    typefaces: Vec::new(),
                    opaque_runs: false,
                },
            ],
            ..Default::default()
        }
    }

    async fn test_engine(selection: &[&str]) -> Engine<MemoryDocument> {
        Engine::new(
            MemoryDocument::from_fixture(fixture(selection)),
            Box::new(MemoryBackend::new()),
            EngineOptions {
                namespaced: false,
                pacing: Pacing::none(),
                tracking: true,
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_requests_parse_from_wire_shapes() {
        let cases = [
            r#"{"type":"update-tracking","enabled":false}"#,
            r#"{"type":"scan-selection","forbiddenTerms":"spam, scam"}"#,
            r#"{"type":"scan-all","forbiddenTerms":"spam","tracking":true}"#,
            r#"{"type":"goto-unit","unitId":"1"}"#,
            r#"{"type":"clear-memory"}"#,
            r#"{"type":"skip-match","unitId":"1","term":"spam"}"#,
            r#"{"type":"mark-resolved","unitId":"1","term":"spam"}"#,
            r#"{"type":"replace-text","unitId":"1","oldTerm":"spam","newTerm":"ham"}"#,
        ];

        for raw in cases {
            serde_json::from_str::<UiRequest>(raw).unwrap_or_else(|e| panic!("{raw}: {e}"));
        }
    }

    #[test]
    fn test_events_serialize_to_wire_shapes() {
        let started = serde_json::to_value(UiEvent::ScanStarted).unwrap();
        assert_eq!(started["type"], "scan-started");

        let saved = serde_json::to_value(UiEvent::DecisionSaved {
            unit_id: "1".to_string(),
            term: "spam".to_string(),
            decision: DecisionState::Replaced,
            new_term: Some("ham".to_string()),
        })
        .unwrap();
        assert_eq!(saved["type"], "decision-saved");
        assert_eq!(saved["unitId"], "1");
        assert_eq!(saved["decision"], "replaced");
        assert_eq!(saved["newTerm"], "ham");

        let finished = serde_json::to_value(UiEvent::ScanFinished {
            matches: Vec::new(),
            message: None,
        })
        .unwrap();
        assert_eq!(finished["type"], "scan-finished");
        assert!(finished.get("message").is_none());
    }

    #[tokio::test]
    async fn test_scan_selection_with_empty_selection() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(r#"{"type":"scan-selection","forbiddenTerms":"spam"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        // No scan-started: the benign result goes straight out.
        assert_eq!(sink.events.len(), 1);
        match &sink.events[0] {
            UiEvent::ScanFinished { matches, message } => {
                assert!(matches.is_empty());
                assert_eq!(message.as_deref(), Some(EMPTY_SELECTION_MESSAGE));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scan_selection_reports_matches() {
        let mut engine = test_engine(&["1"]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(r#"{"type":"scan-selection","forbiddenTerms":"spam"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert!(matches!(sink.events[0], UiEvent::ScanStarted));
        match &sink.events[1] {
            UiEvent::ScanFinished { matches, message } => {
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].unit_id, "1");
                assert_eq!(matches[0].term, "spam");
                assert!(message.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scan_all_covers_every_unit() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request =
            serde_json::from_str(r#"{"type":"scan-all","forbiddenTerms":"spam, buy","tracking":false}"#)
                .unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert!(!engine.tracking());
        match &sink.events[1] {
            UiEvent::ScanFinished { matches, .. } => {
                let pairs: Vec<(&str, &str)> = matches
                    .iter()
                    .map(|m| (m.unit_id.as_str(), m.term.as_str()))
                    .collect();
                assert_eq!(pairs, vec![("1", "spam"), ("2", "buy")]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_tracking_is_silent() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(r#"{"type":"update-tracking","enabled":false}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert!(sink.events.is_empty());
        assert!(!engine.tracking());
    }

    #[tokio::test]
    async fn test_skip_match_saves_decision() {
        let mut engine = test_engine(&["1"]).await;
        let mut sink = VecSink::default();

        let request =
            serde_json::from_str(r#"{"type":"skip-match","unitId":"1","term":"spam"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        match &sink.events[0] {
            UiEvent::DecisionSaved {
                unit_id,
                term,
                decision,
                new_term,
            } => {
                assert_eq!(unit_id, "1");
                assert_eq!(term, "spam");
                assert_eq!(*decision, DecisionState::Skipped);
                assert!(new_term.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }

        // The skipped pair no longer surfaces.
        let mut sink = VecSink::default();
        let request = serde_json::from_str(r#"{"type":"scan-selection","forbiddenTerms":"spam"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();
        match &sink.events[1] {
            UiEvent::ScanFinished { matches, .. } => assert!(matches.is_empty()),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mark_resolved_saves_decision() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request =
            serde_json::from_str(r#"{"type":"mark-resolved","unitId":"1","term":"spam"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        match &sink.events[0] {
            UiEvent::DecisionSaved { decision, .. } => {
                assert_eq!(*decision, DecisionState::Resolved);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_replace_text_mutates_and_reports() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(
            r#"{"type":"replace-text","unitId":"2","oldTerm":"buy","newTerm":"purchase"}"#,
        )
        .unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert_eq!(
            engine.host().content_of("2").unwrap(),
            "purchase purchase now"
        );
        match &sink.events[0] {
            UiEvent::DecisionSaved {
                decision, new_term, ..
            } => {
                assert_eq!(*decision, DecisionState::Replaced);
                assert_eq!(new_term.as_deref(), Some("purchase"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_replace_text_unknown_unit_stays_silent() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(
            r#"{"type":"replace-text","unitId":"ghost","oldTerm":"buy","newTerm":"purchase"}"#,
        )
        .unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert!(sink.events.is_empty());
    }

    #[tokio::test]
    async fn test_clear_memory_resurfaces_matches() {
        let mut engine = test_engine(&["1"]).await;
        let mut sink = VecSink::default();

        let skip = serde_json::from_str(r#"{"type":"skip-match","unitId":"1","term":"spam"}"#).unwrap();
        handle_request(&mut engine, skip, &mut sink).await.unwrap();

        let clear = serde_json::from_str(r#"{"type":"clear-memory"}"#).unwrap();
        handle_request(&mut engine, clear, &mut sink).await.unwrap();
        assert!(matches!(sink.events.last(), Some(UiEvent::MemoryCleared)));

        let mut sink = VecSink::default();
        let rescan = serde_json::from_str(r#"{"type":"scan-selection","forbiddenTerms":"spam"}"#).unwrap();
        handle_request(&mut engine, rescan, &mut sink).await.unwrap();
        match &sink.events[1] {
            UiEvent::ScanFinished { matches, .. } => assert_eq!(matches.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_goto_unit_changes_focus_silently() {
        let mut engine = test_engine(&[]).await;
        let mut sink = VecSink::default();

        let request = serde_json::from_str(r#"{"type":"goto-unit","unitId":"2"}"#).unwrap();
        handle_request(&mut engine, request, &mut sink).await.unwrap();

        assert!(sink.events.is_empty());
        assert_eq!(engine.host().focused().unwrap(), "2");
    }
}
