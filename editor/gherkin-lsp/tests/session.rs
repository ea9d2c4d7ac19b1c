//! Session behaviour through an in-memory publisher

use gherkin_lsp::engine::SOURCE;
use gherkin_lsp::{DiagnosticPublisher, Session};
use gherkin_lint::Settings;
use gherkin_model::{FeatureFile, FeatureParser, ParseError};
use gherkin_parser::GherkinParser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url};

#[derive(Clone, Default)]
struct RecordingPublisher {
    published: Arc<Mutex<Vec<(Url, Vec<Diagnostic>)>>>,
}

#[tower_lsp::async_trait]
impl DiagnosticPublisher for RecordingPublisher {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.published.lock().unwrap().push((uri, diagnostics));
    }
}

impl RecordingPublisher {
    fn count_for(&self, uri: &Url) -> usize {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| target == uri)
            .count()
    }

    /// Codes of the last diagnostics published for `uri`
    fn last_codes(&self, uri: &Url) -> Option<Vec<String>> {
        self.last(uri)
            .map(|diagnostics| diagnostics.iter().map(code).collect())
    }

    fn last(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(target, _)| target == uri)
            .map(|(_, diagnostics)| diagnostics.clone())
    }
}

fn code(diagnostic: &Diagnostic) -> String {
    match &diagnostic.code {
        Some(NumberOrString::String(code)) => code.clone(),
        other => panic!("unexpected code {:?}", other),
    }
}

fn url(name: &str) -> Url {
    Url::parse(&format!("file:///work/{}", name)).unwrap()
}

fn session() -> (Session<RecordingPublisher>, RecordingPublisher) {
    let publisher = RecordingPublisher::default();
    (Session::new(publisher.clone()), publisher)
}

const CLEAN: &str = "Feature: Shop\n  Scenario: Pay\n    Given a basket\n";

#[tokio::test]
async fn test_unnamed_blocks_published_as_errors() {
    let (session, publisher) = session();
    let uri = url("unnamed.feature");

    session
        .open(uri.clone(), "Feature:\n  Scenario:\n    Given x\n".to_string(), 1)
        .await;

    assert_eq!(publisher.count_for(&uri), 1);
    let diagnostics = publisher.last(&uri).unwrap();
    let codes: Vec<String> = diagnostics.iter().map(code).collect();
    assert_eq!(codes, vec!["feature-name-required", "scenario-name-required"]);
    for diagnostic in &diagnostics {
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.source.as_deref(), Some(SOURCE));
    }
}

#[tokio::test]
async fn test_clean_document_publishes_empty_list() {
    let (session, publisher) = session();
    let uri = url("clean.feature");

    session.open(uri.clone(), CLEAN.to_string(), 1).await;

    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
}

#[tokio::test]
async fn test_change_replaces_diagnostics() {
    let (session, publisher) = session();
    let uri = url("edit.feature");

    session
        .open(uri.clone(), "Feature:\n  Scenario: s\n    Given x\n".to_string(), 1)
        .await;
    assert_eq!(
        publisher.last_codes(&uri),
        Some(vec!["feature-name-required".to_string()])
    );

    session.change(uri.clone(), CLEAN.to_string(), 2).await;
    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
    assert_eq!(session.documents().version(&uri), Some(2));
}

#[tokio::test]
async fn test_close_clears_and_forgets() {
    let (session, publisher) = session();
    let uri = url("closing.feature");

    session
        .open(uri.clone(), "Feature:\n".to_string(), 1)
        .await;
    session.close(&uri).await;

    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
    assert!(!session.documents().is_open(&uri));
    assert!(!session.analyzer().contains(uri.as_str()));
}

#[tokio::test]
async fn test_cross_file_findings_reach_open_documents_only() {
    let (session, publisher) = session();
    let a = url("a.feature");
    let b = url("b.feature");
    let unopened = url("c.feature");

    // Known to the analyzer but never opened in the editor
    session
        .analyzer()
        .analyze(unopened.as_str(), "Feature: Shop\n  Scenario: Elsewhere\n    Given z\n");

    session.open(a.clone(), CLEAN.to_string(), 1).await;
    session
        .open(
            b.clone(),
            "Feature: Shop\n  Scenario: Refund\n    Given an order\n".to_string(),
            1,
        )
        .await;

    assert_eq!(
        publisher.last_codes(&a),
        Some(vec!["unique-feature-name".to_string()])
    );
    assert_eq!(
        publisher.last_codes(&b),
        Some(vec!["unique-feature-name".to_string()])
    );
    assert_eq!(publisher.count_for(&unopened), 0);

    let marker = &publisher.last(&b).unwrap()[0];
    assert_eq!(
        marker.range,
        Range::new(Position::new(0, 0), Position::new(1, 0))
    );
    assert!(marker.message.contains(a.as_str()));
    assert!(marker.message.contains(unopened.as_str()));
}

#[tokio::test]
async fn test_rename_clears_stale_cross_file_markers() {
    let (session, publisher) = session();
    let a = url("a.feature");
    let b = url("b.feature");

    session.open(a.clone(), CLEAN.to_string(), 1).await;
    session
        .open(b.clone(), "Feature: Shop\n  Scenario: Refund\n    Given x\n".to_string(), 1)
        .await;
    assert_eq!(
        publisher.last_codes(&a),
        Some(vec!["unique-feature-name".to_string()])
    );

    session
        .change(
            b.clone(),
            "Feature: Returns\n  Scenario: Refund\n    Given x\n".to_string(),
            2,
        )
        .await;

    assert_eq!(publisher.last_codes(&a), Some(vec![]));
    assert_eq!(publisher.last_codes(&b), Some(vec![]));
}

#[tokio::test]
async fn test_closing_duplicate_refreshes_the_other() {
    let (session, publisher) = session();
    let a = url("a.feature");
    let b = url("b.feature");

    session.open(a.clone(), CLEAN.to_string(), 1).await;
    session.open(b.clone(), CLEAN.to_string(), 1).await;
    assert_eq!(
        publisher.last_codes(&a),
        Some(vec![
            "unique-feature-name".to_string(),
            "unique-scenario-name".to_string()
        ])
    );

    session.close(&b).await;

    assert_eq!(publisher.last_codes(&a), Some(vec![]));
    assert_eq!(publisher.last_codes(&b), Some(vec![]));
}

#[tokio::test]
async fn test_reconfigure_republishes_open_documents() {
    let (session, publisher) = session();
    let uri = url("steps.feature");
    let text = "Feature: Steps\n  Scenario: Many\n    Given a\n    When b\n    Then c\n";

    session.open(uri.clone(), text.to_string(), 1).await;
    assert_eq!(publisher.last_codes(&uri), Some(vec![]));

    session
        .reconfigure(Settings::from_value(&json!({
            "gherkin": {"rules": {"max-steps": {"max": "2"}}}
        })))
        .await;

    assert_eq!(
        publisher.last_codes(&uri),
        Some(vec!["max-steps".to_string()])
    );
    assert!(session.analyzer().configuration().is_active("max-steps"));
}

#[tokio::test]
async fn test_disabled_rule_stops_reporting() {
    let (session, publisher) = session();
    let uri = url("unnamed.feature");

    session
        .reconfigure(Settings::from_value(&json!({
            "rules": {"feature-name-required": {"enabled": false}}
        })))
        .await;
    session
        .open(uri.clone(), "Feature:\n  Scenario: s\n    Given x\n".to_string(), 1)
        .await;

    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
}

#[tokio::test]
async fn test_editor_settings_override_workspace_per_rule() {
    let (session, publisher) = session();
    let uri = url("long.feature");

    session
        .configure(
            Settings::from_value(&json!({
                "rules": {
                    "line-length": {"enabled": true, "maxLength": "10"},
                    "missing-step-type": {"enabled": true}
                }
            })),
            Settings::from_value(&json!({
                "rules": {"line-length": {"enabled": false}}
            })),
        )
        .await;
    session
        .open(
            uri.clone(),
            "Feature: A rather long name\n  Scenario: s\n    And orphan\n".to_string(),
            1,
        )
        .await;

    assert_eq!(
        publisher.last_codes(&uri),
        Some(vec!["missing-step-type".to_string()])
    );
}

#[tokio::test]
async fn test_parse_failure_reported_at_document_start() {
    let parser: Arc<dyn FeatureParser> =
        Arc::new(|_uri: &str, _text: &str| -> Result<FeatureFile, ParseError> {
            Err(ParseError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk gone",
            )))
        });
    let publisher = RecordingPublisher::default();
    let session = Session::with_parser(publisher.clone(), parser);
    let uri = url("broken.feature");

    session.open(uri.clone(), CLEAN.to_string(), 1).await;

    let diagnostics = publisher.last(&uri).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(code(&diagnostics[0]), "parse-error");
    assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::ERROR));
    assert_eq!(
        diagnostics[0].range,
        Range::new(Position::new(0, 0), Position::new(1, 0))
    );
}

/// Parser that stops inside the first parse of a matching document until
/// the test releases it.
struct Gate {
    armed: AtomicBool,
    suffix: &'static str,
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

struct GateHandle {
    entered: mpsc::Receiver<()>,
    release: mpsc::Sender<()>,
}

impl GateHandle {
    /// Wait until a parse is held at the gate.
    async fn wait_entered(self) -> Self {
        tokio::task::spawn_blocking(move || {
            self.entered
                .recv_timeout(Duration::from_secs(10))
                .expect("parser never reached the gate");
            self
        })
        .await
        .unwrap()
    }

    fn open(&self) {
        self.release.send(()).unwrap();
    }
}

fn gated(suffix: &'static str) -> (Arc<Gate>, GateHandle) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let gate = Arc::new(Gate {
        armed: AtomicBool::new(false),
        suffix,
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    });
    (
        gate,
        GateHandle {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

fn gated_session(gate: &Arc<Gate>) -> (Arc<Session<RecordingPublisher>>, RecordingPublisher) {
    let gate = Arc::clone(gate);
    let parser: Arc<dyn FeatureParser> =
        Arc::new(move |uri: &str, text: &str| -> Result<FeatureFile, ParseError> {
            if uri.ends_with(gate.suffix) && gate.armed.swap(false, Ordering::SeqCst) {
                gate.entered.lock().unwrap().send(()).unwrap();
                gate.release
                    .lock()
                    .unwrap()
                    .recv_timeout(Duration::from_secs(10))
                    .unwrap();
            }
            GherkinParser::new().parse(uri, text)
        });
    let publisher = RecordingPublisher::default();
    let session = Arc::new(Session::with_parser(publisher.clone(), parser));
    (session, publisher)
}

async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_close_during_cross_file_reanalysis_forgets_tree() {
    let (gate, handle) = gated("a.feature");
    let (session, publisher) = gated_session(&gate);
    let a = url("a.feature");
    let b = url("b.feature");

    session.open(a.clone(), CLEAN.to_string(), 1).await;

    // Opening b finds the duplicate and re-analyzes a, which blocks
    gate.armed.store(true, Ordering::SeqCst);
    let opening = tokio::spawn({
        let session = Arc::clone(&session);
        let b = b.clone();
        async move { session.open(b, CLEAN.to_string(), 1).await }
    });
    let handle = handle.wait_entered().await;

    let closing = tokio::spawn({
        let session = Arc::clone(&session);
        let a = a.clone();
        async move { session.close(&a).await }
    });
    wait_until(|| !session.analyzer().contains(a.as_str())).await;

    handle.open();
    opening.await.unwrap();
    closing.await.unwrap();

    assert!(!session.documents().is_open(&a));
    assert!(!session.analyzer().contains(a.as_str()));
    assert_eq!(session.analyzer().stored_uris(), vec![b.as_str().to_string()]);
    assert_eq!(publisher.last_codes(&a), Some(vec![]));
    assert_eq!(publisher.last_codes(&b), Some(vec![]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_changes_publish_newest() {
    let (gate, handle) = gated("edit.feature");
    let (session, publisher) = gated_session(&gate);
    let uri = url("edit.feature");

    session.open(uri.clone(), CLEAN.to_string(), 1).await;

    gate.armed.store(true, Ordering::SeqCst);
    let slow = tokio::spawn({
        let session = Arc::clone(&session);
        let uri = uri.clone();
        async move {
            session
                .change(uri, "Feature:\n  Scenario: s\n    Given x\n".to_string(), 2)
                .await
        }
    });
    let handle = handle.wait_entered().await;

    // Starts later, finishes first
    session.change(uri.clone(), CLEAN.to_string(), 3).await;
    assert_eq!(publisher.last_codes(&uri), Some(vec![]));

    handle.open();
    slow.await.unwrap();

    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
    assert_eq!(session.documents().version(&uri), Some(3));
    assert_eq!(session.documents().text(&uri).as_deref(), Some(CLEAN));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_close_during_change_keeps_document_closed() {
    let (gate, handle) = gated("gone.feature");
    let (session, publisher) = gated_session(&gate);
    let uri = url("gone.feature");

    session.open(uri.clone(), CLEAN.to_string(), 1).await;

    gate.armed.store(true, Ordering::SeqCst);
    let editing = tokio::spawn({
        let session = Arc::clone(&session);
        let uri = uri.clone();
        async move { session.change(uri, "Feature:\n".to_string(), 2).await }
    });
    let handle = handle.wait_entered().await;

    session.close(&uri).await;
    handle.open();
    editing.await.unwrap();

    assert!(!session.documents().is_open(&uri));
    assert!(!session.analyzer().contains(uri.as_str()));
    assert_eq!(publisher.last_codes(&uri), Some(vec![]));
}
