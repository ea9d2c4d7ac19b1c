//! Document session
//!
//! Keeps the open documents, drives the analyzer on every open, change,
//! close and reconfiguration, and publishes diagnostics for open documents
//! only. Per-file findings of a document are merged with the cross-file
//! findings addressed to it.
//!
//! Publishes are ordered per URI: every analysis draws a ticket when it
//! starts, and a publish whose ticket is older than the last one published
//! for that URI is dropped. Per-file analyses run concurrently; cross-file
//! passes run one at a time so each sees the targets of the previous one.

use super::convert::{cross_file_to_lsp_diagnostic, to_lsp_diagnostics};
use super::document::DocumentManager;
use dashmap::DashMap;
use gherkin_lint::{Analyzer, Configuration, CrossFileFindings, Settings, PARSE_ERROR_RULE};
use gherkin_model::FeatureParser;
use gherkin_parser::GherkinParser;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tower_lsp::lsp_types::{Diagnostic, Url};
use tower_lsp::Client;

/// Where diagnostics go
#[tower_lsp::async_trait]
pub trait DiagnosticPublisher: Send + Sync {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>);
}

#[tower_lsp::async_trait]
impl DiagnosticPublisher for Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.publish_diagnostics(uri, diagnostics, None).await;
    }
}

/// Settings layers: workspace file first, editor on top
#[derive(Debug, Default)]
struct SettingsLayers {
    workspace: Settings,
    editor: Settings,
}

impl SettingsLayers {
    fn merged(&self) -> Settings {
        self.workspace.clone().overridden_by(&self.editor)
    }
}

pub struct Session<P> {
    publisher: P,
    documents: DocumentManager,
    analyzer: Analyzer,
    settings: RwLock<SettingsLayers>,
    tickets: AtomicU64,
    /// Ticket of the last publish per URI. Entries outlive `close` so a
    /// late analysis of a closed document still meets the close's ticket;
    /// one `u64` per URI ever seen.
    published: DashMap<Url, Arc<tokio::sync::Mutex<u64>>>,
    /// URIs that received cross-file findings in the last pass; held for
    /// the whole pass
    cross_file_targets: tokio::sync::Mutex<HashSet<String>>,
}

impl<P: DiagnosticPublisher> Session<P> {
    pub fn new(publisher: P) -> Self {
        Self::with_parser(publisher, Arc::new(GherkinParser::new()))
    }

    pub fn with_parser(publisher: P, parser: Arc<dyn FeatureParser>) -> Self {
        Self {
            publisher,
            documents: DocumentManager::new(),
            analyzer: Analyzer::new(parser),
            settings: RwLock::new(SettingsLayers::default()),
            tickets: AtomicU64::new(0),
            published: DashMap::new(),
            cross_file_targets: tokio::sync::Mutex::new(HashSet::new()),
        }
    }

    pub fn documents(&self) -> &DocumentManager {
        &self.documents
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub async fn open(&self, uri: Url, text: String, version: i32) {
        tracing::debug!("Document opened: {}", uri);
        let text: Arc<str> = text.into();
        self.documents.open(uri.clone(), Arc::clone(&text), version);
        self.refresh(&uri, &text).await;
    }

    pub async fn change(&self, uri: Url, text: String, version: i32) {
        tracing::debug!("Document changed: {}", uri);
        let text: Arc<str> = text.into();
        self.documents.update(&uri, Arc::clone(&text), version);
        self.refresh(&uri, &text).await;
    }

    /// Forget the document and clear its diagnostics.
    pub async fn close(&self, uri: &Url) {
        tracing::debug!("Document closed: {}", uri);
        let ticket = self.next_ticket();
        self.documents.close(uri);
        self.analyzer.remove(uri.as_str());
        self.publish(uri, ticket, Vec::new()).await;

        // Documents that shared a name with this one lose their finding
        self.cross_file_pass(None).await;
    }

    /// Apply editor settings and re-analyze every open document.
    pub async fn reconfigure(&self, editor: Settings) {
        self.write_settings(|layers| layers.editor = editor);
        self.rebuild().await;
    }

    /// Apply both layers at once and re-analyze every open document.
    pub async fn configure(&self, workspace: Settings, editor: Settings) {
        self.write_settings(|layers| *layers = SettingsLayers { workspace, editor });
        self.rebuild().await;
    }

    fn write_settings(&self, update: impl FnOnce(&mut SettingsLayers)) {
        let mut layers = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut layers);
    }

    async fn rebuild(&self) {
        let merged = self
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .merged();
        self.analyzer
            .reconfigure(Configuration::from_settings(Some(&merged)));

        let uris = self.documents.uris();
        tracing::info!(documents = uris.len(), "configuration changed, re-analyzing");
        for uri in uris {
            if let Some(text) = self.documents.text(&uri) {
                self.refresh(&uri, &text).await;
            }
        }
    }

    /// Analyze one document, publish it, then publish cross-file results.
    async fn refresh(&self, uri: &Url, text: &str) {
        let ticket = self.next_ticket();
        let issues = self.analyzer.analyze(uri.as_str(), text);
        let diagnostics = to_lsp_diagnostics(&issues);

        if !self.documents.is_open(uri) {
            // Closed while analyzing
            self.analyzer.remove(uri.as_str());
            return;
        }
        self.publish(uri, ticket, diagnostics.clone()).await;

        // A parse failure ends the cycle; stored trees are unchanged
        if issues.iter().any(|issue| issue.rule_key == PARSE_ERROR_RULE) {
            return;
        }

        self.cross_file_pass(Some((uri, diagnostics, ticket))).await;
    }

    /// Run the cross-file checks and publish merged diagnostics for every
    /// open document that has findings now, or had some in the previous pass.
    async fn cross_file_pass(&self, analyzed: Option<(&Url, Vec<Diagnostic>, u64)>) {
        let mut targets = self.cross_file_targets.lock().await;
        let findings: CrossFileFindings = self.analyzer.analyze_cross_file();
        let current: HashSet<String> = findings.keys().cloned().collect();
        let previous = std::mem::replace(&mut *targets, current.clone());
        let affected: BTreeSet<&String> = current.iter().chain(previous.iter()).collect();

        for target in affected {
            let Ok(url) = Url::parse(target) else {
                continue;
            };
            if !self.documents.is_open(&url) {
                continue;
            }
            let cross_file = findings
                .get(target)
                .map(|issues| issues.iter().map(cross_file_to_lsp_diagnostic).collect())
                .unwrap_or_else(Vec::new);

            match &analyzed {
                Some((uri, per_file, ticket)) if *uri == &url => {
                    let mut merged = per_file.clone();
                    merged.extend(cross_file);
                    self.publish(&url, *ticket, merged).await;
                }
                _ => {
                    let ticket = self.next_ticket();
                    let Some(text) = self.documents.text(&url) else {
                        continue;
                    };
                    let mut merged = to_lsp_diagnostics(&self.analyzer.analyze(url.as_str(), &text));
                    if !self.documents.is_open(&url) {
                        // Closed while re-analyzing; keep the tree store in step
                        self.analyzer.remove(url.as_str());
                        continue;
                    }
                    merged.extend(cross_file);
                    self.publish(&url, ticket, merged).await;
                }
            }
        }
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish unless a newer result was already published for `uri`.
    async fn publish(&self, uri: &Url, ticket: u64, diagnostics: Vec<Diagnostic>) {
        let gate = self
            .published
            .entry(uri.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(0)))
            .clone();

        let mut last = gate.lock().await;
        if ticket < *last {
            tracing::debug!(ticket, last = *last, "Dropping stale diagnostics for {}", uri);
            return;
        }
        *last = ticket;
        self.publisher.publish(uri.clone(), diagnostics).await;
    }
}
