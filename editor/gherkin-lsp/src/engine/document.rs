//! Open document tracking
//!
//! Last write wins per URI; documents for different URIs never block
//! each other. Text is shared as `Arc<str>` so re-analysis of every open
//! document after a configuration change does not copy buffers.

use dashmap::DashMap;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;

/// Open documents of the session
#[derive(Debug, Default)]
pub struct DocumentManager {
    documents: DashMap<Url, DocumentState>,
}

/// Last known state of an open document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub text: Arc<str>,
    /// Editor version of `text`
    pub version: i32,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Record a document as open, replacing any previous state.
    pub fn open(&self, uri: Url, text: impl Into<Arc<str>>, version: i32) {
        let state = DocumentState {
            text: text.into(),
            version,
        };
        self.documents.insert(uri, state);
    }

    /// Replace the full text and return the version it replaced. A change
    /// for a document that was never opened records it as open.
    pub fn update(&self, uri: &Url, text: impl Into<Arc<str>>, version: i32) -> Option<i32> {
        let state = DocumentState {
            text: text.into(),
            version,
        };
        self.documents
            .insert(uri.clone(), state)
            .map(|previous| previous.version)
    }

    /// Forget the document; returns its last state if it was open.
    pub fn close(&self, uri: &Url) -> Option<DocumentState> {
        self.documents.remove(uri).map(|(_, state)| state)
    }

    pub fn text(&self, uri: &Url) -> Option<Arc<str>> {
        self.documents.get(uri).map(|doc| Arc::clone(&doc.text))
    }

    pub fn version(&self, uri: &Url) -> Option<i32> {
        self.documents.get(uri).map(|doc| doc.version)
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// URIs of all open documents, sorted
    pub fn uris(&self) -> Vec<Url> {
        let mut uris: Vec<Url> = self.documents.iter().map(|r| r.key().clone()).collect();
        uris.sort();
        uris
    }
}
