//! Gherkin Language Server Protocol implementation
//!
//! Publishes analysis findings for `.feature` documents as LSP diagnostics:
//!
//! - Per-document checks run on every open and change
//! - Cross-file checks (duplicate feature and scenario names) run over
//!   every known document and are merged into each open document's list
//! - Closing a document clears its diagnostics
//!
//! # Usage
//!
//! Run the language server via stdio:
//!
//! ```bash
//! gherkin-lsp
//! ```
//!
//! # Configuration
//!
//! Create a `.gherkin-lsp.yaml` in your workspace root:
//!
//! ```yaml
//! engine:
//!   name: gherkin-lsp
//!   log_level: info
//!
//! rules:
//!   max-steps:
//!     max: 5
//!   missing-step-type:
//!     enabled: true
//! ```
//!
//! Editor settings (initialization options and
//! `workspace/didChangeConfiguration`) use the same `rules` object,
//! optionally nested under a `gherkin` section, and override the file
//! per rule.

pub mod engine;

pub use engine::{DiagnosticPublisher, DocumentManager, EngineConfig, LspServer, Session};
