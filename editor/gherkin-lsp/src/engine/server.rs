//! tower-lsp server
//!
//! Thin protocol layer: every notification is forwarded to the [`Session`].

use super::config::EngineConfig;
use super::session::Session;
use gherkin_lint::Settings;
use std::sync::{PoisonError, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Gherkin language server
pub struct LspServer {
    /// LSP client for log messages
    client: Client,
    /// Open documents and analysis
    session: Session<Client>,
    /// Engine configuration, replaced once the workspace root is known
    config: RwLock<EngineConfig>,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, EngineConfig::default())
    }

    pub fn with_config(client: Client, config: EngineConfig) -> Self {
        Self {
            session: Session::new(client.clone()),
            client,
            config: RwLock::new(config),
        }
    }

    pub fn session(&self) -> &Session<Client> {
        &self.session
    }

    /// Full document sync with open/close notifications
    pub fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    will_save: None,
                    will_save_wait_until: None,
                    save: None,
                },
            )),
            ..ServerCapabilities::default()
        }
    }

    fn name(&self) -> String {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .engine
            .name
            .clone()
    }

    /// Load the workspace configuration file if discovery is enabled.
    fn discover(&self, root_uri: Option<&Url>) -> Option<EngineConfig> {
        let discovery = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .engine
            .workspace_discovery;
        if !discovery {
            return None;
        }

        let root = root_uri?.to_file_path().ok()?;
        let config = EngineConfig::load_default(&root);
        tracing::info!("Workspace root: {}", root.display());
        Some(config)
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    #[allow(deprecated)]
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("{} initializing", self.name());

        if let Some(config) = self.discover(params.root_uri.as_ref()) {
            *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        }

        let workspace = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rule_settings();
        let editor = params
            .initialization_options
            .as_ref()
            .map(Settings::from_value)
            .unwrap_or_default();

        self.session.configure(workspace, editor).await;

        Ok(InitializeResult {
            capabilities: Self::capabilities(),
            server_info: Some(ServerInfo {
                name: self.name(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let name = self.name();
        let active = self.session.analyzer().configuration().rules().len();
        tracing::info!("{} initialized with {} active rules", name, active);
        self.client
            .log_message(MessageType::INFO, format!("{} ready", name))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("{} shutting down", self.name());
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        self.session
            .open(document.uri, document.text, document.version)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full sync: the first change carries the whole text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.session.change(uri, change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.session.close(&params.text_document.uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        tracing::debug!("Configuration changed");
        self.session
            .reconfigure(Settings::from_value(&params.settings))
            .await;
    }
}
