//! LSP engine core
//!
//! Document session, diagnostic translation and the tower-lsp server.

pub mod config;
pub mod convert;
pub mod document;
pub mod server;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use convert::SOURCE;
pub use document::DocumentManager;
pub use server::LspServer;
pub use session::{DiagnosticPublisher, Session};
