//! Parser collaborator contract
//!
//! The analysis engine never reads grammar itself; it is handed a
//! [`FeatureParser`] and consumes the trees it produces.

use crate::tree::FeatureFile;
use thiserror::Error;

/// Failures a parser may report.
///
/// Syntax errors are deliberately absent: they are encoded as a
/// [`FeatureFile`] whose `feature` is `None`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

/// Turns raw document text into a tree.
pub trait FeatureParser: Send + Sync {
    /// Parse `text` identified by `uri`.
    ///
    /// Must report language `"en"` when the document carries no
    /// language directive.
    fn parse(&self, uri: &str, text: &str) -> Result<FeatureFile, ParseError>;
}

impl<F> FeatureParser for F
where
    F: Fn(&str, &str) -> Result<FeatureFile, ParseError> + Send + Sync,
{
    fn parse(&self, uri: &str, text: &str) -> Result<FeatureFile, ParseError> {
        self(uri, text)
    }
}
