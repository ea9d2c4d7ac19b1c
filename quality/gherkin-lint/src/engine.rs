//! Analysis engine
//!
//! Parses documents through the injected [`FeatureParser`], keeps the
//! latest tree per URI for cross-file checks, and runs every active check
//! with its own fresh context.

use crate::check::run_check;
use crate::config::Configuration;
use crate::issue::{CrossFileIssue, Issue};
use crate::registry::PARSE_ERROR_RULE;
use dashmap::DashMap;
use gherkin_model::{FeatureFile, FeatureParser, TextPosition};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Cross-file findings grouped by the document they are addressed to
pub type CrossFileFindings = HashMap<String, Vec<CrossFileIssue>>;

pub struct Analyzer {
    parser: Arc<dyn FeatureParser>,
    /// Latest tree per URI; last write wins
    trees: DashMap<String, Arc<FeatureFile>>,
    /// Swapped as a whole on reconfiguration
    config: RwLock<Arc<Configuration>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("trees", &self.trees.len())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Engine with the default configuration
    pub fn new(parser: Arc<dyn FeatureParser>) -> Self {
        Self::with_configuration(parser, Configuration::default())
    }

    pub fn with_configuration(parser: Arc<dyn FeatureParser>, config: Configuration) -> Self {
        Self {
            parser,
            trees: DashMap::new(),
            config: RwLock::new(Arc::new(config)),
        }
    }

    /// Snapshot of the current configuration
    pub fn configuration(&self) -> Arc<Configuration> {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the configuration. Analyses already running keep the
    /// snapshot they started with.
    pub fn reconfigure(&self, config: Configuration) {
        let config = Arc::new(config);
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *guard = config;
    }

    /// Parse and check one document.
    ///
    /// A parser failure yields a single `parse-error` issue at the start of
    /// the document; the stored tree is left untouched and no check runs.
    pub fn analyze(&self, uri: &str, text: &str) -> Vec<Issue> {
        let tree = match self.parser.parse(uri, text) {
            Ok(tree) => Arc::new(tree),
            Err(err) => {
                tracing::warn!(uri, "parse failed: {}", err);
                return vec![Issue::at(
                    PARSE_ERROR_RULE,
                    TextPosition::START,
                    format!("Unable to parse the document: {}", err),
                )];
            }
        };

        self.trees.insert(uri.to_string(), Arc::clone(&tree));
        self.check_tree(&tree, Some(text))
    }

    /// Run every active per-file check over an already parsed tree.
    pub fn check_tree(&self, tree: &FeatureFile, text: Option<&str>) -> Vec<Issue> {
        let config = self.configuration();
        let mut issues = Vec::new();
        for mut check in config.checks() {
            issues.extend(run_check(check.as_mut(), tree, text));
        }
        tracing::debug!(uri = %tree.uri, issues = issues.len(), "document analyzed");
        issues
    }

    /// Run the active cross-file checks over every stored tree.
    ///
    /// Each check first accumulates all trees, then emits its findings.
    pub fn analyze_cross_file(&self) -> CrossFileFindings {
        let config = self.configuration();
        let checks = config.cross_file_checks();
        if checks.is_empty() {
            return CrossFileFindings::new();
        }

        let mut trees: Vec<Arc<FeatureFile>> = self
            .trees
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        trees.sort_by(|a, b| a.uri.cmp(&b.uri));

        let findings: Vec<Vec<CrossFileIssue>> = checks
            .into_par_iter()
            .map(|mut check| {
                for tree in &trees {
                    check.accumulate(tree);
                }
                check.finalize()
            })
            .collect();

        let mut by_uri = CrossFileFindings::new();
        for issue in findings.into_iter().flatten() {
            by_uri.entry(issue.uri.clone()).or_default().push(issue);
        }
        tracing::debug!(
            trees = trees.len(),
            targets = by_uri.len(),
            "cross-file analysis finished"
        );
        by_uri
    }

    /// Forget the stored tree of `uri`. Returns whether one was stored.
    pub fn remove(&self, uri: &str) -> bool {
        self.trees.remove(uri).is_some()
    }

    pub fn tree(&self, uri: &str) -> Option<Arc<FeatureFile>> {
        self.trees.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.trees.contains_key(uri)
    }

    /// URIs with a stored tree, sorted
    pub fn stored_uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = self.trees.iter().map(|entry| entry.key().clone()).collect();
        uris.sort();
        uris
    }
}
