//! Check contract
//!
//! A [`Check`] sees the same callbacks as a [`Visitor`], plus the
//! [`CheckContext`] bound for the current walk. The context only lives for
//! that walk, so a check cannot hold on to it. Every issue a check reports
//! is stamped with the check's own rule key.

use crate::issue::{CrossFileIssue, Issue};
use crate::visitor::Visitor;
use crate::walker::walk;
use gherkin_model::{
    BackgroundDefinition, Comment, ExamplesDefinition, FeatureDefinition, FeatureFile,
    RuleDefinition, ScenarioDefinition, StepDefinition, TagDefinition, TextPosition,
};

/// Per-walk view of the document plus the issue sink
#[derive(Debug)]
pub struct CheckContext<'a> {
    rule_key: &'static str,
    tree: &'a FeatureFile,
    text: Option<&'a str>,
    issues: Vec<Issue>,
}

impl<'a> CheckContext<'a> {
    pub fn new(rule_key: &'static str, tree: &'a FeatureFile, text: Option<&'a str>) -> Self {
        Self {
            rule_key,
            tree,
            text,
            issues: Vec::new(),
        }
    }

    pub fn rule_key(&self) -> &'static str {
        self.rule_key
    }

    pub fn tree(&self) -> &'a FeatureFile {
        self.tree
    }

    /// Raw document text, when the caller supplied it
    pub fn text(&self) -> Option<&'a str> {
        self.text
    }

    pub fn uri(&self) -> &'a str {
        &self.tree.uri
    }

    pub fn add_issue(&mut self, position: TextPosition, message: impl Into<String>) {
        self.issues.push(Issue::at(self.rule_key, position, message));
    }

    pub fn add_issue_with_cost(
        &mut self,
        position: TextPosition,
        message: impl Into<String>,
        cost: f64,
    ) {
        self.issues
            .push(Issue::at(self.rule_key, position, message).with_cost(cost));
    }

    /// Issue spanning `start_column..=end_column` on one line
    pub fn add_column_issue(
        &mut self,
        start_column: u32,
        end_column: u32,
        line: u32,
        message: impl Into<String>,
    ) {
        let position = TextPosition::new(line, start_column);
        self.issues
            .push(Issue::at(self.rule_key, position, message).with_end_column(end_column));
    }

    pub fn add_line_issue(&mut self, line: u32, message: impl Into<String>) {
        self.issues.push(Issue::on_line(self.rule_key, line, message));
    }

    pub fn add_line_issue_with_cost(&mut self, line: u32, message: impl Into<String>, cost: f64) {
        self.issues
            .push(Issue::on_line(self.rule_key, line, message).with_cost(cost));
    }

    pub fn add_file_issue(&mut self, message: impl Into<String>) {
        self.issues.push(Issue::file_level(self.rule_key, message));
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// A per-file rule implementation
#[allow(unused_variables)]
pub trait Check: Send {
    /// Registered key of this rule
    fn rule_key(&self) -> &'static str;

    fn visit_feature_file(&mut self, ctx: &mut CheckContext<'_>, file: &FeatureFile) {}

    fn leave_feature_file(&mut self, ctx: &mut CheckContext<'_>, file: &FeatureFile) {}

    fn visit_feature(&mut self, ctx: &mut CheckContext<'_>, feature: &FeatureDefinition) {}

    fn leave_feature(&mut self, ctx: &mut CheckContext<'_>, feature: &FeatureDefinition) {}

    fn visit_tag(&mut self, ctx: &mut CheckContext<'_>, tag: &TagDefinition) {}

    fn visit_background(&mut self, ctx: &mut CheckContext<'_>, background: &BackgroundDefinition) {}

    fn visit_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {}

    fn leave_scenario(&mut self, ctx: &mut CheckContext<'_>, scenario: &ScenarioDefinition) {}

    fn visit_step(&mut self, ctx: &mut CheckContext<'_>, step: &StepDefinition) {}

    fn visit_examples(&mut self, ctx: &mut CheckContext<'_>, examples: &ExamplesDefinition) {}

    fn visit_rule(&mut self, ctx: &mut CheckContext<'_>, rule: &RuleDefinition) {}

    fn leave_rule(&mut self, ctx: &mut CheckContext<'_>, rule: &RuleDefinition) {}

    fn visit_comment(&mut self, ctx: &mut CheckContext<'_>, comment: &Comment) {}
}

/// A check bound to its context for the duration of one walk
struct Bound<'c, 'a> {
    check: &'c mut dyn Check,
    ctx: CheckContext<'a>,
}

impl Visitor for Bound<'_, '_> {
    fn visit_feature_file(&mut self, file: &FeatureFile) {
        self.check.visit_feature_file(&mut self.ctx, file);
    }

    fn leave_feature_file(&mut self, file: &FeatureFile) {
        self.check.leave_feature_file(&mut self.ctx, file);
    }

    fn visit_feature(&mut self, feature: &FeatureDefinition) {
        self.check.visit_feature(&mut self.ctx, feature);
    }

    fn leave_feature(&mut self, feature: &FeatureDefinition) {
        self.check.leave_feature(&mut self.ctx, feature);
    }

    fn visit_tag(&mut self, tag: &TagDefinition) {
        self.check.visit_tag(&mut self.ctx, tag);
    }

    fn visit_background(&mut self, background: &BackgroundDefinition) {
        self.check.visit_background(&mut self.ctx, background);
    }

    fn visit_scenario(&mut self, scenario: &ScenarioDefinition) {
        self.check.visit_scenario(&mut self.ctx, scenario);
    }

    fn leave_scenario(&mut self, scenario: &ScenarioDefinition) {
        self.check.leave_scenario(&mut self.ctx, scenario);
    }

    fn visit_step(&mut self, step: &StepDefinition) {
        self.check.visit_step(&mut self.ctx, step);
    }

    fn visit_examples(&mut self, examples: &ExamplesDefinition) {
        self.check.visit_examples(&mut self.ctx, examples);
    }

    fn visit_rule(&mut self, rule: &RuleDefinition) {
        self.check.visit_rule(&mut self.ctx, rule);
    }

    fn leave_rule(&mut self, rule: &RuleDefinition) {
        self.check.leave_rule(&mut self.ctx, rule);
    }

    fn visit_comment(&mut self, comment: &Comment) {
        self.check.visit_comment(&mut self.ctx, comment);
    }
}

/// Walk `tree` with `check` bound to a fresh context and return its issues.
pub fn run_check(check: &mut dyn Check, tree: &FeatureFile, text: Option<&str>) -> Vec<Issue> {
    let ctx = CheckContext::new(check.rule_key(), tree, text);
    let mut bound = Bound { check, ctx };
    walk(tree, &mut bound);
    bound.ctx.into_issues()
}

/// A rule whose findings depend on several documents.
///
/// The engine feeds every stored tree to [`accumulate`](Self::accumulate),
/// then calls [`finalize`](Self::finalize) once.
pub trait CrossFileCheck: Visitor + Send {
    fn rule_key(&self) -> &'static str;

    /// Gather state from one tree. Walks it with `self` by default.
    fn accumulate(&mut self, tree: &FeatureFile) {
        walk(tree, self);
    }

    fn finalize(&mut self) -> Vec<CrossFileIssue>;
}
