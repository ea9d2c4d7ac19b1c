//! Names that must be unique across the workspace
//!
//! Both checks collect `name -> occurrences` while trees are accumulated
//! and report every occurrence of a duplicated name to its own document.

use crate::check::CrossFileCheck;
use crate::error::RuleError;
use crate::issue::CrossFileIssue;
use crate::properties::RuleProperties;
use crate::visitor::Visitor;
use gherkin_model::{FeatureDefinition, FeatureFile, ScenarioDefinition};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Occurrence {
    uri: String,
    line: u32,
}

/// Name to occurrences, in accumulation order
#[derive(Debug, Default)]
struct NameIndex {
    current_uri: String,
    names: BTreeMap<String, Vec<Occurrence>>,
}

impl NameIndex {
    fn record(&mut self, name: &str, line: u32) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.names
            .entry(name.to_string())
            .or_default()
            .push(Occurrence {
                uri: self.current_uri.clone(),
                line,
            });
    }

    fn duplicates(
        &mut self,
        rule_key: &'static str,
        what: &str,
    ) -> Vec<CrossFileIssue> {
        let mut issues = Vec::new();
        for (name, occurrences) in std::mem::take(&mut self.names) {
            if occurrences.len() < 2 {
                continue;
            }
            for (index, occurrence) in occurrences.iter().enumerate() {
                let others: Vec<String> = occurrences
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, o)| format!("{}:{}", o.uri, o.line))
                    .collect();
                issues.push(CrossFileIssue::new(
                    rule_key,
                    occurrence.uri.clone(),
                    occurrence.line,
                    format!(
                        "{} name \"{}\" is already used: {}",
                        what,
                        name,
                        others.join(", ")
                    ),
                ));
            }
        }
        issues
    }
}

#[derive(Debug, Default)]
pub struct UniqueFeatureName {
    index: NameIndex,
}

impl UniqueFeatureName {
    pub const KEY: &'static str = "unique-feature-name";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn CrossFileCheck>, RuleError> {
        Ok(Box::new(Self::default()))
    }
}

impl Visitor for UniqueFeatureName {
    fn visit_feature_file(&mut self, file: &FeatureFile) {
        self.index.current_uri = file.uri.clone();
    }

    fn visit_feature(&mut self, feature: &FeatureDefinition) {
        self.index.record(&feature.name, feature.position.line);
    }
}

impl CrossFileCheck for UniqueFeatureName {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn finalize(&mut self) -> Vec<CrossFileIssue> {
        self.index.duplicates(Self::KEY, "Feature")
    }
}

#[derive(Debug, Default)]
pub struct UniqueScenarioName {
    index: NameIndex,
}

impl UniqueScenarioName {
    pub const KEY: &'static str = "unique-scenario-name";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn CrossFileCheck>, RuleError> {
        Ok(Box::new(Self::default()))
    }
}

impl Visitor for UniqueScenarioName {
    fn visit_feature_file(&mut self, file: &FeatureFile) {
        self.index.current_uri = file.uri.clone();
    }

    fn visit_scenario(&mut self, scenario: &ScenarioDefinition) {
        self.index.record(&scenario.name, scenario.position.line);
    }
}

impl CrossFileCheck for UniqueScenarioName {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn finalize(&mut self) -> Vec<CrossFileIssue> {
        self.index.duplicates(Self::KEY, "Scenario")
    }
}
