//! Findings reported by checks

use gherkin_model::TextPosition;

/// A finding inside the document being walked
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Key of the rule that reported it
    pub rule_key: &'static str,
    pub message: String,
    /// Precise 1-based position
    pub position: Option<TextPosition>,
    /// 1-based line, for line-level findings
    pub line: Option<u32>,
    /// Estimated remediation effort
    pub cost: Option<f64>,
    /// Last column of a one-line range; only meaningful with `position`
    pub end_column: Option<u32>,
}

impl Issue {
    fn bare(rule_key: &'static str, message: String) -> Self {
        Self {
            rule_key,
            message,
            position: None,
            line: None,
            cost: None,
            end_column: None,
        }
    }

    pub fn at(rule_key: &'static str, position: TextPosition, message: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            line: Some(position.line),
            ..Self::bare(rule_key, message.into())
        }
    }

    pub fn on_line(rule_key: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            ..Self::bare(rule_key, message.into())
        }
    }

    pub fn file_level(rule_key: &'static str, message: impl Into<String>) -> Self {
        Self::bare(rule_key, message.into())
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_end_column(mut self, end_column: u32) -> Self {
        self.end_column = Some(end_column);
        self
    }

    /// Line the issue refers to, if any
    pub fn effective_line(&self) -> Option<u32> {
        self.position.map(|p| p.line).or(self.line)
    }
}

/// A finding that belongs to another document than the one walked
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrossFileIssue {
    pub rule_key: &'static str,
    /// Document the finding is addressed to
    pub uri: String,
    /// 1-based line
    pub line: u32,
    pub message: String,
}

impl CrossFileIssue {
    pub fn new(
        rule_key: &'static str,
        uri: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_key,
            uri: uri.into(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precise_issue_keeps_line() {
        let issue = Issue::at("r", TextPosition::new(5, 10), "m");
        assert_eq!(issue.effective_line(), Some(5));
        assert_eq!(issue.end_column, None);
    }

    #[test]
    fn test_file_level_issue_has_no_location() {
        let issue = Issue::file_level("r", "m");
        assert_eq!(issue.position, None);
        assert_eq!(issue.effective_line(), None);
    }

    #[test]
    fn test_builders() {
        let issue = Issue::on_line("r", 3, "m").with_cost(2.0);
        assert_eq!(issue.line, Some(3));
        assert_eq!(issue.cost, Some(2.0));
    }

    #[test]
    fn test_column_range_issue() {
        let issue = Issue::at("r", TextPosition::new(2, 4), "m").with_end_column(9);
        assert_eq!(issue.position, Some(TextPosition::new(2, 4)));
        assert_eq!(issue.end_column, Some(9));
    }

    #[test]
    fn test_cross_file_issue_addressed_to_uri() {
        let issue = CrossFileIssue::new("r", "file:///b.feature", 7, "dup");
        assert_eq!(issue.uri, "file:///b.feature");
        assert_eq!(issue.line, 7);
        assert_eq!(issue.clone(), issue);
    }
}
