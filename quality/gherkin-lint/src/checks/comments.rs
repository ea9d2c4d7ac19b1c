//! Comment checks

use crate::check::{Check, CheckContext};
use crate::error::RuleError;
use crate::properties::RuleProperties;
use gherkin_model::Comment;
use regex::Regex;

/// `#text` without a space after the marker
#[derive(Debug, Default)]
pub struct CommentConvention;

impl CommentConvention {
    pub const KEY: &'static str = "comment-convention";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self))
    }
}

impl Check for CommentConvention {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_comment(&mut self, ctx: &mut CheckContext<'_>, comment: &Comment) {
        let body = comment.marker_text().trim_start_matches('#');
        if !body.is_empty() && !body.starts_with(char::is_whitespace) {
            ctx.add_issue(comment.position, "Add a space after the comment marker.");
        }
    }
}

/// Open TODO / FIXME notes left in comments
#[derive(Debug)]
pub struct TodoTaggedComment {
    marker: Regex,
}

impl TodoTaggedComment {
    pub const KEY: &'static str = "todo-tagged-comment";

    pub fn build(_: &RuleProperties) -> Result<Box<dyn Check>, RuleError> {
        Ok(Box::new(Self {
            marker: Regex::new(r"(?i)\b(TODO|FIXME)\b")?,
        }))
    }
}

impl Check for TodoTaggedComment {
    fn rule_key(&self) -> &'static str {
        Self::KEY
    }

    fn visit_comment(&mut self, ctx: &mut CheckContext<'_>, comment: &Comment) {
        if let Some(found) = self.marker.find(comment.marker_text()) {
            ctx.add_issue(
                comment.position,
                format!(
                    "Complete the task associated with this {} comment.",
                    found.as_str().to_uppercase()
                ),
            );
        }
    }
}
