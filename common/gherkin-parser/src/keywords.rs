//! Keyword tables

use gherkin_model::StepKeywordType;

/// Block headers, recognised when followed by a colon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Feature,
    Rule,
    Background,
    Scenario,
    Examples,
}

const HEADERS: &[(&str, HeaderKind)] = &[
    ("Feature", HeaderKind::Feature),
    ("Rule", HeaderKind::Rule),
    ("Background", HeaderKind::Background),
    ("Scenario Outline", HeaderKind::Scenario),
    ("Scenario Template", HeaderKind::Scenario),
    ("Scenario", HeaderKind::Scenario),
    ("Example", HeaderKind::Scenario),
    ("Examples", HeaderKind::Examples),
    ("Scenarios", HeaderKind::Examples),
];

/// Step keywords with the trailing space the parser keeps
pub const STEP_KEYWORDS: &[(&str, StepKeywordType)] = &[
    ("Given ", StepKeywordType::Context),
    ("When ", StepKeywordType::Action),
    ("Then ", StepKeywordType::Outcome),
    ("And ", StepKeywordType::Conjunction),
    ("But ", StepKeywordType::Conjunction),
    ("* ", StepKeywordType::Unknown),
];

/// Split `Keyword: name` into its parts.
pub(crate) fn match_header(line: &str) -> Option<(HeaderKind, &'static str, &str)> {
    HEADERS.iter().find_map(|(keyword, kind)| {
        let rest = line.strip_prefix(keyword)?.strip_prefix(':')?;
        Some((*kind, *keyword, rest.trim()))
    })
}

/// Split `Given text` into keyword, type and text.
pub(crate) fn match_step(line: &str) -> Option<(&'static str, StepKeywordType, &str)> {
    STEP_KEYWORDS.iter().find_map(|(keyword, kind)| {
        let rest = line.strip_prefix(keyword)?;
        Some((*keyword, *kind, rest.trim()))
    })
}

/// Value of a `# language: xx` directive
pub(crate) fn match_language(line: &str) -> Option<&str> {
    let directive = line.strip_prefix('#')?.trim_start();
    let value = directive.strip_prefix("language")?.trim_start();
    let value = value.strip_prefix(':')?.trim();
    (!value.is_empty()).then_some(value)
}
