//! Single-pass line reader building the document tree

use crate::keywords::{match_header, match_language, match_step, HeaderKind};
use gherkin_model::{
    BackgroundDefinition, Comment, DataTableDefinition, DocStringDefinition, ExamplesDefinition,
    FeatureDefinition, FeatureFile, RuleDefinition, ScenarioDefinition, StepDefinition,
    StepKeywordType, TagDefinition, TextPosition, DEFAULT_LANGUAGE, TAG_MARKER,
};

const DOC_STRING_FENCES: &[&str] = &["\"\"\"", "```"];

pub(crate) fn read(uri: &str, text: &str) -> FeatureFile {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::new();
    for (index, line) in text.lines().enumerate() {
        reader.line(index as u32 + 1, line);
    }
    reader.finish(uri)
}

/// Block the reader is currently filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Feature,
    Rule,
    Background,
    Scenario,
    Examples,
}

struct OpenDocString {
    position: TextPosition,
    delimiter: &'static str,
    content_type: String,
    indent: usize,
    lines: Vec<String>,
}

struct Reader {
    language: String,
    comments: Vec<Comment>,
    feature: Option<FeatureDefinition>,
    pending_tags: Vec<TagDefinition>,
    section: Section,
    in_rule: bool,
    /// Free text lines still belong to the current block's description
    description_open: bool,
    /// The last structural line was a step, so tables and doc strings attach to it
    step_open: bool,
    doc_string: Option<OpenDocString>,
    /// Structure became invalid; only comments are still collected
    broken: bool,
}

impl Reader {
    fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            comments: Vec::new(),
            feature: None,
            pending_tags: Vec::new(),
            section: Section::Preamble,
            in_rule: false,
            description_open: false,
            step_open: false,
            doc_string: None,
            broken: false,
        }
    }

    fn line(&mut self, number: u32, raw: &str) {
        if self.doc_string.is_some() {
            self.doc_string_line(raw);
            return;
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }

        let indent = leading_width(raw);
        let position = TextPosition::new(number, indent as u32 + 1);

        if trimmed.starts_with('#') {
            if self.section == Section::Preamble {
                if let Some(language) = match_language(trimmed) {
                    self.language = language.to_string();
                    return;
                }
            }
            self.comments.push(Comment {
                position,
                text: raw.trim_end().to_string(),
            });
            return;
        }

        if let Some(fence) = DOC_STRING_FENCES.iter().copied().find(|f| trimmed.starts_with(f)) {
            self.open_doc_string(position, fence, trimmed, indent);
            return;
        }

        if trimmed.starts_with(TAG_MARKER) {
            self.tags(number, raw);
            return;
        }

        if self.broken {
            return;
        }

        if let Some((kind, keyword, name)) = match_header(trimmed) {
            self.header(kind, keyword, name, position);
        } else if let Some((keyword, keyword_type, text)) = match_step(trimmed) {
            self.step(keyword, keyword_type, text, position);
        } else if trimmed.starts_with('|') {
            self.table_row(position, trimmed);
        } else {
            self.free_text(trimmed);
        }
    }

    fn finish(mut self, uri: &str) -> FeatureFile {
        if self.doc_string.is_some() || !self.pending_tags.is_empty() {
            self.broken = true;
        }
        let feature = if self.broken { None } else { self.feature };
        FeatureFile::new(uri, feature, self.comments, self.language)
    }

    fn fail(&mut self) {
        self.broken = true;
    }

    fn enter(&mut self, section: Section) {
        self.section = section;
        self.description_open = true;
        self.step_open = false;
    }

    fn header(&mut self, kind: HeaderKind, keyword: &str, name: &str, position: TextPosition) {
        let tags = std::mem::take(&mut self.pending_tags);
        let keyword = keyword.to_string();
        let name = name.to_string();

        match kind {
            HeaderKind::Feature => {
                if self.feature.is_some() {
                    return self.fail();
                }
                self.feature = Some(FeatureDefinition {
                    position,
                    keyword,
                    language: self.language.clone(),
                    name,
                    description: String::new(),
                    tags,
                    background: None,
                    scenarios: Vec::new(),
                    rules: Vec::new(),
                });
                self.in_rule = false;
                self.enter(Section::Feature);
            }
            HeaderKind::Rule => {
                let Some(feature) = self.feature.as_mut() else {
                    return self.fail();
                };
                feature.rules.push(RuleDefinition {
                    position,
                    keyword,
                    name,
                    description: String::new(),
                    tags,
                    background: None,
                    scenarios: Vec::new(),
                });
                self.in_rule = true;
                self.enter(Section::Rule);
            }
            HeaderKind::Background => {
                if !tags.is_empty() {
                    return self.fail();
                }
                let in_rule = self.in_rule;
                let Some(feature) = self.feature.as_mut() else {
                    return self.fail();
                };
                // A Background must come before any scenario of its block
                let slot = if in_rule {
                    feature
                        .rules
                        .last_mut()
                        .filter(|rule| rule.background.is_none() && rule.scenarios.is_empty())
                        .map(|rule| &mut rule.background)
                } else if feature.background.is_none()
                    && feature.scenarios.is_empty()
                    && feature.rules.is_empty()
                {
                    Some(&mut feature.background)
                } else {
                    None
                };
                let Some(slot) = slot else {
                    return self.fail();
                };
                *slot = Some(BackgroundDefinition {
                    position,
                    keyword,
                    name,
                    description: String::new(),
                    steps: Vec::new(),
                });
                self.enter(Section::Background);
            }
            HeaderKind::Scenario => {
                let in_rule = self.in_rule;
                let Some(feature) = self.feature.as_mut() else {
                    return self.fail();
                };
                let scenarios = if in_rule {
                    match feature.rules.last_mut() {
                        Some(rule) => &mut rule.scenarios,
                        None => return self.fail(),
                    }
                } else {
                    &mut feature.scenarios
                };
                scenarios.push(ScenarioDefinition {
                    position,
                    keyword,
                    name,
                    description: String::new(),
                    tags,
                    steps: Vec::new(),
                    examples: Vec::new(),
                });
                self.enter(Section::Scenario);
            }
            HeaderKind::Examples => {
                if !matches!(self.section, Section::Scenario | Section::Examples) {
                    return self.fail();
                }
                let Some(scenario) = self.scenario_mut() else {
                    return self.fail();
                };
                scenario.examples.push(ExamplesDefinition {
                    position,
                    keyword,
                    name: (!name.is_empty()).then_some(name),
                    description: String::new(),
                    tags,
                    table: None,
                });
                self.enter(Section::Examples);
            }
        }
    }

    fn step(
        &mut self,
        keyword: &str,
        keyword_type: StepKeywordType,
        text: &str,
        position: TextPosition,
    ) {
        if !self.pending_tags.is_empty() {
            return self.fail();
        }
        let Some(steps) = self.current_steps() else {
            return self.fail();
        };
        steps.push(StepDefinition {
            position,
            keyword: keyword.to_string(),
            keyword_type,
            text: text.to_string(),
            data_table: None,
            doc_string: None,
        });
        self.description_open = false;
        self.step_open = true;
    }

    fn table_row(&mut self, position: TextPosition, trimmed: &str) {
        if !self.pending_tags.is_empty() {
            return self.fail();
        }
        let cells = split_cells(trimmed);

        if self.step_open {
            let Some(step) = self.current_steps().and_then(|steps| steps.last_mut()) else {
                return self.fail();
            };
            if step.doc_string.is_some() {
                return self.fail();
            }
            push_row(&mut step.data_table, position, cells);
        } else if self.section == Section::Examples {
            let Some(examples) = self
                .scenario_mut()
                .and_then(|scenario| scenario.examples.last_mut())
            else {
                return self.fail();
            };
            push_row(&mut examples.table, position, cells);
        } else {
            return self.fail();
        }
        self.description_open = false;
    }

    fn free_text(&mut self, trimmed: &str) {
        if !self.description_open || !self.pending_tags.is_empty() {
            return self.fail();
        }
        let Some(description) = self.current_description() else {
            return self.fail();
        };
        if !description.is_empty() {
            description.push('\n');
        }
        description.push_str(trimmed);
    }

    fn tags(&mut self, number: u32, raw: &str) {
        for (column, offset, token) in tokens(raw) {
            if token.starts_with('#') {
                self.comments.push(Comment {
                    position: TextPosition::new(number, column),
                    text: raw[offset..].trim_end().to_string(),
                });
                break;
            }
            if token.len() == TAG_MARKER.len_utf8() || !token.starts_with(TAG_MARKER) {
                self.fail();
                continue;
            }
            self.pending_tags
                .push(TagDefinition::new(TextPosition::new(number, column), token));
        }
        self.description_open = false;
        self.step_open = false;
    }

    fn open_doc_string(
        &mut self,
        position: TextPosition,
        delimiter: &'static str,
        trimmed: &str,
        indent: usize,
    ) {
        if !self.broken {
            let attachable = self.step_open
                && self.pending_tags.is_empty()
                && self
                    .current_steps()
                    .and_then(|steps| steps.last())
                    .is_some_and(|step| step.doc_string.is_none() && step.data_table.is_none());
            if !attachable {
                self.fail();
            }
        }
        self.doc_string = Some(OpenDocString {
            position,
            delimiter,
            content_type: trimmed[delimiter.len()..].trim().to_string(),
            indent,
            lines: Vec::new(),
        });
    }

    fn doc_string_line(&mut self, raw: &str) {
        let closing = matches!(&self.doc_string, Some(open) if raw.trim() == open.delimiter);
        if closing {
            if let Some(open) = self.doc_string.take() {
                self.close_doc_string(open);
            }
            return;
        }
        if let Some(open) = self.doc_string.as_mut() {
            let line = strip_indent(raw, open.indent).to_string();
            open.lines.push(line);
        }
    }

    fn close_doc_string(&mut self, open: OpenDocString) {
        if self.broken {
            return;
        }
        let Some(step) = self.current_steps().and_then(|steps| steps.last_mut()) else {
            return self.fail();
        };
        step.doc_string = Some(DocStringDefinition {
            position: open.position,
            content_type: open.content_type,
            content: open.lines.join("\n"),
            delimiter: open.delimiter.to_string(),
        });
    }

    fn scenario_mut(&mut self) -> Option<&mut ScenarioDefinition> {
        let feature = self.feature.as_mut()?;
        if self.in_rule {
            feature.rules.last_mut()?.scenarios.last_mut()
        } else {
            feature.scenarios.last_mut()
        }
    }

    fn background_mut(&mut self) -> Option<&mut BackgroundDefinition> {
        let feature = self.feature.as_mut()?;
        if self.in_rule {
            feature.rules.last_mut()?.background.as_mut()
        } else {
            feature.background.as_mut()
        }
    }

    fn current_steps(&mut self) -> Option<&mut Vec<StepDefinition>> {
        match self.section {
            Section::Background => self.background_mut().map(|b| &mut b.steps),
            Section::Scenario => self.scenario_mut().map(|s| &mut s.steps),
            _ => None,
        }
    }

    fn current_description(&mut self) -> Option<&mut String> {
        match self.section {
            Section::Preamble => None,
            Section::Feature => self.feature.as_mut().map(|f| &mut f.description),
            Section::Rule => self
                .feature
                .as_mut()?
                .rules
                .last_mut()
                .map(|r| &mut r.description),
            Section::Background => self.background_mut().map(|b| &mut b.description),
            Section::Scenario => self.scenario_mut().map(|s| &mut s.description),
            Section::Examples => self
                .scenario_mut()?
                .examples
                .last_mut()
                .map(|e| &mut e.description),
        }
    }
}

fn push_row(table: &mut Option<DataTableDefinition>, position: TextPosition, cells: Vec<String>) {
    table
        .get_or_insert_with(|| DataTableDefinition {
            position,
            rows: Vec::new(),
        })
        .rows
        .push(cells);
}

/// Number of whitespace characters before the first visible one
fn leading_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Remove at most `width` leading whitespace characters
fn strip_indent(line: &str, width: usize) -> &str {
    let cut = line
        .char_indices()
        .take(width)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map(|(offset, c)| offset + c.len_utf8())
        .unwrap_or(0);
    &line[cut..]
}

/// Whitespace-separated tokens with their 1-based column and byte offset
fn tokens(line: &str) -> Vec<(u32, usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<(u32, usize)> = None;

    for (index, (offset, ch)) in line.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((column, begin)) = start.take() {
                tokens.push((column, begin, &line[begin..offset]));
            }
        } else if start.is_none() {
            start = Some((index as u32 + 1, offset));
        }
    }
    if let Some((column, begin)) = start {
        tokens.push((column, begin, &line[begin..]));
    }

    tokens
}

/// Split `| a | b \| c |` into trimmed cells, honouring escapes
fn split_cells(row: &str) -> Vec<String> {
    let body = row.strip_prefix('|').unwrap_or(row);
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('n') => cell.push('\n'),
                Some('\\') => cell.push('\\'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(ch),
        }
    }
    // Text after the closing pipe is not a cell

    cells
}
