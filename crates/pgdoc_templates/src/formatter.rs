//! Deterministic Markdown formatting for rendered documents.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use regex::Regex;
use thiserror::Error;

/// Markdown the formatter refuses to pass through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("code fence opened on line {line} is never closed")]
    UnclosedFence { line: usize },
}

/// Normalizes Markdown layout without changing its meaning.
///
/// Code blocks (fenced or indented, at any nesting depth) are located with
/// pulldown-cmark and copied verbatim. Everywhere else the formatter strips
/// trailing whitespace, collapses blank-line runs, rewrites `*`/`+` bullets
/// to `-` and puts headings on their own paragraph. The result always ends
/// with a single newline, and formatting twice changes nothing.
pub struct MarkdownFormatter {
    heading_pattern: Regex,
    bullet_pattern: Regex,
    thematic_break_pattern: Regex,
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            heading_pattern: Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.+)$")
                .expect("heading pattern is valid"),
            bullet_pattern: Regex::new(r"^(\s*)[*+]([ \t]+)").expect("bullet pattern is valid"),
            thematic_break_pattern: Regex::new(r"^ {0,3}([*_-])(?:[ \t]*([*_-]))+[ \t]*$")
                .expect("thematic break pattern is valid"),
        }
    }

    /// Format a Markdown document.
    pub fn format(&self, input: &str) -> Result<String, FormatError> {
        let text = input.replace("\r\n", "\n").replace('\r', "\n");
        let blocks = code_blocks(&text)?;

        let mut lines: Vec<String> = Vec::new();
        let mut blank_pending = false;
        let mut offset = 0;

        for raw in text.split_inclusive('\n') {
            let start = offset;
            offset += raw.len();
            let raw = raw.strip_suffix('\n').unwrap_or(raw);

            if blocks.iter().any(|b| start < b.end && offset > b.start) {
                if blank_pending {
                    push_blank(&mut lines);
                    blank_pending = false;
                }
                lines.push(raw.to_string());
                continue;
            }

            let line = raw.trim_end();
            if line.is_empty() {
                push_blank(&mut lines);
                blank_pending = false;
                continue;
            }
            if blank_pending {
                push_blank(&mut lines);
                blank_pending = false;
            }

            if let Some(caps) = self.heading_pattern.captures(line) {
                push_blank(&mut lines);
                lines.push(format!("{} {}", &caps[1], &caps[2]));
                blank_pending = true;
                continue;
            }

            lines.push(self.normalize_bullet(line));
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Ok(String::new());
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    fn normalize_bullet(&self, line: &str) -> String {
        if self.is_thematic_break(line) {
            return line.to_string();
        }
        self.bullet_pattern.replace(line, "$1-$2").into_owned()
    }

    fn is_thematic_break(&self, line: &str) -> bool {
        match self.thematic_break_pattern.captures(line) {
            // All markers of a thematic break must be the same character.
            Some(caps) => {
                let first = &caps[1];
                let markers: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
                markers.len() >= 3 && markers.iter().all(|c| first.starts_with(*c))
            }
            None => false,
        }
    }
}

/// Byte ranges of every code block in the document.
///
/// CommonMark lets a fenced block run to the end of its container when the
/// closing fence is missing; that is reported as an error instead.
fn code_blocks(text: &str) -> Result<Vec<Range<usize>>, FormatError> {
    let mut blocks = Vec::new();
    for (event, range) in Parser::new(text).into_offset_iter() {
        if let Event::Start(Tag::CodeBlock(kind)) = event {
            if matches!(kind, CodeBlockKind::Fenced(_)) && !has_closing_fence(&text[range.clone()]) {
                return Err(FormatError::UnclosedFence {
                    line: text[..range.start].matches('\n').count() + 1,
                });
            }
            blocks.push(range);
        }
    }
    Ok(blocks)
}

/// Append one blank line unless the document is empty or already ends blank.
fn push_blank(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
}

/// Split a fence line into marker, marker length and info string.
///
/// Container prefixes (indentation, `>`) are skipped.
fn parse_fence(line: &str) -> Option<(char, usize, &str)> {
    let rest = line.trim_start_matches(|c: char| c == ' ' || c == '\t' || c == '>');
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    Some((marker, len, &rest[len..]))
}

/// Whether the source of a fenced block ends with a matching closing fence.
fn has_closing_fence(block: &str) -> bool {
    let mut lines = block.trim_end_matches('\n').lines();
    let Some((marker, len, _)) = lines.next().and_then(parse_fence) else {
        return false;
    };
    match lines.last().and_then(parse_fence) {
        Some((m, l, info)) => m == marker && l >= len && info.trim().is_empty(),
        None => false,
    }
}
