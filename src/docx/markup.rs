//! Plain text to document blocks, with a deliberately tiny markup subset.
//!
//! * Blocks are separated by a blank line (`"\n\n"`).
//! * A block starting with `#` is a heading; the number of leading `#`
//!   gives the level, capped at 3.
//! * Any other block is a paragraph whose lines are joined by line breaks.
//! * Within a line, `**bold**` is matched first, then `*italic*` in what
//!   remains. Matching is non-greedy and first-come; markers are not nested
//!   and cannot be escaped, so stray asterisks can pair up unexpectedly
//!   (`2 * 3 * 4` italicizes ` 3 `).

use regex::Regex;
use std::sync::LazyLock;

use super::model::{Block, Paragraph, Run};

const MAX_HEADING_LEVEL: usize = 3;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("valid bold pattern"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*.*?\*").expect("valid italic pattern"));

/// Split body text into headings and paragraphs
pub fn layout(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    for block in text.split("\n\n") {
        let trimmed = block.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('#') {
            let without_marks = trimmed.trim_start_matches('#');
            let level = (trimmed.len() - without_marks.len()).min(MAX_HEADING_LEVEL);
            blocks.push(Block::Heading {
                level: level as u8,
                text: without_marks.trim().to_string(),
            });
            continue;
        }

        let mut paragraph = Paragraph::new();
        for (i, line) in block.split('\n').enumerate() {
            if i > 0 {
                paragraph.push(Run::line_break());
            }
            let line = line.trim();
            if !line.is_empty() {
                paragraph.runs.extend(inline_runs(line));
            }
        }
        blocks.push(Block::Paragraph(paragraph));
    }

    blocks
}

/// Turn one line into runs, applying bold then italic markers.
///
/// Segments that end up empty (e.g. a lone `*` consumed as an italic
/// marker) produce no run.
pub fn inline_runs(line: &str) -> Vec<Run> {
    let mut runs = Vec::new();

    for part in split_keeping_matches(&BOLD, line) {
        if part.starts_with("**") && part.ends_with("**") {
            push_nonempty(&mut runs, Run::text(inner(part, 2)).bold());
            continue;
        }

        for italic_part in split_keeping_matches(&ITALIC, part) {
            if italic_part.starts_with('*')
                && italic_part.ends_with('*')
                && !italic_part.starts_with("**")
            {
                push_nonempty(&mut runs, Run::text(inner(italic_part, 1)).italic());
            } else {
                push_nonempty(&mut runs, Run::text(italic_part));
            }
        }
    }

    runs
}

/// Split around every match, keeping the matches in place
fn split_keeping_matches<'t>(pattern: &Regex, text: &'t str) -> Vec<&'t str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        parts.push(&text[last..m.start()]);
        parts.push(m.as_str());
        last = m.end();
    }
    parts.push(&text[last..]);
    parts
}

/// Strip `marker_len` bytes from both ends; too-short input yields ""
fn inner(part: &str, marker_len: usize) -> &str {
    if part.len() >= marker_len * 2 {
        &part[marker_len..part.len() - marker_len]
    } else {
        ""
    }
}

fn push_nonempty(runs: &mut Vec<Run>, run: Run) {
    if !run.text.is_empty() {
        runs.push(run);
    }
}
