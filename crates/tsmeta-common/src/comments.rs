//! Comment Extraction
//!
//! Comments are not part of the declaration model handed over by the front end.
//! Instead each declaration carries the raw leading trivia that precedes it
//! (whitespace and comments). This module scans that trivia into comment
//! ranges and turns the doc comment closest to the declaration into a
//! `DocComment`: leading prose plus structured `@tag` entries.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the trivia text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }
}

/// Extract all comment ranges from trivia text.
///
/// This scans the text and returns all single-line (//) and
/// multi-line (/* */) comments with their positions. Anything that is
/// neither whitespace nor a comment is skipped.
pub fn get_comment_ranges(source: &str) -> Vec<CommentRange> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    while pos < len {
        let ch = bytes[pos];

        if ch == b' ' || ch == b'\t' || ch == b'\r' || ch == b'\n' {
            pos += 1;
            continue;
        }

        if ch == b'/' && pos + 1 < len {
            let next = bytes[pos + 1];

            if next == b'/' {
                let start = pos as u32;
                pos += 2;

                while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }

                let has_trailing_new_line = pos < len;
                comments.push(CommentRange::new(
                    start,
                    pos as u32,
                    false,
                    has_trailing_new_line,
                ));

                if pos < len && bytes[pos] == b'\r' {
                    pos += 1;
                }
                if pos < len && bytes[pos] == b'\n' {
                    pos += 1;
                }
                continue;
            } else if next == b'*' {
                let start = pos as u32;
                pos += 2;

                let mut closed = false;
                while pos + 1 < len {
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        closed = true;
                        break;
                    }
                    pos += 1;
                }

                if !closed {
                    pos = len; // Unclosed comment - go to end
                }

                let has_trailing_new_line =
                    pos < len && (bytes[pos] == b'\n' || bytes[pos] == b'\r');

                comments.push(CommentRange::new(
                    start,
                    pos as u32,
                    true,
                    has_trailing_new_line,
                ));
                continue;
            }
        }

        pos += 1;
    }

    comments
}

/// Check if a comment is a JSDoc comment.
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("/**") && !text.starts_with("/***") && text != "/**/"
}

/// Check if a comment is a triple-slash directive.
pub fn is_triple_slash_directive(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("///")
}

/// Extract the content of a JSDoc comment (without the delimiters).
pub fn get_jsdoc_content(comment: &CommentRange, source: &str) -> String {
    let text = comment.get_text(source);
    if text.starts_with("/**") && text.ends_with("*/") && text.len() >= 5 {
        let inner = &text[3..text.len() - 2];
        // Remove leading * from each line
        inner
            .lines()
            .map(|line| {
                let trimmed = line.trim_start();
                match trimmed.strip_prefix('*') {
                    Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end(),
                    None => trimmed.trim_end(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    } else {
        text.to_string()
    }
}

/// Count newlines in `text`, stopping early once `limit` is exceeded.
fn count_newlines_up_to(text: &str, limit: usize) -> usize {
    let mut count = 0usize;
    for byte in text.as_bytes() {
        if *byte == b'\n' {
            count += 1;
            if count > limit {
                break;
            }
        }
    }
    count
}

/// Collect the comments that belong to the declaration following `trivia`.
///
/// Walks backwards from the end of the trivia. A comment separated from the
/// declaration (or from the comment after it) by a blank line ends the run.
/// A JSDoc block is always a run of its own.
pub fn get_attached_comments(trivia: &str) -> Vec<CommentRange> {
    let comments = get_comment_ranges(trivia);
    let mut result: Vec<CommentRange> = Vec::new();
    let mut check_pos = trivia.len() as u32;

    for comment in comments.iter().rev() {
        let text_between = &trivia[comment.end as usize..check_pos as usize];
        if count_newlines_up_to(text_between, 1) > 1 {
            break;
        }
        if is_triple_slash_directive(comment, trivia) {
            break;
        }
        let is_doc = is_jsdoc_comment(comment, trivia);
        if !result.is_empty() && (is_doc || result[0].is_multi_line) {
            break;
        }
        result.insert(0, comment.clone());
        check_pos = comment.pos;
        if is_doc {
            break;
        }
    }

    result
}

/// A structured tag inside a doc comment: `@name text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    pub text: String,
}

/// The doc comment attached to a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Prose before the first tag, if any.
    pub description: Option<String>,
    /// Tags in source order.
    pub tags: Vec<DocTag>,
}

impl DocComment {
    /// Parse the doc comment attached to the end of `trivia`.
    ///
    /// Accepts a `/** ... */` block or a run of `//` line comments. Plain
    /// `/* ... */` blocks are not documentation.
    pub fn from_trivia(trivia: &str) -> Option<DocComment> {
        let attached = get_attached_comments(trivia);
        let first = attached.first()?;

        if is_jsdoc_comment(first, trivia) {
            return Some(Self::parse_jsdoc_body(&get_jsdoc_content(first, trivia)));
        }
        if first.is_multi_line {
            return None;
        }

        let text = attached
            .iter()
            .map(|c| {
                let line = &c.get_text(trivia)[2..];
                line.strip_prefix(' ').unwrap_or(line).trim_end()
            })
            .collect::<Vec<_>>()
            .join("\n");
        let text = text.trim();
        Some(DocComment {
            description: (!text.is_empty()).then(|| text.to_string()),
            tags: Vec::new(),
        })
    }

    /// Parse JSDoc content (delimiters and leading `*` already removed).
    pub fn parse_jsdoc_body(content: &str) -> DocComment {
        let mut prose: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix('@') {
                let name_len = rest
                    .find(|c: char| c.is_whitespace() || c == '{')
                    .unwrap_or(rest.len());
                if name_len > 0 {
                    tags.push(DocTag {
                        name: rest[..name_len].to_string(),
                        text: rest[name_len..].trim().to_string(),
                    });
                    continue;
                }
            }
            match tags.last_mut() {
                Some(tag) => {
                    if !tag.text.is_empty() {
                        tag.text.push('\n');
                    }
                    tag.text.push_str(line.trim_end());
                }
                None => prose.push(line),
            }
        }

        for tag in &mut tags {
            tag.text = tag.text.trim().to_string();
        }

        let description = prose.join("\n").trim().to_string();
        DocComment {
            description: (!description.is_empty()).then_some(description),
            tags,
        }
    }

    /// Text of every tag named `name`, in source order.
    pub fn tag_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |t| t.name == name)
            .map(|t| t.text.as_str())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

#[cfg(test)]
#[path = "../tests/comments_tests.rs"]
mod tests;
