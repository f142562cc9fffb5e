//! The text buffer handed to every rule.
//!
//! Besides the trimmed source, [`SourceText`] carries a *masked* copy in which
//! comments and the contents of string, text-block and char literals are
//! blanked out with spaces. The masked copy has exactly the same byte length,
//! so offsets found in it are valid offsets into the original text. Literal
//! delimiters are kept, which lets rules still see that a literal is there.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Char,
}

/// A literal whose closing delimiter never showed up on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnclosedLiteral {
    pub kind: LiteralKind,
    /// Offset of the opening delimiter.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    TextBlock,
    Literal(LiteralKind, usize),
}

#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    masked: String,
    unclosed: Vec<UnclosedLiteral>,
}

impl<'a> SourceText<'a> {
    /// Trim `source` and build the masked view.
    pub fn new(source: &'a str) -> Self {
        let text = source.trim();
        let (masked, unclosed) = mask(text);

        Self {
            text,
            masked,
            unclosed,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn masked(&self) -> &str {
        &self.masked
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn unclosed_literals(&self) -> &[UnclosedLiteral] {
        &self.unclosed
    }

    /// Lines of the raw text with the offset of their first byte.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        line_spans(self.text)
    }

    /// Lines of the masked text with the offset of their first byte.
    pub fn masked_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        line_spans(&self.masked)
    }

    /// Offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.masked[..offset].rfind('\n').map_or(0, |nl| nl + 1)
    }

    /// The first non-blank masked line that starts after `offset`, trimmed.
    pub fn next_code_line(&self, offset: usize) -> Option<&str> {
        let rest = self.masked.get(offset..)?;
        let rest = &rest[rest.find('\n')? + 1..];
        rest.lines().map(str::trim).find(|line| !line.is_empty())
    }

    /// Offset of the `}` closing the `{` at `open`, searched in the masked
    /// text.
    pub fn matching_brace(&self, open: usize) -> Option<usize> {
        let bytes = self.masked.as_bytes();
        if bytes.get(open) != Some(&b'{') {
            return None;
        }

        let mut depth = 0usize;
        for (i, &b) in bytes.iter().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Offset of the `{` opened by the `}` at `close`, searched backwards in
    /// the masked text.
    pub fn matching_open_brace(&self, close: usize) -> Option<usize> {
        let bytes = self.masked.as_bytes();
        if bytes.get(close) != Some(&b'}') {
            return None;
        }

        let mut depth = 0usize;
        for (i, &b) in bytes[..=close].iter().enumerate().rev() {
            match b {
                b'}' => depth += 1,
                b'{' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Byte range of the statement or block that follows a header ending at
    /// `header_end`.
    ///
    /// A `{` before the next `;` opens a block that runs to its matching `}`,
    /// or to the end of the text if it is never closed. Otherwise the body is
    /// the single statement up to and including the next `;`.
    pub fn body_after(&self, header_end: usize) -> Range<usize> {
        let len = self.masked.len();
        let start = header_end.min(len);
        let rest = &self.masked[start..];

        let brace = rest.find('{');
        let semi = rest.find(';');
        match (brace, semi) {
            (Some(b), semi) if semi.is_none_or(|s| b < s) => {
                let open = start + b;
                let close = self.matching_brace(open).map_or(len, |c| c + 1);
                open..close
            }
            (_, Some(s)) => start..start + s + 1,
            _ => start..len,
        }
    }
}

fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

fn blank(out: &mut String, ch: char) {
    if ch == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
    }
}

fn mask(text: &str) -> (String, Vec<UnclosedLiteral>) {
    let mut out = String::with_capacity(text.len());
    let mut unclosed = Vec::new();
    let mut state = State::Code;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match state {
            State::Code => match ch {
                '/' if matches!(chars.peek(), Some((_, '/'))) => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' if text[i..].starts_with("\"\"\"") => {
                    chars.next();
                    chars.next();
                    out.push_str("\"\"\"");
                    state = State::TextBlock;
                }
                '"' => {
                    out.push('"');
                    state = State::Literal(LiteralKind::String, i);
                }
                '\'' => {
                    out.push('\'');
                    state = State::Literal(LiteralKind::Char, i);
                }
                _ => out.push(ch),
            },
            State::LineComment => {
                blank(&mut out, ch);
                if ch == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if ch == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
            State::TextBlock => {
                if ch == '"' && text[i..].starts_with("\"\"\"") {
                    chars.next();
                    chars.next();
                    out.push_str("\"\"\"");
                    state = State::Code;
                } else if ch == '\\' {
                    blank(&mut out, ch);
                    if let Some((_, escaped)) = chars.next() {
                        blank(&mut out, escaped);
                    }
                } else {
                    blank(&mut out, ch);
                }
            }
            State::Literal(kind, start) => {
                let delimiter = match kind {
                    LiteralKind::String => '"',
                    LiteralKind::Char => '\'',
                };
                match ch {
                    '\n' => {
                        unclosed.push(UnclosedLiteral {
                            kind,
                            offset: start,
                        });
                        out.push('\n');
                        state = State::Code;
                    }
                    '\\' => {
                        blank(&mut out, ch);
                        if let Some(&(_, escaped)) = chars.peek()
                            && escaped != '\n'
                        {
                            chars.next();
                            blank(&mut out, escaped);
                        }
                    }
                    c if c == delimiter => {
                        out.push(c);
                        state = State::Code;
                    }
                    _ => blank(&mut out, ch),
                }
            }
        }
    }

    if let State::Literal(kind, start) = state {
        unclosed.push(UnclosedLiteral {
            kind,
            offset: start,
        });
    }

    (out, unclosed)
}
