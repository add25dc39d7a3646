//! Built-in passthrough compiler
//!
//! Used when no external compiler is configured. The source is emitted as CSS
//! unchanged (or minified with `compress`), after checking that braces,
//! brackets and parentheses balance outside of strings and comments. This
//! catches the most common editing mistakes with a precise location.

use crate::domain::ports::{CompileError, CompileRequest, StylesheetCompiler};

/// Compiler that validates structure and copies the source through
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompiler;

impl PassthroughCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl StylesheetCompiler for PassthroughCompiler {
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<String, CompileError> {
        let filename = request
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        check_balanced(source).map_err(|(line, column, message)| CompileError {
            filename,
            line,
            column,
            message,
            extract: extract_lines(source, line),
        })?;

        if request.compress {
            Ok(compress(source))
        } else {
            Ok(source.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Code,
    Str { quote: char, line: usize, column: usize },
    Block { line: usize, column: usize },
    Line,
}

fn closer(open: char) -> char {
    match open {
        '{' => '}',
        '(' => ')',
        _ => ']',
    }
}

/// Returns `(line, column, message)` of the first structural error
fn check_balanced(source: &str) -> Result<(), (usize, usize, String)> {
    let mut stack: Vec<(char, usize, usize)> = Vec::new();
    let mut state = State::Code;
    let mut chars = source.chars().peekable();
    let (mut line, mut column) = (1usize, 0usize);

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }

        match state {
            State::Code => match c {
                '"' | '\'' => {
                    state = State::Str {
                        quote: c,
                        line,
                        column,
                    }
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = State::Block { line, column };
                    chars.next();
                    column += 1;
                }
                // `//` inside url(...) is part of the URL
                '/' if chars.peek() == Some(&'/') && !stack.iter().any(|(o, ..)| *o == '(') => {
                    state = State::Line;
                }
                '{' | '(' | '[' => stack.push((c, line, column)),
                '}' | ')' | ']' => match stack.pop() {
                    Some((open, ..)) if closer(open) == c => {}
                    _ => return Err((line, column, format!("unexpected `{c}`"))),
                },
                _ => {}
            },
            State::Str { quote, line: l, column: col } => {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        if next == '\n' {
                            line += 1;
                            column = 0;
                        } else {
                            column += 1;
                        }
                    }
                } else if c == quote {
                    state = State::Code;
                } else if c == '\n' {
                    return Err((l, col, "unterminated string".to_string()));
                }
            }
            State::Block { .. } => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    column += 1;
                    state = State::Code;
                }
            }
            State::Line => {
                if c == '\n' {
                    state = State::Code;
                }
            }
        }
    }

    match state {
        State::Str { line, column, .. } => {
            return Err((line, column, "unterminated string".to_string()))
        }
        State::Block { line, column } => {
            return Err((line, column, "unterminated comment".to_string()))
        }
        State::Code | State::Line => {}
    }

    match stack.pop() {
        Some((open, line, column)) => Err((
            line,
            column,
            format!("missing closing `{}`", closer(open)),
        )),
        None => Ok(()),
    }
}

/// The error line with one line of context on each side
fn extract_lines(source: &str, line: usize) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    let first = line.saturating_sub(2);
    let last = line.min(lines.len().saturating_sub(1));
    if first > last {
        return Vec::new();
    }
    lines[first..=last].iter().map(|l| l.to_string()).collect()
}

/// Remove comments and insignificant whitespace
fn compress(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut pending_space = false;
    let mut paren_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
                while let Some(s) = chars.next() {
                    out.push(s);
                    if s == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if s == c {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for s in chars.by_ref() {
                    if prev == '*' && s == '/' {
                        break;
                    }
                    prev = s;
                }
                pending_space = true;
            }
            '/' if chars.peek() == Some(&'/') && paren_depth == 0 => {
                for s in chars.by_ref() {
                    if s == '\n' {
                        break;
                    }
                }
                pending_space = true;
            }
            c if c.is_whitespace() => pending_space = true,
            _ => {
                if c == '(' {
                    paren_depth += 1;
                } else if c == ')' {
                    paren_depth = paren_depth.saturating_sub(1);
                }
                flush_space(&mut out, &mut pending_space, c);
                if c == '}' && out.ends_with(';') {
                    out.pop();
                }
                out.push(c);
            }
        }
    }

    out
}

fn flush_space(out: &mut String, pending_space: &mut bool, next: char) {
    if *pending_space {
        let after_tight = out
            .chars()
            .last()
            .map(|last| matches!(last, '{' | '}' | ';' | ',' | '>' | '('))
            .unwrap_or(true);
        let before_tight = matches!(next, '{' | '}' | ';' | ',' | '>' | ')');
        if !after_tight && !before_tight {
            out.push(' ');
        }
        *pending_space = false;
    }
}
