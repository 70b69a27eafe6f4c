use crate::graph::dot::error::DotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Bare identifier or numeral.
    Ident(String),
    /// Double-quoted string, escapes already resolved.
    Quoted(String),
    /// `<...>` HTML string, outer brackets stripped.
    Html(String),

    Strict,
    Graph,
    Digraph,
    Node,
    Edge,
    Subgraph,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Eq,
    Colon,
    Plus,

    /// `->`
    Arrow,
    /// `--`
    Line,

    Eof,
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_id_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || !ch.is_ascii()
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, DotError> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut at_line_start = true;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '\n' {
            at_line_start = true;
            i += 1;
            continue;
        }
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // `#` lines are C preprocessor output and are discarded.
        if c == '#' && at_line_start {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        at_line_start = false;

        let start = i;

        if input[i..].starts_with("//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if input[i..].starts_with("/*") {
            let Some(rel) = input[i + 2..].find("*/") else {
                return Err(DotError::new(start, "unterminated block comment"));
            };
            i += 2 + rel + 2;
            continue;
        }

        // Edge operators take precedence over negative numerals.
        if input[i..].starts_with("->") {
            i += 2;
            out.push(Token {
                kind: TokenKind::Arrow,
                span: Span { start, end: i },
            });
            continue;
        }
        if input[i..].starts_with("--") {
            i += 2;
            out.push(Token {
                kind: TokenKind::Line,
                span: Span { start, end: i },
            });
            continue;
        }

        // Numeral: -?(.[0-9]+ | [0-9]+(.[0-9]*)?)
        let digit_at = |j: usize| j < bytes.len() && bytes[j].is_ascii_digit();
        let numeral_start = if c == '-' { i + 1 } else { i };
        if digit_at(numeral_start)
            || (numeral_start < bytes.len()
                && bytes[numeral_start] == b'.'
                && digit_at(numeral_start + 1))
        {
            i = numeral_start;
            while digit_at(i) {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                while digit_at(i) {
                    i += 1;
                }
            }
            out.push(Token {
                kind: TokenKind::Ident(input[start..i].to_owned()),
                span: Span { start, end: i },
            });
            continue;
        }

        let ch = input[i..].chars().next().unwrap_or(c);
        if is_id_start(ch) {
            i += ch.len_utf8();
            while let Some(next) = input[i..].chars().next() {
                if !is_id_continue(next) {
                    break;
                }
                i += next.len_utf8();
            }
            let s = &input[start..i];
            // Keywords are case-independent.
            let kind = match s.to_ascii_lowercase().as_str() {
                "strict" => TokenKind::Strict,
                "graph" => TokenKind::Graph,
                "digraph" => TokenKind::Digraph,
                "node" => TokenKind::Node,
                "edge" => TokenKind::Edge,
                "subgraph" => TokenKind::Subgraph,
                _ => TokenKind::Ident(s.to_owned()),
            };
            out.push(Token {
                kind,
                span: Span { start, end: i },
            });
            continue;
        }

        if c == '"' {
            i += 1;
            let mut value = String::new();
            loop {
                let Some(next) = input[i..].chars().next() else {
                    return Err(DotError::new(start, "unterminated quoted string"));
                };
                match next {
                    '"' => {
                        i += 1;
                        break;
                    }
                    '\\' if input[i + 1..].starts_with('\\') => {
                        value.push('\\');
                        i += 2;
                    }
                    '\\' if input[i + 1..].starts_with('"') => {
                        value.push('"');
                        i += 2;
                    }
                    '\\' if input[i + 1..].starts_with("\r\n") => i += 3,
                    '\\' if input[i + 1..].starts_with('\n') => i += 2,
                    other => {
                        value.push(other);
                        i += other.len_utf8();
                    }
                }
            }
            out.push(Token {
                kind: TokenKind::Quoted(value),
                span: Span { start, end: i },
            });
            continue;
        }

        if c == '<' {
            let mut depth = 0usize;
            loop {
                if i >= bytes.len() {
                    return Err(DotError::new(start, "unterminated HTML string"));
                }
                match bytes[i] {
                    b'<' => depth += 1,
                    b'>' => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            out.push(Token {
                kind: TokenKind::Html(input[start + 1..i - 1].to_owned()),
                span: Span { start, end: i },
            });
            continue;
        }

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Eq,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            _ => {
                return Err(DotError::new(start, format!("unexpected character '{ch}'")));
            }
        };
        i += 1;
        out.push(Token {
            kind,
            span: Span { start, end: i },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });

    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/unit/graph/dot/lexer.rs"]
mod tests;
