//! Character-stream lexer (spec §4.1).

use crate::diag::{Diagnostic, Severity};
use crate::span::Span;

use super::token::{IdentKind, Keyword, Punct, Token, TokenKind};

/// Lexes a byte slice into a token stream.
///
/// The lexer never aborts: every lexical irregularity (`lex-unterminated-string`,
/// `lex-invalid-number`, `lex-stray-character`) is recorded as a `Severe`
/// diagnostic and a synthetic [`TokenKind::Invalid`] token is emitted so the
/// parser's own recovery can take over; lexing then resumes at the next
/// whitespace boundary. This recovery is unconditional, independent of the
/// configured [`crate::diag::StrictnessLevel`] — strictness only gates
/// resolver-phase fallback *lookups*, never structural error recovery
/// (spec §4.2: "this guarantee holds at all strictness levels").
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    module: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a [u8], module: impl Into<String>) -> Self {
        Self {
            src,
            pos: 0,
            module: module.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Lexes the entire input into a token vector (always terminated by `Eof`).
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn emit_diag(&mut self, severity: Severity, code: &'static str, pos: usize, message: String) {
        // Line/column are filled in by the caller that owns the LineTable
        // (the parser / lowering stage); the lexer itself records byte
        // offsets only, which is all it has cheaply available per-token.
        self.diagnostics.push(Diagnostic::new(
            severity,
            code,
            self.module.clone(),
            0,
            pos as u32,
            message,
        ));
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    // Comment ends at the next "--" or end-of-line.
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        if b == b'-' && self.peek_at(1) == Some(b'-') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let start = self.pos;
        let Some(b) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::point(start as u32));
        };

        if b.is_ascii_alphabetic() {
            return self.lex_ident_or_keyword(start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'\'' {
            return self.lex_radix_literal(start);
        }
        if b == b'"' {
            return self.lex_quoted_string(start);
        }

        self.lex_punct(start)
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Token {
        // letter (letter | digit | hyphen | underscore)*
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        let span = Span::new(start as u32, self.pos as u32);

        if let Some(kw) = Keyword::lookup(&text) {
            return Token::new(TokenKind::Keyword(kw), span);
        }

        let first = text.as_bytes()[0];
        let kind = if first.is_ascii_uppercase() {
            IdentKind::TypeRef
        } else {
            IdentKind::ValueRef
        };
        Token::new(TokenKind::Ident { text, kind }, span)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("");
        let span = Span::new(start as u32, self.pos as u32);
        match text.parse::<i128>() {
            Ok(value) => Token::new(TokenKind::Int(value), span),
            Err(_) => {
                self.emit_diag(
                    Severity::Severe,
                    "lex-invalid-number",
                    start,
                    format!("invalid numeric literal {text:?}"),
                );
                Token::new(TokenKind::Invalid, span)
            }
        }
    }

    /// `'...'H` or `'...'B` radix literals.
    fn lex_radix_literal(&mut self, start: usize) -> Token {
        self.pos += 1; // opening quote
        let digits_start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\'' {
                break;
            }
            self.pos += 1;
        }
        if self.peek() != Some(b'\'') {
            self.emit_diag(
                Severity::Severe,
                "lex-unterminated-string",
                start,
                "unterminated radix literal".to_owned(),
            );
            self.recover_to_whitespace();
            return Token::new(TokenKind::Invalid, Span::new(start as u32, self.pos as u32));
        }
        let digits = &self.src[digits_start..self.pos];
        self.pos += 1; // closing quote
        let radix_char = self.peek();
        self.pos += 1;
        let span = Span::new(start as u32, self.pos as u32);

        let digits_str = String::from_utf8_lossy(digits);
        match radix_char {
            Some(b'H') | Some(b'h') => match hex_to_bytes(&digits_str) {
                Some(bytes) => Token::new(TokenKind::HexLiteral(bytes), span),
                None => {
                    self.emit_diag(
                        Severity::Severe,
                        "lex-invalid-number",
                        start,
                        format!("invalid hex literal '{digits_str}'H"),
                    );
                    Token::new(TokenKind::Invalid, span)
                }
            },
            Some(b'B') | Some(b'b') => match bin_to_bytes(&digits_str) {
                Some(bytes) => Token::new(TokenKind::BinLiteral(bytes), span),
                None => {
                    self.emit_diag(
                        Severity::Severe,
                        "lex-invalid-number",
                        start,
                        format!("invalid binary literal '{digits_str}'B"),
                    );
                    Token::new(TokenKind::Invalid, span)
                }
            },
            _ => {
                self.emit_diag(
                    Severity::Severe,
                    "lex-stray-character",
                    start,
                    "radix literal missing H/B suffix".to_owned(),
                );
                Token::new(TokenKind::Invalid, span)
            }
        }
    }

    fn lex_quoted_string(&mut self, start: usize) -> Token {
        self.pos += 1; // opening quote
        let content_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    self.emit_diag(
                        Severity::Severe,
                        "lex-unterminated-string",
                        start,
                        "unterminated quoted string".to_owned(),
                    );
                    let text =
                        String::from_utf8_lossy(&self.src[content_start..self.pos]).into_owned();
                    return Token::new(
                        TokenKind::QuotedString(text),
                        Span::new(start as u32, self.pos as u32),
                    );
                }
                Some(b'"') => {
                    // `""` inside a string is an escaped quote.
                    if self.peek_at(1) == Some(b'"') {
                        self.pos += 2;
                        continue;
                    }
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        let raw = String::from_utf8_lossy(&self.src[content_start..self.pos]).into_owned();
        self.pos += 1; // closing quote
        let text = raw.replace("\"\"", "\"");
        Token::new(
            TokenKind::QuotedString(text),
            Span::new(start as u32, self.pos as u32),
        )
    }

    fn lex_punct(&mut self, start: usize) -> Token {
        let b = self.src[start];
        let (kind, len) = match b {
            b':' if self.peek_at(1) == Some(b':') && self.peek_at(2) == Some(b'=') => {
                (TokenKind::Punct(Punct::Assign), 3)
            }
            b'.' if self.peek_at(1) == Some(b'.') => (TokenKind::Punct(Punct::Range), 2),
            b'{' => (TokenKind::Punct(Punct::LBrace), 1),
            b'}' => (TokenKind::Punct(Punct::RBrace), 1),
            b'(' => (TokenKind::Punct(Punct::LParen), 1),
            b')' => (TokenKind::Punct(Punct::RParen), 1),
            b',' => (TokenKind::Punct(Punct::Comma), 1),
            b';' => (TokenKind::Punct(Punct::Semicolon), 1),
            b'|' => (TokenKind::Punct(Punct::Pipe), 1),
            other => {
                self.emit_diag(
                    Severity::Severe,
                    "lex-stray-character",
                    start,
                    format!("unexpected character {:?}", other as char),
                );
                self.pos += 1;
                self.recover_to_whitespace();
                return Token::new(TokenKind::Invalid, Span::new(start as u32, self.pos as u32));
            }
        };
        self.pos = start + len;
        Token::new(kind, Span::new(start as u32, self.pos as u32))
    }

    fn recover_to_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }
}

fn hex_to_bytes(digits: &str) -> Option<Vec<u8>> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit() || b.is_ascii_whitespace()) {
        return None;
    }
    let clean: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    let padded = if clean.len() % 2 == 1 {
        format!("0{clean}")
    } else {
        clean
    };
    let mut bytes = Vec::with_capacity(padded.len() / 2);
    let chars: Vec<char> = padded.chars().collect();
    for pair in chars.chunks(2) {
        let s: String = pair.iter().collect();
        bytes.push(u8::from_str_radix(&s, 16).ok()?);
    }
    Some(bytes)
}

fn bin_to_bytes(digits: &str) -> Option<Vec<u8>> {
    let clean: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    if !clean.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    let mut bits = clean.chars().rev().collect::<Vec<_>>();
    while bits.len() % 8 != 0 {
        bits.push('0');
    }
    bits.reverse();
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks(8) {
        let s: String = chunk.iter().collect();
        bytes.push(u8::from_str_radix(&s, 2).ok()?);
    }
    Some(bytes)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
