//! Line tokenizer shared by the OBJ, MTL and control-point readers.
//!
//! Numeric extraction follows stream semantics: once a field fails to parse,
//! it and every later field on the same line read as zero.

use std::str::SplitWhitespace;

/// Whitespace-delimited tokens of a single line.
pub struct Tokens<'a> {
    /// Unread part of the line.
    remainder: &'a str,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            remainder: line,
            failed: false,
        }
    }

    /// Record marker (first token). `None` for blank lines.
    pub fn keyword(&mut self) -> Option<&'a str> {
        self.next_token()
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        let trimmed = self.remainder.trim_start();
        if trimmed.is_empty() {
            self.remainder = trimmed;
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.remainder = rest;
        Some(token)
    }

    /// Next float, or `0.0` if this or an earlier field was missing/malformed.
    pub fn next_f32(&mut self) -> f32 {
        if self.failed {
            return 0.0;
        }
        match self.next_token().map(str::parse::<f32>) {
            Some(Ok(value)) => value,
            Some(Err(_)) | None => {
                self.failed = true;
                0.0
            }
        }
    }

    pub fn vec2(&mut self) -> [f32; 2] {
        [self.next_f32(), self.next_f32()]
    }

    pub fn vec3(&mut self) -> [f32; 3] {
        [self.next_f32(), self.next_f32(), self.next_f32()]
    }

    /// `true` once a numeric field on this line failed to parse.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Everything after the tokens consumed so far, trimmed.
    pub fn rest(&mut self) -> &'a str {
        std::mem::take(&mut self.remainder).trim()
    }

    /// Consumes the remaining tokens.
    pub fn remaining(self) -> SplitWhitespace<'a> {
        self.remainder.split_whitespace()
    }
}

/// Splits a descriptor such as `1//3` on `delim`, keeping empty sub-fields.
pub fn split_fields(token: &str, delim: char) -> impl Iterator<Item = &str> {
    token.split(delim)
}
