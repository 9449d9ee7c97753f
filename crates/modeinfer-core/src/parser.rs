//! Parser for ground atoms
//!
//! Accepts one atom per line in the dataset syntax
//!
//! ```text
//! atom       := ws identifier ws '(' ws identifier (ws ',' ws identifier)* ws ')' ws '.' rest
//! identifier := [A-Za-z0-9_]+
//! ```
//!
//! Whitespace inside the parentheses is dropped and anything after the closing
//! `).` is ignored.

use crate::error::{InferError, InferResult, ResultExt};
use modeinfer_types::GroundAtom;
use tracing::trace;

/// Parse a single ground atom such as `father(harrypotter, jamespotter).`
pub fn parse_atom(text: &str) -> InferResult<GroundAtom> {
    AtomScanner::new(text).scan()
}

/// Line handling applied by [`parse_atoms`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip lines that are empty after trimming
    pub skip_blank_lines: bool,
    /// Skip lines starting with this prefix (after leading whitespace)
    pub comment_prefix: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { skip_blank_lines: true, comment_prefix: Some("%".to_string()) }
    }
}

impl ParseOptions {
    /// Options that hand every line to the parser
    pub fn strict() -> Self {
        Self { skip_blank_lines: false, comment_prefix: None }
    }

    fn skips(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        if self.skip_blank_lines && trimmed.is_empty() {
            return true;
        }
        match &self.comment_prefix {
            Some(prefix) if !prefix.is_empty() => trimmed.starts_with(prefix.as_str()),
            _ => false,
        }
    }
}

/// Parse every line of one collection, attaching the collection name and line
/// number to the first syntax error.
pub fn parse_atoms<'a, I>(
    lines: I,
    collection: &str,
    options: &ParseOptions,
) -> InferResult<Vec<GroundAtom>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut atoms = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        if options.skips(line) {
            trace!(collection, line = index + 1, "Skipping line");
            continue;
        }
        atoms.push(parse_atom(line).with_line_context(collection, index + 1)?);
    }
    Ok(atoms)
}

struct AtomScanner<'a> {
    text: &'a str,
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl<'a> AtomScanner<'a> {
    fn new(text: &'a str) -> Self {
        let input: Vec<char> = text.chars().collect();
        let current_char = input.first().copied();
        Self { text, input, position: 0, current_char }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> InferError {
        InferError::syntax(self.text, self.position, message)
    }

    fn identifier(&mut self, what: &str) -> InferResult<String> {
        let mut ident = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(match self.current_char {
                Some(ch) => self.error(format!("expected {what}, found '{ch}'")),
                None => self.error(format!("expected {what}, found end of line")),
            });
        }
        Ok(ident)
    }

    fn expect(&mut self, expected: char, context: &str) -> InferResult<()> {
        match self.current_char {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}' {context}, found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}' {context}, found end of line"))),
        }
    }

    fn scan(mut self) -> InferResult<GroundAtom> {
        self.skip_whitespace();
        let head = self.identifier("predicate symbol")?;
        self.skip_whitespace();
        self.expect('(', "after predicate symbol")?;

        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            args.push(self.identifier("constant")?);
            self.skip_whitespace();
            match self.current_char {
                Some(',') => self.advance(),
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(ch) => return Err(self.error(format!("expected ',' or ')', found '{ch}'"))),
                None => return Err(self.error("unbalanced parentheses")),
            }
        }

        self.skip_whitespace();
        self.expect('.', "after ')'")?;
        Ok(GroundAtom { head, args })
    }
}
