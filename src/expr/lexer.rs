//! Tokenizer for keypad expressions.
//!
//! Display symbols are folded into evaluator tokens here (`×` and `*`
//! both become [`TokenKind::Star`], `**` becomes [`TokenKind::Caret`]),
//! so no textual substitution ever runs over user literals.

use crate::error::ExprError;
use std::fmt;

/// Kinds of tokens produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal (decimal, exponent, or `0x`/`0b`/`0o` prefixed).
    Number(f64),
    /// Bare identifier, resolved against the function table by the parser.
    Ident(String),
    /// `+`
    Plus,
    /// `-` or `−`
    Minus,
    /// `*` or `×`
    Star,
    /// `/` or `÷`
    Slash,
    /// `%`
    Percent,
    /// `^` or `**`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Ident(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Caret => f.write_str("^"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// Character offset in the source.
    pub offset: usize,
}

/// Splits `source` into tokens.
///
/// # Errors
///
/// Returns [`ExprError::UnexpectedChar`] for characters outside the
/// expression alphabet and [`ExprError::InvalidNumber`] for malformed
/// literals.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Scanner {
    chars: Vec<char>,
    index: usize,
}

const fn is_radix_prefix(c: char) -> bool {
    matches!(c, 'x' | 'X' | 'b' | 'B' | 'o' | 'O')
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
        }
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).copied()
    }

    /// Number of consecutive characters from `from` satisfying `predicate`.
    fn count_from<P: Fn(char) -> bool>(&self, from: usize, predicate: P) -> usize {
        self.chars[from..]
            .iter()
            .take_while(|&&c| predicate(c))
            .count()
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        self.index += self.count_from(self.index, char::is_whitespace);
    }

    fn next_token(&mut self) -> Result<Option<Token>, ExprError> {
        self.skip_whitespace();
        let offset = self.index;
        let Some(current) = self.peek_at(0) else {
            return Ok(None);
        };

        let kind = if current.is_ascii_digit() || current == '.' {
            self.number()?
        } else if current.is_alphabetic() {
            self.identifier()
        } else {
            let kind = match (current, self.peek_at(1)) {
                ('*', Some('*')) => {
                    self.index += 1;
                    TokenKind::Caret
                }
                ('+', _) => TokenKind::Plus,
                ('-' | '−', _) => TokenKind::Minus,
                ('*' | '×', _) => TokenKind::Star,
                ('/' | '÷', _) => TokenKind::Slash,
                ('%', _) => TokenKind::Percent,
                ('^', _) => TokenKind::Caret,
                ('(', _) => TokenKind::LParen,
                (')', _) => TokenKind::RParen,
                (',', _) => TokenKind::Comma,
                (ch, _) => return Err(ExprError::UnexpectedChar { ch, offset }),
            };
            self.index += 1;
            kind
        };

        Ok(Some(Token { kind, offset }))
    }

    fn identifier(&mut self) -> TokenKind {
        let start = self.index;
        self.index += self.count_from(start, |c| c.is_alphanumeric() || c == '_');
        TokenKind::Ident(self.text(start, self.index))
    }

    fn number(&mut self) -> Result<TokenKind, ExprError> {
        let start = self.index;

        if self.peek_at(0) == Some('0') && self.peek_at(1).is_some_and(is_radix_prefix) {
            return self.radix_number(start);
        }

        self.index += self.count_from(start, |c| c.is_ascii_digit() || c == '.');

        // Exponent only when digits follow, so `2e` leaves `e` for the parser.
        if matches!(self.peek_at(0), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                let digits_from = self.index + 1 + sign;
                self.index = digits_from + self.count_from(digits_from, |c| c.is_ascii_digit());
            }
        }

        let text = self.text(start, self.index);
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ExprError::InvalidNumber {
                text,
                offset: start,
            })
    }

    #[allow(clippy::cast_precision_loss)]
    fn radix_number(&mut self, start: usize) -> Result<TokenKind, ExprError> {
        let radix = match self.peek_at(1) {
            Some('x' | 'X') => 16,
            Some('b' | 'B') => 2,
            _ => 8,
        };
        let digits_from = start + 2;
        self.index = digits_from + self.count_from(digits_from, char::is_alphanumeric);

        let digits = self.text(digits_from, self.index);
        u128::from_str_radix(&digits, radix)
            .map(|value| TokenKind::Number(value as f64))
            .map_err(|_| ExprError::InvalidNumber {
                text: self.text(start, self.index),
                offset: start,
            })
    }
}
