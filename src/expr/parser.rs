//! Recursive-descent parser.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := signed (('*' | '/' | '%') signed)*
//! signed  := ('+' | '-') signed | power
//! power   := primary ('^' signed)?
//! primary := NUMBER | IDENT '(' args ')' | '(' sum ')'
//! args    := (sum (',' sum)*)?
//! ```
//!
//! `^` binds tighter than a leading sign and is right-associative, so
//! `-2^2` is `-(2^2)` and `2^3^2` is `2^(3^2)`.
//!
//! Both the parser's recursion and the height of the resulting tree are
//! capped at [`MAX_DEPTH`], so evaluating or dropping a parsed tree never
//! runs out of stack.

use crate::error::ExprError;
use crate::expr::ast::{BinaryOp, Expr, UnaryOp};
use crate::expr::functions::Function;
use crate::expr::lexer::{Token, TokenKind, tokenize};

/// Deepest nesting accepted: parentheses, calls, signs and powers, and
/// the height of operator chains.
pub const MAX_DEPTH: usize = 256;

/// Parses `source` into an expression tree.
///
/// # Errors
///
/// Returns the first lexical or syntactic error, positioned by
/// character offset. Input nested deeper than [`MAX_DEPTH`] is
/// [`ExprError::TooDeep`].
///
/// # Examples
///
/// ```
/// use calcpad::expr::parse;
///
/// let expr = parse("1 + 2 × 3").unwrap();
/// assert_eq!(expr.to_string(), "(1 + (2 * 3))");
/// ```
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    let node = parser.sum()?;
    match parser.peek() {
        None => Ok(node.expr),
        Some(token) => Err(unexpected(token)),
    }
}

fn unexpected(token: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        found: token.kind.to_string(),
        offset: token.offset,
    }
}

/// A subtree and its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    const fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }

    /// Wraps `expr`, whose tallest child is `child_height`, checking the
    /// height cap.
    fn parent(expr: Expr, child_height: usize, offset: usize) -> Result<Self, ExprError> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            return Err(ExprError::TooDeep { offset });
        }
        Ok(Self { expr, height })
    }

    fn binary(op: BinaryOp, left: Self, right: Self, offset: usize) -> Result<Self, ExprError> {
        let child_height = left.height.max(right.height);
        Self::parent(Expr::binary(op, left.expr, right.expr), child_height, offset)
    }
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Current recursion nesting.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn peek_offset(&self) -> usize {
        self.peek().map_or(0, |token| token.offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Consumes the next token if its kind equals `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Enters one nesting level for the construct starting at `offset`.
    const fn enter(&mut self, offset: usize) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep { offset });
        }
        self.depth += 1;
        Ok(())
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    fn sum(&mut self) -> Result<Node, ExprError> {
        let mut left = self.product()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            let offset = self.peek_offset();
            self.index += 1;
            let right = self.product()?;
            left = Node::binary(op, left, right, offset)?;
        }
    }

    fn product(&mut self) -> Result<Node, ExprError> {
        let mut left = self.signed()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => return Ok(left),
            };
            let offset = self.peek_offset();
            self.index += 1;
            let right = self.signed()?;
            left = Node::binary(op, left, right, offset)?;
        }
    }

    fn signed(&mut self) -> Result<Node, ExprError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        let offset = self.peek_offset();
        self.index += 1;

        self.enter(offset)?;
        let operand = self.signed()?;
        self.leave();

        Node::parent(Expr::unary(op, operand.expr), operand.height, offset)
    }

    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.peek_kind() != Some(&TokenKind::Caret) {
            return Ok(base);
        }
        let offset = self.peek_offset();
        self.index += 1;

        self.enter(offset)?;
        let exponent = self.signed()?;
        self.leave();

        Node::binary(BinaryOp::Pow, base, exponent, offset)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let token = self.advance().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Node::leaf(Expr::Number(value))),
            TokenKind::LParen => {
                self.enter(token.offset)?;
                let inner = self.sum()?;
                self.close_paren(token.offset)?;
                self.leave();
                Ok(inner)
            }
            TokenKind::Ident(ref name) => self.call(name, token.offset),
            _ => Err(unexpected(&token)),
        }
    }

    fn call(&mut self, name: &str, offset: usize) -> Result<Node, ExprError> {
        let function: Function = name.parse().map_err(|()| ExprError::UnknownIdentifier {
            name: name.to_string(),
            offset,
        })?;

        let open = match self.advance() {
            Some(Token {
                kind: TokenKind::LParen,
                offset: open,
            }) => open,
            Some(token) => return Err(unexpected(&token)),
            None => return Err(ExprError::UnexpectedEnd),
        };

        self.enter(open)?;
        let mut args = Vec::new();
        let mut child_height = 0;
        if !self.eat(&TokenKind::RParen) {
            loop {
                let arg = self.sum()?;
                child_height = child_height.max(arg.height);
                args.push(arg.expr);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.close_paren(open)?;
        }
        self.leave();

        if args.len() != function.arity() {
            return Err(ExprError::Arity {
                function: function.name(),
                expected: function.arity(),
                found: args.len(),
            });
        }

        Node::parent(Expr::Call { function, args }, child_height, offset)
    }

    /// Requires a `)` closing the parenthesis opened at `open`.
    fn close_paren(&mut self, open: usize) -> Result<(), ExprError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            Some(token) => Err(unexpected(&token)),
            None => Err(ExprError::UnclosedParen { offset: open }),
        }
    }
}
