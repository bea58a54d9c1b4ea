//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and keyword-selected functions for statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by leading keyword
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{ast::Program, builder},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How deep blocks, operators and else-if arms may nest before a compile is
/// rejected. Every level is one more node between a statement and the root.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// A parser owns its lexer, so two parsers never share indentation or
/// token state. Each `feed` is a complete compile: it either fills
/// `results` or fails and leaves them empty.
pub struct Parser {
    /// Tokenizer for the text being fed
    lexer: Lexer,
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Nesting depth of the node being parsed
    depth: usize,
    /// Completed programs from the last successful feed
    results: Vec<Program>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser with its grammar tables filled in.
    ///
    /// # Arguments
    ///
    /// * `file` - Name reported in error positions, `shell` when omitted
    pub fn new(file: Option<String>) -> Self {
        let lexer = Lexer::new(file);
        let eof = eof_token(lexer.get_position());

        let mut parser = Parser {
            lexer,
            tokens: vec![eof],
            pos: 0,
            depth: 0,
            results: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Discards all parse state and results.
    pub fn reset(&mut self) {
        self.lexer.reset("");
        self.tokens = vec![eof_token(self.lexer.get_position())];
        self.pos = 0;
        self.depth = 0;
        self.results.clear();
    }

    /// Tokenizes and parses `input`.
    ///
    /// On success the completed program is available from [`Parser::results`].
    /// On failure the error is returned and no result is kept.
    pub fn feed(&mut self, input: &str) -> Result<(), Error> {
        self.results.clear();

        let outcome = self.tokenize(input).and_then(|_| self.parse_program());
        match outcome {
            Ok(program) => {
                debug!(
                    file = %self.lexer.file(),
                    statements = program.body.len(),
                    "parsed program"
                );
                self.results.push(program);
                Ok(())
            }
            Err(error) => {
                debug!(file = %self.lexer.file(), %error, "parse failed");
                self.reset();
                Err(error)
            }
        }
    }

    /// Programs produced by the most recent successful `feed`.
    pub fn results(&self) -> &[Program] {
        &self.results
    }

    /// Moves the results out of the parser.
    pub fn take_results(&mut self) -> Vec<Program> {
        std::mem::take(&mut self.results)
    }

    fn tokenize(&mut self, input: &str) -> Result<(), Error> {
        self.lexer.reset(input);
        self.tokens.clear();
        self.pos = 0;
        self.depth = 0;

        while let Some(token) = self.lexer.next_token()? {
            self.tokens.push(token);
        }
        self.tokens.push(eof_token(self.lexer.get_position()));

        debug!(tokens = self.tokens.len(), "tokenized input");
        Ok(())
    }

    fn parse_program(&mut self) -> Result<Program, Error> {
        let mut body = vec![];

        while self.has_tokens() {
            if self.current_token_kind() == TokenKind::Newline {
                self.advance();
                continue;
            }
            body.push(parse_stmt(self)?);
        }

        Ok(builder::program(body))
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The trailing `EOF` token is never stepped over.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, describing what was wanted.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - What the grammar wanted here, used in the error message
    pub fn expect_error(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            Err(self.error_expected(expected))
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with a default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let expected = format!("expected {}", expected_kind);
        self.expect_error(expected_kind, &expected)
    }

    /// Expects the keyword `keyword`.
    pub fn expect_keyword(&mut self, keyword: &str) -> Result<Token, Error> {
        if self.current_token().is_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&format!("expected `{}`", keyword)))
        }
    }

    /// Builds the error for an unexpected current token.
    pub fn error_expected(&self, expected: &str) -> Error {
        let token = self.current_token();

        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.trim_start_matches("expected ").to_string(),
            }
        } else {
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.describe(),
                message: expected.to_string(),
            }
        };

        Error::new(error, token.span.start.clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Binding power of the current token, `Default` when it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Goes one level deeper, failing past [`MAX_NESTING_DEPTH`].
    pub fn nest(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }
        Ok(())
    }

    pub fn nesting(&self) -> usize {
        self.depth
    }

    /// Returns to a depth saved with [`Parser::nesting`].
    pub fn restore_nesting(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading keyword.
    pub fn stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(None)
    }
}

fn eof_token(position: Position) -> Token {
    MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: position.clone(),
            end: position
        }
    )
}

/// Attaches the position of `token` to an error raised while building a node.
pub fn at_token<T>(result: Result<T, ErrorImpl>, token: &Token) -> Result<T, Error> {
    result.map_err(|error| Error::new(error, token.span.start.clone()))
}

/// Parses one source text into a program.
///
/// This is a shorthand for feeding a fresh [`Parser`] and taking its single
/// result.
pub fn parse(source: &str, file: Option<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(file);
    parser.feed(source)?;

    Ok(parser
        .take_results()
        .into_iter()
        .next()
        .unwrap_or_else(|| builder::program(vec![])))
}
