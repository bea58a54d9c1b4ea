use std::{
    collections::{HashSet, VecDeque},
    rc::Rc,
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    line_at, Position, Span, MK_DEFAULT_HANDLER, MK_MATCH_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Width a tab counts for when measuring indentation.
pub const TAB_WIDTH: usize = 4;

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Token, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).expect("lexer patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    // Tried in order, the first pattern matching at the current position wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^#[^\n]*", MK_MATCH_HANDLER!(TokenKind::Comment)),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        // Ahead of NUMBER, so a leading sign always lexes as an operator.
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Minus, "-")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Times, "*")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Divide, "/")),
        pattern("^%", MK_DEFAULT_HANDLER!(TokenKind::Mod, "%")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Eq, "=")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::Lte, "<=")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::Gte, ">=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Lt, "<")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Gt, ">")),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::LParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::RParen, ")")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^\"(?:\\\\[\"\\\\]|[^\n\"\\\\])*\"", MK_MATCH_HANDLER!(TokenKind::Text)),
        pattern("^-?(?:0|[1-9][0-9]*)(?:\\.[0-9]*)?", MK_MATCH_HANDLER!(TokenKind::Number)),
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^[ \t]+", MK_MATCH_HANDLER!(TokenKind::Whitespace)),
        pattern("^\r?\n", MK_MATCH_HANDLER!(TokenKind::Newline)),
    ];
}

/// A snapshot of the lexer's position, see [`Lexer::save`].
#[derive(Debug, Clone)]
pub struct LexerState {
    pos: usize,
    line: u32,
    col: u32,
    at_line_start: bool,
    indents: Vec<usize>,
    pending: VecDeque<Token>,
    finished: bool,
}

/// Pull-based tokenizer for indentation structured source.
///
/// Whitespace and comments are matched but never emitted. Leading whitespace
/// on a line is measured against a stack of open indentation widths and
/// turned into synthetic `Indent`/`Dedent` tokens. A lexer owns its stack, so
/// every compile needs its own instance.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    col: u32,
    file: Rc<String>,
    at_line_start: bool,
    indents: Vec<usize>,
    blank_lines: HashSet<u32>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl Lexer {
    pub fn new(file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: String::new(),
            pos: 0,
            line: 1,
            col: 1,
            file: file_name,
            at_line_start: false,
            indents: vec![],
            blank_lines: HashSet::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Points the lexer at new source text and forgets all previous state.
    pub fn reset(&mut self, source: &str) {
        self.source = source.to_string();
        self.pos = 0;
        self.line = 1;
        self.col = 1;
        self.at_line_start = false;
        self.indents.clear();
        self.blank_lines = find_blank_lines(source);
        self.pending.clear();
        self.finished = false;
    }

    pub fn save(&self) -> LexerState {
        LexerState {
            pos: self.pos,
            line: self.line,
            col: self.col,
            at_line_start: self.at_line_start,
            indents: self.indents.clone(),
            pending: self.pending.clone(),
            finished: self.finished,
        }
    }

    pub fn restore(&mut self, state: LexerState) {
        self.pos = state.pos;
        self.line = state.line;
        self.col = state.col;
        self.at_line_start = state.at_line_start;
        self.indents = state.indents;
        self.pending = state.pending;
        self.finished = state.finished;
    }

    /// Whether tokens of this kind can appear in the emitted stream.
    pub fn has(&self, kind: TokenKind) -> bool {
        !matches!(
            kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::EOF
        )
    }

    /// The currently open indentation widths, innermost last.
    pub fn indents(&self) -> &[usize] {
        &self.indents
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Produces the next token, or `None` once the input and all pending
    /// dedents have been drained.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                trace!(token = %token, line = token.line(), col = token.col(), "token");
                return Ok(Some(token));
            }

            if self.finished {
                return Ok(None);
            }

            if self.at_eof() {
                let position = self.get_position();
                self.dedent(0, &position)?;
                self.finished = true;
                continue;
            }

            let token = self.scan()?;

            if self.at_line_start && !self.blank_lines.contains(&token.line()) {
                self.update_indentation(&token)?;
            }
            self.at_line_start = token.kind == TokenKind::Newline;

            if token.kind != TokenKind::Whitespace && token.kind != TokenKind::Comment {
                self.pending.push_back(token);
            }
        }
    }

    pub fn format_error(&self, token: &Token, message: &str) -> String {
        let mut formatted = format!(
            "{} at line {} col {}:",
            message,
            token.line(),
            token.col()
        );

        if let Some(text) = line_at(&self.source, token.line()) {
            let gutter = token.line().to_string();
            formatted.push_str(&format!("\n\n  {}  {}\n", gutter, text));
            formatted.push_str(&format!(
                "  {}  {}^",
                " ".repeat(gutter.len()),
                " ".repeat(token.col().saturating_sub(1) as usize)
            ));
        }

        formatted
    }

    fn scan(&mut self) -> Result<Token, Error> {
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                return (pattern.handler)(self, &pattern.regex);
            }
        }

        Err(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: self.at().to_string(),
            },
            self.get_position(),
        ))
    }

    fn update_indentation(&mut self, token: &Token) -> Result<(), Error> {
        let new_indent = if token.kind == TokenKind::Whitespace {
            token.value.replace('\t', &" ".repeat(TAB_WIDTH)).chars().count()
        } else {
            0
        };
        let old_indent = self.indents.last().copied().unwrap_or(0);

        if new_indent > old_indent {
            self.indent(new_indent, &token.span.start);
        } else if new_indent < old_indent {
            self.dedent(new_indent, &token.span.start)?;
        }

        Ok(())
    }

    fn indent(&mut self, level: usize, position: &Position) {
        debug!(level, line = position.line, "indent");
        self.indents.push(level);
        self.pending.push_back(synthetic(TokenKind::Indent, position));
    }

    fn dedent(&mut self, level: usize, position: &Position) -> Result<(), Error> {
        if level != 0 && !self.indents.contains(&level) {
            return Err(Error::new(
                ErrorImpl::InconsistentIndentation {
                    found: level,
                    open: self.indents.clone(),
                },
                position.clone(),
            ));
        }

        while let Some(&top) = self.indents.last() {
            if top <= level {
                break;
            }
            debug!(from = top, to = level, line = position.line, "dedent");
            self.indents.pop();
            self.pending.push_back(synthetic(TokenKind::Dedent, position));
        }

        Ok(())
    }

    /// Emits a token of `kind` covering `value` and moves past it.
    pub fn consume(&mut self, kind: TokenKind, value: String) -> Token {
        let start = self.get_position();
        self.advance_over(&value);
        let end = self.get_position();

        MK_TOKEN!(kind, value, Span { start, end })
    }

    /// The text `regex` matches at the current position.
    pub fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }

    fn advance_over(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += text.len();
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.line, self.col, Rc::clone(&self.file))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                // Errors end the stream; only `reset` restarts it.
                self.pending.clear();
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

fn synthetic(kind: TokenKind, position: &Position) -> Token {
    MK_TOKEN!(
        kind,
        String::new(),
        Span {
            start: position.clone(),
            end: position.clone()
        }
    )
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Token, Error> {
    let value = lexer.matched(regex);

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Ok(lexer.consume(kind, value))
}

/// Line numbers that hold nothing but whitespace or a comment. These lines
/// never take part in indentation tracking.
fn find_blank_lines(source: &str) -> HashSet<u32> {
    source
        .split('\n')
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.starts_with('#')
        })
        .map(|(index, _)| index as u32 + 1)
        .collect()
}

/// Tokenizes a whole source text, terminated by an `EOF` token.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(file);
    lex.reset(source);

    let mut tokens = vec![];
    while let Some(token) = lex.next_token()? {
        tokens.push(token);
    }

    let position = lex.get_position();
    tokens.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: position.clone(),
            end: position
        }
    ));

    Ok(tokens)
}
