use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Words that are never lexed as identifiers.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        for keyword in KEYWORDS {
            map.insert(keyword, TokenKind::Keyword);
        }
        map
    };
}

pub const KEYWORDS: [&str; 11] = [
    "set", "to", "if", "else", "repeat", "until", "times", "forever", "for", "from", "output",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Comment,

    Plus,
    Minus,
    Times,
    Divide,
    Mod,

    Eq,
    Lt,
    Gt,
    Lte,
    Gte,

    And,
    Or,
    Not,

    LParen,
    RParen,
    Comma,

    Keyword,

    Text,
    Number,
    Boolean,
    Identifier,

    Whitespace,
    Newline,
    Indent,
    Dedent,

    EOF,
}

impl TokenKind {
    /// Name of the kind as it appears in token dumps, e.g. `IDENTIFIER`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Mod => "MOD",
            TokenKind::Eq => "EQ",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Lte => "LTE",
            TokenKind::Gte => "GTE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Text => "TEXT",
            TokenKind::Number => "NUMBER",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Whitespace => "WS",
            TokenKind::Newline => "NL",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::EOF => "EOF",
        }
    }

    /// Synthetic kinds carry no source text.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent | TokenKind::EOF)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.is_synthetic() || self.kind == TokenKind::Newline {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.value)
        }
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn col(&self) -> u32 {
        self.span.start.col
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == keyword
    }

    /// Text used when this token shows up in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Newline => String::from("\\n"),
            kind if kind.is_synthetic() => kind.name().to_string(),
            _ => self.value.clone(),
        }
    }
}
