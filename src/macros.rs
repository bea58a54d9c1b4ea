//! Utility macros for the compiler.
//!
//! This module defines helper macros used by the lexer's pattern table:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens
//! - `MK_MATCH_HANDLER!` - Creates a lexer handler that keeps whatever the pattern matched
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for tokens whose text never varies.
///
/// The handler emits a token with the given kind and advances the lexer
/// over the literal text.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer,
         _regex: &regex::Regex|
         -> Result<$crate::lexer::tokens::Token, $crate::errors::errors::Error> {
            Ok(lexer.consume($kind, String::from($value)))
        }
    };
}

/// Creates a lexer handler that emits the matched text as the token value.
///
/// Used for tokens whose text varies between occurrences, such as numbers,
/// text literals and runs of whitespace.
#[macro_export]
macro_rules! MK_MATCH_HANDLER {
    ($kind:expr) => {
        |lexer: &mut $crate::lexer::lexer::Lexer,
         regex: &regex::Regex|
         -> Result<$crate::lexer::tokens::Token, $crate::errors::errors::Error> {
            let matched = lexer.matched(regex);
            Ok(lexer.consume($kind, matched))
        }
    };
}
