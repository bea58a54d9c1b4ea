//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, word operators and identifiers
//! - Numeric and text literals
//! - Operators and punctuation
//! - Comments
//! - Indentation tracking
//! - Error cases

use super::{
    lexer::{tokenize, Lexer},
    tokens::{Token, TokenKind},
};
use crate::errors::errors::{ErrorCategory, ErrorImpl};

use TokenKind::*;

fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(Some("test.txt".to_string()));
    lexer.reset(source);
    lexer.map(|token| token.unwrap()).collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_text_hides_keywords() {
    assert_eq!(kinds("\"(and or not)\""), vec![Text]);
    assert_eq!(kinds("\"# This is a comment\""), vec![Text]);
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    assert_eq!(kinds("repeated"), vec![Identifier]);
    assert_eq!(kinds("orange"), vec![Identifier]);
    assert_eq!(kinds("settled"), vec![Identifier]);
    assert_eq!(kinds("notable"), vec![Identifier]);
    assert_eq!(kinds("truely"), vec![Identifier]);
}

#[test]
fn test_tokenize_assignment() {
    assert_eq!(
        kinds("set complete to true"),
        vec![Keyword, Identifier, Keyword, Boolean]
    );
    assert_eq!(
        kinds("set complete to settled"),
        vec![Keyword, Identifier, Keyword, Identifier]
    );
}

#[test]
fn test_tokenize_keywords() {
    let tokens = lex("set to if else repeat until times forever for from output");

    assert!(tokens.iter().all(|token| token.kind == Keyword));
    assert_eq!(tokens[0].value, "set");
    assert_eq!(tokens[10].value, "output");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % = < > <= >= ( ) ,"),
        vec![Plus, Minus, Times, Divide, Mod, Eq, Lt, Gt, Lte, Gte, LParen, RParen, Comma]
    );
    assert_eq!(kinds("a<=b"), vec![Identifier, Lte, Identifier]);
}

#[test]
fn test_tokenize_word_operators() {
    assert_eq!(
        kinds("a and b or not c"),
        vec![Identifier, And, Identifier, Or, Not, Identifier]
    );
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("0 42 3.14 1.");

    assert!(tokens.iter().all(|token| token.kind == Number));
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].value, "42");
    assert_eq!(tokens[2].value, "3.14");
    assert_eq!(tokens[3].value, "1.");
}

#[test]
fn test_leading_minus_is_an_operator() {
    let tokens = lex("-5");

    assert_eq!(tokens[0].kind, Minus);
    assert_eq!(tokens[1].kind, Number);
    assert_eq!(tokens[1].value, "5");
}

#[test]
fn test_text_keeps_escapes_and_quotes() {
    let tokens = lex(r#""say \"hi\" \\ now""#);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, Text);
    assert_eq!(tokens[0].value, r#""say \"hi\" \\ now""#);
}

#[test]
fn test_text_cannot_span_lines() {
    let mut lexer = Lexer::new(None);
    lexer.reset("\"abc\ndef\"");

    let error = lexer.next().unwrap().unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnrecognisedToken {
            token: "\"".to_string()
        }
    );
    assert!(lexer.next().is_none());
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("output 1 # trailing\n"),
        vec![Keyword, Number, Newline]
    );
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("set x to @", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().col, 10);
}

#[test]
fn test_indent_and_dedent() {
    assert_eq!(
        kinds("if x\n    output 1\n"),
        vec![Keyword, Identifier, Newline, Indent, Keyword, Number, Newline, Dedent]
    );
}

#[test]
fn test_nested_dedents_to_outer_level() {
    assert_eq!(
        kinds("a\n  b\n    c\nd\n"),
        vec![
            Identifier, Newline, Indent, Identifier, Newline, Indent, Identifier, Newline,
            Dedent, Dedent, Identifier, Newline
        ]
    );
}

#[test]
fn test_dedent_at_end_without_newline() {
    assert_eq!(
        kinds("repeat\n    output 1"),
        vec![Keyword, Newline, Indent, Keyword, Number, Dedent]
    );
}

#[test]
fn test_blank_and_comment_lines_are_inert() {
    let source = "if x\n    a\n\n  \n # note\n    b\nc\n";

    assert_eq!(
        kinds(source),
        vec![
            Keyword, Identifier, Newline, Indent, Identifier, Newline, Newline, Newline,
            Newline, Identifier, Newline, Dedent, Identifier, Newline
        ]
    );
}

#[test]
fn test_blank_lines_with_deeper_whitespace_are_inert() {
    let source = "if x\n    a\n            \n        # deeper comment\n    b\n";

    assert_eq!(
        kinds(source),
        vec![
            Keyword, Identifier, Newline, Indent, Identifier, Newline, Newline, Newline,
            Identifier, Newline, Dedent
        ]
    );
}

#[test]
fn test_inconsistent_indentation() {
    let mut lexer = Lexer::new(None);
    lexer.reset("if x\n    a\n  b\n");

    let error = lexer
        .by_ref()
        .collect::<Result<Vec<Token>, _>>()
        .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Indentation);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::InconsistentIndentation {
            found: 2,
            open: vec![4]
        }
    );
    assert_eq!(error.get_position().line, 3);
}

#[test]
fn test_tabs_count_as_four_spaces() {
    assert_eq!(
        kinds("if x\n\ta\n    b\n"),
        vec![Keyword, Identifier, Newline, Indent, Identifier, Newline, Identifier, Newline, Dedent]
    );
}

#[test]
fn test_crlf_line_endings() {
    assert_eq!(
        kinds("if x\r\n    a\r\n"),
        vec![Keyword, Identifier, Newline, Indent, Identifier, Newline, Dedent]
    );
}

#[test]
fn test_first_line_indentation_is_not_tracked() {
    assert_eq!(kinds("  output 1\n"), vec![Keyword, Number, Newline]);
}

#[test]
fn test_indents_balance_and_stack_empties() {
    let source = "\
repeat 3 times
    if a
        output 1
    else
        repeat until b
            output 2
        output 3
output 4
";
    let mut lexer = Lexer::new(None);
    lexer.reset(source);

    let mut indents = 0;
    let mut dedents = 0;
    while let Some(token) = lexer.next_token().unwrap() {
        match token.kind {
            Indent => indents += 1,
            Dedent => dedents += 1,
            _ => {}
        }
    }

    assert_eq!(indents, 4);
    assert_eq!(indents, dedents);
    assert!(lexer.indents().is_empty());
}

#[test]
fn test_identifier_names_do_not_change_kinds() {
    let first = "set total to 0\nrepeat until total > 10\n    set total to total + step\n";
    let second = "set count to 0\nrepeat until count > 10\n    set count to count + delta\n";

    let first_tokens = lex(first);
    let second_tokens = lex(second);

    assert_eq!(kinds(first), kinds(second));
    assert_ne!(
        first_tokens.iter().map(|t| t.value.clone()).collect::<Vec<_>>(),
        second_tokens.iter().map(|t| t.value.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn test_token_positions() {
    let tokens = lex("set x to 1\n  output x");

    assert_eq!((tokens[1].line(), tokens[1].col()), (1, 5));
    assert_eq!(tokens[5].kind, Indent);
    assert_eq!((tokens[5].line(), tokens[5].col()), (2, 1));
    assert_eq!((tokens[6].line(), tokens[6].col()), (2, 3));
    assert_eq!(tokens[6].value, "output");
}

#[test]
fn test_save_and_restore() {
    let mut lexer = Lexer::new(None);
    lexer.reset("if a\n    output 1\noutput 2\n");

    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let state = lexer.save();

    let rest: Vec<TokenKind> = lexer.by_ref().map(|t| t.unwrap().kind).collect();
    lexer.restore(state);
    let again: Vec<TokenKind> = lexer.by_ref().map(|t| t.unwrap().kind).collect();

    assert_eq!(rest, again);
    assert_eq!(rest[0], Newline);
    assert_eq!(rest[1], Indent);
}

#[test]
fn test_reset_clears_state() {
    let mut lexer = Lexer::new(None);
    lexer.reset("if a\n    output 1\n    output 2");
    for _ in 0..5 {
        lexer.next_token().unwrap();
    }
    assert_eq!(lexer.indents(), &[4]);

    lexer.reset("output 3");
    assert!(lexer.indents().is_empty());
    let kinds: Vec<TokenKind> = lexer.map(|t| t.unwrap().kind).collect();
    assert_eq!(kinds, vec![Keyword, Number]);
}

#[test]
fn test_tokenize_appends_eof() {
    let tokens = tokenize("output 1", Some("test.txt".to_string())).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, EOF);
}

#[test]
fn test_has_excludes_skipped_kinds() {
    let lexer = Lexer::new(None);

    assert!(lexer.has(Indent));
    assert!(lexer.has(Keyword));
    assert!(!lexer.has(Whitespace));
    assert!(!lexer.has(Comment));
}

#[test]
fn test_format_error() {
    let mut lexer = Lexer::new(None);
    lexer.reset("set x to to true");
    let tokens: Vec<Token> = lexer.by_ref().map(|t| t.unwrap()).collect();

    let message = lexer.format_error(&tokens[3], "unexpected keyword");

    assert_eq!(
        message,
        format!(
            "unexpected keyword at line 1 col 10:\n\n  1  set x to to true\n{}^",
            " ".repeat(14)
        )
    );
}
