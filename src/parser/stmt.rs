use crate::{
    ast::{
        ast::Statement,
        builder::{self, ConditionalBlock},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::{at_token, Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    if parser.current_token_kind() == TokenKind::Keyword {
        let keyword = parser.current_token().value.clone();
        let handler = parser.get_stmt_lookup().get(keyword.as_str()).copied();

        return match handler {
            Some(handler) => handler(parser),
            None => Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: keyword,
                    message: String::from("expected the start of a statement"),
                },
                parser.get_position(),
            )),
        };
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    expect_end_of_stmt(parser)?;

    Ok(builder::expression_statement(expr))
}

/// A simple statement ends at a line break. A dedent or the end of input
/// also closes it, which lets the last line of a block or file omit its
/// line break.
fn expect_end_of_stmt(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Newline => {
            parser.advance();
            Ok(())
        }
        TokenKind::Dedent | TokenKind::EOF => Ok(()),
        _ => Err(parser.error_expected("expected the end of the line")),
    }
}

/// `NEWLINE+ INDENT stmt+ DEDENT`
pub fn parse_block_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let depth = parser.nesting();
    parser.nest()?;

    parser.expect_error(TokenKind::Newline, "expected the end of the line")?;
    while parser.current_token_kind() == TokenKind::Newline {
        parser.advance();
    }
    parser.expect_error(TokenKind::Indent, "expected an indented block")?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::Dedent {
        match parser.current_token_kind() {
            TokenKind::Newline => {
                parser.advance();
            }
            TokenKind::EOF => return Err(parser.error_expected("expected the end of the block")),
            _ => statements.push(parse_stmt(parser)?),
        }
    }

    parser.expect(TokenKind::Dedent)?;
    parser.restore_nesting(depth);

    Ok(builder::block_statement(statements))
}

/// `set <identifier> to <expr>`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.advance();

    let identifier =
        parser.expect_error(TokenKind::Identifier, "expected a variable name after `set`")?;
    parser.expect_keyword("to")?;
    let value = parse_expr(parser, BindingPower::Default)?;

    expect_end_of_stmt(parser)?;

    Ok(builder::assignment(
        builder::identifier(&identifier.value),
        value,
    ))
}

/// `output <expr> (, <expr>)*`
pub fn parse_output_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.advance();

    let mut args = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        args.push(parse_expr(parser, BindingPower::Default)?);
    }

    expect_end_of_stmt(parser)?;

    Ok(builder::output(args))
}

/// `if` with any number of `else if` arms and an optional `else`.
///
/// An `else` is only reachable after the block of the `if` before it has
/// been closed by a dedent, so it always binds to the nearest `if` at the
/// same depth.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    parser.advance();

    let depth = parser.nesting();
    let if_block = parse_conditional_block(parser)?;

    let mut else_if_blocks = vec![];
    let mut else_block = None;

    while parser.current_token().is_keyword("else") {
        parser.advance();

        if parser.current_token().is_keyword("if") {
            parser.advance();
            // Every arm becomes the alternate of the one before it
            parser.nest()?;
            else_if_blocks.push(parse_conditional_block(parser)?);
        } else {
            else_block = Some(parse_block_stmt(parser)?);
            break;
        }
    }

    parser.restore_nesting(depth);

    Ok(builder::conditional(if_block, else_if_blocks, else_block))
}

fn parse_conditional_block(parser: &mut Parser) -> Result<ConditionalBlock, Error> {
    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block_stmt(parser)?;

    Ok(ConditionalBlock { test, body })
}

/// All loop forms start with `repeat`:
///
/// - `repeat` / `repeat forever`
/// - `repeat until <expr>`
/// - `repeat for <identifier> from <expr> to <expr>`
/// - `repeat <expr> times`
pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.advance();
    let current = parser.current_token().clone();

    if current.kind == TokenKind::Newline {
        let body = parse_block_stmt(parser)?;
        return Ok(builder::repeat_forever(body));
    }

    if current.is_keyword("forever") {
        parser.advance();
        let body = parse_block_stmt(parser)?;
        return Ok(builder::repeat_forever(body));
    }

    if current.is_keyword("until") {
        parser.advance();
        let test = parse_expr(parser, BindingPower::Default)?;
        let body = parse_block_stmt(parser)?;
        return at_token(builder::repeat_until(test, body), &start);
    }

    if current.is_keyword("for") {
        parser.advance();
        let identifier =
            parser.expect_error(TokenKind::Identifier, "expected a variable name after `for`")?;
        parser.expect_keyword("from")?;
        let from = parse_expr(parser, BindingPower::Default)?;
        parser.expect_keyword("to")?;
        let to = parse_expr(parser, BindingPower::Default)?;
        let body = parse_block_stmt(parser)?;
        return at_token(
            builder::repeat_for(builder::identifier(&identifier.value), from, to, body),
            &start,
        );
    }

    let times = parse_expr(parser, BindingPower::Default)?;
    parser.expect_keyword("times")?;
    let body = parse_block_stmt(parser)?;

    at_token(builder::repeat_times(times, body), &start)
}
