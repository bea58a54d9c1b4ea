use crate::{
    ast::{ast::Expression, builder},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{at_token, Parser},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    let depth = parser.nesting();
    let expr = parse_nested_expr(parser, bp);
    parser.restore_nesting(depth);

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    parser.nest()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    // `not` ranks below comparison, so it cannot start a tighter operand
    if token_kind == TokenKind::Not && bp > BindingPower::Not {
        return Err(parser.error_expected("expected an operand, put `not` in parentheses here"));
    }

    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => return Err(parser.error_expected("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current one, keep extending lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind).copied() {
            Some(led) => led,
            None => return Err(parser.error_expected("expected an operator")),
        };

        // Each operator wraps the left side in one more node
        parser.nest()?;
        let power = parser.current_binding_power();
        left = led(parser, left, power)?;
    }

    Ok(left)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();
    at_token(builder::literal(token.kind, &token.value), &token)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.advance();
    Ok(builder::identifier(&token.value))
}

/// Unary `+` and `-`, binding tighter than any binary operator.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.advance();
    let argument = parse_expr(parser, BindingPower::Unary)?;

    at_token(
        builder::unary_expression(&operator_token.value, argument),
        &operator_token,
    )
}

/// `not` takes a whole comparison as its operand, but stops at `and`/`or`.
pub fn parse_not_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.advance();
    let argument = parse_expr(parser, BindingPower::Not)?;

    at_token(
        builder::unary_expression(&operator_token.value, argument),
        &operator_token,
    )
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_error(TokenKind::RParen, "expected `)`")?;

    Ok(expr)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    at_token(
        builder::binary_expression(&operator_token.value, left, right),
        &operator_token,
    )
}

pub fn parse_logical_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    at_token(
        builder::logical_expression(&operator_token.value, left, right),
        &operator_token,
    )
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    if !matches!(left, Expression::Identifier { .. }) {
        return Err(parser.error_expected("only named functions can be called"));
    }
    parser.advance();

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::RParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect_error(TokenKind::RParen, "expected `,` or `)`")?;

    Ok(builder::call_expression(left, args, false))
}
