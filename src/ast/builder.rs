//! Node construction for the parser's reductions.
//!
//! Every function here builds a node from already reduced children and, for
//! literals and operators, the raw token text. The language constructs at
//! the bottom lower the sugared loops, conditionals and output statements
//! onto plain ESTree shapes.

use crate::{errors::errors::ErrorImpl, lexer::tokens::TokenKind};

use super::ast::{
    BinaryOperator, DeclarationKind, Expression, LiteralValue, LogicalOperator, Program,
    SourceType, Statement, UnaryOperator, UpdateOperator, VariableDeclarator,
};

/// Name of the hidden counter declared by `repeat <n> times`.
///
/// Every counted loop shares it, so a nested counted loop resets the counter
/// of the loop around it.
pub const COUNTER_NAME: &str = "_";

// AST objects

pub fn program(body: Vec<Statement>) -> Program {
    Program {
        body,
        source_type: SourceType::Script,
    }
}

pub fn literal(kind: TokenKind, value: &str) -> Result<Expression, ErrorImpl> {
    Ok(Expression::Literal {
        value: get_literal_value(kind, value)?,
    })
}

pub fn identifier(name: &str) -> Expression {
    Expression::identifier(name)
}

pub fn unary_expression(operator: &str, argument: Expression) -> Result<Expression, ErrorImpl> {
    let operator = match get_expression_operator(operator) {
        "+" => UnaryOperator::Plus,
        "-" => UnaryOperator::Minus,
        "!" => UnaryOperator::Not,
        other => return Err(unknown_operator(other)),
    };

    Ok(Expression::UnaryExpression {
        operator,
        argument: Box::new(argument),
    })
}

pub fn binary_expression(
    operator: &str,
    left: Expression,
    right: Expression,
) -> Result<Expression, ErrorImpl> {
    let operator = match get_expression_operator(operator) {
        "+" => BinaryOperator::Add,
        "-" => BinaryOperator::Subtract,
        "*" => BinaryOperator::Multiply,
        "/" => BinaryOperator::Divide,
        "%" => BinaryOperator::Modulo,
        "===" => BinaryOperator::StrictEquals,
        "<" => BinaryOperator::Less,
        ">" => BinaryOperator::Greater,
        "<=" => BinaryOperator::LessEquals,
        ">=" => BinaryOperator::GreaterEquals,
        other => return Err(unknown_operator(other)),
    };

    Ok(Expression::BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn logical_expression(
    operator: &str,
    left: Expression,
    right: Expression,
) -> Result<Expression, ErrorImpl> {
    let operator = match get_expression_operator(operator) {
        "&&" => LogicalOperator::And,
        "||" => LogicalOperator::Or,
        other => return Err(unknown_operator(other)),
    };

    Ok(Expression::LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn update_expression(
    operator: UpdateOperator,
    argument: Expression,
    prefix: bool,
) -> Expression {
    Expression::UpdateExpression {
        operator,
        argument: Box::new(argument),
        prefix,
    }
}

pub fn call_expression(callee: Expression, arguments: Vec<Expression>, optional: bool) -> Expression {
    Expression::CallExpression {
        callee: Box::new(callee),
        arguments,
        optional,
    }
}

pub fn member_expression(
    object: Expression,
    property: Expression,
    computed: bool,
    optional: bool,
) -> Expression {
    Expression::MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed,
        optional,
    }
}

pub fn if_statement(
    test: Expression,
    consequent: Statement,
    alternate: Option<Statement>,
) -> Statement {
    Statement::IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    }
}

pub fn block_statement(body: Vec<Statement>) -> Statement {
    Statement::BlockStatement { body }
}

pub fn while_statement(test: Expression, body: Statement) -> Statement {
    Statement::WhileStatement {
        test,
        body: Box::new(body),
    }
}

pub fn for_statement(
    init: Statement,
    test: Expression,
    update: Expression,
    body: Statement,
) -> Statement {
    Statement::ForStatement {
        init: Box::new(init),
        test,
        update,
        body: Box::new(body),
    }
}

pub fn expression_statement(expression: Expression) -> Statement {
    Statement::ExpressionStatement { expression }
}

pub fn variable_declaration(
    kind: DeclarationKind,
    declarations: Vec<VariableDeclarator>,
) -> Statement {
    Statement::VariableDeclaration { kind, declarations }
}

pub fn variable_declarator(id: Expression, init: Expression) -> VariableDeclarator {
    VariableDeclarator { id, init }
}

// Language constructs

/// A test together with the block it guards, one per `if` / `else if` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBlock {
    pub test: Expression,
    pub body: Statement,
}

/// `set <id> to <init>`
pub fn assignment(id: Expression, init: Expression) -> Statement {
    variable_declaration(DeclarationKind::Var, vec![variable_declarator(id, init)])
}

/// `repeat` / `repeat forever`
pub fn repeat_forever(body: Statement) -> Statement {
    while_statement(Expression::boolean(true), body)
}

/// `repeat until <test>`
pub fn repeat_until(test: Expression, body: Statement) -> Result<Statement, ErrorImpl> {
    Ok(while_statement(unary_expression("not", test)?, body))
}

/// `repeat <times> times`
pub fn repeat_times(times: Expression, body: Statement) -> Result<Statement, ErrorImpl> {
    let id = identifier(COUNTER_NAME);
    let init = assignment(id.clone(), literal(TokenKind::Number, "0")?);
    let test = binary_expression("<", id.clone(), times)?;
    let update = update_expression(UpdateOperator::Increment, id, false);

    Ok(for_statement(init, test, update, body))
}

/// `repeat for <id> from <from> to <to>`, both bounds inclusive.
pub fn repeat_for(
    id: Expression,
    from: Expression,
    to: Expression,
    body: Statement,
) -> Result<Statement, ErrorImpl> {
    let init = assignment(id.clone(), from);
    let test = binary_expression("<=", id.clone(), to)?;
    let update = update_expression(UpdateOperator::Increment, id, false);

    Ok(for_statement(init, test, update, body))
}

/// Folds `if` / `else if`* / `else`? right to left, so every `else if` becomes
/// the alternate of the arm before it and the trailing `else` body ends up as
/// the innermost alternate.
pub fn conditional(
    if_block: ConditionalBlock,
    else_if_blocks: Vec<ConditionalBlock>,
    else_block: Option<Statement>,
) -> Statement {
    let alternate = else_if_blocks
        .into_iter()
        .rev()
        .fold(else_block, |alternate, block| {
            Some(if_statement(block.test, block.body, alternate))
        });

    if_statement(if_block.test, if_block.body, alternate)
}

/// `output <a>, <b>, ...`
pub fn output(arguments: Vec<Expression>) -> Statement {
    let callee = member_expression(identifier("console"), identifier("log"), false, false);
    expression_statement(call_expression(callee, arguments, false))
}

// Helper functions

fn get_literal_value(kind: TokenKind, value: &str) -> Result<LiteralValue, ErrorImpl> {
    match kind {
        // JSON has no infinity, so numbers too large for an f64 are rejected.
        TokenKind::Number => value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(LiteralValue::Number)
            .ok_or_else(|| ErrorImpl::NumberParseError {
                token: value.to_string(),
            }),
        TokenKind::Boolean => Ok(LiteralValue::Boolean(value == "true")),
        // Escape sequences inside the quotes are kept as written.
        TokenKind::Text => Ok(LiteralValue::Text(
            value
                .get(1..value.len().saturating_sub(1))
                .unwrap_or_default()
                .to_string(),
        )),
        _ => Err(ErrorImpl::UnknownLiteral {
            kind: kind.name().to_string(),
        }),
    }
}

/// Maps word operators onto their symbolic form. Symbols pass through.
pub fn get_expression_operator(value: &str) -> &str {
    match value {
        "=" => "===",
        "and" => "&&",
        "or" => "||",
        "not" => "!",
        _ => value,
    }
}

fn unknown_operator(operator: &str) -> ErrorImpl {
    ErrorImpl::UnknownOperator {
        operator: operator.to_string(),
    }
}
