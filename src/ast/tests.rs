//! Unit tests for the AST builder and the JSON form of the tree.

use serde_json::json;

use super::{
    ast::{BinaryOperator, Expression, LiteralValue, LogicalOperator, Statement, UnaryOperator},
    builder::{self, ConditionalBlock},
};
use crate::{errors::errors::ErrorImpl, lexer::tokens::TokenKind};

fn body() -> Statement {
    builder::block_statement(vec![builder::output(vec![Expression::number(1.0)])])
}

#[test]
fn test_literal_coercion() {
    assert_eq!(
        builder::literal(TokenKind::Number, "3.5").unwrap(),
        Expression::number(3.5)
    );
    assert_eq!(
        builder::literal(TokenKind::Number, "1.").unwrap(),
        Expression::number(1.0)
    );
    assert_eq!(
        builder::literal(TokenKind::Boolean, "true").unwrap(),
        Expression::boolean(true)
    );
    assert_eq!(
        builder::literal(TokenKind::Boolean, "false").unwrap(),
        Expression::boolean(false)
    );
}

#[test]
fn test_text_literal_keeps_escapes() {
    let literal = builder::literal(TokenKind::Text, r#""a \"b\" \\ c""#).unwrap();

    assert_eq!(
        literal,
        Expression::Literal {
            value: LiteralValue::Text(r#"a \"b\" \\ c"#.to_string())
        }
    );
    assert_eq!(
        builder::literal(TokenKind::Text, "\"\"").unwrap(),
        Expression::Literal {
            value: LiteralValue::Text(String::new())
        }
    );
}

#[test]
fn test_unknown_literal_kind() {
    let error = builder::literal(TokenKind::Identifier, "x").unwrap_err();

    assert_eq!(
        error,
        ErrorImpl::UnknownLiteral {
            kind: "IDENTIFIER".to_string()
        }
    );
}

#[test]
fn test_number_too_large_for_f64() {
    let digits = "9".repeat(400);

    assert_eq!(
        builder::literal(TokenKind::Number, &digits).unwrap_err(),
        ErrorImpl::NumberParseError { token: digits }
    );
    assert!(matches!(
        builder::literal(TokenKind::Number, &"9".repeat(300)).unwrap(),
        Expression::Literal {
            value: LiteralValue::Number(number)
        } if number > 9e299
    ));
}

#[test]
fn test_operator_remap() {
    assert_eq!(builder::get_expression_operator("="), "===");
    assert_eq!(builder::get_expression_operator("and"), "&&");
    assert_eq!(builder::get_expression_operator("or"), "||");
    assert_eq!(builder::get_expression_operator("not"), "!");
    assert_eq!(builder::get_expression_operator("<="), "<=");
    assert_eq!(builder::get_expression_operator("%"), "%");
}

#[test]
fn test_equality_becomes_strict() {
    let expr = builder::binary_expression(
        "=",
        Expression::identifier("a"),
        Expression::number(1.0),
    )
    .unwrap();

    assert!(matches!(
        expr,
        Expression::BinaryExpression {
            operator: BinaryOperator::StrictEquals,
            ..
        }
    ));
}

#[test]
fn test_word_operators() {
    let and = builder::logical_expression(
        "and",
        Expression::boolean(true),
        Expression::boolean(false),
    )
    .unwrap();
    let or = builder::logical_expression(
        "or",
        Expression::boolean(true),
        Expression::boolean(false),
    )
    .unwrap();
    let not = builder::unary_expression("not", Expression::boolean(true)).unwrap();

    assert!(matches!(and, Expression::LogicalExpression { operator: LogicalOperator::And, .. }));
    assert!(matches!(or, Expression::LogicalExpression { operator: LogicalOperator::Or, .. }));
    assert!(matches!(not, Expression::UnaryExpression { operator: UnaryOperator::Not, .. }));
}

#[test]
fn test_unknown_operators() {
    let a = || Expression::identifier("a");

    assert_eq!(
        builder::binary_expression("and", a(), a()).unwrap_err(),
        ErrorImpl::UnknownOperator {
            operator: "&&".to_string()
        }
    );
    assert!(builder::logical_expression("+", a(), a()).is_err());
    assert!(builder::unary_expression("*", a()).is_err());
}

#[test]
fn test_repeat_forever() {
    let statement = builder::repeat_forever(body());

    assert_eq!(
        statement,
        Statement::WhileStatement {
            test: Expression::boolean(true),
            body: Box::new(body()),
        }
    );
}

#[test]
fn test_repeat_until_negates_test() {
    let statement = builder::repeat_until(Expression::identifier("done"), body()).unwrap();

    assert_eq!(
        statement,
        Statement::WhileStatement {
            test: Expression::UnaryExpression {
                operator: UnaryOperator::Not,
                argument: Box::new(Expression::identifier("done")),
            },
            body: Box::new(body()),
        }
    );
}

#[test]
fn test_repeat_times_lowering() {
    let statement = builder::repeat_times(Expression::number(5.0), body()).unwrap();
    let counter = Expression::identifier("_");

    assert_eq!(
        statement,
        builder::for_statement(
            builder::assignment(counter.clone(), Expression::number(0.0)),
            builder::binary_expression("<", counter.clone(), Expression::number(5.0)).unwrap(),
            builder::update_expression(super::ast::UpdateOperator::Increment, counter, false),
            body(),
        )
    );
}

#[test]
fn test_repeat_for_is_inclusive() {
    let statement = builder::repeat_for(
        Expression::identifier("i"),
        Expression::number(1.0),
        Expression::number(10.0),
        body(),
    )
    .unwrap();

    match statement {
        Statement::ForStatement { init, test, .. } => {
            assert_eq!(
                *init,
                builder::assignment(Expression::identifier("i"), Expression::number(1.0))
            );
            assert!(matches!(
                test,
                Expression::BinaryExpression {
                    operator: BinaryOperator::LessEquals,
                    ..
                }
            ));
        }
        other => panic!("expected a for statement, got {:?}", other),
    }
}

#[test]
fn test_conditional_folds_right() {
    let arm = |name: &str| ConditionalBlock {
        test: Expression::identifier(name),
        body: body(),
    };
    let else_body = builder::block_statement(vec![]);

    let statement = builder::conditional(
        arm("a"),
        vec![arm("b"), arm("c")],
        Some(else_body.clone()),
    );

    let expected = builder::if_statement(
        Expression::identifier("a"),
        body(),
        Some(builder::if_statement(
            Expression::identifier("b"),
            body(),
            Some(builder::if_statement(
                Expression::identifier("c"),
                body(),
                Some(else_body),
            )),
        )),
    );

    assert_eq!(statement, expected);
}

#[test]
fn test_conditional_without_else() {
    let statement = builder::conditional(
        ConditionalBlock {
            test: Expression::identifier("a"),
            body: body(),
        },
        vec![],
        None,
    );

    assert!(matches!(statement, Statement::IfStatement { alternate: None, .. }));
}

#[test]
fn test_program_json_shape() {
    let program = builder::program(vec![
        builder::assignment(Expression::identifier("x"), Expression::number(1.0)),
        builder::output(vec![
            Expression::identifier("x"),
            builder::literal(TokenKind::Text, "\"hi\"").unwrap(),
        ]),
    ]);

    let value = serde_json::to_value(&program).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "Program",
            "sourceType": "script",
            "body": [
                {
                    "type": "VariableDeclaration",
                    "kind": "var",
                    "declarations": [{
                        "type": "VariableDeclarator",
                        "id": { "type": "Identifier", "name": "x" },
                        "init": { "type": "Literal", "value": 1.0 }
                    }]
                },
                {
                    "type": "ExpressionStatement",
                    "expression": {
                        "type": "CallExpression",
                        "callee": {
                            "type": "MemberExpression",
                            "object": { "type": "Identifier", "name": "console" },
                            "property": { "type": "Identifier", "name": "log" },
                            "computed": false,
                            "optional": false
                        },
                        "arguments": [
                            { "type": "Identifier", "name": "x" },
                            { "type": "Literal", "value": "hi" }
                        ],
                        "optional": false
                    }
                }
            ]
        })
    );
}

#[test]
fn test_update_and_operator_json() {
    let statement = builder::repeat_times(Expression::number(2.0), body()).unwrap();
    let value = serde_json::to_value(&statement).unwrap();

    assert_eq!(value["type"], "ForStatement");
    assert_eq!(value["test"]["operator"], "<");
    assert_eq!(
        value["update"],
        json!({
            "type": "UpdateExpression",
            "operator": "++",
            "argument": { "type": "Identifier", "name": "_" },
            "prefix": false
        })
    );
    assert_eq!(value["init"]["declarations"][0]["id"]["name"], "_");
}

#[test]
fn test_if_statement_json_alternate() {
    let statement = builder::if_statement(Expression::boolean(true), body(), None);
    let value = serde_json::to_value(&statement).unwrap();

    assert_eq!(value["alternate"], serde_json::Value::Null);
    assert_eq!(value["consequent"]["type"], "BlockStatement");
}
