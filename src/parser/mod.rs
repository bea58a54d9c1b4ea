//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the lexer's token
//! stream into a `Program`. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (assignment, conditionals, loops, output)
//! - Indented blocks delimited by INDENT/DEDENT tokens
//! - Expression parsing (logical, relational and arithmetic operators, calls, literals)
//! - Error reporting with the offending token's position
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
