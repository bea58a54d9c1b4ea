//! Error types and error handling for the compiler.
//!
//! This module defines the errors a compile can end with:
//!
//! - Indentation errors raised by the lexer
//! - Syntax errors raised by the parser, carrying the offending position
//! - Internal errors raised by the AST builder when it meets a token kind
//!   or operator it has no entry for
//! - Helpful error messages and suggestions

pub mod errors;
