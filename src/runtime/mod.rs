//! Running compiled programs.
//!
//! The compiler stops at the AST. Turning a `Program` into executable source
//! and running that source are left to the embedding application, which
//! plugs them in through the [`CodeGenerator`](runtime::CodeGenerator) and
//! [`Executor`](runtime::Executor) traits.

pub mod runtime;
