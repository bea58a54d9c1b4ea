/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: ESTree shaped node definitions
/// - builder: Node constructors invoked by the parser, including the
///   lowering of sugared constructs and word operators
pub mod ast;
pub mod builder;

#[cfg(test)]
mod tests;
