/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, statement and expression sum types, operators and printing
/// - expressions: Expression node structs and their constructors
/// - statements: Statement node structs and their constructors
/// - types: Type annotations and their resolution
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
