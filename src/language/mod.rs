pub mod ast;
pub mod build;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use parser::parse_module;
