mod ast;
mod environment;
pub mod evaluator;
mod lexer;
mod object;
mod parser;
pub mod repl;
mod token;

pub use environment::{Env, Environment};
pub use lexer::Lexer;
pub use object::{EvalError, Object};
pub use parser::Parser;
