/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of RODEO
scripts. Source text goes in, a syntax tree comes out, or an `Error`
naming the spot in the source that stopped it.

*/

#[macro_use]
mod error;
mod lex;
mod parse;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;

pub mod ast;

/// Span of chars in the source text.
pub type Column = std::ops::Range<usize>;

/// Lex and parse a whole script.
pub fn compile(source: &str) -> Result<ast::Program, Error> {
    parse(&lex(source)?)
}
