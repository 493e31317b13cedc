pub use lexer::{tokenize, RecipeLexer};

pub use token::{Token, TokenKind};

pub mod lexer;
#[cfg(test)]
mod tests;
#[macro_use]
pub mod token;
