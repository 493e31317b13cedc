use recipelint_lexer::token::LexerErrorKind;
use rowan::TextSize;
use thiserror::Error;

use crate::syntax::syntax_kind::SyntaxKind;

pub mod parser;
#[cfg(test)]
mod tests;

pub use parser::{debug_tree, parse_recipe_from_str, Parse};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{offset:?}: {kind}")]
pub struct ParseError {
    offset: TextSize,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            offset: TextSize::from(offset as u32),
            kind,
        }
    }

    /// Byte offset into the source where the error was detected.
    pub fn offset(&self) -> TextSize {
        self.offset
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken {
        expected: SyntaxKind,
        found: Option<SyntaxKind>,
    },
    #[error("expected an expression")]
    ExpectedExpression,
    #[error("unexpected token {0:?}")]
    UnexpectedToken(SyntaxKind),
    #[error("unexpected indent")]
    UnexpectedIndent,
    #[error("expected an indented block")]
    ExpectedIndentedBlock,
    #[error("unclosed bracket")]
    UnclosedBracket,
    #[error("too many nested brackets, lambdas or blocks")]
    NestingTooDeep,
    #[error("{0}")]
    Lexer(LexerErrorKind),
}
