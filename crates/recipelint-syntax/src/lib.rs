pub mod line_index;
pub mod parser;
pub mod syntax;

pub use line_index::{LineCol, LineIndex};
pub use parser::{parse_recipe_from_str, Parse, ParseError, ParseErrorKind};
