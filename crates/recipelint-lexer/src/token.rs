use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub(crate) kind: TokenKind,
    /// Byte length of token
    pub(crate) len: usize,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind.is_end_of_input()
    }

    pub fn get_fixed_str(&self) -> Option<&'static str> {
        self.kind.get_fixed_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Error(LexerError),

    // Keywords that shape statements or literals
    Async,
    Class,
    Def,
    Elif,
    Else,
    Except,
    FalseKeyword,
    Finally,
    For,
    If,
    Lambda,
    NoneKeyword,
    TrueKeyword,
    Try,
    While,
    With,
    /// Any other reserved word (`return`, `import`, `and`, ...)
    Keyword,

    Identifier,
    Number,
    String,
    Ellipsis,

    Arrow,
    At,
    AugmentedAssign,
    CloseBrace,
    CloseParenthesis,
    Colon,
    ColonEquals,
    Comma,
    Dot,
    DoubleStar,
    Equals,
    OpenBrace,
    OpenParenthesis,
    /// Comparison, arithmetic and bitwise operators
    Operator,
    Semicolon,
    SquareCloseBracket,
    SquareOpenBracket,
    Star,

    Comment,
    Dedent,
    EndOfInput,
    EscapedNewline,
    Indent,
    Newline,
    Whitespace,
}

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("{kind}")]
pub struct LexerError {
    pub(crate) kind: LexerErrorKind,
}

impl LexerError {
    pub fn kind(&self) -> LexerErrorKind {
        self.kind
    }
}

#[derive(Error, Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum LexerErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated triple-quoted string literal")]
    UnterminatedTripleQuotedString,
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
    #[error("unexpected character")]
    UnexpectedCharacter,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::EscapedNewline
        )
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, TokenKind::EndOfInput)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error(_))
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParenthesis | TokenKind::SquareOpenBracket | TokenKind::OpenBrace
        )
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParenthesis | TokenKind::SquareCloseBracket | TokenKind::CloseBrace
        )
    }

    pub fn get_fixed_str(&self) -> Option<&'static str> {
        let ret = match self {
            TokenKind::Async => "async",
            TokenKind::Class => "class",
            TokenKind::Def => "def",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Except => "except",
            TokenKind::FalseKeyword => "False",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Lambda => "lambda",
            TokenKind::NoneKeyword => "None",
            TokenKind::TrueKeyword => "True",
            TokenKind::Try => "try",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::Ellipsis => "...",
            TokenKind::Arrow => "->",
            TokenKind::At => "@",
            TokenKind::CloseBrace => "}",
            TokenKind::CloseParenthesis => ")",
            TokenKind::Colon => ":",
            TokenKind::ColonEquals => ":=",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DoubleStar => "**",
            TokenKind::Equals => "=",
            TokenKind::EscapedNewline => "\\\n",
            TokenKind::Newline => "\n",
            TokenKind::OpenBrace => "{",
            TokenKind::OpenParenthesis => "(",
            TokenKind::Semicolon => ";",
            TokenKind::SquareCloseBracket => "]",
            TokenKind::SquareOpenBracket => "[",
            TokenKind::Star => "*",
            TokenKind::Indent | TokenKind::Dedent => "",
            _ => return None,
        };

        Some(ret)
    }
}

pub fn make_fixed_str_token(kind: TokenKind) -> Token {
    Token {
        kind,
        len: kind.get_fixed_str().map(str::len).unwrap_or_default(),
    }
}

#[macro_export]
macro_rules! T {
    [class] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Class) } ;
    [def] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Def) } ;
    [async] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Async) } ;
    [lambda] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Lambda) } ;
    [if] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::If) } ;
    [else] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Else) } ;
    [for] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::For) } ;
    [None] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::NoneKeyword) } ;
    [True] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::TrueKeyword) } ;
    [False] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::FalseKeyword) } ;
    ['('] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::OpenParenthesis) } ;
    [')'] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::CloseParenthesis) } ;
    ['['] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::SquareOpenBracket) } ;
    [']'] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::SquareCloseBracket) } ;
    ['{'] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::OpenBrace) } ;
    ['}'] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::CloseBrace) } ;
    [=] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Equals) } ;
    [:=] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::ColonEquals) } ;
    [:] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Colon) } ;
    [,] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Comma) } ;
    [;] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Semicolon) } ;
    [.] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Dot) } ;
    [*] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Star) } ;
    [**] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::DoubleStar) } ;
    [@] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::At) } ;
    [->] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Arrow) } ;
    [indent] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Indent) } ;
    [dedent] => { $crate::token::make_fixed_str_token($crate::token::TokenKind::Dedent) } ;
}

pub use T;
