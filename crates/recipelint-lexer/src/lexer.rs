use std::collections::VecDeque;

use muncher::Muncher;
use phf::{self, phf_map};

use crate::token::{LexerError, LexerErrorKind, Token, TokenKind};

const TAB_SIZE: usize = 8;

static PYTHON_KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "async" => TokenKind::Async,
    "class" => TokenKind::Class,
    "def" => TokenKind::Def,
    "elif" => TokenKind::Elif,
    "else" => TokenKind::Else,
    "except" => TokenKind::Except,
    "False" => TokenKind::FalseKeyword,
    "finally" => TokenKind::Finally,
    "for" => TokenKind::For,
    "if" => TokenKind::If,
    "lambda" => TokenKind::Lambda,
    "None" => TokenKind::NoneKeyword,
    "True" => TokenKind::TrueKeyword,
    "try" => TokenKind::Try,
    "while" => TokenKind::While,
    "with" => TokenKind::With,

    "and" => TokenKind::Keyword,
    "as" => TokenKind::Keyword,
    "assert" => TokenKind::Keyword,
    "await" => TokenKind::Keyword,
    "break" => TokenKind::Keyword,
    "continue" => TokenKind::Keyword,
    "del" => TokenKind::Keyword,
    "from" => TokenKind::Keyword,
    "global" => TokenKind::Keyword,
    "import" => TokenKind::Keyword,
    "in" => TokenKind::Keyword,
    "is" => TokenKind::Keyword,
    "nonlocal" => TokenKind::Keyword,
    "not" => TokenKind::Keyword,
    "or" => TokenKind::Keyword,
    "pass" => TokenKind::Keyword,
    "raise" => TokenKind::Keyword,
    "return" => TokenKind::Keyword,
    "yield" => TokenKind::Keyword,
};

/// Operators, longest first so that e.g. `**=` wins over `**` and `*`.
static OPERATORS: &[(&str, TokenKind)] = &[
    ("**=", TokenKind::AugmentedAssign),
    ("//=", TokenKind::AugmentedAssign),
    (">>=", TokenKind::AugmentedAssign),
    ("<<=", TokenKind::AugmentedAssign),
    ("->", TokenKind::Arrow),
    (":=", TokenKind::ColonEquals),
    ("+=", TokenKind::AugmentedAssign),
    ("-=", TokenKind::AugmentedAssign),
    ("*=", TokenKind::AugmentedAssign),
    ("/=", TokenKind::AugmentedAssign),
    ("%=", TokenKind::AugmentedAssign),
    ("&=", TokenKind::AugmentedAssign),
    ("|=", TokenKind::AugmentedAssign),
    ("^=", TokenKind::AugmentedAssign),
    ("@=", TokenKind::AugmentedAssign),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("**", TokenKind::DoubleStar),
    ("//", TokenKind::Operator),
    ("<<", TokenKind::Operator),
    (">>", TokenKind::Operator),
    ("=", TokenKind::Equals),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    ("*", TokenKind::Star),
    ("@", TokenKind::At),
    ("+", TokenKind::Operator),
    ("-", TokenKind::Operator),
    ("/", TokenKind::Operator),
    ("%", TokenKind::Operator),
    ("&", TokenKind::Operator),
    ("|", TokenKind::Operator),
    ("^", TokenKind::Operator),
    ("~", TokenKind::Operator),
    ("<", TokenKind::Operator),
    (">", TokenKind::Operator),
];

/// Thin wrapper over [`Muncher`] that tracks the byte offset of the next character.
struct Cursor<'input> {
    muncher: Muncher<'input>,
    pos: usize,
}

impl<'input> Cursor<'input> {
    fn new(input: &'input str) -> Self {
        Cursor {
            muncher: Muncher::new(input),
            pos: 0,
        }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn first(&self) -> Option<char> {
        self.nth(0)
    }

    fn second(&self) -> Option<char> {
        self.nth(1)
    }

    fn nth(&self, n: usize) -> Option<char> {
        for _ in 0..n {
            self.muncher.peek();
        }
        let c = self.muncher.peek().copied();
        self.muncher.reset_peek();
        c
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.muncher.eat()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.first() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Measure the indentation of the current line without consuming it. Returns the column
    /// (tabs expanded), the byte length of the leading whitespace, and the first character
    /// after it.
    fn peek_indentation(&self) -> (usize, usize, Option<char>) {
        let mut column = 0;
        let mut bytes = 0;
        let mut terminator = None;
        while let Some(&c) = self.muncher.peek() {
            match c {
                ' ' => column += 1,
                '\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                '\x0c' => column = 0,
                _ => {
                    terminator = Some(c);
                    break;
                }
            }
            bytes += c.len_utf8();
        }
        self.muncher.reset_peek();
        (column, bytes, terminator)
    }
}

pub fn is_space_or_tab(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c' | '\r')
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_string_prefix(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

#[inline]
fn scan_comment(cursor: &mut Cursor) -> TokenKind {
    cursor.eat_while(|c| c != '\n');
    TokenKind::Comment
}

#[inline]
fn scan_number(first_char: char, cursor: &mut Cursor) -> TokenKind {
    // No exponent in 0x/0o/0b literals, so `0xE+1` is an addition
    let radix_prefixed = first_char == '0'
        && matches!(cursor.first(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'));

    let mut last = first_char;
    while let Some(c) = cursor.first() {
        let exponent_sign = !radix_prefixed && matches!(c, '+' | '-') && matches!(last, 'e' | 'E');
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
            cursor.bump();
            last = c;
        } else {
            break;
        }
    }
    TokenKind::Number
}

/// Scan a string body after its opening quote(s). Backslash escapes the next character even in
/// raw strings, which matches how the tokenizer of the host language finds the end of a literal.
#[inline]
fn scan_string_body(cursor: &mut Cursor, quote: char, triple: bool) -> TokenKind {
    loop {
        match cursor.first() {
            None => {
                let kind = if triple {
                    LexerErrorKind::UnterminatedTripleQuotedString
                } else {
                    LexerErrorKind::UnterminatedString
                };
                return TokenKind::Error(LexerError { kind });
            }
            Some('\n') if !triple => {
                // Leave the newline for the next token
                return TokenKind::Error(LexerError {
                    kind: LexerErrorKind::UnterminatedString,
                });
            }
            Some('\\') => {
                cursor.bump();
                cursor.bump();
            }
            Some(c) if c == quote => {
                if !triple {
                    cursor.bump();
                    return TokenKind::String;
                }
                if cursor.second() == Some(quote) && cursor.nth(2) == Some(quote) {
                    cursor.bump();
                    cursor.bump();
                    cursor.bump();
                    return TokenKind::String;
                }
                cursor.bump();
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

/// Scan a string whose opening quote was just consumed.
#[inline]
fn scan_string(cursor: &mut Cursor, quote: char) -> TokenKind {
    let triple = cursor.first() == Some(quote) && cursor.second() == Some(quote);
    if triple {
        cursor.bump();
        cursor.bump();
    }
    scan_string_body(cursor, quote, triple)
}

#[inline]
fn scan_operator(first_char: char, cursor: &mut Cursor) -> Option<TokenKind> {
    'outer: for (op, kind) in OPERATORS {
        let mut chars = op.chars();
        if chars.next() != Some(first_char) {
            continue;
        }

        for (i, c) in chars.enumerate() {
            if cursor.nth(i) != Some(c) {
                continue 'outer;
            }
        }

        // The first character was already eaten by the caller
        for _ in 1..op.len() {
            cursor.bump();
        }
        return Some(*kind);
    }

    None
}

pub struct RecipeLexer<'input> {
    input: &'input str,
    cursor: Cursor<'input>,
    pub(crate) token: Token,
    skip_trivia: bool,
    /// Nesting depth of (), [] and {}; newlines inside brackets do not end a logical line.
    depth: usize,
    at_line_start: bool,
    indents: Vec<usize>,
    pending: VecDeque<Token>,
}

impl<'input> RecipeLexer<'input> {
    pub fn new(input: &'input str, skip_trivia: bool) -> RecipeLexer<'input> {
        let mut ret = RecipeLexer {
            input,
            cursor: Cursor::new(input),
            skip_trivia,
            token: Token {
                kind: TokenKind::EndOfInput,
                len: 0,
            },
            depth: 0,
            at_line_start: true,
            indents: vec![0],
            pending: VecDeque::new(),
        };
        ret.advance();
        ret
    }

    pub fn token(&self) -> Token {
        self.token.clone()
    }

    /// Byte offset of the next unconsumed character.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    pub fn advance(&mut self) {
        self._advance_internal();

        while self.skip_trivia && (self.token.is_trivia() || self.token.kind == TokenKind::Newline)
        {
            self._advance_internal();
        }
    }

    fn _zero_width_token(kind: TokenKind) -> Token {
        Token { kind, len: 0 }
    }

    /// Queue Indent/Dedent tokens (and the leading whitespace) for a new logical line.
    /// Returns true if anything was queued.
    fn _scan_indentation(&mut self) -> bool {
        let (column, ws_len, terminator) = self.cursor.peek_indentation();

        // Blank and comment-only lines do not affect indentation
        let blank = matches!(terminator, None | Some('\n' | '#' | '\r'));
        if !blank {
            let current = self.indents.last().copied().unwrap_or_default();
            if column > current {
                self.indents.push(column);
                self.pending
                    .push_back(Self::_zero_width_token(TokenKind::Indent));
            } else if column < current {
                while self.indents.last().is_some_and(|&level| level > column) {
                    self.indents.pop();
                    self.pending
                        .push_back(Self::_zero_width_token(TokenKind::Dedent));
                }
                if self.indents.last().copied().unwrap_or_default() != column {
                    self.indents.push(column);
                    self.pending.push_back(Self::_zero_width_token(TokenKind::Error(
                        LexerError {
                            kind: LexerErrorKind::InconsistentDedent,
                        },
                    )));
                }
            }
        }

        if ws_len > 0 {
            let start = self.cursor.pos();
            while self.cursor.pos() - start < ws_len {
                self.cursor.bump();
            }
            self.pending.push_back(Token {
                kind: TokenKind::Whitespace,
                len: ws_len,
            });
        }

        !self.pending.is_empty()
    }

    fn _advance_internal(&mut self) {
        if let Some(token) = self.pending.pop_front() {
            self.token = token;
            return;
        }

        if self.at_line_start && self.depth == 0 {
            self.at_line_start = false;
            if self._scan_indentation() {
                self._advance_internal();
                return;
            }
        }

        let start = self.cursor.pos();
        let c = match self.cursor.bump() {
            Some(c) => c,
            None => {
                // Close every open block before signalling the end of input
                if self.indents.len() > 1 {
                    self.indents.pop();
                    self.token = Self::_zero_width_token(TokenKind::Dedent);
                } else {
                    self.token = Self::_zero_width_token(TokenKind::EndOfInput);
                }
                return;
            }
        };

        let kind = match c {
            c if is_space_or_tab(c) => {
                self.cursor.eat_while(is_space_or_tab);
                TokenKind::Whitespace
            }
            '\n' if self.depth > 0 => TokenKind::Whitespace,
            '\n' => {
                self.at_line_start = true;
                TokenKind::Newline
            }
            '#' => scan_comment(&mut self.cursor),
            '\\' => match self.cursor.first() {
                Some('\n') => {
                    self.cursor.bump();
                    TokenKind::EscapedNewline
                }
                Some('\r') if self.cursor.second() == Some('\n') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    TokenKind::EscapedNewline
                }
                _ => TokenKind::Error(LexerError {
                    kind: LexerErrorKind::UnexpectedCharacter,
                }),
            },
            '\'' | '"' => scan_string(&mut self.cursor, c),
            c if is_identifier_start(c) => {
                self.cursor.eat_while(is_identifier_char);
                let text = &self.input[start..self.cursor.pos()];
                match self.cursor.first() {
                    Some(quote @ ('\'' | '"')) if is_string_prefix(text) => {
                        self.cursor.bump();
                        scan_string(&mut self.cursor, quote)
                    }
                    _ => PYTHON_KEYWORDS
                        .get(text)
                        .copied()
                        .unwrap_or(TokenKind::Identifier),
                }
            }
            c if c.is_ascii_digit() => scan_number(c, &mut self.cursor),
            '.' => match (self.cursor.first(), self.cursor.second()) {
                (Some(d), _) if d.is_ascii_digit() => scan_number('.', &mut self.cursor),
                (Some('.'), Some('.')) => {
                    self.cursor.bump();
                    self.cursor.bump();
                    TokenKind::Ellipsis
                }
                _ => TokenKind::Dot,
            },
            '(' | '[' | '{' => {
                self.depth += 1;
                match c {
                    '(' => TokenKind::OpenParenthesis,
                    '[' => TokenKind::SquareOpenBracket,
                    _ => TokenKind::OpenBrace,
                }
            }
            ')' | ']' | '}' => {
                self.depth = self.depth.saturating_sub(1);
                match c {
                    ')' => TokenKind::CloseParenthesis,
                    ']' => TokenKind::SquareCloseBracket,
                    _ => TokenKind::CloseBrace,
                }
            }
            '!' if self.cursor.first() == Some('=') => {
                self.cursor.bump();
                TokenKind::Operator
            }
            c => scan_operator(c, &mut self.cursor).unwrap_or(TokenKind::Error(LexerError {
                kind: LexerErrorKind::UnexpectedCharacter,
            })),
        };

        self.token = Token {
            kind,
            len: self.cursor.pos() - start,
        };
    }
}

pub fn tokenize(data: &str) -> Vec<Token> {
    let mut lexer = RecipeLexer::new(data, false);

    let mut ret = vec![];

    while lexer.token().kind != TokenKind::EndOfInput {
        ret.push(lexer.token());
        lexer.advance();
    }

    ret
}
