use recipelint_lexer::TokenKind;

pub fn syntax_kind_for_token_kind(token_kind: TokenKind) -> SyntaxKind {
    match token_kind {
        TokenKind::Error(_) => SyntaxKind::Error,
        TokenKind::Async => SyntaxKind::Async,
        TokenKind::Class => SyntaxKind::Class,
        TokenKind::Def => SyntaxKind::Def,
        TokenKind::Elif => SyntaxKind::Elif,
        TokenKind::Else => SyntaxKind::Else,
        TokenKind::Except => SyntaxKind::Except,
        TokenKind::FalseKeyword => SyntaxKind::FalseKeyword,
        TokenKind::Finally => SyntaxKind::Finally,
        TokenKind::For => SyntaxKind::For,
        TokenKind::If => SyntaxKind::If,
        TokenKind::Lambda => SyntaxKind::Lambda,
        TokenKind::NoneKeyword => SyntaxKind::NoneKeyword,
        TokenKind::TrueKeyword => SyntaxKind::TrueKeyword,
        TokenKind::Try => SyntaxKind::Try,
        TokenKind::While => SyntaxKind::While,
        TokenKind::With => SyntaxKind::With,
        TokenKind::Keyword => SyntaxKind::Keyword,
        TokenKind::Identifier => SyntaxKind::Identifier,
        TokenKind::Number => SyntaxKind::Number,
        TokenKind::String => SyntaxKind::String,
        TokenKind::Ellipsis => SyntaxKind::Ellipsis,
        TokenKind::Arrow => SyntaxKind::Arrow,
        TokenKind::At => SyntaxKind::At,
        TokenKind::AugmentedAssign => SyntaxKind::AugmentedAssign,
        TokenKind::CloseBrace => SyntaxKind::CloseBrace,
        TokenKind::CloseParenthesis => SyntaxKind::CloseParenthesis,
        TokenKind::Colon => SyntaxKind::Colon,
        TokenKind::ColonEquals => SyntaxKind::ColonEquals,
        TokenKind::Comma => SyntaxKind::Comma,
        TokenKind::Dot => SyntaxKind::Dot,
        TokenKind::DoubleStar => SyntaxKind::DoubleStar,
        TokenKind::Equals => SyntaxKind::Equals,
        TokenKind::OpenBrace => SyntaxKind::OpenBrace,
        TokenKind::OpenParenthesis => SyntaxKind::OpenParenthesis,
        TokenKind::Operator => SyntaxKind::Operator,
        TokenKind::Semicolon => SyntaxKind::Semicolon,
        TokenKind::SquareCloseBracket => SyntaxKind::SquareCloseBracket,
        TokenKind::SquareOpenBracket => SyntaxKind::SquareOpenBracket,
        TokenKind::Star => SyntaxKind::Star,
        TokenKind::Comment => SyntaxKind::Comment,
        TokenKind::Dedent => SyntaxKind::Dedent,
        TokenKind::EndOfInput => SyntaxKind::EndOfInput,
        TokenKind::EscapedNewline => SyntaxKind::EscapedNewline,
        TokenKind::Indent => SyntaxKind::Indent,
        TokenKind::Newline => SyntaxKind::Newline,
        TokenKind::Whitespace => SyntaxKind::Whitespace,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    Error = 0,

    // Tokens
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
    Whitespace, // << last token

    // Statements
    ClassDefNode,
    FunctionDefNode,
    DecoratorNode,
    ArgListNode,
    ArgNode,
    KeywordArgNode,
    ParamListNode,
    BlockNode,
    CompoundStatementNode,
    AssignmentNode,
    AnnotatedAssignmentNode,
    AugmentedAssignmentNode,
    ExpressionStatementNode,
    SimpleStatementNode,

    // Expressions
    TupleExprNode,
    ListExprNode,
    DictExprNode,
    SetExprNode,
    ParenExprNode,
    ComprehensionExprNode,
    StringLiteralNode,
    LiteralNode,
    NameExprNode,
    LambdaExprNode,
    OtherExprNode,

    // Tokens the parser could not place
    ErrorNode,

    // Compound top-level node (i.e. the recipe file)
    // Must be the last entry in the enum
    RootNode,
}

impl SyntaxKind {
    pub fn is_token(&self) -> bool {
        (*self as u16) <= (SyntaxKind::Whitespace as u16)
    }

    pub fn is_node(&self) -> bool {
        !self.is_token()
    }

    /// Tokens that carry no meaning for the tree shape: spaces, comments, line continuations,
    /// and newlines inside brackets (lexed as whitespace).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::Comment | SyntaxKind::EscapedNewline
        )
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, SyntaxKind::EndOfInput)
    }

    /// Tokens that end a simple statement.
    pub fn is_statement_end(&self) -> bool {
        matches!(
            self,
            SyntaxKind::Newline | SyntaxKind::Semicolon | SyntaxKind::Dedent | SyntaxKind::Indent
        )
    }

    /// Tokens an expression never swallows when they appear outside brackets.
    pub fn is_expression_boundary(&self) -> bool {
        self.is_statement_end()
            || matches!(
                self,
                SyntaxKind::Comma
                    | SyntaxKind::Equals
                    | SyntaxKind::Colon
                    | SyntaxKind::AugmentedAssign
                    | SyntaxKind::CloseParenthesis
                    | SyntaxKind::SquareCloseBracket
                    | SyntaxKind::CloseBrace
                    | SyntaxKind::For
            )
    }

    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            SyntaxKind::OpenParenthesis | SyntaxKind::SquareOpenBracket | SyntaxKind::OpenBrace
        )
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            SyntaxKind::CloseParenthesis | SyntaxKind::SquareCloseBracket | SyntaxKind::CloseBrace
        )
    }

    pub fn is_compound_keyword(&self) -> bool {
        matches!(
            self,
            SyntaxKind::If
                | SyntaxKind::Elif
                | SyntaxKind::Else
                | SyntaxKind::For
                | SyntaxKind::While
                | SyntaxKind::With
                | SyntaxKind::Try
                | SyntaxKind::Except
                | SyntaxKind::Finally
        )
    }

    pub fn is_literal_keyword(&self) -> bool {
        matches!(
            self,
            SyntaxKind::NoneKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::Ellipsis
                | SyntaxKind::Number
        )
    }
}
