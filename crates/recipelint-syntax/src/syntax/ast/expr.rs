use crate::ast_node;
use crate::syntax::ast::tokens::{Identifier, StringToken};
use crate::syntax::ast::{support, AstChildren, AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(TupleExpr, TupleExprNode);
impl TupleExpr {
    pub fn elements(&self) -> AstChildren<Expr> {
        support::children(&self.syntax)
    }

    pub fn is_parenthesized(&self) -> bool {
        support::token_of_kind(&self.syntax, SyntaxKind::OpenParenthesis).is_some()
    }
}

ast_node!(ListExpr, ListExprNode);
impl ListExpr {
    pub fn elements(&self) -> AstChildren<Expr> {
        support::children(&self.syntax)
    }
}

ast_node!(SetExpr, SetExprNode);
impl SetExpr {
    pub fn elements(&self) -> AstChildren<Expr> {
        support::children(&self.syntax)
    }
}

ast_node!(DictExpr, DictExprNode);
impl DictExpr {
    /// Key and value expressions in source order; `**spread` entries contribute one expression.
    pub fn items(&self) -> AstChildren<Expr> {
        support::children(&self.syntax)
    }
}

ast_node!(ParenExpr, ParenExprNode);
impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

ast_node!(ComprehensionExpr, ComprehensionExprNode);

ast_node!(StringLiteral, StringLiteralNode);
impl StringLiteral {
    /// The adjacent string tokens making up this literal (`"a" "b"` has two).
    pub fn parts(&self) -> impl Iterator<Item = StringToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter_map(<StringToken as crate::syntax::ast::AstToken>::cast)
    }

    pub fn is_bytes(&self) -> bool {
        self.parts().any(|p| p.is_bytes())
    }

    pub fn is_formatted(&self) -> bool {
        self.parts().any(|p| p.is_formatted())
    }

    /// Concatenated contents of all parts, escapes left as written.
    pub fn value(&self) -> String {
        self.parts().map(|p| p.content().to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    None,
    True,
    False,
    Ellipsis,
}

ast_node!(Literal, LiteralNode);
impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::Number => LiteralKind::Number,
            SyntaxKind::NoneKeyword => LiteralKind::None,
            SyntaxKind::TrueKeyword => LiteralKind::True,
            SyntaxKind::FalseKeyword => LiteralKind::False,
            SyntaxKind::Ellipsis => LiteralKind::Ellipsis,
            _ => return None,
        };
        Some(kind)
    }
}

ast_node!(NameExpr, NameExprNode);
impl NameExpr {
    pub fn identifier(&self) -> Option<Identifier> {
        support::token(&self.syntax)
    }

    pub fn name(&self) -> String {
        self.syntax.text().to_string()
    }
}

ast_node!(LambdaExpr, LambdaExprNode);

// Anything the parser does not model: calls, attribute access, subscripts, operators,
// conditional expressions, starred expressions.
ast_node!(OtherExpr, OtherExprNode);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Tuple(TupleExpr),
    List(ListExpr),
    Set(SetExpr),
    Dict(DictExpr),
    Paren(ParenExpr),
    Comprehension(ComprehensionExpr),
    String(StringLiteral),
    Literal(Literal),
    Name(NameExpr),
    Lambda(LambdaExpr),
    Other(OtherExpr),
}

impl Expr {
    /// Strip grouping parentheses: `(("os"))` is the string `"os"`. A parenthesized tuple is
    /// already a tuple and is returned as is.
    pub fn unparenthesized(self) -> Option<Expr> {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = paren.inner()?;
        }
        Some(expr)
    }
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized,
    {
        matches!(
            kind,
            SyntaxKind::TupleExprNode
                | SyntaxKind::ListExprNode
                | SyntaxKind::SetExprNode
                | SyntaxKind::DictExprNode
                | SyntaxKind::ParenExprNode
                | SyntaxKind::ComprehensionExprNode
                | SyntaxKind::StringLiteralNode
                | SyntaxKind::LiteralNode
                | SyntaxKind::NameExprNode
                | SyntaxKind::LambdaExprNode
                | SyntaxKind::OtherExprNode
        )
    }

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized,
    {
        let res = match syntax.kind() {
            SyntaxKind::TupleExprNode => Expr::Tuple(TupleExpr { syntax }),
            SyntaxKind::ListExprNode => Expr::List(ListExpr { syntax }),
            SyntaxKind::SetExprNode => Expr::Set(SetExpr { syntax }),
            SyntaxKind::DictExprNode => Expr::Dict(DictExpr { syntax }),
            SyntaxKind::ParenExprNode => Expr::Paren(ParenExpr { syntax }),
            SyntaxKind::ComprehensionExprNode => {
                Expr::Comprehension(ComprehensionExpr { syntax })
            }
            SyntaxKind::StringLiteralNode => Expr::String(StringLiteral { syntax }),
            SyntaxKind::LiteralNode => Expr::Literal(Literal { syntax }),
            SyntaxKind::NameExprNode => Expr::Name(NameExpr { syntax }),
            SyntaxKind::LambdaExprNode => Expr::Lambda(LambdaExpr { syntax }),
            SyntaxKind::OtherExprNode => Expr::Other(OtherExpr { syntax }),
            _ => return None,
        };

        Some(res)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Tuple(it) => &it.syntax,
            Expr::List(it) => &it.syntax,
            Expr::Set(it) => &it.syntax,
            Expr::Dict(it) => &it.syntax,
            Expr::Paren(it) => &it.syntax,
            Expr::Comprehension(it) => &it.syntax,
            Expr::String(it) => &it.syntax,
            Expr::Literal(it) => &it.syntax,
            Expr::Name(it) => &it.syntax,
            Expr::Lambda(it) => &it.syntax,
            Expr::Other(it) => &it.syntax,
        }
    }
}
