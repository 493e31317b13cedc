use crate::ast_node;
use crate::syntax::ast::expr::Expr;
use crate::syntax::ast::tokens::Identifier;
use crate::syntax::ast::{support, AstChildren, AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(Root, RootNode);
impl Root {
    pub fn statements(&self) -> AstChildren<Statement> {
        support::children(self.syntax())
    }

    pub fn class_defs(&self) -> AstChildren<ClassDef> {
        support::children(self.syntax())
    }
}

ast_node!(ClassDef, ClassDefNode);
impl ClassDef {
    pub fn class_kw(&self) -> Option<SyntaxToken> {
        support::token_of_kind(&self.syntax, SyntaxKind::Class)
    }

    pub fn name(&self) -> Option<Identifier> {
        support::token(&self.syntax)
    }

    pub fn decorators(&self) -> AstChildren<Decorator> {
        support::children(&self.syntax)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        support::child(&self.syntax)
    }

    /// Source text of each positional base, trivia removed (`conans.ConanFile`). Keyword
    /// arguments such as `metaclass=...` are not bases.
    pub fn base_names(&self) -> Vec<String> {
        self.arg_list()
            .map(|args| {
                args.args()
                    .map(|arg| support::significant_text(arg.syntax()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

ast_node!(FunctionDef, FunctionDefNode);
impl FunctionDef {
    pub fn name(&self) -> Option<Identifier> {
        support::token(&self.syntax)
    }

    pub fn decorators(&self) -> AstChildren<Decorator> {
        support::children(&self.syntax)
    }

    pub fn params(&self) -> Option<ParamList> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

ast_node!(Decorator, DecoratorNode);
impl Decorator {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

ast_node!(ArgList, ArgListNode);
impl ArgList {
    pub fn args(&self) -> AstChildren<Arg> {
        support::children(&self.syntax)
    }

    pub fn keyword_args(&self) -> AstChildren<KeywordArg> {
        support::children(&self.syntax)
    }
}

ast_node!(Arg, ArgNode);
impl Arg {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

ast_node!(KeywordArg, KeywordArgNode);
impl KeywordArg {
    pub fn name(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn value(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(1)
    }
}

ast_node!(ParamList, ParamListNode);

ast_node!(Block, BlockNode);
impl Block {
    pub fn statements(&self) -> AstChildren<Statement> {
        support::children(&self.syntax)
    }

    /// The class whose body this block is, if any.
    pub fn enclosing_class(&self) -> Option<ClassDef> {
        self.syntax.parent().and_then(ClassDef::cast)
    }
}

// `if`, `for`, `while`, `with`, `try` and their continuation clauses, each clause as its own
// statement.
ast_node!(CompoundStatement, CompoundStatementNode);
impl CompoundStatement {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child(&self.syntax)
    }
}

ast_node!(Assignment, AssignmentNode);
impl Assignment {
    /// All targets of a chained assignment, left to right.
    pub fn targets(&self) -> Vec<Expr> {
        let mut exprs: Vec<Expr> = support::children(&self.syntax).collect();
        if exprs.len() >= 2 {
            exprs.pop();
        }
        exprs
    }

    pub fn first_target(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    /// Target text with trivia removed; `settings` for `settings = ...`.
    pub fn first_target_text(&self) -> Option<String> {
        self.first_target()
            .map(|target| support::significant_text(target.syntax()))
    }

    /// The assigned value. Absent when the right hand side failed to parse.
    pub fn value(&self) -> Option<Expr> {
        let exprs: Vec<Expr> = support::children(&self.syntax).collect();
        if exprs.len() < 2 {
            return None;
        }
        exprs.into_iter().last()
    }

    /// The class this assignment is a direct body statement of.
    pub fn enclosing_class(&self) -> Option<ClassDef> {
        self.syntax
            .parent()
            .and_then(Block::cast)
            .and_then(|block| block.enclosing_class())
    }
}

ast_node!(AnnotatedAssignment, AnnotatedAssignmentNode);
impl AnnotatedAssignment {
    pub fn target(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn annotation(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(1)
    }

    pub fn value(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(2)
    }
}

ast_node!(AugmentedAssignment, AugmentedAssignmentNode);
impl AugmentedAssignment {
    pub fn target(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        support::token_of_kind(&self.syntax, SyntaxKind::AugmentedAssign)
    }

    pub fn value(&self) -> Option<Expr> {
        support::children(&self.syntax).nth(1)
    }
}

ast_node!(ExpressionStatement, ExpressionStatementNode);
impl ExpressionStatement {
    pub fn expr(&self) -> Option<Expr> {
        support::child(&self.syntax)
    }
}

// Keyword-led simple statements: `return`, `import`, `pass`, `del`, ...
ast_node!(SimpleStatement, SimpleStatementNode);

// Tokens the parser skipped while recovering from a syntax error.
ast_node!(ErrorStatement, ErrorNode);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    Compound(CompoundStatement),
    Assignment(Assignment),
    AnnotatedAssignment(AnnotatedAssignment),
    AugmentedAssignment(AugmentedAssignment),
    Expression(ExpressionStatement),
    Simple(SimpleStatement),
    Error(ErrorStatement),
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized,
    {
        matches!(
            kind,
            SyntaxKind::ClassDefNode
                | SyntaxKind::FunctionDefNode
                | SyntaxKind::CompoundStatementNode
                | SyntaxKind::AssignmentNode
                | SyntaxKind::AnnotatedAssignmentNode
                | SyntaxKind::AugmentedAssignmentNode
                | SyntaxKind::ExpressionStatementNode
                | SyntaxKind::SimpleStatementNode
                | SyntaxKind::ErrorNode
        )
    }

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized,
    {
        let res = match syntax.kind() {
            SyntaxKind::ClassDefNode => Statement::ClassDef(ClassDef { syntax }),
            SyntaxKind::FunctionDefNode => Statement::FunctionDef(FunctionDef { syntax }),
            SyntaxKind::CompoundStatementNode => {
                Statement::Compound(CompoundStatement { syntax })
            }
            SyntaxKind::AssignmentNode => Statement::Assignment(Assignment { syntax }),
            SyntaxKind::AnnotatedAssignmentNode => {
                Statement::AnnotatedAssignment(AnnotatedAssignment { syntax })
            }
            SyntaxKind::AugmentedAssignmentNode => {
                Statement::AugmentedAssignment(AugmentedAssignment { syntax })
            }
            SyntaxKind::ExpressionStatementNode => {
                Statement::Expression(ExpressionStatement { syntax })
            }
            SyntaxKind::SimpleStatementNode => Statement::Simple(SimpleStatement { syntax }),
            SyntaxKind::ErrorNode => Statement::Error(ErrorStatement { syntax }),
            _ => return None,
        };

        Some(res)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Statement::ClassDef(it) => &it.syntax,
            Statement::FunctionDef(it) => &it.syntax,
            Statement::Compound(it) => &it.syntax,
            Statement::Assignment(it) => &it.syntax,
            Statement::AnnotatedAssignment(it) => &it.syntax,
            Statement::AugmentedAssignment(it) => &it.syntax,
            Statement::Expression(it) => &it.syntax,
            Statement::Simple(it) => &it.syntax,
            Statement::Error(it) => &it.syntax,
        }
    }
}
