// This module adapted from Rust Analyzer (https://github.com/rust-analyzer/rust-analyzer), which
// is under MIT license.

use std::marker::PhantomData;

pub use crate::syntax::syntax_kind::SyntaxKind;
pub use crate::syntax::syntax_node::{SyntaxNode, SyntaxNodeChildren, SyntaxToken};

pub mod expr;
pub mod nodes;
pub mod tokens;

/// The main trait to go from untyped `SyntaxNode` to a typed ast. The conversion itself has zero
/// runtime cost: ast and syntax nodes have exactly the same representation: a pointer to the
/// tree root and a pointer to the node itself.
pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;

    fn clone_for_update(&self) -> Self
    where
        Self: Sized,
    {
        Self::cast(self.syntax().clone_for_update()).unwrap()
    }

    fn clone_subtree(&self) -> Self
    where
        Self: Sized,
    {
        Self::cast(self.syntax().clone_subtree()).unwrap()
    }
}

/// Like `AstNode`, but wraps tokens rather than interior nodes.
pub trait AstToken {
    fn can_cast(token: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxToken) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxToken;

    fn text(&self) -> &str {
        self.syntax().text()
    }
}

/// An iterator over `SyntaxNode` children of a particular AST type.
#[derive(Debug, Clone)]
pub struct AstChildren<N> {
    inner: SyntaxNodeChildren,
    ph: PhantomData<N>,
}

impl<N> AstChildren<N> {
    fn new(parent: &SyntaxNode) -> Self {
        AstChildren {
            inner: parent.children(),
            ph: PhantomData,
        }
    }
}

impl<N: AstNode> Iterator for AstChildren<N> {
    type Item = N;
    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

pub mod support {
    use super::{AstChildren, AstNode, SyntaxKind, SyntaxNode, SyntaxToken};
    use crate::syntax::ast::AstToken;

    pub fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
        parent.children().find_map(N::cast)
    }

    pub fn children<N: AstNode>(parent: &SyntaxNode) -> AstChildren<N> {
        AstChildren::new(parent)
    }

    pub fn token<T: AstToken>(parent: &SyntaxNode) -> Option<T> {
        parent
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find_map(T::cast)
    }

    pub fn token_of_kind(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| it.kind() == kind)
    }

    /// First token of `node` (at any depth) that is not trivia or a zero-width indentation marker.
    pub fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
        node.descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| is_significant(it.kind()))
    }

    /// Source text of `node` with whitespace, comments and line continuations removed, so that
    /// `conans . ConanFile` and `conans.ConanFile` compare equal.
    pub fn significant_text(node: &SyntaxNode) -> String {
        node.descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|it| is_significant(it.kind()))
            .map(|it| it.text().to_string())
            .collect()
    }

    fn is_significant(kind: SyntaxKind) -> bool {
        !kind.is_trivia()
            && !matches!(
                kind,
                SyntaxKind::Newline | SyntaxKind::Indent | SyntaxKind::Dedent
            )
    }
}

#[macro_export]
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            pub(crate) syntax: $crate::syntax::ast::SyntaxNode,
        }

        impl $crate::syntax::ast::AstNode for $name {
            fn can_cast(kind: $crate::syntax::ast::SyntaxKind) -> bool
            where
                Self: Sized,
            {
                kind == $crate::syntax::ast::SyntaxKind::$kind
            }

            fn cast(syntax: $crate::syntax::ast::SyntaxNode) -> Option<Self>
            where
                Self: Sized,
            {
                if Self::can_cast(syntax.kind()) {
                    Some(Self { syntax })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &$crate::syntax::ast::SyntaxNode {
                &self.syntax
            }
        }
    };
}

#[macro_export]
macro_rules! ast_token {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            pub(crate) syntax: $crate::syntax::ast::SyntaxToken,
        }

        impl $crate::syntax::ast::AstToken for $name {
            fn can_cast(kind: $crate::syntax::ast::SyntaxKind) -> bool
            where
                Self: Sized,
            {
                kind == $crate::syntax::ast::SyntaxKind::$kind
            }

            fn cast(syntax: $crate::syntax::ast::SyntaxToken) -> Option<Self>
            where
                Self: Sized,
            {
                if Self::can_cast(syntax.kind()) {
                    Some(Self { syntax })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &$crate::syntax::ast::SyntaxToken {
                &self.syntax
            }
        }
    };
}
