// This module adapted from Rust Analyzer (https://github.com/rust-analyzer/rust-analyzer), which
// is under MIT license.

use crate::parser::parse_recipe_from_str;
use crate::syntax::ast::expr::Expr;
use crate::syntax::ast::nodes::{Assignment, ClassDef};
use crate::syntax::ast::AstNode;
use itertools::Itertools;

pub fn ast_from_text<N: AstNode>(text: &str) -> N {
    let parse = parse_recipe_from_str(text);

    let node = match parse.syntax().descendants().find_map(N::cast) {
        Some(it) => it,
        None => {
            panic!(
                "Failed to make ast node `{}` from text {}",
                std::any::type_name::<N>(),
                text
            )
        }
    };
    let node = node.clone_subtree();
    assert_eq!(node.syntax().text_range().start(), 0.into());
    node
}

pub fn assignment(target: &str, value: &str) -> Assignment {
    ast_from_text::<Assignment>(&format!("{target} = {value}"))
}

/// The value of `x = <text>`.
pub fn expr(text: &str) -> Expr {
    let assignment = ast_from_text::<Assignment>(&format!("x = {text}"));
    match assignment.value() {
        Some(value) => value,
        None => panic!("Failed to make an expression from text {text}"),
    }
}

/// A class with the given bases, one body statement per line.
pub fn class_def(name: &str, bases: &[&str], body: &[&str]) -> ClassDef {
    let header = if bases.is_empty() {
        format!("class {name}:")
    } else {
        format!("class {name}({}):", bases.iter().join(", "))
    };

    let body = if body.is_empty() {
        "    pass".to_string()
    } else {
        body.iter().map(|line| format!("    {line}")).join("\n")
    };

    ast_from_text(&format!("{header}\n{body}\n"))
}
