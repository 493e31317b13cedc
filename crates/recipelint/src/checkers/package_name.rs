use recipelint_syntax::syntax::ast::expr::Expr;
use recipelint_syntax::syntax::ast::nodes::{Assignment, ClassDef, Statement};
use recipelint_syntax::syntax::ast::AstNode;

use crate::checker::{Checker, LintContext};
use crate::diagnostic::MessageDefinition;

pub const BAD_NAME: &str = "conan-bad-name";
pub const MISSING_NAME: &str = "conan-missing-name";

static MESSAGES: &[MessageDefinition] = &[
    MessageDefinition {
        msgid: "E9004",
        msg: "Reference name should be all lowercase",
        symbol: BAD_NAME,
        description: "Use only lower-case on the package name: `name = 'foobar'`.",
    },
    MessageDefinition {
        msgid: "E9005",
        msg: "Missing name attribute",
        symbol: MISSING_NAME,
        description: "The member attribute `name` should be declared: `name = 'foobar'`.",
    },
];

/// The constant bound by `name = <constant>`, if `assignment` is one.
fn name_constant(assignment: &Assignment) -> Option<Expr> {
    let targets = assignment.targets();
    let [Expr::Name(target)] = targets.as_slice() else {
        return None;
    };
    if target.name() != "name" {
        return None;
    }

    match assignment.value()?.unparenthesized()? {
        Expr::String(string) if string.is_formatted() => None,
        value @ (Expr::String(_) | Expr::Literal(_)) => Some(value),
        _ => None,
    }
}

/// Recipe reference names are lowercase.
#[derive(Debug, Default)]
pub struct PackageName;

impl Checker for PackageName {
    fn name(&self) -> &'static str {
        "conan-package-name"
    }

    fn messages(&self) -> &'static [MessageDefinition] {
        MESSAGES
    }

    fn visit_class_def(&self, ctx: &mut LintContext, node: &ClassDef) {
        if !ctx.recipe_matcher().matches(node) {
            return;
        }

        let found = node.body().and_then(|body| {
            body.statements().find_map(|statement| match statement {
                Statement::Assignment(assignment) => {
                    name_constant(&assignment).map(|value| (assignment, value))
                }
                _ => None,
            })
        });

        match found {
            Some((assignment, Expr::String(string))) if !string.is_bytes() => {
                let value = string.value();
                if value != value.to_lowercase() {
                    ctx.add_message(BAD_NAME, assignment.syntax());
                }
            }
            Some(_) => {}
            None => ctx.add_message(MISSING_NAME, node.syntax()),
        }
    }
}
