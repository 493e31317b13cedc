use recipelint_syntax::syntax::ast::expr::Expr;
use recipelint_syntax::syntax::ast::nodes::{Assignment, ClassDef, Statement};
use recipelint_syntax::syntax::ast::AstNode;
use tracing::trace;

use crate::checker::{Checker, LintContext};
use crate::diagnostic::MessageDefinition;

const SETTINGS: &str = "settings";

/// `os`, `arch`, `compiler` and `build_type`
const FULL_SETTINGS_LEN: usize = 4;

pub const MISSING_SETTING: &str = "conan-missing-setting";
pub const DICT_SETTINGS: &str = "conan-dict-settings";
pub const MISSING_SETTINGS: &str = "conan-missing-settings";

static MESSAGES: &[MessageDefinition] = &[
    MessageDefinition {
        msgid: "E9001",
        msg: "Missing one or more settings",
        symbol: MISSING_SETTING,
        description: "Use full settings always: \
            `settings = 'arch', 'build_type', 'compiler', 'os'`",
    },
    MessageDefinition {
        msgid: "E9002",
        msg: "Do not use settings as a dictionary",
        symbol: DICT_SETTINGS,
        description: "Use only the default settings: \
            `settings = 'arch', 'build_type', 'compiler', 'os'`.\
            The configuration can be restricted in `validate()`",
    },
    MessageDefinition {
        msgid: "E9003",
        msg: "Missing settings attribute",
        symbol: MISSING_SETTINGS,
        description: "The member attribute `settings` must be declared with all values: \
            `settings = 'arch', 'build_type', 'compiler', 'os'`",
    },
];

/// Shape of the value bound to `settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsValue {
    /// A single string or other constant
    Scalar,
    /// Tuple or list literal with this many elements
    Sequence(usize),
    Mapping,
    /// Anything whose contents cannot be known without evaluating it
    Opaque,
}

impl SettingsValue {
    pub fn classify(value: Expr) -> SettingsValue {
        match value.unparenthesized() {
            Some(Expr::String(string)) if string.is_formatted() => SettingsValue::Opaque,
            Some(Expr::String(_) | Expr::Literal(_)) => SettingsValue::Scalar,
            Some(Expr::Tuple(tuple)) => SettingsValue::Sequence(tuple.elements().count()),
            Some(Expr::List(list)) => SettingsValue::Sequence(list.elements().count()),
            Some(Expr::Dict(_)) => SettingsValue::Mapping,
            _ => SettingsValue::Opaque,
        }
    }
}

fn is_settings_assignment(assignment: &Assignment) -> bool {
    assignment.first_target_text().as_deref() == Some(SETTINGS)
}

/// Recipes must declare all four settings as a flat sequence.
#[derive(Debug, Default)]
pub struct FullSettings;

impl Checker for FullSettings {
    fn name(&self) -> &'static str {
        "conan-full-settings"
    }

    fn messages(&self) -> &'static [MessageDefinition] {
        MESSAGES
    }

    fn visit_assignment(&self, ctx: &mut LintContext, node: &Assignment) {
        if !is_settings_assignment(node) {
            return;
        }

        let Some(class) = node.enclosing_class() else {
            return;
        };
        if !ctx.recipe_matcher().matches(&class) {
            return;
        }

        let Some(value) = node.value() else {
            return;
        };

        let shape = SettingsValue::classify(value);
        trace!(?shape, "settings assignment");
        match shape {
            SettingsValue::Scalar => ctx.add_message(MISSING_SETTING, node.syntax()),
            SettingsValue::Sequence(len) if len < FULL_SETTINGS_LEN => {
                ctx.add_message(MISSING_SETTING, node.syntax())
            }
            SettingsValue::Mapping => ctx.add_message(DICT_SETTINGS, node.syntax()),
            SettingsValue::Sequence(_) | SettingsValue::Opaque => {}
        }
    }

    fn visit_class_def(&self, ctx: &mut LintContext, node: &ClassDef) {
        if !ctx.recipe_matcher().matches(node) {
            return;
        }

        let declared = node
            .body()
            .map(|body| {
                body.statements().any(|statement| match statement {
                    Statement::Assignment(assignment) => is_settings_assignment(&assignment),
                    _ => false,
                })
            })
            .unwrap_or(false);

        if !declared {
            ctx.add_message(MISSING_SETTINGS, node.syntax());
        }
    }
}
