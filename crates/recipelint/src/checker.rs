use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use recipelint_syntax::parser::{parse_recipe_from_str, ParseError};
use recipelint_syntax::syntax::ast::nodes::{Assignment, ClassDef};
use recipelint_syntax::syntax::ast::{support, AstNode, SyntaxKind, SyntaxNode};
use recipelint_syntax::LineIndex;
use rowan::{TextSize, WalkEvent};
use tracing::{debug, error, warn};

use crate::checkers::RecipeMatcher;
use crate::config::LintConfig;
use crate::diagnostic::{Diagnostic, MessageDefinition};
use crate::errors::{LintError, LintResult};

/// A set of related messages and the tree hooks that emit them. Checkers hold no per-file
/// state; everything they learn about a file comes from the node they are visiting.
pub trait Checker {
    fn name(&self) -> &'static str;

    fn messages(&self) -> &'static [MessageDefinition];

    fn visit_assignment(&self, _ctx: &mut LintContext, _node: &Assignment) {}

    fn visit_class_def(&self, _ctx: &mut LintContext, _node: &ClassDef) {}
}

/// Per-file state handed to checker hooks.
pub struct LintContext<'a> {
    path: &'a Path,
    line_index: LineIndex,
    config: &'a LintConfig,
    messages: &'a IndexMap<&'static str, MessageDefinition>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintContext<'a> {
    pub fn recipe_matcher(&self) -> RecipeMatcher<'_> {
        RecipeMatcher::new(&self.config.recipe_base)
    }

    /// Record `symbol` against `node`, unless the message is disabled.
    pub fn add_message(&mut self, symbol: &str, node: &SyntaxNode) {
        let Some(message) = self.messages.values().find(|m| m.matches(symbol)).copied() else {
            error!(symbol, "checker emitted an unregistered message");
            return;
        };

        if self.config.is_disabled(&message) {
            return;
        }

        let position = self.line_index.line_col(anchor(node));
        self.diagnostics.push(Diagnostic {
            path: self.path.to_path_buf(),
            position,
            message,
        });
    }
}

/// Where a diagnostic on `node` is reported: the `class` keyword of a class (not its first
/// decorator), otherwise the first significant token.
fn anchor(node: &SyntaxNode) -> TextSize {
    let token = match node.kind() {
        SyntaxKind::ClassDefNode => support::token_of_kind(node, SyntaxKind::Class),
        _ => None,
    }
    .or_else(|| support::first_significant_token(node));

    token
        .map(|t| t.text_range().start())
        .unwrap_or_else(|| node.text_range().start())
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub parse_errors: Vec<ParseError>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Linter {
    config: LintConfig,
    checkers: Vec<Box<dyn Checker>>,
    messages: IndexMap<&'static str, MessageDefinition>,
}

impl Linter {
    pub fn new(config: LintConfig) -> Linter {
        Linter {
            config,
            checkers: vec![],
            messages: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(|c| c.as_ref())
    }

    /// All registered messages, in registration order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDefinition> {
        self.messages.values()
    }

    pub fn message(&self, id_or_symbol: &str) -> Option<&MessageDefinition> {
        self.messages.values().find(|m| m.matches(id_or_symbol))
    }

    pub fn register_checker(&mut self, checker: Box<dyn Checker>) -> LintResult<()> {
        let mut seen: Vec<&MessageDefinition> = vec![];
        for message in checker.messages() {
            let clash = self
                .messages
                .values()
                .chain(seen.iter().copied())
                .any(|m| m.msgid == message.msgid || m.symbol == message.symbol);
            if clash {
                return Err(LintError::DuplicateMessage(format!(
                    "{} ({})",
                    message.msgid, message.symbol
                )));
            }
            seen.push(message);
        }

        for message in checker.messages() {
            self.messages.insert(message.msgid, *message);
        }

        debug!(checker = checker.name(), "registered checker");
        self.checkers.push(checker);
        Ok(())
    }

    /// Every name in the disabled list must refer to a registered message.
    pub fn validate_config(&self) -> LintResult<()> {
        for name in &self.config.disabled {
            if self.message(name).is_none() {
                return Err(LintError::UnknownMessage(name.clone()));
            }
        }

        Ok(())
    }

    pub fn lint_source(&self, path: &Path, text: &str) -> FileReport {
        debug!(path = %path.display(), "linting");

        let parse = parse_recipe_from_str(text);
        for err in parse.errors() {
            warn!(path = %path.display(), "parse error at {}", err);
        }

        let mut ctx = LintContext {
            path,
            line_index: LineIndex::new(text),
            config: &self.config,
            messages: &self.messages,
            diagnostics: vec![],
        };

        for event in parse.syntax().preorder() {
            let WalkEvent::Enter(node) = event else {
                continue;
            };

            match node.kind() {
                SyntaxKind::ClassDefNode => {
                    if let Some(class) = ClassDef::cast(node) {
                        for checker in &self.checkers {
                            checker.visit_class_def(&mut ctx, &class);
                        }
                    }
                }
                SyntaxKind::AssignmentNode => {
                    if let Some(assignment) = Assignment::cast(node) {
                        for checker in &self.checkers {
                            checker.visit_assignment(&mut ctx, &assignment);
                        }
                    }
                }
                _ => {}
            }
        }

        let mut diagnostics = ctx.diagnostics;
        diagnostics.sort_by(|a, b| {
            (a.position, a.message.msgid).cmp(&(b.position, b.message.msgid))
        });
        debug!(path = %path.display(), count = diagnostics.len(), "done");

        FileReport {
            path: path.to_path_buf(),
            diagnostics,
            parse_errors: parse.errors().to_vec(),
        }
    }

    pub fn lint_path(&self, path: &Path) -> LintResult<FileReport> {
        let text = fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.lint_source(path, &text))
    }
}
