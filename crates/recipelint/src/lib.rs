pub mod checker;
pub mod checkers;
pub mod config;
pub mod diagnostic;
pub mod errors;
pub mod plugin;
pub mod report;
#[cfg(test)]
mod tests;

pub use checker::{Checker, FileReport, LintContext, Linter};
pub use config::{LintConfig, LintConfigBuilder};
pub use diagnostic::{Diagnostic, MessageDefinition};
pub use errors::{LintError, LintResult};
