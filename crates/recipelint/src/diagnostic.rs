use std::fmt;
use std::path::PathBuf;

use recipelint_syntax::LineCol;

/// A message a checker can emit, identified both by `msgid` (`E9001`) and `symbol`
/// (`conan-missing-setting`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageDefinition {
    pub msgid: &'static str,
    pub msg: &'static str,
    pub symbol: &'static str,
    /// Longer rationale, shown by `--list-msgs`
    pub description: &'static str,
}

impl MessageDefinition {
    pub fn matches(&self, id_or_symbol: &str) -> bool {
        self.msgid == id_or_symbol || self.symbol == id_or_symbol
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub position: LineCol,
    pub message: MessageDefinition,
}

impl Diagnostic {
    pub fn msgid(&self) -> &'static str {
        self.message.msgid
    }

    pub fn symbol(&self) -> &'static str {
        self.message.symbol
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.col
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} ({})",
            self.path.display(),
            self.position.line,
            self.position.col,
            self.message.msgid,
            self.message.msg,
            self.message.symbol
        )
    }
}
