use crate::ast_token;
use crate::syntax::ast::AstToken;

ast_token!(Identifier, Identifier);
ast_token!(Number, Number);
ast_token!(Comment, Comment);
ast_token!(StringToken, String);

impl StringToken {
    /// The string prefix (`r`, `b`, `f`, `rb`, ...), possibly empty.
    pub fn prefix(&self) -> &str {
        let text = self.text();
        let end = text.find(|c: char| c == '\'' || c == '"').unwrap_or(text.len());
        &text[..end]
    }

    pub fn is_bytes(&self) -> bool {
        self.prefix().to_ascii_lowercase().contains('b')
    }

    pub fn is_formatted(&self) -> bool {
        self.prefix().to_ascii_lowercase().contains('f')
    }

    pub fn is_raw(&self) -> bool {
        self.prefix().to_ascii_lowercase().contains('r')
    }

    pub fn is_triple_quoted(&self) -> bool {
        let body = &self.text()[self.prefix().len()..];
        body.starts_with("'''") || body.starts_with("\"\"\"")
    }

    /// Text between the quotes, escapes left as written.
    pub fn content(&self) -> &str {
        let body = &self.text()[self.prefix().len()..];
        let quote_len = if self.is_triple_quoted() { 3 } else { 1 };
        if body.len() < quote_len * 2 {
            return "";
        }
        &body[quote_len..body.len() - quote_len]
    }
}
