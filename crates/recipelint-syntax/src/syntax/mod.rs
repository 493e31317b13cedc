pub mod ast;
pub mod make;
pub mod syntax_kind;
pub mod syntax_node;
