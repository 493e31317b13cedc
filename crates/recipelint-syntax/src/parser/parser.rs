use recipelint_lexer::{tokenize, TokenKind};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, NodeOrToken};

use crate::parser::{ParseError, ParseErrorKind};
use crate::syntax::ast::nodes::Root;
use crate::syntax::syntax_kind::{syntax_kind_for_token_kind, SyntaxKind};
use crate::syntax::syntax_node::{SyntaxElement, SyntaxNode};

/// Result of parsing one recipe file. The tree always covers the whole input, errors or not.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Root {
        Root {
            syntax: self.syntax(),
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

/// Brackets, lambdas and indented blocks nested deeper than this are not parsed structurally.
const MAX_NESTING: usize = 200;

/// What a bracketed display contained, used to pick its node kind once the closer is reached.
#[derive(Debug, Default)]
struct BracketShape {
    exprs: usize,
    commas: usize,
    colon: bool,
    double_star: bool,
    comprehension: bool,
    raw: bool,
}

struct Parser<'text> {
    builder: GreenNodeBuilder<'static>,
    tokens: Vec<(SyntaxKind, &'text str)>,
    pos: usize,
    /// Byte offset of `tokens[pos]`
    offset: usize,
    errors: Vec<ParseError>,
    /// Open brackets, lambda bodies and blocks enclosing the current position
    depth: usize,
}

impl<'text> Parser<'text> {
    fn bump_raw(&mut self) {
        if let Some(&(kind, text)) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), text);
            self.pos += 1;
            self.offset += text.len();
        }
    }

    fn eat_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .map(|&(kind, _)| kind.is_trivia())
            .unwrap_or(false)
        {
            self.bump_raw();
        }
    }

    /// Kind of the `n`th upcoming significant token. Does not consume anything.
    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .map(|&(kind, _)| kind)
            .filter(|kind| !kind.is_trivia())
            .nth(n)
    }

    fn peek(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    /// Consume the next significant token, along with any trivia before it.
    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_raw();
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    fn allow(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }

        false
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.allow(kind) {
            return true;
        }

        let found = self.peek();
        self.error(ParseErrorKind::ExpectedToken {
            expected: kind,
            found,
        });
        false
    }

    fn at_statement_end(&self) -> bool {
        self.peek().map(|k| k.is_statement_end()).unwrap_or(true)
    }

    fn at_expression_end(&self) -> bool {
        self.peek()
            .map(|k| k.is_expression_boundary())
            .unwrap_or(true)
    }

    fn error(&mut self, kind: ParseErrorKind) {
        self.eat_trivia();
        self.errors.push(ParseError::new(self.offset, kind));
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    /// Enter one more level of nesting. Past `MAX_NESTING` this records an error and returns
    /// false, and the caller must consume its construct without recursing.
    fn enter_nested(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            self.error(ParseErrorKind::NestingTooDeep);
            return false;
        }

        self.depth += 1;
        true
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    /// Statements of an indented block whose `Indent` is next, nested blocks included.
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BlockNode);
        self.bump();
        if self.enter_nested() {
            self.parse_block_statements();
            self.leave_nested();
        } else {
            self.skip_block();
        }
        self.finish_node();
    }

    /// Consume tokens up to and including the `Dedent` closing the current block.
    fn skip_block(&mut self) {
        let mut level = 1usize;
        while let Some(kind) = self.peek() {
            self.bump();
            match kind {
                SyntaxKind::Indent => level += 1,
                SyntaxKind::Dedent => {
                    level -= 1;
                    if level == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume the rest of an expression flat: up to the end of the statement or a closing
    /// bracket that was not opened here.
    fn skip_expr(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            if kind.is_statement_end() {
                return;
            }
            if kind.is_close_bracket() {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            } else if kind.is_open_bracket() {
                depth += 1;
            }
            self.bump();
        }
    }

    /// Absorb the rest of the logical line into an error node.
    fn recover_to_statement_end(&mut self) {
        self.start_node(SyntaxKind::ErrorNode);
        while !self.at_statement_end() {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        let Some(kind) = self.peek() else {
            return;
        };

        match kind {
            SyntaxKind::Newline | SyntaxKind::Semicolon | SyntaxKind::Dedent => self.bump(),
            SyntaxKind::Indent => {
                self.error(ParseErrorKind::UnexpectedIndent);
                self.parse_block();
            }
            SyntaxKind::Error => {
                self.start_node(SyntaxKind::ErrorNode);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::At => self.parse_decorated(),
            SyntaxKind::Class => {
                let checkpoint = self.checkpoint();
                self.parse_class_def(checkpoint);
            }
            SyntaxKind::Def => {
                let checkpoint = self.checkpoint();
                self.parse_function_def(checkpoint);
            }
            SyntaxKind::Async if self.nth(1) == Some(SyntaxKind::Def) => {
                let checkpoint = self.checkpoint();
                self.parse_function_def(checkpoint);
            }
            SyntaxKind::Async
                if matches!(self.nth(1), Some(SyntaxKind::For | SyntaxKind::With)) =>
            {
                self.parse_compound_statement()
            }
            k if k.is_compound_keyword() => self.parse_compound_statement(),
            _ => self.parse_simple_statements(),
        }
    }

    /// Statements of an indented block, up to and including its closing `Dedent`.
    fn parse_block_statements(&mut self) {
        loop {
            match self.peek() {
                None => break,
                Some(SyntaxKind::Dedent) => {
                    self.bump();
                    break;
                }
                Some(_) => self.parse_statement(),
            }
        }
    }

    /// The body after a `:`. Either an indented block on the following lines or simple
    /// statements on the same line.
    fn parse_suite(&mut self) {
        match self.peek() {
            Some(SyntaxKind::Newline) => {
                // Blank and comment-only lines may sit between the header and the body
                while self.at(SyntaxKind::Newline) {
                    self.bump();
                }

                if self.at(SyntaxKind::Indent) {
                    self.parse_block();
                } else {
                    self.error(ParseErrorKind::ExpectedIndentedBlock);
                    self.start_node(SyntaxKind::BlockNode);
                    self.finish_node();
                }
            }
            None => {
                self.error(ParseErrorKind::ExpectedIndentedBlock);
                self.start_node(SyntaxKind::BlockNode);
                self.finish_node();
            }
            Some(_) => {
                self.start_node(SyntaxKind::BlockNode);
                self.parse_simple_statements();
                self.finish_node();
            }
        }
    }

    fn parse_decorated(&mut self) {
        let checkpoint = self.checkpoint();

        while self.at(SyntaxKind::At) {
            self.start_node(SyntaxKind::DecoratorNode);
            self.bump();
            if !self.parse_expr() {
                self.error(ParseErrorKind::ExpectedExpression);
            }
            self.finish_node();

            while self.at(SyntaxKind::Newline) {
                self.bump();
            }
        }

        match self.peek() {
            Some(SyntaxKind::Class) => self.parse_class_def(checkpoint),
            Some(SyntaxKind::Def | SyntaxKind::Async) => self.parse_function_def(checkpoint),
            found => {
                self.error(ParseErrorKind::ExpectedToken {
                    expected: SyntaxKind::Class,
                    found,
                });
                self.start_node_at(checkpoint, SyntaxKind::ErrorNode);
                self.finish_node();
            }
        }
    }

    fn parse_class_def(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ClassDefNode);
        self.expect(SyntaxKind::Class);
        self.expect(SyntaxKind::Identifier);

        if self.at(SyntaxKind::OpenParenthesis) {
            self.parse_arg_list();
        }

        self.expect(SyntaxKind::Colon);
        self.parse_suite();
        self.finish_node();
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgListNode);
        self.bump();

        loop {
            match self.peek() {
                None => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    break;
                }
                Some(k) if k.is_statement_end() => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    break;
                }
                Some(SyntaxKind::CloseParenthesis) => {
                    self.bump();
                    break;
                }
                Some(SyntaxKind::Comma) => self.bump(),
                Some(SyntaxKind::DoubleStar) => {
                    self.start_node(SyntaxKind::KeywordArgNode);
                    self.bump();
                    self.parse_expr();
                    self.finish_node();
                }
                Some(k) => {
                    let checkpoint = self.checkpoint();
                    if !self.parse_expr() {
                        self.error(ParseErrorKind::UnexpectedToken(k));
                        self.start_node(SyntaxKind::ErrorNode);
                        self.bump();
                        self.finish_node();
                        continue;
                    }

                    if self.allow(SyntaxKind::Equals) {
                        self.start_node_at(checkpoint, SyntaxKind::KeywordArgNode);
                        if !self.parse_expr() {
                            self.error(ParseErrorKind::ExpectedExpression);
                        }
                    } else {
                        self.start_node_at(checkpoint, SyntaxKind::ArgNode);
                    }
                    self.finish_node();
                }
            }
        }

        self.finish_node();
    }

    fn parse_function_def(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::FunctionDefNode);
        self.allow(SyntaxKind::Async);
        self.expect(SyntaxKind::Def);
        self.expect(SyntaxKind::Identifier);

        if self.at(SyntaxKind::OpenParenthesis) {
            self.start_node(SyntaxKind::ParamListNode);
            self.parse_balanced();
            self.finish_node();
        } else {
            let found = self.peek();
            self.error(ParseErrorKind::ExpectedToken {
                expected: SyntaxKind::OpenParenthesis,
                found,
            });
        }

        if self.allow(SyntaxKind::Arrow) && !self.parse_expr() {
            self.error(ParseErrorKind::ExpectedExpression);
        }

        self.expect(SyntaxKind::Colon);
        self.parse_suite();
        self.finish_node();
    }

    fn parse_compound_statement(&mut self) {
        self.start_node(SyntaxKind::CompoundStatementNode);
        self.allow(SyntaxKind::Async);
        self.bump();

        // Header: `if cond`, `for x, y in items`, `with open(p) as f`, `except E as e`, ...
        loop {
            match self.peek() {
                None | Some(SyntaxKind::Colon) => break,
                Some(k) if k.is_statement_end() => break,
                Some(_) => {
                    if !self.parse_expr() {
                        self.bump();
                    }
                }
            }
        }

        self.expect(SyntaxKind::Colon);
        self.parse_suite();
        self.finish_node();
    }

    /// One or more `;` separated simple statements making up a logical line. Stops before the
    /// terminating `Newline`.
    fn parse_simple_statements(&mut self) {
        loop {
            self.parse_simple_statement();

            if !self.allow(SyntaxKind::Semicolon) || self.at_statement_end() {
                break;
            }
        }

        if !self.at_statement_end() {
            if let Some(kind) = self.peek() {
                self.error(ParseErrorKind::UnexpectedToken(kind));
            }
            self.recover_to_statement_end();
        }
    }

    fn parse_simple_statement(&mut self) {
        if self.at(SyntaxKind::Keyword) {
            self.start_node(SyntaxKind::SimpleStatementNode);
            while !self.at_statement_end() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        let checkpoint = self.checkpoint();
        if !self.parse_expr_list() {
            if let Some(kind) = self.peek() {
                self.error(ParseErrorKind::UnexpectedToken(kind));
            }
            self.recover_to_statement_end();
            return;
        }

        match self.peek() {
            Some(SyntaxKind::Equals) => {
                self.start_node_at(checkpoint, SyntaxKind::AssignmentNode);
                while self.allow(SyntaxKind::Equals) {
                    if !self.parse_expr_list() {
                        self.error(ParseErrorKind::ExpectedExpression);
                        break;
                    }
                }
                self.finish_node();
            }
            Some(SyntaxKind::Colon) => {
                self.start_node_at(checkpoint, SyntaxKind::AnnotatedAssignmentNode);
                self.bump();
                if !self.parse_expr() {
                    self.error(ParseErrorKind::ExpectedExpression);
                }
                if self.allow(SyntaxKind::Equals) && !self.parse_expr_list() {
                    self.error(ParseErrorKind::ExpectedExpression);
                }
                self.finish_node();
            }
            Some(SyntaxKind::AugmentedAssign) => {
                self.start_node_at(checkpoint, SyntaxKind::AugmentedAssignmentNode);
                self.bump();
                if !self.parse_expr_list() {
                    self.error(ParseErrorKind::ExpectedExpression);
                }
                self.finish_node();
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::ExpressionStatementNode);
                self.finish_node();
            }
        }
    }

    /// An expression, or a bare tuple of expressions (`a, b, c`).
    fn parse_expr_list(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.parse_expr() {
            return false;
        }

        if self.at(SyntaxKind::Comma) {
            while self.allow(SyntaxKind::Comma) {
                if self.at_expression_end() {
                    break;
                }
                self.parse_expr();
            }
            self.start_node_at(checkpoint, SyntaxKind::TupleExprNode);
            self.finish_node();
        }

        true
    }

    /// A single expression, up to the next comma, `=`, `:` or closing bracket. Atoms get their
    /// own nodes; anything made of more than one atom (calls, attribute access, operators) is
    /// wrapped in an `OtherExprNode`. Returns false if nothing was consumed.
    fn parse_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        let mut parts = 0;
        let mut raw = false;
        let mut prev_operand = false;

        while let Some(kind) = self.peek() {
            if kind.is_expression_boundary() {
                break;
            }

            let operand = match kind {
                SyntaxKind::OpenParenthesis | SyntaxKind::SquareOpenBracket if prev_operand => {
                    // Call or subscript
                    self.parse_balanced();
                    true
                }
                SyntaxKind::OpenParenthesis => {
                    self.parse_paren_atom();
                    true
                }
                SyntaxKind::SquareOpenBracket => {
                    self.parse_list_atom();
                    true
                }
                SyntaxKind::OpenBrace => {
                    self.parse_brace_atom();
                    true
                }
                SyntaxKind::String => {
                    self.parse_string_literal();
                    true
                }
                SyntaxKind::Identifier => {
                    self.start_node(SyntaxKind::NameExprNode);
                    self.bump();
                    self.finish_node();
                    true
                }
                k if k.is_literal_keyword() => {
                    self.start_node(SyntaxKind::LiteralNode);
                    self.bump();
                    self.finish_node();
                    true
                }
                SyntaxKind::Lambda => {
                    self.parse_lambda();
                    true
                }
                _ => {
                    self.bump();
                    raw = true;
                    false
                }
            };

            prev_operand = operand;
            parts += 1;
        }

        if parts > 1 || raw {
            self.start_node_at(checkpoint, SyntaxKind::OtherExprNode);
            self.finish_node();
        }

        parts > 0
    }

    /// Adjacent string tokens form one literal: `"a" "b"` is `"ab"`.
    fn parse_string_literal(&mut self) {
        self.start_node(SyntaxKind::StringLiteralNode);
        while self.at(SyntaxKind::String) {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_lambda(&mut self) {
        self.start_node(SyntaxKind::LambdaExprNode);
        self.bump();

        let mut depth = 0usize;
        let mut has_body = false;
        while let Some(kind) = self.peek() {
            match kind {
                k if k.is_statement_end() => break,
                SyntaxKind::Colon if depth == 0 => {
                    self.bump();
                    has_body = true;
                    break;
                }
                k if k.is_open_bracket() => {
                    depth += 1;
                    self.bump();
                }
                k if k.is_close_bracket() => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
        }

        if has_body {
            if self.enter_nested() {
                if !self.parse_expr() {
                    self.error(ParseErrorKind::ExpectedExpression);
                }
                self.leave_nested();
            } else {
                self.skip_expr();
            }
        }
        self.finish_node();
    }

    /// Consume a bracketed token run as is, nested brackets included. Used for call arguments,
    /// subscripts and parameter lists, whose inner structure is never inspected.
    fn parse_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    return;
                }
                Some(k) if k.is_statement_end() => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    return;
                }
                Some(k) if k.is_open_bracket() => {
                    depth += 1;
                    self.bump();
                }
                Some(k) if k.is_close_bracket() => {
                    self.bump();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    /// Items of a parenthesized, list or brace display. The opening bracket must be next.
    fn parse_bracket_items(&mut self, close: SyntaxKind) -> BracketShape {
        let mut shape = BracketShape::default();
        if !self.enter_nested() {
            self.parse_balanced();
            shape.raw = true;
            return shape;
        }
        self.bump();

        loop {
            match self.peek() {
                None => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    break;
                }
                Some(k) if k.is_statement_end() => {
                    self.error(ParseErrorKind::UnclosedBracket);
                    break;
                }
                Some(k) if k.is_close_bracket() => {
                    if k != close {
                        self.error(ParseErrorKind::ExpectedToken {
                            expected: close,
                            found: Some(k),
                        });
                    }
                    self.bump();
                    break;
                }
                Some(SyntaxKind::Comma) => {
                    shape.commas += 1;
                    self.bump();
                }
                Some(SyntaxKind::Colon) => {
                    shape.colon = true;
                    self.bump();
                }
                Some(SyntaxKind::For) => {
                    shape.comprehension = true;
                    self.bump();
                }
                Some(kind) => {
                    if kind == SyntaxKind::DoubleStar {
                        shape.double_star = true;
                    }

                    if self.parse_expr() {
                        shape.exprs += 1;
                    } else {
                        self.bump();
                        shape.raw = true;
                    }
                }
            }
        }

        self.leave_nested();
        shape
    }

    fn parse_paren_atom(&mut self) {
        let checkpoint = self.checkpoint();
        let shape = self.parse_bracket_items(SyntaxKind::CloseParenthesis);

        let kind = if shape.comprehension {
            SyntaxKind::ComprehensionExprNode
        } else if shape.raw || shape.colon {
            SyntaxKind::OtherExprNode
        } else if shape.commas > 0 || shape.exprs == 0 {
            SyntaxKind::TupleExprNode
        } else {
            SyntaxKind::ParenExprNode
        };

        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse_list_atom(&mut self) {
        let checkpoint = self.checkpoint();
        let shape = self.parse_bracket_items(SyntaxKind::SquareCloseBracket);

        let kind = if shape.comprehension {
            SyntaxKind::ComprehensionExprNode
        } else if shape.raw || shape.colon {
            SyntaxKind::OtherExprNode
        } else {
            SyntaxKind::ListExprNode
        };

        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse_brace_atom(&mut self) {
        let checkpoint = self.checkpoint();
        let shape = self.parse_bracket_items(SyntaxKind::CloseBrace);

        let kind = if shape.comprehension {
            SyntaxKind::ComprehensionExprNode
        } else if shape.raw {
            SyntaxKind::OtherExprNode
        } else if shape.colon || shape.double_star || shape.exprs == 0 {
            SyntaxKind::DictExprNode
        } else {
            SyntaxKind::SetExprNode
        };

        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse(mut self) -> Parse {
        self.builder.start_node(SyntaxKind::RootNode.into());
        while self.peek().is_some() {
            self.parse_statement();
        }
        self.eat_trivia();
        self.builder.finish_node();

        // Lexer errors were collected up front
        self.errors.sort_by_key(|err| err.offset());

        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }
}

fn write_tree(out: &mut String, indent: usize, element: SyntaxElement) {
    let kind: SyntaxKind = element.kind();
    out.push_str(&format!("{:indent$}", "", indent = indent));
    match element {
        NodeOrToken::Node(node) => {
            out.push_str(&format!("- {kind:?}\n"));
            for child in node.children_with_tokens() {
                write_tree(out, indent + 2, child);
            }
        }

        NodeOrToken::Token(token) => out.push_str(&format!("- {:?} {kind:?}\n", token.text())),
    }
}

/// Indented dump of a tree, one element per line.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_tree(&mut out, 0, NodeOrToken::Node(node.clone()));
    out
}

pub fn parse_recipe_from_str(input: &str) -> Parse {
    let mut start = 0;
    let mut errors = vec![];
    let tokens = tokenize(input)
        .into_iter()
        .map(|token| {
            let text = &input[start..start + token.len()];
            if let TokenKind::Error(err) = token.kind() {
                errors.push(ParseError::new(start, ParseErrorKind::Lexer(err.kind())));
            }
            start += token.len();
            (syntax_kind_for_token_kind(token.kind()), text)
        })
        .collect();

    Parser {
        builder: GreenNodeBuilder::new(),
        tokens,
        pos: 0,
        offset: 0,
        errors,
        depth: 0,
    }
    .parse()
}
