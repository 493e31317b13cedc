use pretty_assertions::assert_eq;

use crate::parser::{debug_tree, parse_recipe_from_str, ParseErrorKind};
use crate::syntax::ast::expr::{Expr, LiteralKind};
use crate::syntax::ast::nodes::{Assignment, ClassDef, Statement};
use crate::syntax::ast::AstNode;
use crate::syntax::make;


fn assignments(input: &str) -> Vec<Assignment> {
    parse_recipe_from_str(input)
        .syntax()
        .descendants()
        .filter_map(Assignment::cast)
        .collect()
}

fn value_of(text: &str) -> Expr {
    make::expr(text)
        .unparenthesized()
        .expect("parenthesized expression has an inner expression")
}

#[test]
fn assignment_tree() {
    let parse = parse_recipe_from_str("a = 1\n");
    assert!(parse.errors().is_empty());
    assert_eq!(
        debug_tree(&parse.syntax()),
        r#"- RootNode
  - AssignmentNode
    - NameExprNode
      - "a" Identifier
    - " " Whitespace
    - "=" Equals
    - " " Whitespace
    - LiteralNode
      - "1" Number
  - "\n" Newline
"#
    );
}

#[test]
fn class_tree() {
    let parse = parse_recipe_from_str("class A(ConanFile):\n    x = 1\n");
    assert!(parse.errors().is_empty());
    assert_eq!(
        debug_tree(&parse.syntax()),
        r#"- RootNode
  - ClassDefNode
    - "class" Class
    - " " Whitespace
    - "A" Identifier
    - ArgListNode
      - "(" OpenParenthesis
      - ArgNode
        - NameExprNode
          - "ConanFile" Identifier
      - ")" CloseParenthesis
    - ":" Colon
    - "\n" Newline
    - BlockNode
      - "" Indent
      - "    " Whitespace
      - AssignmentNode
        - NameExprNode
          - "x" Identifier
        - " " Whitespace
        - "=" Equals
        - " " Whitespace
        - LiteralNode
          - "1" Number
      - "\n" Newline
      - "" Dedent
"#
    );
}

#[test]
fn recipe_structure() {
    let input = r#"from conan import ConanFile
from conan.tools.files import get, copy
import os

required_conan_version = ">=1.53.0"


class LibfooConan(ConanFile):
    name = "libfoo"
    description = "A library that does foo"
    license = "MIT"
    settings = "os", "arch", "compiler", "build_type"
    options = {
        "shared": [True, False],
        "fPIC": [True, False],
    }
    default_options = {
        "shared": False,
        "fPIC": True,
    }

    @property
    def _source_subfolder(self):
        return "source_subfolder"

    def config_options(self):
        if self.settings.os == "Windows":
            del self.options.fPIC

    def source(self):
        get(self, **self.conan_data["sources"][self.version], strip_root=True)
"#;

    let parse = parse_recipe_from_str(input);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().text().to_string(), input);

    let root = parse.root();
    let kinds: Vec<&str> = root
        .statements()
        .map(|s| match s {
            Statement::Simple(_) => "simple",
            Statement::Assignment(_) => "assignment",
            Statement::ClassDef(_) => "class",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["simple", "simple", "simple", "assignment", "class"]
    );

    let class = root.class_defs().next().unwrap();
    assert_eq!(class.name().unwrap().syntax.text(), "LibfooConan");
    assert_eq!(class.base_names(), vec!["ConanFile".to_string()]);

    let body = class.body().unwrap();
    let targets: Vec<String> = body
        .statements()
        .filter_map(|s| match s {
            Statement::Assignment(a) => a.first_target_text(),
            _ => None,
        })
        .collect();
    assert_eq!(
        targets,
        vec![
            "name",
            "description",
            "license",
            "settings",
            "options",
            "default_options"
        ]
    );

    let functions = body
        .statements()
        .filter(|s| matches!(s, Statement::FunctionDef(_)))
        .count();
    assert_eq!(functions, 3);
}

#[test]
fn class_bases() {
    let class = make::class_def("Foo", &["ConanFile"], &[]);
    assert_eq!(class.base_names(), vec!["ConanFile"]);

    let class = make::class_def("Foo", &["conans . ConanFile", "metaclass=Meta"], &[]);
    assert_eq!(class.base_names(), vec!["conans.ConanFile"]);
    assert_eq!(class.arg_list().unwrap().keyword_args().count(), 1);

    let class = make::class_def("Foo", &["ConanFile", "Mixin"], &[]);
    assert_eq!(class.base_names(), vec!["ConanFile", "Mixin"]);

    let class: ClassDef = make::ast_from_text("class Foo:\n    pass\n");
    assert!(class.arg_list().is_none());
    assert!(class.base_names().is_empty());

    let class: ClassDef =
        make::ast_from_text("class Foo(  # base\n    ConanFile,\n):\n    pass\n");
    assert_eq!(class.base_names(), vec!["ConanFile"]);
}

#[test]
fn decorated_class() {
    let input = "@some.decorator(arg)\n@other\nclass Foo(ConanFile):\n    settings = 'os'\n";
    let parse = parse_recipe_from_str(input);
    assert!(parse.errors().is_empty());

    let class = parse.root().class_defs().next().unwrap();
    assert_eq!(class.decorators().count(), 2);
    assert_eq!(class.class_kw().unwrap().text_range().start(), 28.into());
    assert_eq!(class.body().unwrap().statements().count(), 1);
}

#[test]
fn class_body_membership() {
    let input = r#"class Foo(ConanFile):
    settings = "os", "arch", "compiler", "build_type"

    if True:
        name = "inside_if"

    def configure(self):
        settings = "os"

    class Nested:
        other = 1

top = 2
"#;

    let found: Vec<(String, Option<String>)> = assignments(input)
        .into_iter()
        .map(|a| {
            (
                a.first_target_text().unwrap(),
                a.enclosing_class()
                    .and_then(|c| c.name())
                    .map(|n| n.syntax.text().to_string()),
            )
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("settings".to_string(), Some("Foo".to_string())),
            ("name".to_string(), None),
            ("settings".to_string(), None),
            ("other".to_string(), Some("Nested".to_string())),
            ("top".to_string(), None),
        ]
    );
}

#[test]
fn same_line_suite() {
    let class: ClassDef = make::ast_from_text("class Foo(ConanFile): settings = 'os'; name = 'x'\n");
    let body = class.body().unwrap();
    assert_eq!(body.statements().count(), 2);
    for statement in body.statements() {
        let Statement::Assignment(assignment) = statement else {
            panic!("expected an assignment");
        };
        assert!(assignment.enclosing_class().is_some());
    }
}

#[test]
fn value_shapes() {
    assert!(matches!(value_of("'os'"), Expr::String(_)));
    assert!(matches!(value_of("('os')"), Expr::String(_)));
    assert!(matches!(value_of("(('os'))"), Expr::String(_)));
    assert!(matches!(value_of("('os',)"), Expr::Tuple(_)));
    assert!(matches!(value_of("()"), Expr::Tuple(_)));
    assert!(matches!(value_of("'os', 'arch'"), Expr::Tuple(_)));
    assert!(matches!(value_of("['os']"), Expr::List(_)));
    assert!(matches!(value_of("[]"), Expr::List(_)));
    assert!(matches!(value_of("{}"), Expr::Dict(_)));
    assert!(matches!(value_of("{'os': ['Linux']}"), Expr::Dict(_)));
    assert!(matches!(value_of("{**base}"), Expr::Dict(_)));
    assert!(matches!(value_of("{'os', 'arch'}"), Expr::Set(_)));
    assert!(matches!(value_of("[s for s in x]"), Expr::Comprehension(_)));
    assert!(matches!(value_of("{k: v for k, v in x}"), Expr::Comprehension(_)));
    assert!(matches!(value_of("ALL_SETTINGS"), Expr::Name(_)));
    assert!(matches!(value_of("make_settings()"), Expr::Other(_)));
    assert!(matches!(value_of("base.settings"), Expr::Other(_)));
    assert!(matches!(value_of("('os', 'arch') + extra"), Expr::Other(_)));
    assert!(matches!(value_of("lambda: 'os'"), Expr::Lambda(_)));
    assert!(matches!(value_of("'os' if a else 'arch'"), Expr::Other(_)));
}

#[test]
fn tuple_elements() {
    let Expr::Tuple(tuple) = value_of("('os', 'arch', *extra, \"compiler\")") else {
        panic!("expected a tuple");
    };
    assert_eq!(tuple.elements().count(), 4);
    assert!(tuple.is_parenthesized());

    let Expr::Tuple(tuple) = value_of("'os', 'arch',") else {
        panic!("expected a tuple");
    };
    assert_eq!(tuple.elements().count(), 2);
    assert!(!tuple.is_parenthesized());

    let Expr::List(list) = value_of("[\n    'os',  # the platform\n    'arch',\n]") else {
        panic!("expected a list");
    };
    assert_eq!(list.elements().count(), 2);
}

#[test]
fn literals() {
    let literal_kind = |text: &str| match value_of(text) {
        Expr::Literal(literal) => literal.kind(),
        other => panic!("expected a literal, got {other:?}"),
    };

    assert_eq!(literal_kind("None"), Some(LiteralKind::None));
    assert_eq!(literal_kind("True"), Some(LiteralKind::True));
    assert_eq!(literal_kind("False"), Some(LiteralKind::False));
    assert_eq!(literal_kind("42"), Some(LiteralKind::Number));
    assert_eq!(literal_kind("0x1F"), Some(LiteralKind::Number));
    assert_eq!(literal_kind("..."), Some(LiteralKind::Ellipsis));
}

#[test]
fn string_literals() {
    let Expr::String(string) = value_of("'lib' \"foo\"") else {
        panic!("expected a string");
    };
    assert_eq!(string.parts().count(), 2);
    assert_eq!(string.value(), "libfoo");

    let Expr::String(string) = value_of("(\n    'lib'\n    'foo'\n)") else {
        panic!("expected a string");
    };
    assert_eq!(string.value(), "libfoo");

    let Expr::String(string) = value_of("f'{name}'") else {
        panic!("expected a string");
    };
    assert!(string.is_formatted());
    assert!(!string.is_bytes());

    let Expr::String(string) = value_of("rb'raw'") else {
        panic!("expected a string");
    };
    assert!(string.is_bytes());
    assert_eq!(string.value(), "raw");

    let Expr::String(string) = value_of("'''multi\nline'''") else {
        panic!("expected a string");
    };
    assert_eq!(string.value(), "multi\nline");
}

#[test]
fn assignment_forms() {
    let assignment = make::assignment("settings = other", "('os',)");
    assert_eq!(assignment.targets().len(), 2);
    assert_eq!(assignment.first_target_text().as_deref(), Some("settings"));
    assert!(matches!(assignment.value(), Some(Expr::Tuple(_))));

    let assignment = make::assignment("a, b", "1, 2");
    assert!(matches!(assignment.first_target(), Some(Expr::Tuple(_))));
    assert_eq!(assignment.first_target_text().as_deref(), Some("a,b"));

    let parse = parse_recipe_from_str("settings: tuple = ('os',)\nsettings += ('arch',)\n");
    let kinds: Vec<_> = parse
        .root()
        .statements()
        .map(|s| match s {
            Statement::AnnotatedAssignment(a) => {
                assert!(a.annotation().is_some());
                assert!(matches!(a.value(), Some(Expr::Tuple(_))));
                "annotated"
            }
            Statement::AugmentedAssignment(a) => {
                assert_eq!(a.op().unwrap().text(), "+=");
                "augmented"
            }
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["annotated", "augmented"]);
    assert_eq!(assignments("settings: tuple = ('os',)\n").len(), 0);
}

#[test]
fn compound_statements() {
    let input = r#"for x, y in items:
    a = 1
else:
    b = 2
while True: c = 3
try:
    import foo
except ImportError as e:
    pass
finally:
    d = 4
with open(path) as f:
    e = 5
async def run():
    async with lock:
        f = 6
"#;

    let parse = parse_recipe_from_str(input);
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    assert_eq!(parse.syntax().text().to_string(), input);

    let compound = parse
        .root()
        .statements()
        .filter(|s| matches!(s, Statement::Compound(_)))
        .count();
    assert_eq!(compound, 7);

    let targets: Vec<String> = assignments(input)
        .iter()
        .filter_map(|a| a.first_target_text())
        .collect();
    assert_eq!(targets, vec!["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn lexer_errors_are_reported() {
    let input = "name = 'unterminated\nsettings = 'os'\n";
    let parse = parse_recipe_from_str(input);
    assert_eq!(parse.syntax().text().to_string(), input);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].offset(), 7.into());
    assert!(matches!(parse.errors()[0].kind(), ParseErrorKind::Lexer(_)));

    let targets: Vec<String> = assignments(input)
        .iter()
        .filter_map(|a| a.first_target_text())
        .collect();
    assert_eq!(targets, vec!["name", "settings"]);
}
