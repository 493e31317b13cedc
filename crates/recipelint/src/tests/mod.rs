use std::path::Path;

use indexmap::IndexSet;
use pretty_assertions::assert_eq;

use crate::checker::{Checker, Linter};
use crate::checkers::FullSettings;
use crate::config::{LintConfig, LintConfigBuilder};
use crate::diagnostic::MessageDefinition;
use crate::errors::LintError;
use crate::plugin;

fn lint_with(config: LintConfig, text: &str) -> Vec<(u32, u32, &'static str)> {
    let linter = plugin::recipe_linter(config).unwrap();
    linter
        .lint_source(Path::new("conanfile.py"), text)
        .diagnostics
        .iter()
        .map(|d| (d.line(), d.column(), d.msgid()))
        .collect()
}

fn lint(text: &str) -> Vec<(u32, u32, &'static str)> {
    lint_with(LintConfig::default(), text)
}

fn recipe(settings: &str) -> String {
    format!(
        r#"from conan import ConanFile


class FooConan(ConanFile):
    name = "foo"
    settings = {settings}
"#
    )
}

#[test_log::test]
fn full_settings_are_accepted() {
    assert_eq!(lint(&recipe(r#"("os", "arch", "compiler", "build_type")"#)), vec![]);
    assert_eq!(lint(&recipe(r#""build_type", "compiler", "arch", "os""#)), vec![]);
    assert_eq!(lint(&recipe(r#"["os", "arch", "compiler", "build_type"]"#)), vec![]);
    assert_eq!(
        lint(&recipe(r#"("os", "arch", "compiler", "build_type", "cppstd")"#)),
        vec![]
    );
}

#[test_log::test]
fn single_setting_is_missing_settings() {
    assert_eq!(lint(&recipe(r#""os""#)), vec![(6, 4, "E9001")]);
    assert_eq!(lint(&recipe(r#"("os")"#)), vec![(6, 4, "E9001")]);
    assert_eq!(lint(&recipe("None")), vec![(6, 4, "E9001")]);
}

#[test_log::test]
fn short_sequences_are_missing_settings() {
    assert_eq!(lint(&recipe(r#"("os", "arch")"#)), vec![(6, 4, "E9001")]);
    assert_eq!(lint(&recipe(r#""os", "arch", "compiler""#)), vec![(6, 4, "E9001")]);
    assert_eq!(lint(&recipe("[]")), vec![(6, 4, "E9001")]);
}

#[test_log::test]
fn dict_settings_are_not_missing_settings() {
    assert_eq!(
        lint(&recipe(r#"{"os": ["Linux"], "arch": ["x86_64"]}"#)),
        vec![(6, 4, "E9002")]
    );
}

#[test_log::test]
fn uninspected_values_are_accepted() {
    assert_eq!(lint(&recipe("BASE_SETTINGS")), vec![]);
    assert_eq!(lint(&recipe(r#"{"os", "arch"}"#)), vec![]);
    assert_eq!(lint(&recipe(r#"f"{os}""#)), vec![]);
    assert_eq!(lint(&recipe(r#"("os",) + extra"#)), vec![]);
}

#[test_log::test]
fn missing_settings_reported_once_per_class() {
    let text = r#"from conan import ConanFile

class FooConan(ConanFile):
    name = "foo"

    def configure(self):
        settings = "os"
        if self.options.shared:
            settings = "arch"

class BarConan(ConanFile):
    name = "bar"
"#;

    assert_eq!(lint(text), vec![(3, 0, "E9003"), (11, 0, "E9003")]);
}

#[test_log::test]
fn nested_blocks_are_not_class_body() {
    let text = r#"class FooConan(ConanFile):
    name = "foo"
    if True:
        settings = "os", "arch", "compiler", "build_type"
"#;

    assert_eq!(lint(text), vec![(1, 0, "E9003")]);
}

#[test_log::test]
fn annotated_and_augmented_assignments_do_not_count() {
    let text = r#"class FooConan(ConanFile):
    name = "foo"
    settings: tuple = "os",
    settings += ("arch",)
"#;

    assert_eq!(lint(text), vec![(1, 0, "E9003")]);
}

#[test_log::test]
fn chained_assignment_is_keyed_by_first_target() {
    let text = r#"class FooConan(ConanFile):
    name = "foo"
    settings = other = ("os", "arch")
"#;

    assert_eq!(lint(text), vec![(3, 4, "E9001")]);
}

#[test_log::test]
fn non_recipe_classes_are_ignored() {
    let text = r#"class Helper(object):
    settings = "os", "arch"

class Mixed(ConanFile, Mixin):
    settings = "os"

class Qualified(conans.ConanFile):
    pass

class Plain:
    settings = {}
"#;

    assert_eq!(lint(text), vec![]);
}

#[test_log::test]
fn settings_outside_a_class_are_ignored() {
    assert_eq!(lint("settings = 'os'\n"), vec![]);
}

#[test_log::test]
fn configured_recipe_base() {
    let text = r#"class FooConan(Recipe):
    name = "foo"
    settings = "os"

class BarConan(ConanFile):
    name = "bar"
    settings = "os"
"#;

    let config = LintConfigBuilder::default()
        .recipe_base("Recipe")
        .build()
        .unwrap();
    assert_eq!(lint_with(config, text), vec![(3, 4, "E9001")]);
}

#[test_log::test]
fn decorated_class_is_reported_at_class_keyword() {
    let text = r#"@some.decorator
@another(arg=1)
class FooConan(ConanFile):
    name = "foo"
"#;

    assert_eq!(lint(text), vec![(3, 0, "E9003")]);
}

#[test_log::test]
fn uppercase_name_is_bad_name() {
    let text = r#"class FooConan(ConanFile):
    name = "Foo"
    settings = "os", "arch", "compiler", "build_type"
"#;

    assert_eq!(lint(text), vec![(2, 4, "E9004")]);
}

#[test_log::test]
fn first_constant_name_wins() {
    let text = r#"class FooConan(ConanFile):
    name = NAME
    name = "foo"
    name = "Foo"
    settings = "os", "arch", "compiler", "build_type"
"#;

    assert_eq!(lint(text), vec![]);
}

#[test_log::test]
fn non_string_names() {
    let settings = r#"settings = "os", "arch", "compiler", "build_type""#;

    let text = format!("class FooConan(ConanFile):\n    name = None\n    {settings}\n");
    assert_eq!(lint(&text), vec![]);

    let text = format!("class FooConan(ConanFile):\n    name = b'Foo'\n    {settings}\n");
    assert_eq!(lint(&text), vec![]);

    let text = format!("class FooConan(ConanFile):\n    name = f'{{x}}'\n    {settings}\n");
    assert_eq!(lint(&text), vec![(1, 0, "E9005")]);
}

#[test_log::test]
fn missing_name() {
    let text = r#"class FooConan(ConanFile):
    settings = "os", "arch", "compiler", "build_type"

    def configure(self):
        name = "foo"
"#;

    assert_eq!(lint(text), vec![(1, 0, "E9005")]);
}

#[test_log::test]
fn dict_settings_recipe() {
    let text = r#"from conan import ConanFile
from conan.errors import ConanInvalidConfiguration
import os

required_conan_version = ">=1.54.0"


class OpenldapConan(ConanFile):
    name = "openldap"
    description = "OpenLDAP C++ library"
    homepage = "https://www.openldap.org/"
    url = "https://github.com/conan-io/conan-center-index"
    license = "OLDAP-2.8"
    topics = ("ldap", "load-balancer", "directory-access")
    settings = {"os": ["Linux", "FreeBSD"], "arch": None, "compiler": None, "build_type": None}
    options = {
        "shared": [True, False],
        "fPIC": [True, False],
    }
    default_options = {
        "shared": False,
        "fPIC": True,
    }

    def validate(self):
        if self.settings.os != "Linux":
            raise ConanInvalidConfiguration(f"{self.name} is only supported on Linux")
"#;

    assert_eq!(lint(text), vec![(15, 4, "E9002")]);
}

#[test_log::test]
fn application_recipe_without_settings() {
    let text = r#"from conan import ConanFile
from conan.tools.files import copy, get
from conan.tools.layout import basic_layout
import os

required_conan_version = ">=1.52.0"


class PythonMakoConan(ConanFile):
    name = "python-mako"
    description = "Mako Templates for Python"
    license = "MIT"
    homepage = "https://www.makotemplates.org/"
    url = "https://github.com/conan-io/conan-center-index"
    topics = ("template", "python")
    package_type = "application"

    def layout(self):
        basic_layout(self, src_folder="src")

    def package_id(self):
        self.info.clear()

    def source(self):
        get(self, **self.conan_data["sources"][self.version], strip_root=True)

    def package(self):
        copy(self, "LICENSE", self.source_folder, os.path.join(self.package_folder, "licenses"))
"#;

    assert_eq!(lint(text), vec![(9, 0, "E9003")]);
}

#[test_log::test]
fn diagnostics_are_sorted_by_position() {
    let text = r#"class BConan(ConanFile):
    name = "B"
    settings = {}

class AConan(ConanFile):
    pass
"#;

    assert_eq!(
        lint(text),
        vec![
            (2, 4, "E9004"),
            (3, 4, "E9002"),
            (5, 0, "E9003"),
            (5, 0, "E9005"),
        ]
    );
}

#[test_log::test]
fn disabled_messages_are_not_reported() {
    let text = r#"class FooConan(ConanFile):
    name = "Foo"
"#;

    let config = LintConfigBuilder::default()
        .disabled(IndexSet::from([
            "E9003".to_string(),
            "conan-bad-name".to_string(),
        ]))
        .build()
        .unwrap();
    assert_eq!(lint_with(config, text), vec![]);

    let config = LintConfigBuilder::default()
        .disabled(IndexSet::from(["E9004".to_string()]))
        .build()
        .unwrap();
    assert_eq!(lint_with(config, text), vec![(1, 0, "E9003")]);
}

#[test_log::test]
fn unknown_disabled_message_is_an_error() {
    let config = LintConfigBuilder::default()
        .disabled(IndexSet::from(["E1234".to_string()]))
        .build()
        .unwrap();

    let err = plugin::recipe_linter(config).err().unwrap();
    assert!(matches!(err, LintError::UnknownMessage(ref name) if name == "E1234"));
}

#[test_log::test]
fn duplicate_registration_is_rejected() {
    let mut linter = plugin::recipe_linter(LintConfig::default()).unwrap();

    let err = linter.register_checker(Box::new(FullSettings)).unwrap_err();
    assert!(matches!(err, LintError::DuplicateMessage(_)));
    assert_eq!(linter.checkers().count(), 2);
    assert_eq!(linter.messages().count(), 5);
}

struct SelfClashing;

static CLASHING: &[MessageDefinition] = &[
    MessageDefinition {
        msgid: "E9100",
        msg: "first",
        symbol: "clash-a",
        description: "",
    },
    MessageDefinition {
        msgid: "E9101",
        msg: "second",
        symbol: "clash-a",
        description: "",
    },
];

impl Checker for SelfClashing {
    fn name(&self) -> &'static str {
        "self-clashing"
    }

    fn messages(&self) -> &'static [MessageDefinition] {
        CLASHING
    }
}

#[test_log::test]
fn failed_registration_leaves_registry_untouched() {
    let mut linter = Linter::new(LintConfig::default());

    assert!(linter.register_checker(Box::new(SelfClashing)).is_err());
    assert_eq!(linter.checkers().count(), 0);
    assert_eq!(linter.messages().count(), 0);
    assert!(linter.message("E9100").is_none());
}

#[test_log::test]
fn registered_messages() {
    let linter = plugin::recipe_linter(LintConfig::default()).unwrap();

    let ids: Vec<_> = linter.messages().map(|m| (m.msgid, m.symbol)).collect();
    assert_eq!(
        ids,
        vec![
            ("E9004", "conan-bad-name"),
            ("E9005", "conan-missing-name"),
            ("E9001", "conan-missing-setting"),
            ("E9002", "conan-dict-settings"),
            ("E9003", "conan-missing-settings"),
        ]
    );
    assert_eq!(
        linter.message("conan-dict-settings").map(|m| m.msg),
        Some("Do not use settings as a dictionary")
    );
}

#[test_log::test]
fn parse_errors_are_not_fatal() {
    let text = r#"class FooConan(ConanFile):
    name = "foo"
    settings = ("os", "arch"
"#;

    let linter = plugin::recipe_linter(LintConfig::default()).unwrap();
    let report = linter.lint_source(Path::new("conanfile.py"), text);
    assert!(!report.parse_errors.is_empty());
    assert_eq!(
        report
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>(),
        vec!["conanfile.py:3:4: E9001: Missing one or more settings (conan-missing-setting)"]
    );
}
