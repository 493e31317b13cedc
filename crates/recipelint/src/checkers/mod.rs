use recipelint_syntax::syntax::ast::nodes::ClassDef;

pub mod full_settings;
pub mod package_name;

pub use full_settings::FullSettings;
pub use package_name::PackageName;

/// Decides whether a class is a recipe. The test is purely textual: the class must declare
/// exactly one positional base whose source text (trivia removed) equals the configured base
/// name. Aliased imports, `conans.ConanFile`, and classes deriving from a recipe indirectly are
/// not recognized.
#[derive(Debug, Clone, Copy)]
pub struct RecipeMatcher<'a> {
    base: &'a str,
}

impl<'a> RecipeMatcher<'a> {
    pub fn new(base: &'a str) -> RecipeMatcher<'a> {
        RecipeMatcher { base }
    }

    pub fn matches(&self, class: &ClassDef) -> bool {
        let bases = class.base_names();
        bases.len() == 1 && bases[0] == self.base
    }
}
