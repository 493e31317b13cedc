use derive_builder::Builder;
use indexmap::IndexSet;

use crate::diagnostic::MessageDefinition;

pub const DEFAULT_RECIPE_BASE: &str = "ConanFile";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct LintConfig {
    /// Base class name that marks a class as a recipe.
    #[builder(default = "DEFAULT_RECIPE_BASE.to_string()")]
    pub recipe_base: String,

    /// Message ids or symbols that are never reported.
    #[builder(default)]
    pub disabled: IndexSet<String>,

    /// Also lint recipes under `test_package` and `test_v1_package` when walking directories.
    #[builder(default)]
    pub include_test_packages: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            recipe_base: DEFAULT_RECIPE_BASE.to_string(),
            disabled: IndexSet::new(),
            include_test_packages: false,
        }
    }
}

impl LintConfig {
    pub fn is_disabled(&self, message: &MessageDefinition) -> bool {
        self.disabled.iter().any(|name| message.matches(name))
    }
}
