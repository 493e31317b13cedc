use crate::checker::Linter;
use crate::checkers::{FullSettings, PackageName};
use crate::config::LintConfig;
use crate::errors::LintResult;

/// Register every recipe checker with `linter`.
pub fn register(linter: &mut Linter) -> LintResult<()> {
    linter.register_checker(Box::new(PackageName))?;
    linter.register_checker(Box::new(FullSettings))?;
    Ok(())
}

/// A linter with all recipe checkers registered and `config` validated against them.
pub fn recipe_linter(config: LintConfig) -> LintResult<Linter> {
    let mut linter = Linter::new(config);
    register(&mut linter)?;
    linter.validate_config()?;
    Ok(linter)
}
