use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indexmap::IndexSet;
use recipelint::config::DEFAULT_RECIPE_BASE;
use recipelint::report::{collect_recipe_files, describe_messages, lint_files, write_diagnostics};
use recipelint::{plugin, LintConfigBuilder};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Check Conan recipes for complete settings and lowercase package names
#[derive(Parser)]
#[clap(version)]
struct Opts {
    /// Recipe files, or directories to search for conanfile.py
    #[clap(required_unless_present = "list_msgs")]
    paths: Vec<PathBuf>,

    /// Base class that marks a class as a recipe
    #[clap(long, default_value = DEFAULT_RECIPE_BASE)]
    recipe_base: String,

    /// Message ids or symbols to suppress
    #[clap(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Print every known message and exit
    #[clap(long)]
    list_msgs: bool,

    /// Also check recipes under test_package and test_v1_package
    #[clap(long)]
    include_test_packages: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Returns whether any diagnostic was written.
fn run(opts: Opts) -> anyhow::Result<bool> {
    let config = LintConfigBuilder::default()
        .recipe_base(opts.recipe_base)
        .disabled(opts.disable.into_iter().collect::<IndexSet<_>>())
        .include_test_packages(opts.include_test_packages)
        .build()?;

    let linter = plugin::recipe_linter(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.list_msgs {
        writeln!(out, "{}", describe_messages(&linter))?;
        return Ok(false);
    }

    let files = collect_recipe_files(&opts.paths, linter.config().include_test_packages)?;
    info!(count = files.len(), "checking recipes");

    let reports = lint_files(&linter, &files)?;

    let mut emitted = 0;
    for report in &reports {
        emitted += write_diagnostics(&mut out, report)?;
    }

    debug!(emitted, "finished");
    Ok(emitted > 0)
}

fn main() -> ExitCode {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(opts.verbose);

    match run(opts) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
