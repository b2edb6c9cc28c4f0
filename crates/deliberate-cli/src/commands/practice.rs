//! The `deliberate practice` command.

use anyhow::Result;

use deliberate_core::config::DeliberateConfig;
use deliberate_core::prompt::ConsoleInput;
use deliberate_core::registry::ActivityRegistry;
use deliberate_core::session::run_practice_mode;
use deliberate_core::store::Practices;

pub fn execute(config: &DeliberateConfig) -> Result<()> {
    let registry = ActivityRegistry::load(&config.activities_file)?;
    let mut practices = Practices::load(&config.practices_file)?;

    let mut console = ConsoleInput::stdio();
    let mut out = std::io::stdout();
    let completed = run_practice_mode(&mut console, &mut out, &registry, &mut practices)?;

    println!(
        "Completed {completed} practice set(s), {} recorded in total.",
        practices.count()
    );
    Ok(())
}
