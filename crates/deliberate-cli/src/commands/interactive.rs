//! Interactive mode selection, used when no subcommand is given.

use anyhow::Result;

use deliberate_core::config::DeliberateConfig;
use deliberate_core::prompt::ConsoleInput;
use deliberate_core::registry::ActivityRegistry;
use deliberate_core::session::{run_practice_mode, select_run_mode, RunMode};
use deliberate_core::store::Practices;

pub fn execute(config: &DeliberateConfig) -> Result<()> {
    let mut console = ConsoleInput::stdio();

    match select_run_mode(&mut console)? {
        RunMode::Practice => {
            println!("\nStarting Practice Mode");
            let registry = ActivityRegistry::load(&config.activities_file)?;
            let mut practices = Practices::load(&config.practices_file)?;
            let mut out = std::io::stdout();
            run_practice_mode(&mut console, &mut out, &registry, &mut practices)?;
        }
        RunMode::Evaluation => {
            println!("\nStarting Evaluation Mode");
            super::evaluate::execute(config, "text", None)?;
        }
    }

    Ok(())
}
