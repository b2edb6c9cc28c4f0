//! The `deliberate activities` command.

use anyhow::Result;

use deliberate_core::config::DeliberateConfig;
use deliberate_core::registry::ActivityRegistry;

pub fn execute(config: &DeliberateConfig) -> Result<()> {
    let registry = ActivityRegistry::load(&config.activities_file)?;

    println!(
        "{} activities in {}",
        registry.count(),
        config.activities_file.display()
    );
    for (i, description) in registry.sorted_descriptions().iter().enumerate() {
        println!("  {}) {description}", i + 1);
    }

    Ok(())
}
