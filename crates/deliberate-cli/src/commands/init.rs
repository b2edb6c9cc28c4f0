//! The `deliberate init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create deliberate.toml
    if Path::new("deliberate.toml").exists() {
        println!("deliberate.toml already exists, skipping.");
    } else {
        std::fs::write("deliberate.toml", SAMPLE_CONFIG)?;
        println!("Created deliberate.toml");
    }

    // Create example activities
    let activities_path = Path::new(ACTIVITIES_PATH);
    if activities_path.exists() {
        println!("{ACTIVITIES_PATH} already exists, skipping.");
    } else {
        std::fs::create_dir_all("user_files")?;
        std::fs::write(activities_path, EXAMPLE_ACTIVITIES)?;
        println!("Created {ACTIVITIES_PATH}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {ACTIVITIES_PATH}, one activity per line");
    println!("  2. Run: deliberate practice");
    println!("  3. Run: deliberate evaluate");

    Ok(())
}

const ACTIVITIES_PATH: &str = "user_files/my_deliberate_practice_activities.txt";

const SAMPLE_CONFIG: &str = r#"# deliberate configuration
# Relative paths are resolved against this file's directory.

activities_file = "user_files/my_deliberate_practice_activities.txt"
practices_file = "user_files/my_deliberate_practice_practices.txt"
"#;

const EXAMPLE_ACTIVITIES: &str = "\
Play the C major scale, two octaves, at 80 bpm
Sight read one new page of music
Play the chromatic scale slowly with a metronome
Practice switching between G and C chords for two minutes
";
