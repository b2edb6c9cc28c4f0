//! The `deliberate evaluate` command.

use std::path::PathBuf;

use anyhow::Result;

use deliberate_core::config::DeliberateConfig;
use deliberate_core::evaluation::Evaluation;
use deliberate_core::model::format_timestamp;
use deliberate_core::store::Practices;
use deliberate_report::{to_json, to_markdown, write_html_report, write_json_report};

pub fn execute(config: &DeliberateConfig, format: &str, output: Option<PathBuf>) -> Result<()> {
    let practices = Practices::load(&config.practices_file)?;
    let evaluation = Evaluation::build(&practices)?;

    match format {
        "text" => emit(&evaluation.to_string(), output)?,
        "markdown" | "md" => emit(&to_markdown(&evaluation), output)?,
        "table" => emit(&format!("{}\n", summary_table(&evaluation)), output)?,
        "json" => match output {
            Some(path) => {
                write_json_report(&evaluation, &path)?;
                eprintln!("Evaluation saved to: {}", path.display());
            }
            None => println!("{}", to_json(&evaluation)?),
        },
        "html" => {
            let path = output.unwrap_or_else(|| {
                let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
                PathBuf::from(format!("deliberate-report-{timestamp}.html"))
            });
            write_html_report(&evaluation, &path)?;
            eprintln!("HTML report: {}", path.display());
        }
        other => anyhow::bail!("unknown format: {other} (expected text, table, json, markdown or html)"),
    }

    Ok(())
}

/// Print to stdout, or write to `output` when given.
fn emit(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
            eprintln!("Evaluation saved to: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn summary_table(evaluation: &Evaluation) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Activity",
        "Practiced",
        "Mean",
        "Latest",
        "Oldest",
        "Newest",
    ]);

    for activity in evaluation {
        let stamp = |t: Option<chrono::DateTime<chrono::FixedOffset>>| {
            t.map(|t| format_timestamp(&t)).unwrap_or_else(|| "-".into())
        };
        table.add_row(vec![
            Cell::new(activity.activity_key()),
            Cell::new(activity.practice_count()),
            Cell::new(format!("{:.2}", activity.mean_score().unwrap_or(0.0))),
            Cell::new(
                activity
                    .latest_score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(stamp(activity.oldest())),
            Cell::new(stamp(activity.newest())),
        ]);
    }

    table
}
