//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use deliberate_core::evaluation::{plural, ActivityEvaluation, Evaluation};
use deliberate_core::model::{format_timestamp, ScoreLevel};

use crate::json::to_json;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an evaluation.
pub fn generate_html(evaluation: &Evaluation) -> Result<String> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>deliberate practice evaluation</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Practice evaluation</h1>\n");
    let activities = evaluation.total_activities();
    let sets = evaluation.total_practice_records();
    html.push_str(&format!(
        "<p class=\"meta\">{} {} | {} practice {} | generated {}</p>\n",
        activities,
        plural(activities, "activity", "activities"),
        sets,
        plural(sets, "set", "sets"),
        evaluation.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if evaluation.total_activities() == 0 {
        html.push_str("<p>No practice sets recorded yet.</p>\n");
        html.push_str("</body>\n</html>");
        return Ok(html);
    }

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Mean score per activity</h2>\n");
    html.push_str(&generate_bar_chart(evaluation.activity_evaluations()));
    html.push_str("</section>\n");

    // Per-activity results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Activities</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str("<thead><tr><th>Activity</th><th>Practiced</th><th>Mean</th><th>Latest</th><th>Oldest</th><th>Newest</th><th>Scores</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for activity in evaluation {
        let mean = activity.mean_score().unwrap_or(0.0);
        let latest = activity
            .latest_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let oldest = activity
            .oldest()
            .map(|t| format_timestamp(&t))
            .unwrap_or_else(|| "-".to_string());
        let newest = activity
            .newest()
            .map(|t| format_timestamp(&t))
            .unwrap_or_else(|| "-".to_string());
        let scores = activity
            .scores()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            score_class(mean),
            html_escape(activity.activity_key()),
            activity.practice_count(),
            mean,
            latest,
            oldest,
            newest,
            scores
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(&to_json(evaluation)?));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    Ok(html)
}

/// Write an HTML report to a file.
pub fn write_html_report(evaluation: &Evaluation, path: &Path) -> Result<()> {
    let html = generate_html(evaluation)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Fraction of the best possible score.
fn score_ratio(mean: f64) -> f64 {
    let best = ScoreLevel::Flawless.value() as f64;
    (mean / best).clamp(0.0, 1.0)
}

fn score_class(mean: f64) -> &'static str {
    let ratio = score_ratio(mean);
    if ratio >= 0.75 {
        "strong"
    } else if ratio >= 0.5 {
        "fair"
    } else {
        "weak"
    }
}

fn generate_bar_chart(activities: &[ActivityEvaluation]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 260;

    let total_height = activities.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, activity) in activities.iter().enumerate() {
        let mean = activity.mean_score().unwrap_or(0.0);
        let ratio = score_ratio(mean);
        let y = i * (bar_height + padding) + padding;
        let width = (ratio * max_width as f64) as usize;

        let color = match score_class(mean) {
            "strong" => "#22c55e",
            "fair" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(activity.activity_key())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            mean
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --fair: #fef9c3; --weak: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --fair: #713f12; --weak: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.strong { background: var(--strong); }
.fair { background: var(--fair); }
.weak { background: var(--weak); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
