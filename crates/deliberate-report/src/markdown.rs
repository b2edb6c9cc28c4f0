//! Markdown summary of an evaluation.

use deliberate_core::evaluation::{plural, Evaluation};
use deliberate_core::model::format_timestamp;

/// Format the evaluation as a markdown summary table.
pub fn to_markdown(evaluation: &Evaluation) -> String {
    let mut md = String::new();

    let activities = evaluation.total_activities();
    let sets = evaluation.total_practice_records();
    md.push_str(&format!(
        "**Summary:** {} {}, {} practice {}\n\n",
        activities,
        plural(activities, "activity", "activities"),
        sets,
        plural(sets, "set", "sets")
    ));

    if evaluation.total_activities() == 0 {
        return md;
    }

    md.push_str("| Activity | Practiced | Mean | Latest | Newest |\n");
    md.push_str("|----------|-----------|------|--------|--------|\n");
    for activity in evaluation {
        md.push_str(&format!(
            "| {} | {} | {:.2} | {} | {} |\n",
            activity.activity_key().replace('|', "\\|"),
            activity.practice_count(),
            activity.mean_score().unwrap_or(0.0),
            activity
                .latest_score()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".into()),
            activity
                .newest()
                .map(|t| format_timestamp(&t))
                .unwrap_or_else(|| "-".into()),
        ));
    }

    md
}
