//! JSON export of an evaluation.

use std::path::Path;

use anyhow::{Context, Result};

use deliberate_core::evaluation::Evaluation;

/// Pretty-printed JSON for an evaluation.
pub fn to_json(evaluation: &Evaluation) -> Result<String> {
    serde_json::to_string_pretty(evaluation).context("failed to serialize evaluation")
}

/// Save an evaluation as JSON, creating parent directories as needed.
pub fn write_json_report(evaluation: &Evaluation, path: &Path) -> Result<()> {
    let json = to_json(evaluation)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write evaluation to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use deliberate_core::model::PracticeRecord;

    #[test]
    fn json_lists_activities_in_key_order() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().fixed_offset();
        let records = vec![
            PracticeRecord::new("b", 2, at),
            PracticeRecord::new("a", 1, at),
        ];
        let evaluation = Evaluation::from_records(&records).unwrap();

        let value: serde_json::Value = serde_json::from_str(&to_json(&evaluation).unwrap()).unwrap();
        let activities = value["activities"].as_array().unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0]["activity_key"], "a");
        assert_eq!(activities[1]["scores"], serde_json::json!([2]));
        assert!(activities[0]["oldest"]
            .as_str()
            .unwrap()
            .starts_with("2024-01-01T00:00:00"));
    }

    #[test]
    fn write_json_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("evaluation.json");
        let evaluation = Evaluation::from_records(&[]).unwrap();

        write_json_report(&evaluation, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"activities\": []"));
    }
}
