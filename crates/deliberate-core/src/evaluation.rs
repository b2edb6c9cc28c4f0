//! Per-activity and overall evaluations of practice records.
//!
//! Both types are snapshots: building them copies what they need out of the
//! store, so later appends are not reflected until they are rebuilt.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::error::EvaluationError;
use crate::model::{format_timestamp, PracticeRecord};
use crate::store::Practices;

/// Score history and time bounds for a single activity.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvaluation {
    activity_key: String,
    /// Scores from oldest to newest practice.
    scores: Vec<i64>,
    oldest: Option<DateTime<FixedOffset>>,
    newest: Option<DateTime<FixedOffset>>,
}

impl ActivityEvaluation {
    /// Evaluate records that all belong to `activity_key`.
    ///
    /// Records are ordered by timestamp; records with equal timestamps keep
    /// their input order.
    pub fn build<'a, I>(activity_key: &str, records: I) -> Result<Self, EvaluationError>
    where
        I: IntoIterator<Item = &'a PracticeRecord>,
    {
        let mut records: Vec<&PracticeRecord> = records.into_iter().collect();
        if let Some(stray) = records.iter().find(|r| r.activity_key != activity_key) {
            return Err(EvaluationError::KeyMismatch {
                expected: activity_key.to_string(),
                found: stray.activity_key.clone(),
            });
        }

        records.sort_by_key(|r| r.timestamp);

        Ok(Self {
            activity_key: activity_key.to_string(),
            scores: records.iter().map(|r| r.score).collect(),
            oldest: records.first().map(|r| r.timestamp),
            newest: records.last().map(|r| r.timestamp),
        })
    }

    pub fn activity_key(&self) -> &str {
        &self.activity_key
    }

    pub fn scores(&self) -> &[i64] {
        &self.scores
    }

    pub fn practice_count(&self) -> usize {
        self.scores.len()
    }

    pub fn oldest(&self) -> Option<DateTime<FixedOffset>> {
        self.oldest
    }

    pub fn newest(&self) -> Option<DateTime<FixedOffset>> {
        self.newest
    }

    /// Score of the most recent practice.
    pub fn latest_score(&self) -> Option<i64> {
        self.scores.last().copied()
    }

    pub fn mean_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().sum::<i64>() as f64 / self.scores.len() as f64)
    }
}

impl fmt::Display for ActivityEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.activity_key)?;
        write!(
            f,
            "\n\tPracticed {} {}.",
            self.practice_count(),
            plural(self.practice_count(), "time", "times")
        )?;
        if let Some(oldest) = &self.oldest {
            write!(f, "\n\tOldest practice {}", format_timestamp(oldest))?;
        }
        if let Some(newest) = &self.newest {
            write!(f, "\n\tNewest practice {}", format_timestamp(newest))?;
        }
        if !self.scores.is_empty() {
            let scores: Vec<String> = self.scores.iter().map(|s| s.to_string()).collect();
            write!(f, "\n\tScores: [{}]", scores.join(", "))?;
        }
        Ok(())
    }
}

/// One [`ActivityEvaluation`] per activity in a store, ordered by key.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    generated_at: DateTime<Utc>,
    activities: Vec<ActivityEvaluation>,
}

impl Evaluation {
    /// Evaluate every record currently held by `practices`.
    pub fn build(practices: &Practices) -> Result<Self, EvaluationError> {
        Self::from_records(practices.all())
    }

    /// Group records by activity key and evaluate each group.
    pub fn from_records(records: &[PracticeRecord]) -> Result<Self, EvaluationError> {
        let mut groups: BTreeMap<&str, Vec<&PracticeRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.activity_key.as_str())
                .or_default()
                .push(record);
        }

        let activities = groups
            .into_iter()
            .map(|(key, group)| ActivityEvaluation::build(key, group))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            generated_at: Utc::now(),
            activities,
        })
    }

    /// The evaluation at `index` in key order.
    pub fn get(&self, index: usize) -> Option<&ActivityEvaluation> {
        self.activities.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityEvaluation> {
        self.activities.iter()
    }

    pub fn activity_evaluations(&self) -> &[ActivityEvaluation] {
        &self.activities
    }

    pub fn total_activities(&self) -> usize {
        self.activities.len()
    }

    pub fn total_practice_records(&self) -> usize {
        self.activities.iter().map(|a| a.practice_count()).sum()
    }

    /// When this snapshot was taken.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

impl<'a> IntoIterator for &'a Evaluation {
    type Item = &'a ActivityEvaluation;
    type IntoIter = std::slice::Iter<'a, ActivityEvaluation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let activities = self.total_activities();
        let records = self.total_practice_records();
        writeln!(
            f,
            "{} {} {} been completed {} {}.",
            activities,
            plural(activities, "activity", "activities"),
            plural(activities, "has", "have"),
            records,
            plural(records, "time", "times"),
        )?;
        for activity in &self.activities {
            write!(f, "\n{activity}\n")?;
        }
        Ok(())
    }
}

/// Pick the singular or plural word for `count`.
pub fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use chrono::Duration;

    fn t0() -> DateTime<FixedOffset> {
        parse_timestamp("2024-01-01T00:00:00+00:00").unwrap()
    }

    fn record(key: &str, score: i64, minutes: i64) -> PracticeRecord {
        PracticeRecord::new(key, score, t0() + Duration::minutes(minutes))
    }

    #[test]
    fn scores_follow_timestamps_in_either_input_order() {
        let later = record("x", 3, 10);
        let earlier = record("x", 1, 0);

        for input in [vec![&later, &earlier], vec![&earlier, &later]] {
            let eval = ActivityEvaluation::build("x", input).unwrap();
            assert_eq!(eval.scores(), &[1, 3]);
            assert_eq!(eval.oldest(), Some(t0()));
            assert_eq!(eval.newest(), Some(t0() + Duration::minutes(10)));
        }
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let records = vec![record("x", 4, 0), record("x", 2, 0), record("x", 0, 0)];
        let eval = ActivityEvaluation::build("x", &records).unwrap();
        assert_eq!(eval.scores(), &[4, 2, 0]);
    }

    #[test]
    fn mismatched_key_is_rejected() {
        let records = vec![record("x", 1, 0), record("y", 2, 5)];
        let err = ActivityEvaluation::build("x", &records).unwrap_err();
        let EvaluationError::KeyMismatch { expected, found } = err;
        assert_eq!(expected, "x");
        assert_eq!(found, "y");
    }

    #[test]
    fn empty_activity_evaluation() {
        let eval = ActivityEvaluation::build("x", Vec::<&PracticeRecord>::new()).unwrap();
        assert!(eval.scores().is_empty());
        assert_eq!(eval.oldest(), None);
        assert_eq!(eval.newest(), None);
        assert_eq!(eval.mean_score(), None);
        assert_eq!(eval.to_string(), "x\n\tPracticed 0 times.");
    }

    #[test]
    fn activity_rendering() {
        let records = vec![record("scales", 3, 10), record("scales", 1, 0)];
        let eval = ActivityEvaluation::build("scales", &records).unwrap();
        assert_eq!(
            eval.to_string(),
            "scales\n\
             \tPracticed 2 times.\n\
             \tOldest practice 2024-01-01T00:00:00+00:00\n\
             \tNewest practice 2024-01-01T00:10:00+00:00\n\
             \tScores: [1, 3]"
        );
    }

    #[test]
    fn stats() {
        let records = vec![record("x", 4, 20), record("x", 1, 0), record("x", 2, 10)];
        let eval = ActivityEvaluation::build("x", &records).unwrap();
        assert_eq!(eval.latest_score(), Some(4));
        assert_eq!(eval.practice_count(), 3);
        let mean = eval.mean_score().unwrap();
        assert!((mean - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn evaluation_orders_by_key() {
        let records = vec![record("b", 1, 0), record("a", 2, 0)];
        let evaluation = Evaluation::from_records(&records).unwrap();
        let keys: Vec<&str> = evaluation.iter().map(|a| a.activity_key()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(evaluation.get(0).unwrap().activity_key(), "a");
        assert!(evaluation.get(2).is_none());
    }

    #[test]
    fn evaluation_totals() {
        let records = vec![
            record("b", 1, 0),
            record("a", 2, 0),
            record("b", 3, 5),
            record("c", 0, 1),
        ];
        let evaluation = Evaluation::from_records(&records).unwrap();
        assert_eq!(evaluation.total_activities(), 3);
        assert_eq!(evaluation.total_practice_records(), 4);
        assert_eq!(evaluation.get(1).unwrap().scores(), &[1, 3]);
    }

    #[test]
    fn empty_evaluation_rendering() {
        let evaluation = Evaluation::from_records(&[]).unwrap();
        assert_eq!(evaluation.total_activities(), 0);
        assert_eq!(
            evaluation.to_string(),
            "0 activities have been completed 0 times.\n"
        );
    }

    #[test]
    fn single_activity_rendering() {
        let records = vec![record("practice_activity", 1, 0); 5];
        let evaluation = Evaluation::from_records(&records).unwrap();
        assert_eq!(
            evaluation.to_string(),
            "1 activity has been completed 5 times.\n\
             \n\
             practice_activity\n\
             \tPracticed 5 times.\n\
             \tOldest practice 2024-01-01T00:00:00+00:00\n\
             \tNewest practice 2024-01-01T00:00:00+00:00\n\
             \tScores: [1, 1, 1, 1, 1]\n"
        );
    }

    #[test]
    fn multiple_activities_are_blank_line_separated() {
        let records = vec![record("b", 2, 0), record("a", 1, 0)];
        let rendered = Evaluation::from_records(&records).unwrap().to_string();
        assert!(rendered.starts_with("2 activities have been completed 2 times.\n\na\n"));
        assert!(rendered.contains("Scores: [1]\n\nb\n\tPracticed 1 time."));
    }

    #[test]
    fn snapshot_ignores_later_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut practices = Practices::empty(dir.path().join("practices.txt"));
        practices.append("a", 1, t0());
        let evaluation = Evaluation::build(&practices).unwrap();
        practices.append("b", 2, t0());
        assert_eq!(evaluation.total_activities(), 1);
        assert_eq!(Evaluation::build(&practices).unwrap().total_activities(), 2);
    }
}
