//! The activity registry.
//!
//! Activities come from a plain text file, one description per line. Blank
//! lines are ignored and surrounding whitespace is trimmed.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ActivitiesFileError;
use crate::model::Activity;

/// An ordered list of distinct activities.
#[derive(Debug, Clone)]
pub struct ActivityRegistry {
    activities: Vec<Activity>,
}

impl ActivityRegistry {
    /// Load activities from a file.
    ///
    /// Fails when the file cannot be read or holds no non-blank line.
    pub fn load(path: &Path) -> Result<Self, ActivitiesFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ActivitiesFileError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let registry = Self::from_lines(content.lines());
        if registry.is_empty() {
            return Err(ActivitiesFileError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(
            "loaded {} activities from {}",
            registry.count(),
            path.display()
        );
        Ok(registry)
    }

    /// Build a registry from raw lines. Duplicate descriptions keep their
    /// first position.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut activities = Vec::new();

        for line in lines {
            let description = line.as_ref().trim();
            if description.is_empty() {
                continue;
            }
            if !seen.insert(description.to_string()) {
                tracing::warn!("ignoring duplicate activity: {description}");
                continue;
            }
            activities.push(Activity::new(description));
        }

        Self { activities }
    }

    pub fn count(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activities in file order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, key: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.key() == key)
    }

    /// Pick an activity uniformly at random.
    pub fn random_activity(&self) -> Option<&Activity> {
        self.random_activity_with(&mut rand::thread_rng())
    }

    /// Pick an activity uniformly using the given generator.
    pub fn random_activity_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Activity> {
        self.activities.choose(rng)
    }

    /// All descriptions, sorted by activity key.
    pub fn sorted_descriptions(&self) -> Vec<&str> {
        let mut sorted: Vec<&Activity> = self.activities.iter().collect();
        sorted.sort_by(|a, b| a.key().cmp(b.key()));
        sorted.into_iter().map(Activity::description).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn write_activities(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.txt");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_trims_and_skips_blank_lines() {
        let (_dir, path) = write_activities("  scales  \n\n\t\narpeggios\nsight reading");
        let registry = ActivityRegistry::load(&path).unwrap();
        assert_eq!(registry.count(), 3);
        assert_eq!(registry.activities()[0].description(), "scales");
        assert_eq!(registry.activities()[2].key(), "sight reading");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ActivityRegistry::load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ActivitiesFileError::Unreadable { .. }));
        assert!(err.to_string().contains("please create an activity file"));
    }

    #[test]
    fn blank_file_is_an_error() {
        let (_dir, path) = write_activities("\n   \n\n");
        let err = ActivityRegistry::load(&path).unwrap_err();
        assert!(matches!(err, ActivitiesFileError::Empty { .. }));
    }

    #[test]
    fn duplicates_are_dropped() {
        let registry = ActivityRegistry::from_lines(["b", "a", " b ", "c"]);
        let keys: Vec<&str> = registry.activities().iter().map(Activity::key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn sorted_descriptions_are_in_key_order() {
        let registry = ActivityRegistry::from_lines(["tremolo", "bends", "legato"]);
        assert_eq!(
            registry.sorted_descriptions(),
            vec!["bends", "legato", "tremolo"]
        );
    }

    #[test]
    fn random_activity_comes_from_the_registry() {
        let registry = ActivityRegistry::from_lines(["one", "two", "three"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = registry.random_activity_with(&mut rng).unwrap();
            assert!(registry.get(picked.key()).is_some());
        }
    }

    #[test]
    fn random_activity_reaches_every_entry() {
        let registry = ActivityRegistry::from_lines(["one", "two", "three"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(registry.random_activity_with(&mut rng).unwrap().key());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn empty_registry_has_no_random_activity() {
        let registry = ActivityRegistry::from_lines(Vec::<String>::new());
        assert!(registry.random_activity().is_none());
    }
}
