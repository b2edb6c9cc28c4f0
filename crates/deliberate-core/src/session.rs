//! Interactive practice sessions.
//!
//! A session repeatedly picks a random activity, asks the user how it went,
//! and records the answer. The store is saved after every set so an
//! interrupted session keeps what was completed.

use std::fmt;
use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use rand::RngCore;

use crate::error::{PromptError, SessionError};
use crate::model::ScoreLevel;
use crate::prompt::{prompt_for_choice, prompt_yes_or_no, LineSource};
use crate::registry::ActivityRegistry;
use crate::store::Practices;

/// What the interactive entry point should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Practice,
    Evaluation,
}

impl RunMode {
    pub const ALL: [RunMode; 2] = [RunMode::Practice, RunMode::Evaluation];
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Practice => write!(f, "Practice"),
            RunMode::Evaluation => write!(f, "Evaluation"),
        }
    }
}

/// Ask the user which mode to run in.
pub fn select_run_mode<S: LineSource + ?Sized>(source: &mut S) -> Result<RunMode, PromptError> {
    let prompt = "Welcome to the Deliberate Practice CLI\nWhich mode do you wish to run in?";
    let names: Vec<String> = RunMode::ALL.iter().map(|m| m.to_string()).collect();
    let picked = prompt_for_choice(source, prompt, &names)?;
    Ok(RunMode::ALL[picked])
}

type Clock<'a> = Box<dyn FnMut() -> DateTime<FixedOffset> + 'a>;

/// A practice loop over one registry and one store.
pub struct PracticeSession<'a> {
    registry: &'a ActivityRegistry,
    practices: &'a mut Practices,
    rng: Box<dyn RngCore + 'a>,
    clock: Clock<'a>,
}

impl<'a> PracticeSession<'a> {
    /// A session using the thread RNG and the current UTC time.
    pub fn new(registry: &'a ActivityRegistry, practices: &'a mut Practices) -> Self {
        Self {
            registry,
            practices,
            rng: Box::new(rand::thread_rng()),
            clock: Box::new(|| Utc::now().fixed_offset()),
        }
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'a) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_clock(mut self, clock: impl FnMut() -> DateTime<FixedOffset> + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Practice until the user declines another set.
    ///
    /// Narration goes to `out`, questions go through `source`. Returns the
    /// number of sets completed.
    pub fn run<S, W>(mut self, source: &mut S, out: &mut W) -> Result<usize, SessionError>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        if self.registry.is_empty() {
            writeln!(out, "No activities found, nothing to practice.").map_err(PromptError::from)?;
            return Ok(0);
        }

        writeln!(
            out,
            "You currently have {} activities you can practice.",
            self.registry.count()
        )
        .map_err(PromptError::from)?;

        let labels = ScoreLevel::labels();
        let mut completed = 0;
        while prompt_yes_or_no(source, "Do you wish to practice an activity?")? {
            let Some(activity) = self.registry.random_activity_with(&mut self.rng) else {
                break;
            };
            writeln!(out, "\nThe chosen activity is:\n\t{}\n", activity.description())
                .map_err(PromptError::from)?;

            let picked = prompt_for_choice(source, "How did you do on this activity?", &labels)?;
            writeln!(out, "Keep up the good work\n").map_err(PromptError::from)?;

            let score = ScoreLevel::ALL[picked].value();
            let timestamp = (self.clock)();
            self.practices.append(activity.key(), score, timestamp);
            self.practices.save()?;
            completed += 1;

            tracing::debug!("recorded {} for {}", score, activity.key());
        }

        tracing::info!("practice session finished with {completed} sets");
        Ok(completed)
    }
}

/// Run a practice session with the default RNG and clock.
pub fn run_practice_mode<S, W>(
    source: &mut S,
    out: &mut W,
    registry: &ActivityRegistry,
    practices: &mut Practices,
) -> Result<usize, SessionError>
where
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    PracticeSession::new(registry, practices).run(source, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;
    use crate::prompt::ScriptedInput;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> (tempfile::TempDir, Practices) {
        let dir = tempfile::tempdir().unwrap();
        let practices = Practices::empty(dir.path().join("practices.txt"));
        (dir, practices)
    }

    fn session_answers(sets: usize) -> Vec<&'static str> {
        let mut answers = Vec::new();
        for _ in 0..sets {
            answers.extend(["Y", "3"]);
        }
        answers.push("N");
        answers
    }

    #[test]
    fn select_each_run_mode() {
        for (answer, mode) in [("1", RunMode::Practice), ("2", RunMode::Evaluation)] {
            let mut input = ScriptedInput::new([answer]);
            assert_eq!(select_run_mode(&mut input).unwrap(), mode);
            assert!(input.prompts()[0].ends_with("1) Practice\n2) Evaluation\n"));
        }
    }

    #[test]
    fn select_run_mode_without_input() {
        let mut input = ScriptedInput::default();
        assert!(matches!(
            select_run_mode(&mut input),
            Err(PromptError::NoChoiceMade)
        ));
    }

    #[test]
    fn completes_requested_number_of_sets() {
        let registry = ActivityRegistry::from_lines(["practice_activity"]);
        for sets in [0, 1, 10] {
            let (_dir, mut practices) = store();
            let mut input = ScriptedInput::new(session_answers(sets));
            let mut out = Vec::new();
            let done = run_practice_mode(&mut input, &mut out, &registry, &mut practices).unwrap();
            assert_eq!(done, sets);
            assert_eq!(practices.count(), sets);
            assert_eq!(input.remaining(), 0);
        }
    }

    #[test]
    fn each_set_is_saved_immediately() {
        let registry = ActivityRegistry::from_lines(["scales"]);
        let (_dir, mut practices) = store();
        let path = practices.path().to_path_buf();
        let time = parse_timestamp("2024-01-01T00:00:00+00:00").unwrap();

        let mut input = ScriptedInput::new(["Y", "5", "Y", "1"]);
        let mut out = Vec::new();
        let result = PracticeSession::new(&registry, &mut practices)
            .with_rng(StdRng::seed_from_u64(1))
            .with_clock(move || time)
            .run(&mut input, &mut out);

        // Input ran out before the user said no.
        assert!(matches!(
            result,
            Err(SessionError::Prompt(PromptError::NoChoiceMade))
        ));
        let saved = Practices::load(&path).unwrap();
        assert_eq!(saved.count(), 2);
        assert_eq!(saved.all()[0].activity_key, "scales");
        assert_eq!(saved.all()[0].score, 4);
        assert_eq!(saved.all()[1].score, 0);
        assert_eq!(saved.all()[1].timestamp, time);
    }

    #[test]
    fn narration_describes_the_activity() {
        let registry = ActivityRegistry::from_lines(["practice_activity"]);
        let (_dir, mut practices) = store();
        let mut input = ScriptedInput::new(session_answers(1));
        let mut out = Vec::new();
        run_practice_mode(&mut input, &mut out, &registry, &mut practices).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("You currently have 1 activities you can practice.\n"));
        assert!(text.contains("The chosen activity is:\n\tpractice_activity\n"));
        assert!(text.contains("Keep up the good work"));
        assert!(input.prompts()[1].contains("5) I executed the task flawlessly"));
    }

    #[test]
    fn empty_registry_has_nothing_to_practice() {
        let registry = ActivityRegistry::from_lines(Vec::<String>::new());
        let (_dir, mut practices) = store();
        let mut input = ScriptedInput::new(["Y"]);
        let mut out = Vec::new();
        let done = run_practice_mode(&mut input, &mut out, &registry, &mut practices).unwrap();
        assert_eq!(done, 0);
        assert!(input.prompts().is_empty());
    }
}
