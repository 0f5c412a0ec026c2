//! Configuration edit session.
//!
//! A session owns one round of dialog state: seeded from the step's current
//! configuration, mutated by field edits and chooser picks, validated on
//! demand, and committed atomically on confirm. Cancelling is just dropping
//! the session.

use std::path::{Path, PathBuf};

use crate::config::StepConfig;
use crate::paths::{relative_between, to_interchange, to_system, to_workflow_relative};
use crate::validate::{check_file, check_identifier, ConfigCheck, IdentifierOracle};

/// In-progress configuration edits for a single dialog round.
pub struct ConfigSession<'a> {
    root: &'a Path,
    oracle: &'a dyn IdentifierOracle,
    identifier: String,
    /// File field as displayed: system separators, workflow-relative when
    /// the value came from the chooser, verbatim when typed.
    file_location: String,
    /// Identifier committed last round; its single occurrence is this step.
    previous_identifier: String,
    /// Absolute path the file chooser should open at next time.
    previous_location: PathBuf,
}

impl<'a> ConfigSession<'a> {
    /// Seed a session from the step's current configuration.
    pub fn new(config: &StepConfig, root: &'a Path, oracle: &'a dyn IdentifierOracle) -> Self {
        let previous_location = if config.previous_location.is_empty() {
            PathBuf::new()
        } else {
            root.join(to_system(&config.previous_location))
        };
        Self {
            root,
            oracle,
            identifier: config.identifier.clone(),
            file_location: to_system(&config.file),
            previous_identifier: config.identifier.clone(),
            previous_location,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_identifier(&mut self, value: &str) {
        self.identifier = value.to_string();
    }

    pub fn file_location(&self) -> &str {
        &self.file_location
    }

    pub fn set_file_location(&mut self, value: &str) {
        self.file_location = value.to_string();
    }

    /// Where a file chooser should start browsing.
    pub fn chooser_start(&self) -> &Path {
        &self.previous_location
    }

    /// Record a file chooser pick: remember it as the next starting
    /// location and display it workflow-relative.
    pub fn choose_file(&mut self, chosen: &Path) {
        self.previous_location = chosen.to_path_buf();
        self.file_location = to_workflow_relative(&chosen.to_string_lossy(), self.root);
    }

    /// File field in workflow-relative display form.
    ///
    /// Typed-in absolute paths are relative-ized here; already-relative
    /// values pass through.
    pub fn display_location(&self) -> String {
        to_workflow_relative(&self.file_location, self.root)
    }

    /// Validate the current field values.
    pub fn check(&self) -> ConfigCheck {
        ConfigCheck {
            identifier_ok: check_identifier(&self.identifier, &self.previous_identifier, self.oracle),
            file_ok: check_file(&self.display_location(), self.root),
        }
    }

    /// Produce the configuration for these edits, normalizing path fields
    /// into interchange-form relative paths, and advance the
    /// previous-identifier tracking.
    pub fn commit(&mut self) -> StepConfig {
        self.previous_identifier = self.identifier.clone();
        let previous_location = if self.previous_location.as_os_str().is_empty() {
            String::new()
        } else {
            let rel = relative_between(&self.previous_location, self.root);
            to_interchange(&rel.to_string_lossy())
        };
        StepConfig {
            file: to_interchange(&self.display_location()),
            identifier: self.identifier.clone(),
            previous_location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverUsed;

    impl IdentifierOracle for NeverUsed {
        fn occurrence_count(&self, _candidate: &str) -> usize {
            0
        }
    }

    struct SelfOnly;

    impl IdentifierOracle for SelfOnly {
        fn occurrence_count(&self, _candidate: &str) -> usize {
            1
        }
    }

    #[test]
    fn chooser_pick_is_displayed_workflow_relative() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let oracle = NeverUsed;
        let mut session = ConfigSession::new(&StepConfig::default(), dir.path(), &oracle);
        let chosen = dir.path().join("data").join("input.csv");
        session.choose_file(&chosen);
        assert_eq!(session.file_location(), "data/input.csv");
        assert_eq!(session.chooser_start(), chosen);
    }

    #[test]
    fn commit_normalizes_path_fields() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let oracle = NeverUsed;
        let mut session = ConfigSession::new(&StepConfig::default(), dir.path(), &oracle);
        session.set_identifier("step1");
        session.choose_file(&dir.path().join("data").join("input.csv"));
        let config = session.commit();
        assert_eq!(config.identifier, "step1");
        assert_eq!(config.file, "data/input.csv");
        assert_eq!(config.previous_location, "data/input.csv");
    }

    #[test]
    fn commit_advances_previous_identifier() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("input.csv"), b"a\n").expect("write file");
        let oracle = SelfOnly;
        let seed = StepConfig {
            file: "input.csv".to_string(),
            identifier: "step1".to_string(),
            previous_location: String::new(),
        };
        let mut session = ConfigSession::new(&seed, dir.path(), &oracle);
        session.set_identifier("step2");
        // Renamed and colliding with another step: invalid until committed.
        assert!(!session.check().identifier_ok);
        session.commit();
        assert!(session.check().is_valid());
    }

    #[test]
    fn typed_absolute_path_validates_against_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("input.csv"), b"a\n").expect("write file");
        let oracle = NeverUsed;
        let mut session = ConfigSession::new(&StepConfig::default(), dir.path(), &oracle);
        session.set_file_location(&dir.path().join("input.csv").to_string_lossy());
        assert!(session.check().file_ok);
        assert_eq!(session.display_location(), "input.csv");
    }

    #[test]
    fn session_reopens_chooser_at_stored_previous_location() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let oracle = NeverUsed;
        let seed = StepConfig {
            file: "data/input.csv".to_string(),
            identifier: "step1".to_string(),
            previous_location: "data".to_string(),
        };
        let session = ConfigSession::new(&seed, dir.path(), &oracle);
        assert_eq!(session.chooser_start(), dir.path().join("data"));
    }
}
