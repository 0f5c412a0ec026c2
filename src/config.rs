//! Step configuration state and its persisted JSON form.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths::{relative_between, to_interchange, to_system};

/// Configuration owned by a file chooser step.
///
/// `file` and `previous_location` are interchange-form paths relative to the
/// workflow root. Field order matches sorted key order so the persisted JSON
/// diffs reproducibly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(rename = "File")]
    pub file: String,
    pub identifier: String,
    #[serde(default)]
    pub previous_location: String,
}

/// Decoded payload for merge-on-deserialize; absent keys stay untouched.
#[derive(Deserialize)]
struct PartialConfig {
    #[serde(rename = "File")]
    file: Option<String>,
    identifier: Option<String>,
    previous_location: Option<String>,
}

impl StepConfig {
    /// Encode the configuration as a pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize step configuration")
    }

    /// Merge a persisted JSON payload into this configuration.
    ///
    /// Keys missing from the payload keep their current values. A payload
    /// that fails to parse is a hard error for the host to surface.
    pub fn merge_json(&mut self, payload: &str) -> Result<()> {
        let partial: PartialConfig =
            serde_json::from_str(payload).context("parse step configuration")?;
        if let Some(file) = partial.file {
            self.file = file;
        }
        if let Some(identifier) = partial.identifier {
            self.identifier = identifier;
        }
        if let Some(previous_location) = partial.previous_location {
            self.previous_location = previous_location;
        }
        Ok(())
    }

    /// Rewrite stored relative paths for a workflow root move.
    ///
    /// Each non-empty path field is re-anchored so it resolves to the same
    /// on-disk file from `new_root`. Nothing on disk is touched.
    pub fn relocate(&mut self, old_root: &Path, new_root: &Path) {
        for field in [&mut self.file, &mut self.previous_location] {
            if field.is_empty() {
                continue;
            }
            let absolute = old_root.join(to_system(field));
            let rel = relative_between(&absolute, new_root);
            *field = to_interchange(&rel.to_string_lossy());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample() -> StepConfig {
        StepConfig {
            file: "data/input.csv".to_string(),
            identifier: "step1".to_string(),
            previous_location: "data".to_string(),
        }
    }

    #[test]
    fn json_keys_are_sorted() {
        let json = sample().to_json().expect("serialize");
        let file_at = json.find("\"File\"").expect("File key");
        let identifier_at = json.find("\"identifier\"").expect("identifier key");
        let previous_at = json.find("\"previous_location\"").expect("previous key");
        assert!(file_at < identifier_at);
        assert!(identifier_at < previous_at);
    }

    #[test]
    fn round_trip_preserves_config() {
        let config = sample();
        let json = config.to_json().expect("serialize");
        let mut restored = StepConfig::default();
        restored.merge_json(&json).expect("deserialize");
        assert_eq!(restored, config);
    }

    #[test]
    fn merge_preserves_absent_keys() {
        let mut config = sample();
        config
            .merge_json(r#"{"File": "data/other.csv"}"#)
            .expect("merge");
        assert_eq!(config.file, "data/other.csv");
        assert_eq!(config.identifier, "step1");
        assert_eq!(config.previous_location, "data");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let mut config = sample();
        assert!(config.merge_json("not json").is_err());
        assert_eq!(config, sample());
    }

    #[test]
    fn relocate_rewrites_path_fields() {
        let mut config = sample();
        config.relocate(Path::new("/wf"), Path::new("/wf2"));
        assert_eq!(config.file, "../wf/data/input.csv");
        assert_eq!(config.previous_location, "../wf/data");
    }

    #[test]
    fn relocate_leaves_empty_fields_alone() {
        let mut config = StepConfig {
            file: String::new(),
            identifier: "step1".to_string(),
            previous_location: String::new(),
        };
        config.relocate(Path::new("/wf"), Path::new("/wf2"));
        assert_eq!(config.file, "");
        assert_eq!(config.previous_location, "");
    }
}
