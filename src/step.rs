//! Host-facing step adapter.
//!
//! Implements the fixed step contract the workflow host drives: configure,
//! execute, serialize/deserialize, port data, and root relocation. All real
//! logic lives in the configuration state; this is the wiring.

use anyhow::{ensure, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::StepConfig;
use crate::paths::{resolve_against, to_interchange, to_system, to_workflow_relative};
use crate::session::ConfigSession;
use crate::validate::{ConfigCheck, IdentifierOracle};

/// Display name the host shows for this step.
pub const STEP_NAME: &str = "File Chooser";
/// Host category; this step is a data source.
pub const STEP_CATEGORY: &str = "Source";

const PORT_SCHEMA: &str = "http://physiomeproject.org/workflow/1.0/rdf-schema#port";
const PORT_PROVIDES: &str = "http://physiomeproject.org/workflow/1.0/rdf-schema#provides";
const PORT_FILE_LOCATION: &str = "http://physiomeproject.org/workflow/1.0/rdf-schema#file_location";

/// A port declared by a step, as an RDF-style triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub schema: &'static str,
    pub role: &'static str,
    pub payload: &'static str,
}

/// How a configuration dialog round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted,
    Cancelled,
}

/// Presentation capability the real frontend implements.
///
/// `run` drives the user through one edit round on the session; the step
/// itself decides what an accepted-but-invalid session means.
pub trait ConfigureUi {
    fn run(&mut self, session: &mut ConfigSession<'_>) -> DialogOutcome;

    /// Explicit prompt before an invalid configuration is saved anyway.
    fn confirm_invalid(&mut self, check: &ConfigCheck) -> bool;
}

/// Step contract demanded by the workflow host.
pub trait WorkflowStep {
    fn execute(&mut self) -> Result<()>;
    fn port_data(&self, index: usize) -> Result<PathBuf>;
    fn configure(&mut self, ui: &mut dyn ConfigureUi, oracle: &dyn IdentifierOracle);
    fn is_configured(&self) -> bool;
    fn serialize(&self) -> Result<String>;
    fn deserialize(&mut self, payload: &str, oracle: &dyn IdentifierOracle) -> Result<()>;
    fn identifier(&self) -> &str;
    fn set_identifier(&mut self, identifier: &str);
    fn relocate_configuration(&mut self, new_root: &Path);
}

/// Source step that records one user-chosen file as a workflow-relative path.
pub struct FileChooserStep {
    location: PathBuf,
    config: StepConfig,
    configured: bool,
    ports: Vec<Port>,
}

impl FileChooserStep {
    /// Create an unconfigured step rooted at the workflow location.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            config: StepConfig::default(),
            configured: false,
            ports: vec![Port {
                schema: PORT_SCHEMA,
                role: PORT_PROVIDES,
                payload: PORT_FILE_LOCATION,
            }],
        }
    }

    pub fn name(&self) -> &'static str {
        STEP_NAME
    }

    pub fn category(&self) -> &'static str {
        STEP_CATEGORY
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Workflow root this step resolves relative paths against.
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Adopt a host-provided configuration payload.
    ///
    /// Path-valued keys are normalized against the workflow root; the
    /// host-assigned identifier is kept over whatever the payload carries.
    pub fn set_configuration(&mut self, payload: &str) -> Result<()> {
        let identifier = self.config.identifier.clone();
        let mut incoming = StepConfig::default();
        incoming.merge_json(payload)?;
        for field in [&mut incoming.file, &mut incoming.previous_location] {
            if field.is_empty() {
                continue;
            }
            let relative = to_workflow_relative(&to_system(field), &self.location);
            *field = to_interchange(&relative);
        }
        incoming.identifier = identifier;
        self.config = incoming;
        Ok(())
    }

    fn validate(&self, oracle: &dyn IdentifierOracle) -> ConfigCheck {
        ConfigSession::new(&self.config, &self.location, oracle).check()
    }
}

impl WorkflowStep for FileChooserStep {
    /// A source step has no work; execution completes immediately.
    fn execute(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resolved absolute path of the configured file.
    fn port_data(&self, index: usize) -> Result<PathBuf> {
        ensure!(index < self.ports.len(), "no port at index {index}");
        Ok(resolve_against(&self.location, &self.config.file))
    }

    /// Run one configuration round through the presentation capability.
    ///
    /// The new configuration is adopted only on confirm; either way the
    /// configured flag reflects the post-dialog validation result.
    fn configure(&mut self, ui: &mut dyn ConfigureUi, oracle: &dyn IdentifierOracle) {
        let mut session = ConfigSession::new(&self.config, &self.location, oracle);
        let outcome = ui.run(&mut session);
        let check = session.check();
        if outcome == DialogOutcome::Accepted && (check.is_valid() || ui.confirm_invalid(&check)) {
            self.config = session.commit();
        }
        self.configured = check.is_valid();
        debug!(
            identifier = %self.config.identifier,
            configured = self.configured,
            "configure finished"
        );
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn serialize(&self) -> Result<String> {
        self.config.to_json()
    }

    /// Restore a persisted configuration and re-validate without any UI, so
    /// a stale configuration (deleted file, duplicated identifier) is
    /// discovered at workflow load time.
    fn deserialize(&mut self, payload: &str, oracle: &dyn IdentifierOracle) -> Result<()> {
        self.config.merge_json(payload)?;
        self.configured = self.validate(oracle).is_valid();
        debug!(
            identifier = %self.config.identifier,
            configured = self.configured,
            "configuration restored"
        );
        Ok(())
    }

    fn identifier(&self) -> &str {
        &self.config.identifier
    }

    fn set_identifier(&mut self, identifier: &str) {
        self.config.identifier = identifier.to_string();
    }

    /// Re-anchor stored relative paths for a moved workflow root.
    fn relocate_configuration(&mut self, new_root: &Path) {
        debug!(
            from = %self.location.display(),
            to = %new_root.display(),
            "relocating configuration"
        );
        self.config.relocate(&self.location, new_root);
        self.location = new_root.to_path_buf();
    }
}
