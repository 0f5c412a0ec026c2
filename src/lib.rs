//! File chooser source step for workflow hosts.
//!
//! The step records one user-chosen file as a workflow-relative path,
//! validates the selection and a host-unique identifier, and round-trips the
//! configuration through a stable JSON form. The host engine, the identifier
//! uniqueness oracle, and the actual dialog rendering stay outside; this
//! crate exposes capability traits ([`IdentifierOracle`], [`ConfigureUi`])
//! at those seams.

mod config;
mod paths;
mod session;
mod step;
mod validate;

pub use config::StepConfig;
pub use paths::{
    relative_between, resolve_against, to_interchange, to_system, to_workflow_relative,
};
pub use session::ConfigSession;
pub use step::{
    ConfigureUi, DialogOutcome, FileChooserStep, Port, WorkflowStep, STEP_CATEGORY, STEP_NAME,
};
pub use validate::{ConfigCheck, IdentifierOracle};
