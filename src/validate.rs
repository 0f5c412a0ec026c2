//! Configuration validity checks.
//!
//! Invalid input is represented, never thrown: each check yields a flag a
//! frontend can pin to its field, and overall validity is the conjunction.

use std::path::Path;

use crate::paths::to_system;

/// Host-supplied oracle for identifier uniqueness across the workflow.
pub trait IdentifierOracle {
    /// Number of steps in the workflow currently using `candidate`.
    fn occurrence_count(&self, candidate: &str) -> usize;
}

/// Outcome of validating a configuration, one flag per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigCheck {
    pub identifier_ok: bool,
    pub file_ok: bool,
}

impl ConfigCheck {
    /// Overall validity: every field check passed.
    pub fn is_valid(&self) -> bool {
        self.identifier_ok && self.file_ok
    }
}

/// An identifier is valid when unused, or when its single use is this step.
pub(crate) fn check_identifier(
    candidate: &str,
    previous: &str,
    oracle: &dyn IdentifierOracle,
) -> bool {
    let count = oracle.occurrence_count(candidate);
    count == 0 || (count == 1 && candidate == previous)
}

/// A file location is valid when non-empty and, resolved against the
/// workflow root, names an existing file.
pub(crate) fn check_file(location: &str, root: &Path) -> bool {
    if location.is_empty() {
        return false;
    }
    root.join(to_system(location)).is_file()
}
