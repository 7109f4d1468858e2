//! # Access State — Validation Progress Gating Field Reads
//!
//! Tracks how far a request has progressed through its validation checks.
//! Three booleans are the ground truth; each flips `false → true` exactly
//! once and is never reset, so a request can only move forward through its
//! lifecycle. [`AccessPhase`] is a derived view used in diagnostics.
//!
//! Reads are permitted once the request is fully checked — or immediately,
//! when no requirements were ever declared (there is nothing meaningful to
//! check first).

use std::fmt;

/// Derived progress label: the first stage the request has not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPhase {
    /// Availability has not been checked.
    Fresh,
    /// Availability checked; requirement presence has not been checked.
    AvailabilityChecked,
    /// Both checks have run; reads are permitted.
    FullyChecked,
}

impl fmt::Display for AccessPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessPhase::Fresh => "FRESH",
            AccessPhase::AvailabilityChecked => "AVAILABILITY_CHECKED",
            AccessPhase::FullyChecked => "FULLY_CHECKED",
        };
        f.write_str(name)
    }
}

/// Forward-only check-progress flags for one request lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AccessState {
    checked_available: bool,
    checked_requirements: bool,
    has_declared_requirements: bool,
}

impl AccessState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn note_available_checked(&mut self) {
        self.checked_available = true;
    }

    pub(crate) fn note_requirements_checked(&mut self) {
        self.checked_requirements = true;
    }

    pub(crate) fn note_requirements_declared(&mut self) {
        self.has_declared_requirements = true;
    }

    pub(crate) fn has_declared_requirements(&self) -> bool {
        self.has_declared_requirements
    }

    /// The first unmet stage, in check order.
    pub(crate) fn phase(&self) -> AccessPhase {
        if !self.checked_available {
            AccessPhase::Fresh
        } else if !self.checked_requirements {
            AccessPhase::AvailabilityChecked
        } else {
            AccessPhase::FullyChecked
        }
    }

    /// Whether field reads may proceed: trivially when nothing was declared,
    /// otherwise only once fully checked.
    pub(crate) fn reads_permitted(&self) -> bool {
        !self.has_declared_requirements() || self.phase() == AccessPhase::FullyChecked
    }
}
