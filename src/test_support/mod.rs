//! Test utilities for mosekfind unit tests.
//!
//! [`FakeProbes`] scripts the answers of the host runtime probes and counts
//! how often they are asked. [`MosekTree`] lays out a fake MOSEK
//! installation in a temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use mosekfind::test_support::{FakeProbes, MosekTree};
//!
//! #[test]
//! fn test_example() {
//!     let tree = MosekTree::new().with_toolbox("R2014b", "mexa64");
//!     let probes = FakeProbes::new().with_matlab_release("R2015a");
//!
//!     // Point a discovery pass at tree.root()...
//! }
//! ```

pub mod fixtures;

use std::cell::Cell;

use crate::util::probe::{ProbeOutcome, Probes};

pub use fixtures::*;

/// Probes answering from a script.
///
/// Unscripted probes are unavailable. Every call is counted, scripted or
/// not.
#[derive(Debug, Default)]
pub struct FakeProbes {
    matlab_release: Option<ProbeOutcome>,
    mex_extension: Option<ProbeOutcome>,
    python_version: Option<ProbeOutcome>,
    calls: Cell<usize>,
}

impl FakeProbes {
    pub fn new() -> Self {
        FakeProbes::default()
    }

    pub fn with_matlab_release(mut self, release: impl Into<String>) -> Self {
        self.matlab_release = Some(ProbeOutcome::Found(release.into()));
        self
    }

    pub fn with_empty_matlab_release(mut self) -> Self {
        self.matlab_release = Some(ProbeOutcome::Empty);
        self
    }

    pub fn with_mex_extension(mut self, ext: impl Into<String>) -> Self {
        self.mex_extension = Some(ProbeOutcome::Found(ext.into()));
        self
    }

    pub fn with_empty_mex_extension(mut self) -> Self {
        self.mex_extension = Some(ProbeOutcome::Empty);
        self
    }

    pub fn with_python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = Some(ProbeOutcome::Found(version.into()));
        self
    }

    pub fn with_empty_python_version(mut self) -> Self {
        self.python_version = Some(ProbeOutcome::Empty);
        self
    }

    /// Number of probe invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn answer(&self, scripted: &Option<ProbeOutcome>) -> ProbeOutcome {
        self.calls.set(self.calls.get() + 1);
        scripted.clone().unwrap_or(ProbeOutcome::Unavailable)
    }
}

impl Probes for FakeProbes {
    fn matlab_release(&self) -> ProbeOutcome {
        self.answer(&self.matlab_release)
    }

    fn mex_extension(&self) -> ProbeOutcome {
        self.answer(&self.mex_extension)
    }

    fn python_version(&self) -> ProbeOutcome {
        self.answer(&self.python_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_probes_count_calls() {
        let probes = FakeProbes::new().with_python_version("3.11");

        assert_eq!(probes.matlab_release(), ProbeOutcome::Unavailable);
        assert_eq!(probes.python_version(), ProbeOutcome::Found("3.11".into()));
        assert_eq!(probes.calls(), 2);
    }

    #[test]
    fn test_mosek_tree_layout() {
        let tree = MosekTree::new().with_toolbox("R2014b", "mexa64");
        assert!(tree.root().join("toolbox/R2014b/mosekopt.mexa64").is_file());
    }
}
