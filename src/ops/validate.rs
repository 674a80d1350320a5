//! Result validation and reporting.
//!
//! Reads: `toggles`, the artifact slots, `tools_suffix`. Writes: `root_dir`
//! (back-derived after a successful unrooted search).

use std::path::{Path, PathBuf};

use crate::core::artifact::ArtifactKind;
use crate::core::settings::{Settings, Toggles};
use crate::ops::errors::FindError;

/// How a failed or successful pass is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindPolicy {
    /// Suppress the success summary and the not-found warning
    pub quiet: bool,
    /// Turn a not-found result into an error
    pub required: bool,
}

impl FindPolicy {
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Required artifacts and which of them are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub required: Vec<ArtifactKind>,
    pub missing: Vec<ArtifactKind>,
}

impl Validation {
    /// True iff every required artifact was discovered.
    pub fn found(&self) -> bool {
        self.missing.is_empty()
    }

    /// Variable names of the missing artifacts.
    pub fn missing_variables(&self) -> Vec<&'static str> {
        self.missing.iter().map(|kind| kind.variable()).collect()
    }
}

/// Artifacts that must be found for the enabled toggles.
///
/// The header and the link library are always required; each binding
/// artifact only when its toggle is on.
pub fn required_artifacts(toggles: &Toggles) -> Vec<ArtifactKind> {
    let mut required = vec![ArtifactKind::Header, ArtifactKind::Library];

    if toggles.matlab_enabled() {
        required.push(ArtifactKind::MexFile);
    }
    if toggles.java_enabled() {
        required.push(ArtifactKind::JavaArchive);
    }
    if toggles.python_enabled() {
        required.push(ArtifactKind::PythonModule);
    }

    required
}

/// Check every required slot.
pub fn validate(settings: &Settings) -> Validation {
    let required = required_artifacts(&settings.toggles);
    let missing = required
        .iter()
        .copied()
        .filter(|kind| settings.artifact(*kind).is_none())
        .collect();

    Validation { required, missing }
}

/// Apply the reporting policy to a validation result.
pub fn report(
    validation: &Validation,
    settings: &Settings,
    policy: FindPolicy,
) -> Result<(), FindError> {
    if validation.found() {
        if !policy.quiet {
            let library = settings
                .library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            tracing::info!("Found MOSEK: {}", library);
        }
        return Ok(());
    }

    let missing = validation.missing_variables();

    if policy.required {
        return Err(FindError::NotFound { missing });
    }

    if !policy.quiet {
        tracing::warn!("could not find MOSEK (missing: {})", missing.join(", "));
    }

    Ok(())
}

/// Set the root from the discovered header directory when none was given.
///
/// The header lives in `<root>/<tools suffix>/h`; stripping that tail gives
/// the root. Returns the derived root, if any.
pub fn back_derive_root(settings: &mut Settings) -> Option<PathBuf> {
    if settings.root_dir.is_some() {
        return None;
    }

    let include_dir = settings.include_dir.as_deref()?;
    let tools = settings.tools_suffix.as_deref()?;
    let root = strip_tail(include_dir, &Path::new(tools).join("h"))?;

    tracing::debug!("derived MOSEK_ROOT_DIR = {}", root.display());
    settings.root_dir = Some(root.clone());
    Some(root)
}

fn strip_tail(path: &Path, tail: &Path) -> Option<PathBuf> {
    if !path.ends_with(tail) {
        return None;
    }

    let depth = tail.components().count();
    path.ancestors().nth(depth).map(Path::to_path_buf)
}
