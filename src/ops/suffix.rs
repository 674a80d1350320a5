//! Path suffix derivation.
//!
//! Reads: `root_dir`, `toggles`, `matlab_release`, `python_major`, the
//! environment and the platform. Writes: `tools_suffix`, `toolbox_suffix`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::core::platform::HostPlatform;
use crate::core::release::MatlabRelease;
use crate::core::settings::Settings;
use crate::ops::errors::FindError;
use crate::util::env::EnvVars;

pub const TOOLS_SUFFIX_VAR: &str = "MOSEK_TOOLS_SUFFIX";
pub const TOOLBOX_SUFFIX_VAR: &str = "MOSEK_TOOLBOX_SUFFIX";

static MEX_BINARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mosekopt\.mex\w*$").expect("valid MEX pattern"));

/// Derive the platform tools suffix and, for MATLAB, the toolbox suffix.
pub fn derive_suffixes(
    settings: &mut Settings,
    env: &EnvVars,
    platform: &HostPlatform,
) -> Result<(), FindError> {
    if settings.tools_suffix.is_none() {
        let suffix = env
            .get(TOOLS_SUFFIX_VAR)
            .unwrap_or_else(|| platform.tools_suffix());
        tracing::debug!("{} = {}", TOOLS_SUFFIX_VAR, suffix);
        settings.tools_suffix = Some(suffix);
    }

    if settings.toggles.matlab_enabled() && settings.toolbox_suffix.is_none() {
        let suffix = match env.get(TOOLBOX_SUFFIX_VAR) {
            Some(suffix) => suffix,
            None => {
                let release: MatlabRelease = settings
                    .matlab_release
                    .as_deref()
                    .unwrap_or(crate::ops::inputs::DEFAULT_MATLAB_RELEASE)
                    .parse()?;
                select_toolbox_suffix(settings.root_dir.as_deref(), &release)
            }
        };
        tracing::debug!("{} = {}", TOOLBOX_SUFFIX_VAR, suffix);
        settings.toolbox_suffix = Some(suffix);
    }

    Ok(())
}

/// Pick the toolbox directory matching a MATLAB release.
///
/// With a known root, the newest toolbox build from `release`'s year or
/// earlier is used. Otherwise, or when no build qualifies, the release's own
/// tag is assumed.
pub fn select_toolbox_suffix(root: Option<&Path>, release: &MatlabRelease) -> String {
    if let Some(root) = root {
        let versions = scan_toolbox_versions(root);
        if let Some(dir) = pick_toolbox_version(&versions, release) {
            return format!("toolbox/{}", dir);
        }
        tracing::debug!(
            "no toolbox build under {} is compatible with {}",
            root.display(),
            release
        );
    }

    format!("toolbox/{}", release.to_lowercase_tag())
}

/// Find every `toolbox/<release>/` directory holding a MEX binary.
///
/// Returns the release of each directory with the directory name as it
/// appears on disk.
pub fn scan_toolbox_versions(root: &Path) -> BTreeMap<MatlabRelease, String> {
    let mut versions = BTreeMap::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !MEX_BINARY.is_match(&name) {
            continue;
        }

        let Some(version_dir) = entry.path().parent() else {
            continue;
        };
        let in_toolbox = version_dir
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|n| n == "toolbox");
        if !in_toolbox {
            continue;
        }

        let Some(dir_name) = version_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Ok(release) = dir_name.parse::<MatlabRelease>() {
            versions.entry(release).or_insert_with(|| dir_name.to_string());
        }
    }

    versions
}

/// Newest version whose year is no later than `release`'s year.
pub fn pick_toolbox_version(
    versions: &BTreeMap<MatlabRelease, String>,
    release: &MatlabRelease,
) -> Option<String> {
    versions
        .iter()
        .rev()
        .find(|(version, _)| version.year_not_after(release))
        .map(|(_, dir)| dir.clone())
}

/// Python module suffix (`<tools>/python/<major>`), if Python is resolved.
pub fn python_suffix(settings: &Settings) -> Option<String> {
    let tools = settings.tools_suffix.as_deref()?;
    let major = settings.python_major.as_deref()?;
    Some(format!("{}/python/{}", tools, major))
}
