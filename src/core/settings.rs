//! The configuration namespace a discovery pass reads and writes.
//!
//! `Settings` plays the role of a build system's variable cache: explicit
//! values set by the caller, values resolved on an earlier pass, and paths
//! discovered by the search all live here. Every field is optional; a set
//! field is never re-derived, which is what makes repeated passes
//! idempotent.
//!
//! The CLI persists it as TOML between runs (`.mosekfind/cache.toml`).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::artifact::ArtifactKind;
use crate::util::fs::read_to_string;

/// Feature toggles controlling which bindings are searched for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    /// Search for the MATLAB MEX binding
    pub matlab: Option<bool>,

    /// Search for the Java archive
    pub java: Option<bool>,

    /// Search for the Python module
    pub python: Option<bool>,

    /// Link the variant built without OpenMP
    pub no_openmp: Option<bool>,
}

impl Toggles {
    pub fn matlab_enabled(&self) -> bool {
        self.matlab.unwrap_or(false)
    }

    pub fn java_enabled(&self) -> bool {
        self.java.unwrap_or(false)
    }

    pub fn python_enabled(&self) -> bool {
        self.python.unwrap_or(false)
    }

    pub fn no_openmp_enabled(&self) -> bool {
        self.no_openmp.unwrap_or(false)
    }

    /// Whether the optional artifact `kind` was requested.
    ///
    /// The header and the library are always requested.
    pub fn requests(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Header | ArtifactKind::Library => true,
            ArtifactKind::MexFile => self.matlab_enabled(),
            ArtifactKind::JavaArchive => self.java_enabled(),
            ArtifactKind::PythonModule => self.python_enabled(),
        }
    }
}

/// Configuration namespace for one MOSEK discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// MOSEK installation root
    pub root_dir: Option<PathBuf>,

    /// Feature toggles
    pub toggles: Toggles,

    /// Platform directory relative to the root (`tools/platform/linux64x86`)
    pub tools_suffix: Option<String>,

    /// MATLAB release tag (`R2015a`)
    pub matlab_release: Option<String>,

    /// MEX binary directory relative to the root (`toolbox/r2015a`)
    pub toolbox_suffix: Option<String>,

    /// MEX file extension (`mexa64`)
    pub mex_extension: Option<String>,

    /// Python version string (`3.11`)
    pub python_version: Option<String>,

    /// Python major version (`3`)
    pub python_major: Option<String>,

    /// Directory containing `mosek.h`
    pub include_dir: Option<PathBuf>,

    /// Path of the link library
    pub library: Option<PathBuf>,

    /// Path of the MATLAB MEX binary
    pub mex_file: Option<PathBuf>,

    /// Path of the Java archive
    pub java_archive: Option<PathBuf>,

    /// Directory containing the `mosek` Python package
    pub python_module_path: Option<PathBuf>,

    /// Variables hidden from casual review
    pub advanced: BTreeSet<String>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse cache: {}", path.display()))
    }

    /// Load settings, starting fresh if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize cache")?;

        crate::util::fs::write_string(path, &contents)
    }

    /// Discovered path for an artifact kind.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&PathBuf> {
        match kind {
            ArtifactKind::Header => self.include_dir.as_ref(),
            ArtifactKind::Library => self.library.as_ref(),
            ArtifactKind::MexFile => self.mex_file.as_ref(),
            ArtifactKind::JavaArchive => self.java_archive.as_ref(),
            ArtifactKind::PythonModule => self.python_module_path.as_ref(),
        }
    }

    /// Mutable slot for an artifact kind.
    pub fn artifact_slot(&mut self, kind: ArtifactKind) -> &mut Option<PathBuf> {
        match kind {
            ArtifactKind::Header => &mut self.include_dir,
            ArtifactKind::Library => &mut self.library,
            ArtifactKind::MexFile => &mut self.mex_file,
            ArtifactKind::JavaArchive => &mut self.java_archive,
            ArtifactKind::PythonModule => &mut self.python_module_path,
        }
    }

    /// Mark a variable as advanced.
    pub fn mark_advanced(&mut self, variable: &str) {
        self.advanced.insert(variable.to_string());
    }

    pub fn is_advanced(&self, variable: &str) -> bool {
        self.advanced.contains(variable)
    }

    /// Every slot as a `(variable, value)` pair, unset slots omitted.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();

        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                entries.push((name, value));
            }
        };

        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        let flag = |b: Option<bool>| b.map(|b| if b { "ON" } else { "OFF" }.to_string());

        push("MOSEK_ROOT_DIR", path(&self.root_dir));
        push("MOSEK_MATLAB_BINDINGS", flag(self.toggles.matlab));
        push("MOSEK_JAVA_BINDINGS", flag(self.toggles.java));
        push("MOSEK_PYTHON_BINDINGS", flag(self.toggles.python));
        push("MOSEK_NO_OPENMP", flag(self.toggles.no_openmp));
        push("MOSEK_TOOLS_SUFFIX", self.tools_suffix.clone());
        push("MATLAB_RELEASE", self.matlab_release.clone());
        push("MOSEK_TOOLBOX_SUFFIX", self.toolbox_suffix.clone());
        push("MATLAB_MEX_EXT", self.mex_extension.clone());
        push("MOSEK_PYTHON_VERSION", self.python_version.clone());
        push("MOSEK_PYTHON_MAJOR", self.python_major.clone());
        for kind in ArtifactKind::ALL {
            push(kind.variable(), path(&self.artifact(kind).cloned()));
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.root_dir.is_none());
        assert!(!settings.toggles.matlab_enabled());
        assert!(settings.toggles.requests(ArtifactKind::Header));
        assert!(!settings.toggles.requests(ArtifactKind::JavaArchive));
        assert!(settings.entries().is_empty());
    }

    #[test]
    fn test_settings_roundtrip_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".mosekfind").join("cache.toml");

        let mut settings = Settings::default();
        settings.root_dir = Some(PathBuf::from("/opt/mosek/7"));
        settings.toggles.java = Some(true);
        settings.tools_suffix = Some("tools/platform/linux64x86".to_string());
        settings.mark_advanced("MOSEK_LIBRARY");

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
        assert!(loaded.is_advanced("MOSEK_LIBRARY"));
    }

    #[test]
    fn test_settings_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache.toml");
        std::fs::write(
            &path,
            r#"
root_dir = "/opt/mosek/7"

[toggles]
python = true
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.root_dir, Some(PathBuf::from("/opt/mosek/7")));
        assert_eq!(settings.toggles.python, Some(true));
        assert_eq!(settings.toggles.matlab, None);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_or_default(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_artifact_slot() {
        let mut settings = Settings::default();
        *settings.artifact_slot(ArtifactKind::JavaArchive) = Some(PathBuf::from("/x/mosek.jar"));

        assert_eq!(
            settings.artifact(ArtifactKind::JavaArchive),
            Some(&PathBuf::from("/x/mosek.jar"))
        );
        assert_eq!(settings.entries(), vec![("MOSEK_JAVA_ARCHIVE", "/x/mosek.jar".to_string())]);
    }
}
