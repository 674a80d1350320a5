//! One complete MOSEK discovery pass.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::platform::HostPlatform;
use crate::core::settings::Settings;
use crate::ops::errors::FindError;
use crate::ops::inputs::resolve_inputs;
use crate::ops::library_names::link_name;
use crate::ops::search::{default_system_prefixes, search_artifacts, SearchContext, SearchPlan};
use crate::ops::suffix::derive_suffixes;
use crate::ops::validate::{back_derive_root, report, validate, FindPolicy};
use crate::util::config::SearchConfig;
use crate::util::env::EnvVars;
use crate::util::probe::Probes;

#[cfg(windows)]
const LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const LIST_SEPARATOR: &str = ":";

/// Options for a discovery pass.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub policy: FindPolicy,
    /// Whether the parent build already found a MATLAB installation.
    /// Default for the MATLAB bindings toggle.
    pub matlab_detected: bool,
    /// Where to look when no root is known
    pub search: SearchConfig,
}

impl FindOptions {
    pub fn with_policy(mut self, policy: FindPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_matlab_detected(mut self, detected: bool) -> Self {
        self.matlab_detected = detected;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// What a discovery pass reports to the parent build.
#[derive(Debug, Clone, Serialize)]
pub struct FindOutcome {
    pub found: bool,
    /// Variables of required artifacts that were not found
    pub missing: Vec<&'static str>,
    pub root_dir: Option<PathBuf>,
    pub include_dir: Option<PathBuf>,
    pub includes: Vec<PathBuf>,
    pub library: Option<PathBuf>,
    pub libraries: Vec<PathBuf>,
    pub mex_artifact: Option<PathBuf>,
    pub mex_files: Vec<PathBuf>,
    pub java_archive: Option<PathBuf>,
    pub classpath: Vec<PathBuf>,
    pub python_module_path: Option<PathBuf>,
    /// Searches executed during the pass
    #[serde(skip)]
    pub plans: Vec<SearchPlan>,
}

impl FindOutcome {
    fn collect(settings: &Settings, missing: Vec<&'static str>, plans: Vec<SearchPlan>) -> Self {
        let list = |slot: &Option<PathBuf>| slot.iter().cloned().collect::<Vec<_>>();

        FindOutcome {
            found: missing.is_empty(),
            missing,
            root_dir: settings.root_dir.clone(),
            include_dir: settings.include_dir.clone(),
            includes: list(&settings.include_dir),
            library: settings.library.clone(),
            libraries: list(&settings.library),
            mex_artifact: settings.mex_file.clone(),
            mex_files: list(&settings.mex_file),
            java_archive: settings.java_archive.clone(),
            classpath: list(&settings.java_archive),
            python_module_path: settings.python_module_path.clone(),
            plans,
        }
    }

    /// Every output as a `(variable, value)` pair.
    ///
    /// Unset paths render empty, lists use the platform path separator.
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let list = |items: &[PathBuf]| {
            items
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR)
        };

        vec![
            ("MOSEK_FOUND", if self.found { "TRUE" } else { "FALSE" }.to_string()),
            ("MOSEK_ROOT_DIR", path(&self.root_dir)),
            ("MOSEK_INCLUDE_DIR", path(&self.include_dir)),
            ("MOSEK_INCLUDES", list(&self.includes)),
            ("MOSEK_LIBRARY", path(&self.library)),
            ("MOSEK_LIBRARIES", list(&self.libraries)),
            ("MOSEK_MEX_ARTIFACT", path(&self.mex_artifact)),
            ("MOSEK_MEX_FILES", list(&self.mex_files)),
            ("MOSEK_JAVA_ARCHIVE", path(&self.java_archive)),
            ("MOSEK_CLASSPATH", list(&self.classpath)),
            ("MOSEK_PYTHON_MODULE_PATH", path(&self.python_module_path)),
        ]
    }

    /// Directives for a Cargo build script linking against MOSEK.
    pub fn cargo_directives(&self) -> Vec<String> {
        let mut directives = Vec::new();

        for library in &self.libraries {
            if let Some(dir) = library.parent() {
                directives.push(format!("cargo:rustc-link-search=native={}", dir.display()));
            }
            let name = library
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(link_name);
            if let Some(name) = name {
                directives.push(format!("cargo:rustc-link-lib={}", name));
            }
        }

        for include in &self.includes {
            directives.push(format!("cargo:include={}", include.display()));
        }

        directives
    }
}

/// Locate MOSEK.
///
/// Runs input resolution, suffix derivation, artifact search and validation
/// over `settings`. Values already present in `settings` are kept, so a
/// namespace loaded from an earlier pass only fills in what is missing.
///
/// A missing installation is an error only under a `required` policy;
/// otherwise it is reported through [`FindOutcome::found`].
pub fn find_mosek(
    settings: &mut Settings,
    env: &EnvVars,
    platform: &HostPlatform,
    probes: &dyn Probes,
    options: &FindOptions,
) -> Result<FindOutcome, FindError> {
    tracing::debug!("locating MOSEK for {}", platform);

    resolve_inputs(settings, env, probes, options.matlab_detected)?;
    derive_suffixes(settings, env, platform)?;

    let system_prefixes = if settings.root_dir.is_some() {
        Vec::new()
    } else {
        default_system_prefixes(&options.search, env, platform)
    };
    let ctx = SearchContext {
        env,
        platform,
        system_prefixes: &system_prefixes,
    };
    let plans = search_artifacts(settings, &ctx);

    probes.dump_configuration(settings);

    let validation = validate(settings);
    if validation.found() {
        back_derive_root(settings);
    }
    report(&validation, settings, options.policy)?;

    Ok(FindOutcome::collect(
        settings,
        validation.missing_variables(),
        plans,
    ))
}
