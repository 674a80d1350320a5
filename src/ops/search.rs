//! Artifact search.
//!
//! Reads: `root_dir`, `toggles`, every suffix, `mex_extension`, the
//! environment and the platform. Writes: the artifact slots
//! (`include_dir`, `library`, `mex_file`, `java_archive`,
//! `python_module_path`) and their advanced marks.
//!
//! A known installation root is authoritative: the search never leaves it.
//! Without a root, environment hints and default system locations are
//! tried.

use std::path::{Path, PathBuf};

use crate::core::artifact::{ArtifactKind, HEADER_FILE, JAR_FILE, MEX_STEM, PYTHON_MARKER};
use crate::core::platform::{HostPlatform, OsFamily};
use crate::core::settings::Settings;
use crate::ops::inputs::DEFAULT_MEX_EXTENSION;
use crate::ops::library_names;
use crate::ops::suffix::python_suffix;
use crate::util::config::SearchConfig;
use crate::util::env::EnvVars;
use crate::util::fs::expand_glob_dirs;

/// How the directories of a plan were chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Only the installation root is searched
    Rooted(PathBuf),
    /// Environment hints and system locations are searched
    Unrooted,
}

impl SearchMode {
    pub fn is_rooted(&self) -> bool {
        matches!(self, SearchMode::Rooted(_))
    }
}

/// One name to search for, with every file spelling it may have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub files: Vec<String>,
}

impl Candidate {
    fn single(file: impl Into<String>) -> Self {
        let file = file.into();
        Candidate {
            name: file.clone(),
            files: vec![file],
        }
    }
}

/// Everything a search for one artifact will try, in order.
///
/// Candidates are tried in order; for each candidate every directory is
/// tried before moving on to the next candidate.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub kind: ArtifactKind,
    pub mode: SearchMode,
    pub directories: Vec<PathBuf>,
    pub candidates: Vec<Candidate>,
}

impl SearchPlan {
    /// Run the plan against the filesystem.
    pub fn execute(&self) -> Option<PathBuf> {
        for candidate in &self.candidates {
            for dir in &self.directories {
                for file in &candidate.files {
                    let path = dir.join(file);
                    if path.is_file() {
                        tracing::debug!("found {} at {}", self.kind, path.display());
                        return Some(if self.kind.reports_directory() {
                            dir.clone()
                        } else {
                            path
                        });
                    }
                }
            }
        }

        tracing::debug!(
            "{} not found in {} directories",
            self.kind,
            self.directories.len()
        );
        None
    }
}

/// Inputs a search needs besides the namespace.
#[derive(Debug, Clone)]
pub struct SearchContext<'a> {
    pub env: &'a EnvVars,
    pub platform: &'a HostPlatform,
    /// Installation prefixes tried after environment hints when unrooted
    pub system_prefixes: &'a [PathBuf],
}

/// Search for every requested artifact whose slot is still empty.
///
/// Returns the plans that were executed.
pub fn search_artifacts(settings: &mut Settings, ctx: &SearchContext<'_>) -> Vec<SearchPlan> {
    let mut executed = Vec::new();

    for kind in ArtifactKind::ALL {
        if !settings.toggles.requests(kind) || settings.artifact(kind).is_some() {
            continue;
        }

        let plan = plan_search(kind, settings, ctx);
        if let Some(found) = plan.execute() {
            *settings.artifact_slot(kind) = Some(found);
            settings.mark_advanced(kind.variable());
        }
        executed.push(plan);
    }

    executed
}

/// Build the search plan for one artifact kind.
pub fn plan_search(kind: ArtifactKind, settings: &Settings, ctx: &SearchContext<'_>) -> SearchPlan {
    let suffix = artifact_suffix(kind, settings);

    let (mode, directories) = match &settings.root_dir {
        Some(root) => {
            let mut dirs = Vec::new();
            push_with_suffix(&mut dirs, root, suffix.as_deref());
            (SearchMode::Rooted(root.clone()), dirs)
        }
        None => (
            SearchMode::Unrooted,
            unrooted_directories(kind, suffix.as_deref(), ctx),
        ),
    };

    SearchPlan {
        kind,
        mode,
        directories,
        candidates: artifact_candidates(kind, settings, ctx.platform),
    }
}

/// Path below an installation root where `kind` lives.
fn artifact_suffix(kind: ArtifactKind, settings: &Settings) -> Option<String> {
    let tools = settings.tools_suffix.as_deref();
    match kind {
        ArtifactKind::Header => tools.map(|t| format!("{}/h", t)),
        ArtifactKind::Library | ArtifactKind::JavaArchive => tools.map(|t| format!("{}/bin", t)),
        ArtifactKind::MexFile => settings.toolbox_suffix.clone(),
        ArtifactKind::PythonModule => python_suffix(settings),
    }
}

fn artifact_candidates(
    kind: ArtifactKind,
    settings: &Settings,
    platform: &HostPlatform,
) -> Vec<Candidate> {
    match kind {
        ArtifactKind::Header => vec![Candidate::single(HEADER_FILE)],
        ArtifactKind::Library => {
            library_names::candidates(platform, settings.toggles.no_openmp_enabled())
                .into_iter()
                .map(|name| Candidate {
                    files: library_names::file_names(platform, &name),
                    name,
                })
                .collect()
        }
        ArtifactKind::MexFile => {
            let ext = settings
                .mex_extension
                .as_deref()
                .unwrap_or(DEFAULT_MEX_EXTENSION);
            vec![Candidate::single(format!("{}.{}", MEX_STEM, ext))]
        }
        ArtifactKind::JavaArchive => vec![Candidate::single(JAR_FILE)],
        ArtifactKind::PythonModule => vec![Candidate::single(PYTHON_MARKER)],
    }
}

/// Conventional subdirectories of an installation prefix for `kind`.
fn standard_subdirs(kind: ArtifactKind) -> &'static [&'static str] {
    match kind {
        ArtifactKind::Header => &["include"],
        ArtifactKind::Library => &["lib", "lib64"],
        ArtifactKind::JavaArchive => &["share/java", "lib"],
        ArtifactKind::MexFile | ArtifactKind::PythonModule => &[],
    }
}

fn unrooted_directories(
    kind: ArtifactKind,
    suffix: Option<&str>,
    ctx: &SearchContext<'_>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for var in kind.env_hints() {
        for hint in ctx.env.split_paths(var) {
            // CLASSPATH entries usually name archives rather than directories
            let hint = match hint.extension() {
                Some(ext) if ext == "jar" => match hint.parent() {
                    Some(parent) => parent.to_path_buf(),
                    None => continue,
                },
                _ => hint,
            };
            push_with_suffix(&mut dirs, &hint, suffix);
        }
    }

    for prefix in ctx.system_prefixes {
        push_with_suffix(&mut dirs, prefix, suffix);
        for sub in standard_subdirs(kind) {
            push_unique(&mut dirs, prefix.join(sub));
        }
    }

    dirs
}

fn push_with_suffix(dirs: &mut Vec<PathBuf>, base: &Path, suffix: Option<&str>) {
    if let Some(suffix) = suffix {
        push_unique(dirs, base.join(suffix));
    }
    push_unique(dirs, base.to_path_buf());
}

fn push_unique(dirs: &mut Vec<PathBuf>, dir: PathBuf) {
    if !dirs.contains(&dir) {
        dirs.push(dir);
    }
}

/// Installation prefixes searched when no root is known.
///
/// Configured prefixes come first, then the conventional system prefixes,
/// then versioned MOSEK installs (`/opt/mosek/<version>`,
/// `~/mosek/<version>`), newest version first.
pub fn default_system_prefixes(
    config: &SearchConfig,
    env: &EnvVars,
    platform: &HostPlatform,
) -> Vec<PathBuf> {
    let mut prefixes = config.system_prefixes.clone();

    match platform.family {
        OsFamily::Windows => {
            for var in ["ProgramFiles", "ProgramW6432"] {
                if let Some(program_files) = env.get_path(var) {
                    prefixes.extend(expand_glob_dirs(&program_files.join("Mosek"), "*"));
                }
            }
        }
        OsFamily::MacOs | OsFamily::Linux => {
            prefixes.push(PathBuf::from("/usr/local"));
            prefixes.push(PathBuf::from("/usr"));
            prefixes.push(PathBuf::from("/opt/local"));
            prefixes.extend(expand_glob_dirs(Path::new("/opt/mosek"), "*"));
        }
    }

    if !config.skip_home_installs {
        if let Some(home) = env.home_dir() {
            prefixes.extend(expand_glob_dirs(&home.join("mosek"), "*"));
        }
    }

    let mut unique = Vec::new();
    for prefix in prefixes {
        push_unique(&mut unique, prefix);
    }
    unique
}
