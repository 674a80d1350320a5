//! Host runtime probes.
//!
//! Some inputs can only be learned by asking an installed runtime: which
//! MATLAB release is present, what extension its MEX files use, which Python
//! version is installed. Resolution always goes through the [`Probes`] trait;
//! a probe that cannot run reports [`ProbeOutcome::Unavailable`] and the
//! caller falls back to a default.

use std::path::PathBuf;

use crate::core::release::{MatlabRelease, PythonVersion};
use crate::core::settings::Settings;
use crate::util::config::ProbeConfig;
use crate::util::process::{find_executable, ProcessBuilder};

/// Result of asking a probe for a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe does not exist on this host
    Unavailable,
    /// The probe ran but produced no usable value
    Empty,
    /// The probe produced a value
    Found(String),
}

/// External probes consulted during input resolution.
///
/// Every method defaults to "unavailable".
pub trait Probes {
    /// Installed MATLAB release (`R2015a`).
    fn matlab_release(&self) -> ProbeOutcome {
        ProbeOutcome::Unavailable
    }

    /// Extension of MEX binaries for the installed MATLAB (`mexa64`).
    fn mex_extension(&self) -> ProbeOutcome {
        ProbeOutcome::Unavailable
    }

    /// Installed Python version (`3.11`).
    fn python_version(&self) -> ProbeOutcome {
        ProbeOutcome::Unavailable
    }

    /// Dump the whole namespace for debugging.
    fn dump_configuration(&self, _settings: &Settings) {}
}

/// Probes that are never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbes;

impl Probes for NoProbes {}

/// Probes that run host tools found on `PATH`.
#[derive(Debug, Clone)]
pub struct CommandProbes {
    matlab: PathBuf,
    mexext: PathBuf,
    python: PathBuf,
}

impl CommandProbes {
    /// Create probes using the default program names.
    pub fn new() -> Self {
        CommandProbes::from_config(&ProbeConfig::default())
    }

    /// Create probes honoring program overrides from the config file.
    pub fn from_config(config: &ProbeConfig) -> Self {
        CommandProbes {
            matlab: config.matlab.clone().unwrap_or_else(|| PathBuf::from("matlab")),
            mexext: config.mexext.clone().unwrap_or_else(|| PathBuf::from("mexext")),
            python: config.python.clone().unwrap_or_else(|| PathBuf::from("python3")),
        }
    }

    /// Run `program` with `args` if it can be found, returning its stdout.
    fn run(&self, program: &PathBuf, args: &[&str]) -> ProbeOutcome {
        let Some(path) = find_executable(program) else {
            tracing::debug!("probe program not found: {}", program.display());
            return ProbeOutcome::Unavailable;
        };

        match ProcessBuilder::new(&path).args(args).read_stdout() {
            Ok(stdout) if !stdout.is_empty() => ProbeOutcome::Found(stdout),
            Ok(_) => ProbeOutcome::Empty,
            Err(e) => {
                tracing::debug!("probe `{}` failed: {:#}", path.display(), e);
                ProbeOutcome::Empty
            }
        }
    }
}

impl Default for CommandProbes {
    fn default() -> Self {
        Self::new()
    }
}

impl Probes for CommandProbes {
    fn matlab_release(&self) -> ProbeOutcome {
        let outcome = self.run(
            &self.matlab,
            &[
                "-nodisplay",
                "-nosplash",
                "-batch",
                "disp(version('-release'))",
            ],
        );

        match outcome {
            ProbeOutcome::Found(stdout) => match MatlabRelease::find_in(&stdout) {
                Some(release) => ProbeOutcome::Found(release.to_string()),
                None => ProbeOutcome::Empty,
            },
            other => other,
        }
    }

    fn mex_extension(&self) -> ProbeOutcome {
        match self.run(&self.mexext, &[]) {
            ProbeOutcome::Found(stdout) => stdout
                .lines()
                .map(str::trim)
                .find(|line| line.starts_with("mex"))
                .map(|ext| ProbeOutcome::Found(ext.to_string()))
                .unwrap_or(ProbeOutcome::Empty),
            other => other,
        }
    }

    fn python_version(&self) -> ProbeOutcome {
        let outcome = self.run(
            &self.python,
            &["-c", "import sys; print('%d.%d' % sys.version_info[:2])"],
        );

        match outcome {
            ProbeOutcome::Found(stdout) => match stdout.parse::<PythonVersion>() {
                Ok(version) => ProbeOutcome::Found(version.to_string()),
                Err(_) => ProbeOutcome::Empty,
            },
            other => other,
        }
    }

    fn dump_configuration(&self, settings: &Settings) {
        for (name, value) in settings.entries() {
            tracing::debug!("{} = {}", name, value);
        }
    }
}
