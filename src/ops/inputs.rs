//! Input resolution.
//!
//! Reads: the environment, the probes, `FindOptions::matlab_detected`.
//! Writes: `root_dir`, `toggles`, `matlab_release`, `mex_extension`,
//! `python_version`, `python_major`.
//!
//! A value that is already set is never touched. An unset value is taken
//! from the environment, then from a probe, then from a built-in default.

use crate::core::release::{MatlabRelease, PythonVersion};
use crate::core::settings::Settings;
use crate::ops::errors::FindError;
use crate::util::env::{parse_bool, EnvVars};
use crate::util::probe::{ProbeOutcome, Probes};

/// Environment variable naming the MOSEK installation root.
pub const ROOT_DIR_VAR: &str = "MOSEK_ROOT_DIR";
pub const MATLAB_TOGGLE_VAR: &str = "MOSEK_MATLAB_BINDINGS";
pub const JAVA_TOGGLE_VAR: &str = "MOSEK_JAVA_BINDINGS";
pub const PYTHON_TOGGLE_VAR: &str = "MOSEK_PYTHON_BINDINGS";
pub const NO_OPENMP_VAR: &str = "MOSEK_NO_OPENMP";
pub const MATLAB_RELEASE_VAR: &str = "MATLAB_RELEASE";
pub const MEX_EXTENSION_VAR: &str = "MATLAB_MEX_EXT";
pub const PYTHON_VERSION_VAR: &str = "MOSEK_PYTHON_VERSION";

/// Release assumed when no MATLAB probe exists.
pub const DEFAULT_MATLAB_RELEASE: &str = "R2015a";

/// MEX extension assumed when no probe exists. Only correct on 64-bit Linux.
pub const DEFAULT_MEX_EXTENSION: &str = "mexa64";

/// Python version assumed when no Python probe exists.
pub const DEFAULT_PYTHON_VERSION: &str = "2.7";

/// Resolve every input option of a discovery pass.
pub fn resolve_inputs(
    settings: &mut Settings,
    env: &EnvVars,
    probes: &dyn Probes,
    matlab_detected: bool,
) -> Result<(), FindError> {
    if settings.root_dir.is_none() {
        if let Some(root) = env.get_path(ROOT_DIR_VAR) {
            tracing::debug!("{} from environment: {}", ROOT_DIR_VAR, root.display());
            settings.root_dir = Some(root);
        }
    }

    resolve_toggles(settings, env, matlab_detected)?;

    if settings.toggles.matlab_enabled() {
        resolve_value(
            &mut settings.matlab_release,
            Source {
                variable: MATLAB_RELEASE_VAR,
                what: "installed MATLAB release",
                default: DEFAULT_MATLAB_RELEASE,
                strict: true,
            },
            env,
            || probes.matlab_release(),
        )?;

        if let Some(release) = &settings.matlab_release {
            release.parse::<MatlabRelease>()?;
        }

        resolve_value(
            &mut settings.mex_extension,
            Source {
                variable: MEX_EXTENSION_VAR,
                what: "MEX file extension",
                default: DEFAULT_MEX_EXTENSION,
                strict: false,
            },
            env,
            || probes.mex_extension(),
        )?;
    }

    if settings.toggles.python_enabled() {
        resolve_value(
            &mut settings.python_version,
            Source {
                variable: PYTHON_VERSION_VAR,
                what: "installed Python version",
                default: DEFAULT_PYTHON_VERSION,
                strict: true,
            },
            env,
            || probes.python_version(),
        )?;

        if settings.python_major.is_none() {
            if let Some(version) = &settings.python_version {
                let version: PythonVersion = version.parse()?;
                settings.python_major = Some(version.major_tag());
            }
        }
    }

    Ok(())
}

/// Default each toggle that isn't set yet.
fn resolve_toggles(
    settings: &mut Settings,
    env: &EnvVars,
    matlab_detected: bool,
) -> Result<(), FindError> {
    let toggles = &mut settings.toggles;

    resolve_toggle(&mut toggles.matlab, MATLAB_TOGGLE_VAR, env, matlab_detected)?;
    resolve_toggle(&mut toggles.java, JAVA_TOGGLE_VAR, env, false)?;
    resolve_toggle(&mut toggles.python, PYTHON_TOGGLE_VAR, env, false)?;
    resolve_toggle(&mut toggles.no_openmp, NO_OPENMP_VAR, env, false)?;

    Ok(())
}

fn resolve_toggle(
    slot: &mut Option<bool>,
    variable: &'static str,
    env: &EnvVars,
    default: bool,
) -> Result<(), FindError> {
    if slot.is_some() {
        return Ok(());
    }

    let value = match env.get(variable) {
        Some(raw) => parse_bool(&raw).ok_or(FindError::InvalidToggle {
            variable,
            value: raw,
        })?,
        None => default,
    };

    *slot = Some(value);
    Ok(())
}

/// Where a probed value comes from when it isn't set.
struct Source {
    variable: &'static str,
    what: &'static str,
    default: &'static str,
    /// An available probe that returns nothing is fatal
    strict: bool,
}

fn resolve_value(
    slot: &mut Option<String>,
    source: Source,
    env: &EnvVars,
    probe: impl FnOnce() -> ProbeOutcome,
) -> Result<(), FindError> {
    if slot.is_some() {
        return Ok(());
    }

    if let Some(value) = env.get(source.variable) {
        tracing::debug!("{} from environment: {}", source.variable, value);
        *slot = Some(value);
        return Ok(());
    }

    let value = match probe() {
        ProbeOutcome::Found(value) => {
            tracing::debug!("{} from probe: {}", source.variable, value);
            value
        }
        ProbeOutcome::Empty if source.strict => {
            return Err(FindError::ProbeReturnedNothing {
                what: source.what,
                variable: source.variable,
            });
        }
        ProbeOutcome::Empty | ProbeOutcome::Unavailable => {
            tracing::debug!("{} defaulted to {}", source.variable, source.default);
            source.default.to_string()
        }
    };

    *slot = Some(value);
    Ok(())
}
