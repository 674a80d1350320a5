//! mosekfind - locate an installed MOSEK optimization package
//!
//! This crate finds the MOSEK C header and link library, and optionally the
//! MATLAB, Java and Python bindings, inside an existing installation. It is
//! meant to be called from a build script or any other build orchestrator:
//!
//! ```rust,no_run
//! use mosekfind::{find_mosek, EnvVars, FindOptions, HostPlatform, NoProbes, Settings};
//!
//! let env = EnvVars::capture();
//! let platform = HostPlatform::from_cargo_env(&env);
//! let mut settings = Settings::default();
//!
//! let outcome = find_mosek(&mut settings, &env, &platform, &NoProbes, &FindOptions::default())?;
//! for directive in outcome.cargo_directives() {
//!     println!("{}", directive);
//! }
//! # Ok::<(), mosekfind::FindError>(())
//! ```

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for mosekfind unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides scripted probes and fake installation trees.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{ArtifactKind, HostPlatform, MatlabRelease, OsFamily, Settings};
pub use crate::ops::{find_mosek, FindError, FindOptions, FindOutcome, FindPolicy};
pub use crate::util::{CommandProbes, EnvVars, NoProbes, Probes};
