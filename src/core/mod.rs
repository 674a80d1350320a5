//! Core data structures for mosekfind.
//!
//! This module contains the foundational types a discovery pass works on:
//! - The target platform (OS family and pointer width)
//! - Typed MATLAB release and Python version tags
//! - Artifact kinds and their file names
//! - The configuration namespace (`Settings`)

pub mod artifact;
pub mod platform;
pub mod release;
pub mod settings;

pub use artifact::ArtifactKind;
pub use platform::{HostPlatform, OsFamily};
pub use release::{MatlabRelease, PythonVersion, ReleaseHalf};
pub use settings::{Settings, Toggles};
