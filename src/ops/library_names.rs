//! Link-library name candidates.
//!
//! MOSEK names its C library after the threading variant and, on POSIX
//! hosts, the pointer width (`libmosek64.so`, `libmoseknoomp64.so`). Windows
//! builds embed the MOSEK version instead (`mosek_7_1.lib`), so every known
//! version tag contributes one more candidate there.

use crate::core::platform::{HostPlatform, OsFamily};

/// Canonical MOSEK library name.
pub const BASE_NAME: &str = "mosek";

/// Suffix of the variant built without OpenMP.
pub const NO_OPENMP_SUFFIX: &str = "noomp";

/// Version tags embedded in Windows library names, newest first.
pub const WINDOWS_VERSION_TAGS: &[&str] = &["7_1"];

/// Candidate library names, in the order they should be tried.
pub fn candidates(platform: &HostPlatform, no_openmp: bool) -> Vec<String> {
    let mut name = BASE_NAME.to_string();

    if no_openmp {
        name.push_str(NO_OPENMP_SUFFIX);
    }

    if platform.family.is_posix() && !platform.is_32_bit() {
        name.push_str("64");
    }

    let mut names = vec![name];

    if platform.family == OsFamily::Windows {
        let versioned: Vec<String> = WINDOWS_VERSION_TAGS
            .iter()
            .map(|tag| format!("{}_{}", names[0], tag))
            .collect();
        names.extend(versioned);
    }

    names
}

/// File names a library called `name` may have on `platform`.
pub fn file_names(platform: &HostPlatform, name: &str) -> Vec<String> {
    match platform.family {
        OsFamily::Windows => vec![format!("{}.lib", name), format!("{}.dll", name)],
        OsFamily::MacOs => vec![
            format!("lib{}.dylib", name),
            format!("lib{}.so", name),
            format!("lib{}.a", name),
        ],
        OsFamily::Linux => vec![format!("lib{}.so", name), format!("lib{}.a", name)],
    }
}

/// Recover the link name from a library file name.
///
/// `libmosek64.so` gives `mosek64`, `mosek_7_1.lib` gives `mosek_7_1`.
pub fn link_name(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_suffix(".so")
        .or_else(|| file_name.strip_suffix(".dylib"))
        .or_else(|| file_name.strip_suffix(".a"))
        .or_else(|| file_name.strip_suffix(".lib"))
        .or_else(|| file_name.strip_suffix(".dll"))?;

    let name = stem.strip_prefix("lib").unwrap_or(stem);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
