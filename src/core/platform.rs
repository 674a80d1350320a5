//! Host platform description.
//!
//! MOSEK lays its binaries out under `tools/platform/<os><bits>x86`, so the
//! only facts we need about the build target are its OS family and its
//! pointer width.

use std::fmt;
use std::str::FromStr;

use crate::util::env::EnvVars;

/// Operating system family of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
}

impl OsFamily {
    /// Token MOSEK uses for this family in its platform directory names.
    pub fn mosek_token(&self) -> &'static str {
        match self {
            OsFamily::Windows => "win",
            OsFamily::MacOs => "osx",
            OsFamily::Linux => "linux",
        }
    }

    /// Whether the family follows POSIX library naming (`lib<name>.so`).
    pub fn is_posix(&self) -> bool {
        !matches!(self, OsFamily::Windows)
    }

    /// Map a Rust `target_os` value onto a family.
    ///
    /// Unknown Unix flavours are treated as Linux, which matches the layout
    /// MOSEK uses for every non-Windows, non-Apple platform.
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            "macos" | "ios" | "darwin" => OsFamily::MacOs,
            _ => OsFamily::Linux,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::MacOs => write!(f, "macos"),
            OsFamily::Linux => write!(f, "linux"),
        }
    }
}

impl FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(OsFamily::Windows),
            "macos" | "osx" | "darwin" => Ok(OsFamily::MacOs),
            "linux" => Ok(OsFamily::Linux),
            _ => Err(format!(
                "invalid OS family '{}'; expected 'windows', 'macos', or 'linux'",
                s
            )),
        }
    }
}

/// OS family and pointer width of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub family: OsFamily,
    /// Pointer width in bits (32 or 64)
    pub pointer_width: u32,
}

impl HostPlatform {
    pub fn new(family: OsFamily, pointer_width: u32) -> Self {
        HostPlatform {
            family,
            pointer_width,
        }
    }

    /// Describe the platform this binary was compiled for.
    pub fn host() -> Self {
        let pointer_width = if cfg!(target_pointer_width = "32") {
            32
        } else {
            64
        };

        HostPlatform::new(
            OsFamily::from_target_os(std::env::consts::OS),
            pointer_width,
        )
    }

    /// Describe the target of a Cargo build script.
    ///
    /// Cargo exports `CARGO_CFG_TARGET_OS` and `CARGO_CFG_TARGET_POINTER_WIDTH`
    /// to build scripts; when either is missing the host platform is used.
    pub fn from_cargo_env(env: &EnvVars) -> Self {
        let host = HostPlatform::host();

        let family = env
            .get("CARGO_CFG_TARGET_OS")
            .map(|os| OsFamily::from_target_os(&os))
            .unwrap_or(host.family);

        let pointer_width = env
            .get("CARGO_CFG_TARGET_POINTER_WIDTH")
            .and_then(|w| w.trim().parse().ok())
            .unwrap_or(host.pointer_width);

        HostPlatform::new(family, pointer_width)
    }

    pub fn is_32_bit(&self) -> bool {
        self.pointer_width == 32
    }

    /// `32` or `64`, as used in MOSEK directory names.
    pub fn bits_token(&self) -> &'static str {
        if self.is_32_bit() {
            "32"
        } else {
            "64"
        }
    }

    /// Relative path of the platform directory inside a MOSEK tree.
    pub fn tools_suffix(&self) -> String {
        format!(
            "tools/platform/{}{}x86",
            self.family.mosek_token(),
            self.bits_token()
        )
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-bit)", self.family, self.pointer_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_suffix() {
        let linux = HostPlatform::new(OsFamily::Linux, 64);
        assert_eq!(linux.tools_suffix(), "tools/platform/linux64x86");

        let win32 = HostPlatform::new(OsFamily::Windows, 32);
        assert_eq!(win32.tools_suffix(), "tools/platform/win32x86");

        let mac = HostPlatform::new(OsFamily::MacOs, 64);
        assert_eq!(mac.tools_suffix(), "tools/platform/osx64x86");
    }

    #[test]
    fn test_from_cargo_env() {
        let env = EnvVars::from_pairs([
            ("CARGO_CFG_TARGET_OS", "windows"),
            ("CARGO_CFG_TARGET_POINTER_WIDTH", "32"),
        ]);

        let platform = HostPlatform::from_cargo_env(&env);
        assert_eq!(platform, HostPlatform::new(OsFamily::Windows, 32));
    }

    #[test]
    fn test_from_cargo_env_falls_back_to_host() {
        let platform = HostPlatform::from_cargo_env(&EnvVars::empty());
        assert_eq!(platform, HostPlatform::host());
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("osx".parse::<OsFamily>().unwrap(), OsFamily::MacOs);
        assert_eq!("Windows".parse::<OsFamily>().unwrap(), OsFamily::Windows);
        assert!("plan9".parse::<OsFamily>().is_err());
        assert!(OsFamily::Linux.is_posix());
        assert!(!OsFamily::Windows.is_posix());
    }
}
