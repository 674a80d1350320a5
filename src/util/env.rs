//! Environment snapshot.
//!
//! Every phase reads the environment through an `EnvVars` value instead of
//! `std::env`, so a configuration pass sees one consistent view and tests
//! can run hermetically.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

/// Immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, OsString>,
}

impl EnvVars {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        EnvVars {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| k.into_string().ok().map(|k| (k, v)))
                .collect(),
        }
    }

    /// An environment with no variables set.
    pub fn empty() -> Self {
        EnvVars::default()
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        EnvVars {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a variable on this snapshot.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Get a variable as UTF-8, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .and_then(|v| v.to_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    /// Get a variable as a path, treating empty values as unset.
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.vars
            .get(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Split a path-list variable (`PATH`-style) into its entries.
    pub fn split_paths(&self, key: &str) -> Vec<PathBuf> {
        match self.vars.get(key) {
            Some(value) => std::env::split_paths(value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Home directory as advertised by the environment.
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.get_path("HOME")
            .or_else(|| self.get_path("USERPROFILE"))
    }
}

/// Parse a boolean the way build configuration tools spell them.
///
/// Accepts `1/0`, `ON/OFF`, `TRUE/FALSE`, `YES/NO`, and `Y/N`, ignoring case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_uppercase().as_str() {
        "1" | "ON" | "TRUE" | "YES" | "Y" => Some(true),
        "0" | "OFF" | "FALSE" | "NO" | "N" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ignores_empty() {
        let env = EnvVars::from_pairs([("A", ""), ("B", " value ")]);
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B"), Some("value".to_string()));
        assert_eq!(env.get("C"), None);
    }

    #[test]
    fn test_split_paths() {
        let joined = std::env::join_paths(["/one", "/two"]).unwrap();
        let env = EnvVars::from_pairs([("CPATH", joined)]);

        assert_eq!(
            env.split_paths("CPATH"),
            vec![PathBuf::from("/one"), PathBuf::from("/two")]
        );
        assert!(env.split_paths("MISSING").is_empty());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
