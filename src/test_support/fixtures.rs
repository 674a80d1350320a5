//! Fake MOSEK installation trees.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::core::artifact::{HEADER_FILE, JAR_FILE, MEX_STEM, PYTHON_MARKER};
use crate::core::platform::HostPlatform;
use crate::ops::library_names;

/// A MOSEK installation laid out in a temporary directory.
///
/// Files are created empty; only their presence matters to the search.
#[derive(Debug)]
pub struct MosekTree {
    dir: TempDir,
}

impl MosekTree {
    pub fn new() -> Self {
        MosekTree {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty file at `relative`, with its parent directories.
    pub fn touch(&self, relative: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, b"").expect("failed to write fixture file");
    }

    pub fn with_file(self, relative: &str) -> Self {
        self.touch(relative);
        self
    }

    /// Header and the primary link library for `platform`.
    pub fn with_core(self, platform: &HostPlatform) -> Self {
        let tools = platform.tools_suffix();
        let name = &library_names::candidates(platform, false)[0];
        let file = &library_names::file_names(platform, name)[0];

        self.with_file(&format!("{}/h/{}", tools, HEADER_FILE))
            .with_file(&format!("{}/bin/{}", tools, file))
    }

    /// MEX binary under `toolbox/<dir>/`.
    pub fn with_toolbox(self, dir: &str, ext: &str) -> Self {
        self.with_file(&format!("toolbox/{}/{}.{}", dir, MEX_STEM, ext))
    }

    pub fn with_java(self, platform: &HostPlatform) -> Self {
        self.with_file(&format!("{}/bin/{}", platform.tools_suffix(), JAR_FILE))
    }

    /// Python package for one major version.
    pub fn with_python(self, platform: &HostPlatform, major: &str) -> Self {
        self.with_file(&format!(
            "{}/python/{}/{}",
            platform.tools_suffix(),
            major,
            PYTHON_MARKER
        ))
    }
}

impl Default for MosekTree {
    fn default() -> Self {
        MosekTree::new()
    }
}
