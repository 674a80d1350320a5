//! Artifacts a MOSEK installation is searched for.

use std::fmt;

/// Kind of artifact probed for in a MOSEK installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Directory containing `mosek.h`
    Header,
    /// The link library
    Library,
    /// MATLAB MEX binary (`mosekopt.<mexext>`)
    MexFile,
    /// Java archive (`mosek.jar`)
    JavaArchive,
    /// Directory containing the `mosek` Python package
    PythonModule,
}

impl ArtifactKind {
    /// All kinds, in the order a configuration pass searches them.
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Header,
        ArtifactKind::Library,
        ArtifactKind::MexFile,
        ArtifactKind::JavaArchive,
        ArtifactKind::PythonModule,
    ];

    /// Name of the output variable holding this artifact's discovered path.
    pub fn variable(&self) -> &'static str {
        match self {
            ArtifactKind::Header => "MOSEK_INCLUDE_DIR",
            ArtifactKind::Library => "MOSEK_LIBRARY",
            ArtifactKind::MexFile => "MOSEK_MEX_ARTIFACT",
            ArtifactKind::JavaArchive => "MOSEK_JAVA_ARCHIVE",
            ArtifactKind::PythonModule => "MOSEK_PYTHON_MODULE_PATH",
        }
    }

    /// Environment variables that hint at search directories when no
    /// installation root is known.
    pub fn env_hints(&self) -> &'static [&'static str] {
        match self {
            ArtifactKind::Header => &["CPATH", "C_INCLUDE_PATH", "CPLUS_INCLUDE_PATH", "INCLUDE"],
            ArtifactKind::Library => &["LIBRARY_PATH", "LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH", "LIB"],
            ArtifactKind::MexFile => &["MATLABPATH"],
            ArtifactKind::JavaArchive => &["CLASSPATH"],
            ArtifactKind::PythonModule => &["PYTHONPATH"],
        }
    }

    /// Whether the search reports the directory holding the probed file
    /// rather than the file itself.
    pub fn reports_directory(&self) -> bool {
        matches!(self, ArtifactKind::Header | ArtifactKind::PythonModule)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Header => write!(f, "header"),
            ArtifactKind::Library => write!(f, "library"),
            ArtifactKind::MexFile => write!(f, "MEX file"),
            ArtifactKind::JavaArchive => write!(f, "Java archive"),
            ArtifactKind::PythonModule => write!(f, "Python module"),
        }
    }
}

/// File name of the MOSEK C header.
pub const HEADER_FILE: &str = "mosek.h";

/// Stem of the MATLAB MEX binary.
pub const MEX_STEM: &str = "mosekopt";

/// File name of the MOSEK Java archive.
pub const JAR_FILE: &str = "mosek.jar";

/// Marker file of the MOSEK Python package, relative to the module path.
pub const PYTHON_MARKER: &str = "mosek/__init__.py";
