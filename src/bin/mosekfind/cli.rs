//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use mosekfind::core::platform::{HostPlatform, OsFamily};
use mosekfind::util::EnvVars;

/// mosekfind - locate an installed MOSEK optimization package
#[derive(Parser)]
#[command(name = "mosekfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate MOSEK and print what was found
    Find(FindArgs),

    /// Show the platform layout MOSEK is searched under
    Platform(PlatformArgs),

    /// Inspect the persisted configuration cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target platform overrides.
#[derive(Args, Clone)]
pub struct TargetArgs {
    /// Target OS family (windows, macos, linux) [default: host]
    #[arg(long, value_name = "OS")]
    pub target_os: Option<OsFamily>,

    /// Target pointer width in bits [default: host]
    #[arg(long, value_name = "BITS", value_parser = ["32", "64"])]
    pub pointer_width: Option<String>,
}

impl TargetArgs {
    /// Platform to search for: flags, then Cargo build-script variables,
    /// then the host.
    pub fn resolve(&self, env: &EnvVars) -> HostPlatform {
        let detected = HostPlatform::from_cargo_env(env);

        HostPlatform::new(
            self.target_os.unwrap_or(detected.family),
            self.pointer_width
                .as_deref()
                .and_then(|w| w.parse().ok())
                .unwrap_or(detected.pointer_width),
        )
    }
}

#[derive(Args)]
pub struct FindArgs {
    /// MOSEK installation root
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Require the MATLAB MEX binding
    #[arg(long, overrides_with = "no_matlab")]
    pub matlab: bool,

    /// Don't look for the MATLAB MEX binding
    #[arg(long)]
    pub no_matlab: bool,

    /// Require the Java binding
    #[arg(long, overrides_with = "no_java")]
    pub java: bool,

    /// Don't look for the Java binding
    #[arg(long)]
    pub no_java: bool,

    /// Require the Python binding
    #[arg(long, overrides_with = "no_python")]
    pub python: bool,

    /// Don't look for the Python binding
    #[arg(long)]
    pub no_python: bool,

    /// Link the library variant built without OpenMP
    #[arg(long, overrides_with = "openmp")]
    pub no_openmp: bool,

    /// Link the default OpenMP library variant
    #[arg(long)]
    pub openmp: bool,

    /// Platform directory below the root (e.g. tools/platform/linux64x86)
    #[arg(long, value_name = "PATH")]
    pub tools_suffix: Option<String>,

    /// MEX directory below the root (e.g. toolbox/r2015a)
    #[arg(long, value_name = "PATH")]
    pub toolbox_suffix: Option<String>,

    /// MATLAB release (e.g. R2015a)
    #[arg(long, value_name = "RELEASE")]
    pub matlab_release: Option<String>,

    /// MEX file extension (e.g. mexa64)
    #[arg(long, value_name = "EXT")]
    pub mex_ext: Option<String>,

    /// Python version (e.g. 3.11)
    #[arg(long, value_name = "VERSION")]
    pub python_version: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Don't report success or failure
    #[arg(short, long)]
    pub quiet: bool,

    /// Fail when a required artifact is missing
    #[arg(long)]
    pub required: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human", env = "MOSEKFIND_FORMAT")]
    pub format: OutputFormat,

    /// Ignore values cached by earlier runs
    #[arg(long)]
    pub fresh: bool,

    /// Don't run matlab, mexext or python to detect versions
    #[arg(long)]
    pub no_probes: bool,

    /// Print every configuration value after the search
    #[arg(long)]
    pub dump: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Readable summary
    Human,
    /// KEY=VALUE lines
    Env,
    /// JSON object
    Json,
    /// Cargo build-script directives
    Cargo,
}

#[derive(Args)]
pub struct PlatformArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show library names of the variant built without OpenMP
    #[arg(long)]
    pub no_openmp: bool,
}

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached configuration values
    List(CacheListArgs),

    /// Show the cache file location
    Path,

    /// Remove the cache file
    Clear,
}

#[derive(Args)]
pub struct CacheListArgs {
    /// Include advanced values (discovered paths)
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
