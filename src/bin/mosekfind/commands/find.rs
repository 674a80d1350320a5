//! `mosekfind find` command

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::{FindArgs, OutputFormat};
use mosekfind::core::Settings;
use mosekfind::ops::{find_mosek, FindError, FindOptions, FindOutcome, FindPolicy};
use mosekfind::util::diagnostic::emit;
use mosekfind::util::process::find_executable;
use mosekfind::util::{CommandProbes, EnvVars, GlobalContext, NoProbes, ProbeOutcome, Probes};

pub fn execute(args: FindArgs, color: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let config = ctx.load_config();
    let cache_path = ctx.cache_path();

    let mut settings = if args.fresh {
        Settings::default()
    } else {
        Settings::load_or_default(&cache_path)?
    };
    apply_overrides(&mut settings, &args);

    let env = EnvVars::capture();
    let platform = args.target.resolve(&env);

    let command_probes;
    let probes: &dyn Probes = if args.no_probes {
        &NoProbes
    } else {
        command_probes = CommandProbes::from_config(&config.probes);
        &command_probes
    };
    let dumping = DumpingProbes { inner: probes };
    let probes: &dyn Probes = if args.dump { &dumping } else { probes };

    // MATLAB bindings default on when a MATLAB install is reachable
    let matlab_program = config
        .probes
        .matlab
        .clone()
        .unwrap_or_else(|| PathBuf::from("matlab"));
    let matlab_detected = !args.no_probes && find_executable(&matlab_program).is_some();

    let options = FindOptions::default()
        .with_policy(FindPolicy {
            quiet: args.quiet,
            required: args.required,
        })
        .with_matlab_detected(matlab_detected)
        .with_search(config.search);

    let result = find_mosek(&mut settings, &env, &platform, probes, &options);

    if matches!(result, Ok(_) | Err(FindError::NotFound { .. })) {
        settings
            .save(&cache_path)
            .with_context(|| "failed to persist configuration cache")?;
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            let mut diagnostic = e.to_diagnostic();
            if let Some(root) = &settings.root_dir {
                diagnostic = diagnostic.with_location(root);
            }
            emit(&diagnostic, color);
            std::process::exit(1);
        }
    };

    print!("{}", format_outcome(&outcome, args.format)?);

    Ok(())
}

/// Write command-line values into the namespace as explicit settings.
fn apply_overrides(settings: &mut Settings, args: &FindArgs) {
    if let Some(root) = &args.root {
        settings.root_dir = Some(mosekfind::util::fs::normalize_path(root));
    }

    let toggles = [
        (args.matlab, args.no_matlab, &mut settings.toggles.matlab),
        (args.java, args.no_java, &mut settings.toggles.java),
        (args.python, args.no_python, &mut settings.toggles.python),
        (args.no_openmp, args.openmp, &mut settings.toggles.no_openmp),
    ];
    for (on, off, slot) in toggles {
        if on {
            *slot = Some(true);
        }
        if off {
            *slot = Some(false);
        }
    }

    let strings = [
        (&args.tools_suffix, &mut settings.tools_suffix),
        (&args.toolbox_suffix, &mut settings.toolbox_suffix),
        (&args.matlab_release, &mut settings.matlab_release),
        (&args.mex_ext, &mut settings.mex_extension),
        (&args.python_version, &mut settings.python_version),
    ];
    for (value, slot) in strings {
        if let Some(value) = value {
            *slot = Some(value.clone());
        }
    }

    // A new Python version invalidates the derived major version
    if args.python_version.is_some() {
        settings.python_major = None;
    }
}

fn format_outcome(outcome: &FindOutcome, format: OutputFormat) -> Result<String> {
    let mut output = String::new();

    match format {
        OutputFormat::Human => {
            if outcome.found {
                output.push_str("MOSEK found\n");
            } else {
                output.push_str(&format!(
                    "MOSEK not found (missing: {})\n",
                    outcome.missing.join(", ")
                ));
            }
            output.push('\n');

            let rows = [
                ("root", &outcome.root_dir),
                ("include", &outcome.include_dir),
                ("library", &outcome.library),
                ("mex", &outcome.mex_artifact),
                ("java", &outcome.java_archive),
                ("python", &outcome.python_module_path),
            ];
            for (label, value) in rows {
                if let Some(path) = value {
                    output.push_str(&format!("  {:<8} {}\n", format!("{}:", label), path.display()));
                }
            }
        }
        OutputFormat::Env => {
            for (name, value) in outcome.outputs() {
                output.push_str(&format!("{}={}\n", name, value));
            }
        }
        OutputFormat::Json => {
            output.push_str(
                &serde_json::to_string_pretty(outcome).context("failed to serialize outcome")?,
            );
            output.push('\n');
        }
        OutputFormat::Cargo => {
            for directive in outcome.cargo_directives() {
                output.push_str(&directive);
                output.push('\n');
            }
        }
    }

    Ok(output)
}

/// Probes that print the namespace once the search is done.
struct DumpingProbes<'a> {
    inner: &'a dyn Probes,
}

impl Probes for DumpingProbes<'_> {
    fn matlab_release(&self) -> ProbeOutcome {
        self.inner.matlab_release()
    }

    fn mex_extension(&self) -> ProbeOutcome {
        self.inner.mex_extension()
    }

    fn python_version(&self) -> ProbeOutcome {
        self.inner.python_version()
    }

    fn dump_configuration(&self, settings: &Settings) {
        self.inner.dump_configuration(settings);
        for (name, value) in settings.entries() {
            let marker = if settings.is_advanced(name) { " (advanced)" } else { "" };
            eprintln!("-- {} = {}{}", name, value, marker);
        }
    }
}
