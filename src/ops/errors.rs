//! Discovery error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::release::TagError;
use crate::util::diagnostic::Diagnostic;

/// Error during a MOSEK discovery pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum FindError {
    /// A probe exists but could not tell us something that has no safe default.
    #[error("could not determine the {what}")]
    #[diagnostic(
        code(mosekfind::inputs::probe_returned_nothing),
        help("set {variable} explicitly")
    )]
    ProbeReturnedNothing {
        what: &'static str,
        variable: &'static str,
    },

    #[error("invalid value `{value}` for {variable}")]
    #[diagnostic(
        code(mosekfind::inputs::invalid_toggle),
        help("use one of ON/OFF, TRUE/FALSE, YES/NO, 1/0")
    )]
    InvalidToggle { variable: &'static str, value: String },

    #[error(transparent)]
    #[diagnostic(code(mosekfind::inputs::invalid_tag))]
    InvalidTag(#[from] TagError),

    #[error("could not find MOSEK (missing: {})", missing.join(", "))]
    #[diagnostic(code(mosekfind::validate::not_found))]
    NotFound { missing: Vec<&'static str> },
}

impl FindError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FindError::ProbeReturnedNothing { what, variable } => {
                Diagnostic::error(format!("could not determine the {}", what))
                    .with_context("the probe for this value ran but returned nothing")
                    .with_suggestion(format!("Set {} explicitly", variable))
            }

            FindError::InvalidToggle { variable, value } => {
                Diagnostic::error(format!("invalid value `{}` for {}", value, variable))
                    .with_suggestion("Use one of ON/OFF, TRUE/FALSE, YES/NO, 1/0")
            }

            FindError::InvalidTag(err) => Diagnostic::error(err.to_string()),

            FindError::NotFound { missing } => {
                let mut diag = Diagnostic::error("could not find MOSEK");

                for name in missing {
                    diag = diag.with_context(format!("{} was not found", name));
                }

                diag.with_suggestion("Set MOSEK_ROOT_DIR to the MOSEK installation directory")
                    .with_suggestion(
                        "Disable bindings you don't need (MOSEK_MATLAB_BINDINGS, MOSEK_JAVA_BINDINGS, MOSEK_PYTHON_BINDINGS)",
                    )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_diagnostic() {
        let err = FindError::NotFound {
            missing: vec!["MOSEK_LIBRARY", "MOSEK_JAVA_ARCHIVE"],
        };

        assert_eq!(
            err.to_string(),
            "could not find MOSEK (missing: MOSEK_LIBRARY, MOSEK_JAVA_ARCHIVE)"
        );

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: could not find MOSEK"));
        assert!(output.contains("MOSEK_JAVA_ARCHIVE was not found"));
        assert!(output.contains("1. Set MOSEK_ROOT_DIR"));
    }

    #[test]
    fn test_probe_diagnostic_names_variable() {
        let err = FindError::ProbeReturnedNothing {
            what: "installed MATLAB release",
            variable: "MATLAB_RELEASE",
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("installed MATLAB release"));
        assert!(output.contains("Set MATLAB_RELEASE explicitly"));
    }
}
