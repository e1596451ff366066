//! CLI command implementations.

mod build;
mod check;
mod coverage;
mod eval;

use std::fs::read_to_string;
use std::path::Path;

use herald::{Bundle, LoadError, Value, Variables};
use miette::{miette, Result};
use tracing::debug;

use crate::output::HeraldDiagnostic;

pub use build::{run_build, BuildArgs};
pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use eval::{run_eval, EvalArgs};

/// Parse a key=value parameter string.
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Convert `-p name=value` pairs into formatter variables.
pub(crate) fn to_variables(params: Vec<(String, String)>) -> Variables {
    params
        .into_iter()
        .map(|(k, v)| (k, Value::parse_lossy(&v)))
        .collect()
}

/// Load a catalog file into a bundle, turning syntax errors into
/// diagnostics that point at the source.
pub(crate) fn load_bundle(path: &Path, language: &str) -> Result<Bundle> {
    let mut bundle = Bundle::with_language(language);
    match bundle.load_resource(path) {
        Ok(messages) => {
            debug!(path = %path.display(), language, messages, "loaded catalog file");
            Ok(bundle)
        }
        Err(LoadError::Parse {
            line,
            column,
            message,
            ..
        }) => {
            let content = read_to_string(path)
                .map_err(|e| miette!("Cannot read catalog {}: {}", path.display(), e))?;
            Err(HeraldDiagnostic::from_position(path, &content, line, column, message).into())
        }
        Err(e) => Err(miette!("{}", e)),
    }
}
