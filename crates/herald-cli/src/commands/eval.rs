//! Implementation of the `herald eval` command.

use std::path::PathBuf;

use herald::parser::parse_pattern;
use herald::{Bundle, PatternFormatter};
use miette::{miette, IntoDiagnostic};
use serde::Serialize;

use super::{load_bundle, parse_key_val, to_variables};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Pattern string to format
    #[arg(long, required = true)]
    pub pattern: String,

    /// Catalog file for message references (.ftl)
    #[arg(long, env = "HERALD_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Language code for plural rules
    #[arg(long, env = "HERALD_LANG", default_value = "en")]
    pub lang: String,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    errors: Vec<String>,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let bundle = match &args.catalog {
        Some(path) => load_bundle(path, &args.lang)?,
        None => Bundle::with_language(&args.lang),
    };

    let pattern = parse_pattern(&args.pattern).map_err(|e| miette!("Invalid pattern: {}", e))?;
    let variables = to_variables(args.params);
    let (text, errors) = bundle.format_pattern(&pattern, &variables);
    let errors: Vec<String> = errors.iter().map(ToString::to_string).collect();
    let ok = errors.is_empty();

    if args.json {
        let output = EvalResult {
            result: ok.then_some(text),
            errors,
        };
        let json_output = serde_json::to_string_pretty(&output).into_diagnostic()?;
        println!("{}", json_output);
    } else if ok {
        println!("{}", text);
    } else {
        for error in &errors {
            eprintln!("Evaluation error: {}", error);
        }
    }

    Ok(if ok { exitcode::OK } else { exitcode::DATAERR })
}
