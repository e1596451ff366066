//! Implementation of the `herald check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use herald::parser::parse_resource;
use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::HeraldDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Catalog files to check (.ftl)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    messages: usize,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());
    let mut failed = false;

    for path in &args.files {
        let file = path.display().to_string();
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                failed = true;
                if !args.json {
                    eprintln!("{}: cannot read file: {}", file, e);
                }
                results.push(CheckJson {
                    file,
                    ok: false,
                    error: Some(e.to_string()),
                    messages: 0,
                });
                continue;
            }
        };

        match parse_resource(&content) {
            Ok(templates) => {
                if !args.json {
                    println!(
                        "{} {} ({} messages)",
                        "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                        file,
                        templates.len()
                    );
                }
                results.push(CheckJson {
                    file,
                    ok: true,
                    error: None,
                    messages: templates.len(),
                });
            }
            Err(e) => {
                failed = true;
                if !args.json {
                    let diagnostic = HeraldDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                results.push(CheckJson {
                    file,
                    ok: false,
                    error: Some(e.to_string()),
                    messages: 0,
                });
            }
        }
    }

    if args.json {
        let json_output = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{}", json_output);
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
