//! Coverage command implementation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::load_bundle;
use crate::output::table::{format_coverage_table, LanguageCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source language catalog (e.g., en.ftl).
    #[arg(long)]
    pub source: PathBuf,

    /// Language code of the source catalog.
    #[arg(long, env = "HERALD_LANG", default_value = "en")]
    pub source_lang: String,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<String>,

    /// Directory containing translation catalogs. Defaults to the source file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    warnings: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source = load_bundle(&args.source, &args.source_lang)?;
    let source_ids = source.message_ids();
    let source_count = source_ids.len();

    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut coverage_data = Vec::with_capacity(args.lang.len());

    for lang in &args.lang {
        let lang_file = base_dir.join(format!("{}.ftl", lang));

        let coverage = if lang_file.exists() {
            let bundle = load_bundle(&lang_file, lang)?;
            let translated: HashSet<&str> = bundle.message_ids().into_iter().collect();
            let missing = source_ids
                .iter()
                .filter(|id| !translated.contains(*id))
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            LanguageCoverage {
                language: lang.clone(),
                translated: source_count - missing.len(),
                missing,
                warnings: bundle
                    .validate_against(&source)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            }
        } else {
            // No catalog for this language: everything is missing
            LanguageCoverage {
                language: lang.clone(),
                translated: 0,
                missing: source_ids.iter().map(ToString::to_string).collect(),
                warnings: Vec::new(),
            }
        };
        coverage_data.push(coverage);
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                warnings: c.warnings.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for id in &lang_coverage.missing {
                    println!("  - {}", id);
                }
            }
            if !lang_coverage.warnings.is_empty() {
                println!("\nWarnings for {}:", lang_coverage.language);
                for warning in &lang_coverage.warnings {
                    println!("  - {}", warning);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
