//! Implementation of the `herald build` command.

use std::collections::HashSet;
use std::path::PathBuf;

use herald::{BlockFields, BuildOptions, Resolution};
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};

use super::{load_bundle, parse_key_val, to_variables};
use crate::output::table::format_message_table;

/// Arguments for the build command.
#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Catalog file (.ftl)
    #[arg(long, env = "HERALD_CATALOG")]
    pub catalog: PathBuf,

    /// Language code for plural rules
    #[arg(long, env = "HERALD_LANG", default_value = "en")]
    pub lang: String,

    /// Message id to build
    pub message_id: String,

    /// Variables in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Field value overrides in field=value format (repeatable)
    #[arg(long = "field", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,

    /// Fields that may be dropped when unresolved (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub droppable: Vec<String>,

    /// Fields to leave out (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Field display order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// Fields rendered as blocks (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "block_all")]
    pub block: Vec<String>,

    /// Render every field as a block
    #[arg(long)]
    pub block_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    fn options(&self) -> BuildOptions {
        let block_fields = if self.block_all {
            BlockFields::All(true)
        } else if self.block.is_empty() {
            BlockFields::All(false)
        } else {
            BlockFields::Named(self.block.iter().cloned().collect())
        };
        BuildOptions::builder()
            .variables(to_variables(self.params.clone()))
            .field_values(self.fields.iter().cloned().collect())
            .droppable_fields(self.droppable.iter().cloned().collect::<HashSet<_>>())
            .ignored_fields(self.ignore.iter().cloned().collect::<HashSet<_>>())
            .field_ordering(self.order.clone())
            .block_fields(block_fields)
            .build()
    }
}

/// Run the build command.
pub fn run_build(args: BuildArgs) -> miette::Result<i32> {
    let bundle = load_bundle(&args.catalog, &args.lang)?;
    let builder = bundle.message_builder();
    let options = args.options();

    let (message, fell_back) = match builder.resolve(&args.message_id, &options) {
        Resolution::Success(message) => (message, false),
        Resolution::Fallback(err) => {
            eprintln!(
                "{} {} (stage: {})",
                "fallback:".if_supports_color(Stream::Stderr, |t| t.red()),
                err,
                err.stage()
            );
            (builder.fallback(), true)
        }
    };

    if args.json {
        let json_output = serde_json::to_string_pretty(&message).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        println!("{}", format_message_table(&message));
    }

    if fell_back {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
