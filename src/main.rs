//! CLI entrypoint.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tagdoc::{Doclet, DocletStore, Tagdoc, longnames_to_tree};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Args, Clone)]
struct CommonArgs {
	/// Write output to a file instead of stdout
	#[arg(short = 'o', long)]
	output: Option<PathBuf>,

	/// Pretty-print the JSON output
	#[arg(short = 'p', long, default_value_t = false)]
	pretty: bool,

	/// Skip the augmentation passes
	#[arg(long, default_value_t = false)]
	no_augment: bool,

	/// Skip borrow resolution
	#[arg(long, default_value_t = false)]
	no_borrows: bool,
}

#[derive(Args, Clone)]
struct InputArgs {
	/// Path to a JSON array of raw doclets, or "-" for stdin
	#[arg(default_value = "-")]
	input: String,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Resolve identities and augment the doclet collection (default).
	Augment(InputArgs),
	/// Canonicalize doclet identities without augmenting.
	Resolve(InputArgs),
	/// Process the doclets and emit the longname navigation tree.
	Tree(InputArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the tagdoc CLI.
struct Cli {
	#[command(flatten)]
	common: CommonArgs,

	#[arg()]
	legacy_input: Option<String>,

	#[command(subcommand)]
	command: Option<Command>,
}

fn main() {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(io::stderr))
		.with(EnvFilter::from_default_env())
		.init();

	let cli = Cli::parse();

	if let Err(e) = run(cli) {
		eprintln!("{} {e}", "error:".red().bold());
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	let common = cli.common;

	match cli.command {
		Some(Command::Augment(args)) => run_augment(&common, &args.input),
		Some(Command::Resolve(args)) => run_resolve(&common, &args.input),
		Some(Command::Tree(args)) => run_tree(&common, &args.input),
		None => {
			let input = cli.legacy_input.unwrap_or_else(|| "-".to_string());
			run_augment(&common, &input)
		}
	}
}

fn run_augment(common: &CommonArgs, input: &str) -> Result<(), Box<dyn Error>> {
	let store = build_store(common, input, !common.no_augment)?;
	emit(common, &store.doclets())
}

fn run_resolve(common: &CommonArgs, input: &str) -> Result<(), Box<dyn Error>> {
	let doclets = read_doclets(input)?;
	let pipeline = Tagdoc::new()
		.with_augmentation(false)
		.with_borrow_resolution(false);
	let store = pipeline.process(doclets)?;
	emit(common, &store.doclets())
}

fn run_tree(common: &CommonArgs, input: &str) -> Result<(), Box<dyn Error>> {
	let store = build_store(common, input, !common.no_augment)?;
	let longnames: Vec<&str> = store
		.doclets()
		.iter()
		.filter(|doclet| !doclet.ignore && !doclet.longname.is_empty())
		.map(|doclet| doclet.longname.as_str())
		.collect();
	emit(common, &longnames_to_tree(longnames))
}

fn build_store(common: &CommonArgs, input: &str, augment: bool) -> Result<DocletStore, Box<dyn Error>> {
	let doclets = read_doclets(input)?;
	let pipeline = Tagdoc::new()
		.with_augmentation(augment)
		.with_borrow_resolution(!common.no_borrows);
	Ok(pipeline.process(doclets)?)
}

fn read_doclets(input: &str) -> Result<Vec<Doclet>, Box<dyn Error>> {
	let text = if input == "-" {
		let mut buffer = String::new();
		io::stdin().read_to_string(&mut buffer)?;
		buffer
	} else {
		fs::read_to_string(input)
			.map_err(|e| format!("failed to read doclet file '{input}': {e}"))?
	};
	let doclets = serde_json::from_str(&text)
		.map_err(|e| format!("failed to parse doclet JSON: {e}"))?;
	Ok(doclets)
}

fn emit<T: Serialize>(common: &CommonArgs, value: &T) -> Result<(), Box<dyn Error>> {
	let rendered = if common.pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};

	match &common.output {
		Some(path) => fs::write(path, rendered + "\n")?,
		None => println!("{rendered}"),
	}
	Ok(())
}
