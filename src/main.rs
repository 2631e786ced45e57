use clap::Parser;
use jsontree::{parse_reader, ParseOptions};
use std::{
  error::Error,
  fs::File,
  io::{self, Write},
  process::exit,
};
use tracing_subscriber::EnvFilter;

/// Parse JSON and print the tree, or the node at a path
#[derive(Debug, Parser, PartialEq)]
#[command(version)]
struct Args {
  /// Dot-separated path to print instead of the whole document
  #[arg(long)]
  path: Option<String>,

  /// Reject documents nested deeper than N
  #[arg(long, value_name = "N")]
  max_depth: Option<usize>,

  /// Reject documents with more than N values
  #[arg(long, value_name = "N")]
  max_nodes: Option<usize>,

  /// File to read, otherwise uses stdin
  file: Option<String>,
}

impl Args {
  fn options(&self) -> ParseOptions {
    let mut options = ParseOptions::default();
    if let Some(depth) = self.max_depth {
      options = options.max_depth(depth);
    }
    if let Some(nodes) = self.max_nodes {
      options = options.max_nodes(nodes);
    }
    options
  }
}

fn main() {
  init_tracing();
  if let Err(e) = run(Args::parse(), &mut io::stdout().lock()) {
    eprintln!("{}", e);
    exit(1);
  }
}

fn init_tracing() {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(io::stderr)
    .try_init();
}

fn run(args: Args, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
  let options = args.options();
  let root = match args.file.as_ref() {
    Some(path) => parse_reader(File::open(path)?, &options)?,
    None => parse_reader(io::stdin().lock(), &options)?,
  };

  let node = match args.path.as_deref() {
    Some(path) => root
      .get_nested(path)
      .ok_or_else(|| format!("{}: not found", path))?,
    None => &root,
  };
  node.dump(out)?;
  root.release();
  Ok(())
}
