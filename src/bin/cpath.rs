//! cpath - canonicalize a path
//!
//! A direct CLI front end over [`iocccpath::canon_path`], mirroring the
//! original `cpath` tool's option set and exit-code table.

use clap::Parser;
use iocccpath::{canon_path, PathSanity};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Canonicalize paths under an explicit policy.
#[derive(Parser, Debug)]
#[command(name = "cpath", version, about = "Canonicalize a path")]
struct Args {
    /// Set verbosity level (off, warn, info, debug, trace)
    #[arg(short = 'v', long = "verbosity", default_value = "warn")]
    verbosity: String,

    /// Max canonicalized path length, 0 ==> no limit
    #[arg(short = 'm', long = "max-path", default_value_t = 0)]
    max_path: usize,

    /// Max length of any canonicalized path component, 0 ==> no limit
    #[arg(short = 'M', long = "max-file", default_value_t = 0)]
    max_file: usize,

    /// Max canonicalized path depth where 0 is the topdir, 0 ==> no limit
    #[arg(short = 'd', long = "max-depth", default_value_t = 0)]
    max_depth: u32,

    /// Path must be relative (def: absolute paths allowed)
    #[arg(short = 'r', long = "relative-only")]
    only_relative: bool,

    /// Convert to lower case (def: don't change the path case)
    #[arg(short = 'l', long = "lowercase")]
    lowercase: bool,

    /// Require canonicalized path components to be safe (def: don't check)
    #[arg(short = 's', long = "safe")]
    safe: bool,

    /// Paths to canonicalize (def: read paths from stdin)
    paths: Vec<String>,
}

fn process_one(input: &str, args: &Args, exit_code: &mut i32) {
    let result = canon_path(
        input,
        args.max_path,
        args.max_file,
        args.max_depth,
        args.only_relative,
        !args.lowercase,
        args.safe,
    );

    match &result.sanity {
        PathSanity::Ok => {
            tracing::debug!(path_len = result.path_len, depth = result.depth, "canonicalized path");
            println!("{}", result.path.as_deref().unwrap_or(""));
        }
        sanity => {
            tracing::warn!(%sanity, "canon_path error return");
            println!();
            *exit_code = sanity.exit_code();
        }
    }
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.verbosity).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut exit_code = 0;

    if args.paths.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            process_one(&line, &args, &mut exit_code);
        }
    } else {
        for path in &args.paths {
            process_one(path, &args, &mut exit_code);
        }
    }

    io::stdout().flush().ok();
    std::process::exit(exit_code);
}
