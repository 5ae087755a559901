//! jvalidate - validate `.info.json`/`.auth.json` and, optionally, cross-check
//! the declared manifest against a real submission directory.
//!
//! Drives `semtab` + `domain` + `loaders` + `fswalk` end to end, the
//! counterpart to how the teacher crate's own binary drives
//! `validate_files` + `replace_duplicates_with_symlinks` front to back.

use anyhow::{Context, Result};
use clap::Parser;
use iocccpath::tables::{auth_json_table, info_json_table};
use iocccpath::{check_manifest, load_authors, load_manifest, semtab_check};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Validate an IOCCC `.info.json`/`.auth.json` pair.
#[derive(Parser, Debug)]
#[command(name = "jvalidate", version, about = "Validate IOCCC submission metadata")]
struct Args {
    /// Set verbosity level (off, warn, info, debug, trace)
    #[arg(short = 'v', long = "verbosity", default_value = "warn")]
    verbosity: String,

    /// Path to the .info.json file
    #[arg(long = "info-json")]
    info_json: PathBuf,

    /// Path to the .auth.json file
    #[arg(long = "auth-json")]
    auth_json: PathBuf,

    /// Submission directory to cross-check the manifest against
    #[arg(long = "submission-dir")]
    submission_dir: Option<PathBuf>,
}

fn load_json(path: &std::path::Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as JSON", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.verbosity).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let info_tree = load_json(&args.info_json)?;
    let auth_tree = load_json(&args.auth_json)?;

    let mut had_errors = false;

    let mut info_table = info_json_table();
    let (info_count_errs, info_val_errs) = semtab_check(&info_tree, &mut info_table, 0);
    for e in &info_count_errs {
        println!(".info.json: {}", e.diagnostic);
        had_errors = true;
    }
    for e in &info_val_errs {
        println!(".info.json: {}", e.diagnostic);
        had_errors = true;
    }

    let mut auth_table = auth_json_table();
    let (auth_count_errs, auth_val_errs) = semtab_check(&auth_tree, &mut auth_table, 0);
    for e in &auth_count_errs {
        println!(".auth.json: {}", e.diagnostic);
        had_errors = true;
    }
    for e in &auth_val_errs {
        println!(".auth.json: {}", e.diagnostic);
        had_errors = true;
    }

    if had_errors {
        tracing::warn!("semantic table validation failed, skipping loader/filesystem stages");
        std::process::exit(1);
    }

    let manifest_json = info_tree.get("manifest").cloned().unwrap_or(serde_json::Value::Array(vec![]));
    let authors_json = auth_tree.get("authors").cloned().unwrap_or(serde_json::Value::Array(vec![]));

    let manifest = match load_manifest(&manifest_json) {
        Ok(m) => Some(m),
        Err(errs) => {
            for e in &errs {
                println!("manifest: {}", e.diagnostic);
            }
            had_errors = true;
            None
        }
    };

    if let Err(errs) = load_authors(&authors_json) {
        for e in &errs {
            println!("authors: {}", e.diagnostic);
        }
        had_errors = true;
    }

    if let (Some(manifest), Some(dir)) = (&manifest, &args.submission_dir) {
        if let Err(errs) = check_manifest(manifest, dir) {
            for e in &errs {
                println!("filesystem: {e}");
            }
            had_errors = true;
        }
    }

    if had_errors {
        std::process::exit(1);
    }
    println!("OK");
    Ok(())
}
