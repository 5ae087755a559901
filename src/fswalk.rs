//! Manifest–filesystem cross-check: walk a submission directory and confirm
//! every file a validated manifest declares actually exists with the right
//! type and permission bits.
//!
//! Grounded in `test_manifest`'s `fts_walk`/`path_in_walk_stat` sequence
//! (`soup/entry_util.c`), reimplemented with `walkdir` in place of libc
//! `fts(3)`.

use crate::loaders::Manifest;
use std::collections::HashMap;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

/// Stat bits this module cares about for a single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStat {
    pub st_mode: u32,
    pub st_size: u64,
    pub is_file: bool,
}

const MANDATORY_PERM: u32 = 0o444;
const EXTRA_PERM: u32 = 0o444;
const SHELL_PERM: u32 = 0o555;

/// One violation found while cross-checking a manifest against a real
/// directory. Collected, never short-circuited.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("{0}: missing from submission directory")]
    Missing(String),
    #[error("{0}: expected a regular file")]
    NotAFile(String),
    #[error("{0}: expected permission bits {expected:#o}, found {found:#o}")]
    WrongPermission {
        name: String,
        expected: u32,
        found: u32,
    },
}

impl FsError {
    fn wrong_perm(name: impl Into<String>, expected: u32, found: u32) -> Self {
        FsError::WrongPermission {
            name: name.into(),
            expected,
            found,
        }
    }
}

/// Walk `root`, returning a map from each entry's path relative to `root`
/// (using `/` separators) to its stat bits. Directories are included so
/// callers can distinguish "missing" from "wrong type".
pub fn walk_dir(root: &Path) -> io::Result<HashMap<String, WalkStat>> {
    let mut out = HashMap::new();
    for entry in WalkDir::new(root).min_depth(1).into_iter() {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        let meta = entry.metadata().map_err(io::Error::other)?;
        out.insert(
            rel,
            WalkStat {
                st_mode: meta.permissions().mode(),
                st_size: meta.len(),
                is_file: meta.is_file(),
            },
        );
    }
    Ok(out)
}

fn check_entry(stats: &HashMap<String, WalkStat>, name: &str, expected_perm: u32, errs: &mut Vec<FsError>) {
    match stats.get(name) {
        None => errs.push(FsError::Missing(name.to_string())),
        Some(stat) => {
            if !stat.is_file {
                errs.push(FsError::NotAFile(name.to_string()));
                return;
            }
            let found_perm = stat.st_mode & 0o777;
            if found_perm != expected_perm {
                errs.push(FsError::wrong_perm(name, expected_perm, found_perm));
            }
        }
    }
}

/// Cross-check `manifest` against the real directory tree rooted at
/// `submission_dir`. Mandatory files must be `0o444`; `extra` files `0o444`;
/// `shell` files `0o555`. Every violation is collected, not thrown.
pub fn check_manifest(manifest: &Manifest, submission_dir: &Path) -> Result<(), Vec<FsError>> {
    let stats = walk_dir(submission_dir).map_err(|e| vec![FsError::Missing(format!("walk failed: {e}"))])?;

    let mut errs = Vec::new();
    for name in crate::domain::MANDATORY_FILENAMES {
        check_entry(&stats, name, MANDATORY_PERM, &mut errs);
    }
    for name in &manifest.extra {
        check_entry(&stats, name, EXTRA_PERM, &mut errs);
    }
    for name in &manifest.shell {
        check_entry(&stats, name, SHELL_PERM, &mut errs);
    }

    if errs.is_empty() {
        Ok(())
    } else {
        Err(errs)
    }
}
