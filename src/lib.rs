//! Path canonicalization and JSON semantic validation for IOCCC submissions.
//!
//! Two subsystems, usable independently:
//!
//! - [`canon`]: canonicalize a raw path string under an explicit policy and
//!   classify every failure mode ([`canon::canon_path`]).
//! - [`json_node`] + [`semtab`]: walk a `serde_json::Value` tree against a
//!   flat, ordered semantic table, then validate IOCCC submission metadata
//!   ([`domain`], [`loaders`]) and cross-check a manifest against a real
//!   directory tree ([`fswalk`]).
//!
//! `tables` builds the concrete `.info.json`/`.auth.json` semantic tables
//! the `jvalidate` binary drives end to end.

pub mod canon;
pub mod domain;
pub mod fswalk;
pub mod json_node;
pub mod loaders;
pub mod semtab;
pub mod tables;

pub use canon::{canon_path, CanonResult, PathSanity};
pub use fswalk::{check_manifest, walk_dir, FsError, WalkStat};
pub use json_node::{StrOrWithheld, ValidationError};
pub use loaders::{load_author, load_authors, load_manifest, Author, Manifest};
pub use semtab::{check as semtab_check, CountError, CountErrorKind, NodeKind, SemEntry, SemTable};
