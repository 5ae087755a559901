//! Filesystem fixture tests for the manifest/directory cross-check, built
//! the way the teacher crate exercises real permission bits: `tempfile`
//! fixtures plus `std::os::unix::fs::PermissionsExt`.

use iocccpath::{check_manifest, walk_dir, domain, FsError, Manifest};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::tempdir;

fn write_with_mode(dir: &Path, name: &str, mode: u32) {
    let path = dir.join(name);
    fs::write(&path, b"x").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
}

fn complete_manifest_dir() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    for name in domain::MANDATORY_FILENAMES {
        write_with_mode(dir.path(), name, 0o444);
    }
    dir
}

#[test]
fn walk_dir_reports_stat_bits() {
    let dir = tempdir().unwrap();
    write_with_mode(dir.path(), "prog.c", 0o444);
    let stats = walk_dir(dir.path()).unwrap();
    let stat = stats.get("prog.c").expect("prog.c should be found");
    assert!(stat.is_file);
    assert_eq!(stat.st_mode & 0o777, 0o444);
}

#[test]
fn passes_when_every_mandatory_file_matches() {
    let dir = complete_manifest_dir();
    let manifest = Manifest::default();
    assert!(check_manifest(&manifest, dir.path()).is_ok());
}

#[test]
fn missing_mandatory_file_is_reported() {
    let dir = tempdir().unwrap();
    for name in domain::MANDATORY_FILENAMES.iter().skip(1) {
        write_with_mode(dir.path(), name, 0o444);
    }
    let manifest = Manifest::default();
    let errs = check_manifest(&manifest, dir.path()).unwrap_err();
    assert!(errs.iter().any(|e| matches!(e, FsError::Missing(n) if n == ".info.json")));
}

#[test]
fn wrong_permission_on_mandatory_file_is_reported() {
    let dir = complete_manifest_dir();
    fs::set_permissions(dir.path().join("prog.c"), fs::Permissions::from_mode(0o644)).unwrap();
    let manifest = Manifest::default();
    let errs = check_manifest(&manifest, dir.path()).unwrap_err();
    assert!(errs.iter().any(|e| matches!(e, FsError::WrongPermission { name, .. } if name == "prog.c")));
}

#[test]
fn shell_file_requires_0555() {
    let dir = complete_manifest_dir();
    write_with_mode(dir.path(), "try.sh", 0o555);
    let manifest = Manifest {
        shell: vec!["try.sh".to_string()],
        ..Manifest::default()
    };
    assert!(check_manifest(&manifest, dir.path()).is_ok());

    write_with_mode(dir.path(), "try.sh", 0o755);
    let errs = check_manifest(&manifest, dir.path()).unwrap_err();
    assert!(errs.iter().any(|e| matches!(e, FsError::WrongPermission { name, .. } if name == "try.sh")));
}

#[test]
fn extra_file_wrong_type_is_reported() {
    let dir = complete_manifest_dir();
    fs::create_dir(dir.path().join("extra_dir")).unwrap();
    let manifest = Manifest {
        extra: vec!["extra_dir".to_string()],
        ..Manifest::default()
    };
    let errs = check_manifest(&manifest, dir.path()).unwrap_err();
    assert!(errs.iter().any(|e| matches!(e, FsError::NotAFile(n) if n == "extra_dir")));
}
