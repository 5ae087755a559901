//! Cross-module boundary scenarios and universal invariants, wiring the
//! semantic walker, domain predicates, and loaders together the way
//! `jvalidate` does end to end.

use iocccpath::tables::{auth_json_table, info_json_table};
use iocccpath::{domain, load_authors, load_manifest, semtab_check};
use serde_json::json;

#[test]
fn well_formed_auth_json_has_no_errors_and_loads() {
    let tree = json!({
        "contest_id": "test",
        "authors": [
            {
                "name": "chongo",
                "location_code": "US",
                "email": null,
                "url": "",
                "alt_url": "",
                "mastodon": "@chongo@mastodon.social",
                "github": "@chongo",
                "affiliation": "",
                "past_winning_author": true,
                "default_handle": true,
                "author_handle": "chongo",
                "author_number": 0,
            }
        ]
    });

    let mut table = auth_json_table();
    let (count_errs, val_errs) = semtab_check(&tree, &mut table, 0);
    assert!(count_errs.is_empty(), "{count_errs:?}");
    assert!(val_errs.is_empty(), "{val_errs:?}");

    let authors = load_authors(&tree["authors"]).expect("authors should load");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].email, "");
}

#[test]
fn invalid_contest_id_is_caught_by_the_semantic_table() {
    let tree = json!({
        "contest_id": "12345678-1234-4321-7abc-1234567890ab",
        "authors": []
    });
    let mut table = auth_json_table();
    let (_, val_errs) = semtab_check(&tree, &mut table, 0);
    assert!(val_errs.iter().any(|e| e.diagnostic.contains("invalid contest_id")));

    let tree_fixed = json!({
        "contest_id": "12345678-1234-4321-8abc-1234567890ab",
        "authors": []
    });
    let mut table2 = auth_json_table();
    let (_, val_errs2) = semtab_check(&tree_fixed, &mut table2, 0);
    assert!(val_errs2.is_empty());
}

#[test]
fn missing_authors_member_is_a_count_error() {
    let tree = json!({"contest_id": "test"});
    let mut table = auth_json_table();
    let (count_errs, _) = semtab_check(&tree, &mut table, 0);
    assert!(count_errs.iter().any(|e| e.diagnostic.contains("authors")));
}

#[test]
fn authors_with_disjoint_numbers_names_and_handles_load_cleanly() {
    let tree = json!([
        {
            "name": "alice", "location_code": "US", "email": "", "url": "", "alt_url": "",
            "mastodon": "", "github": "", "affiliation": "", "past_winning_author": false,
            "default_handle": true, "author_handle": "alice_h", "author_number": 0,
        },
        {
            "name": "bob", "location_code": "CA", "email": "", "url": "", "alt_url": "",
            "mastodon": "", "github": "", "affiliation": "", "past_winning_author": false,
            "default_handle": true, "author_handle": "bob_h", "author_number": 1,
        },
    ]);
    let authors = load_authors(&tree).expect("disjoint authors should load");
    assert_eq!(authors.len(), 2);
}

#[test]
fn vercmp_equal_less_and_greater() {
    // boundary scenario 5: fewer levels is smaller, not zero-padded-equal
    assert_eq!(domain::vercmp("1.2.3", "1.2.3"), 0);
    assert_eq!(domain::vercmp("1.2", "1.2.0"), 1);
    assert_eq!(domain::vercmp("1.10", "1.2"), 0);
    assert_eq!(domain::vercmp("1.2", "1.10"), 1);
}

#[test]
fn uuid_variant_nibble_boundary() {
    assert!(!domain::valid_contest_id("12345678-1234-4321-7abc-1234567890ab"));
    assert!(domain::valid_contest_id("12345678-1234-4321-8abc-1234567890ab"));
}

#[test]
fn tarball_derivation_round_trip() {
    let name = domain::form_tar_filename("test", 0, 1_700_000_000);
    assert_eq!(name, "submit.test-0.1700000000.txz");
    assert!(domain::test_tarball(&name, "test", 0, 1_700_000_000));
}

fn full_mandatory_manifest_entries() -> Vec<serde_json::Value> {
    vec![
        json!({"info_JSON": ".info.json"}),
        json!({"auth_JSON": ".auth.json"}),
        json!({"c_src": "prog.c"}),
        json!({"Makefile": "Makefile"}),
        json!({"remarks": "remarks.md"}),
    ]
}

#[test]
fn boundary_scenario_7_extra_file_ending_in_dot_sh_is_rejected() {
    let mut entries = full_mandatory_manifest_entries();
    entries.push(json!({"extra_file": "foo.sh"}));
    entries.push(json!({"extra_file": "foo.sh"}));
    let errs = load_manifest(&serde_json::Value::Array(entries)).unwrap_err();
    assert!(errs.iter().any(|e| e.diagnostic == "extra_file filename ends in .sh"));
}

#[test]
fn boundary_scenario_8_missing_auth_json_reports_exact_count() {
    let entries: Vec<_> = full_mandatory_manifest_entries()
        .into_iter()
        .filter(|e| e.get("auth_JSON").is_none())
        .collect();
    let errs = load_manifest(&serde_json::Value::Array(entries)).unwrap_err();
    assert!(errs.iter().any(|e| e.diagnostic == "expected 1 valid auth_JSON, found: 0"));
}

#[test]
fn two_author_auth_json_does_not_overflow_per_author_max() {
    let tree = json!({
        "contest_id": "test",
        "authors": [
            {
                "name": "alice", "location_code": "US", "email": "", "url": "", "alt_url": "",
                "mastodon": "", "github": "", "affiliation": "", "past_winning_author": false,
                "default_handle": true, "author_handle": "alice_h", "author_number": 0,
            },
            {
                "name": "bob", "location_code": "CA", "email": "", "url": "", "alt_url": "",
                "mastodon": "", "github": "", "affiliation": "", "past_winning_author": false,
                "default_handle": true, "author_handle": "bob_h", "author_number": 1,
            },
        ]
    });
    let mut table = auth_json_table();
    let (count_errs, val_errs) = semtab_check(&tree, &mut table, 0);
    assert!(count_errs.is_empty(), "{count_errs:?}");
    assert!(val_errs.is_empty(), "{val_errs:?}");
}

#[test]
fn well_formed_info_json_has_no_errors() {
    let tree = json!({
        "contest_id": "test",
        "submit_slot": 0,
        "manifest": [
            {"info_JSON": ".info.json"},
            {"auth_JSON": ".auth.json"},
            {"c_src": "prog.c"},
            {"Makefile": "Makefile"},
            {"remarks": "remarks.md"},
            {"try_sh": "try.sh"},
        ]
    });
    let mut table = info_json_table();
    let (count_errs, val_errs) = semtab_check(&tree, &mut table, 0);
    assert!(count_errs.is_empty(), "{count_errs:?}");
    assert!(val_errs.is_empty(), "{val_errs:?}");
}
