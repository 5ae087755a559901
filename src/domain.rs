//! IOCCC domain predicates: contest IDs, contact fields, handles, location
//! codes, timestamps, filenames, dotted-integer versions, and tarball names.
//!
//! Each predicate logs at `debug` on rejection and `trace` with the rejected
//! value included, mirroring the original's `DBG_MED`/`DBG_HIGH` call sites
//! in `soup/entry_util.c`.

/// Maximum number of authors permitted on a single submission.
pub const MAX_AUTHORS: i64 = 103;
/// Maximum combined count of `extra_file` + `shell_script` manifest entries.
pub const MAX_EXTRA_FILE_COUNT: usize = 64;
/// Maximum `submit_slot` value (slots are `0..=MAX_SUBMIT_SLOT`).
pub const MAX_SUBMIT_SLOT: i64 = 9;
/// Earliest timestamp accepted as a real "formed" time (2022-09-11 00:00:00 UTC).
pub const MIN_TIMESTAMP: i64 = 1_662_844_800;
/// How far into the future a formed timestamp may drift before being rejected.
pub const FUTURE_CLOCK_SKEW_LIMIT: i64 = 600;
pub const MAX_EMAIL_LEN: usize = 4096;
pub const MAX_URL_LEN: usize = 4096;
pub const MAX_MASTODON_LEN: usize = 4096;
pub const MAX_GITHUB_LEN: usize = 4096;
pub const MAX_HANDLE: usize = 32;
pub const MAX_NAME_LEN: usize = 256;
pub const MAX_AFFILIATION_LEN: usize = 4096;
pub const UUID_LEN: usize = 36;

pub const MANDATORY_FILENAMES: [&str; 5] = [".info.json", ".auth.json", "prog.c", "Makefile", "remarks.md"];
pub const OPTIONAL_UNIQUE_FILENAMES: [&str; 3] = ["prog.alt.c", "try.sh", "try.alt.sh"];
pub const EXECUTABLE_FILENAMES: [&str; 2] = ["try.sh", "try.alt.sh"];

/// Minimal ISO-3166-1 alpha-2 table: the codes exercised by the original
/// project's test fixtures and documentation, not the full standard list.
pub const LOCATION_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

fn hex_nibble(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

/// UUID shape the original project expects: version nibble `4`, variant
/// nibble in `{8,9,a,b}`, dashes at positions 8/13/18/23.
fn is_uuid_v4_shaped(s: &str) -> bool {
    if s.len() != UUID_LEN {
        return false;
    }
    let bytes: Vec<char> = s.chars().collect();
    for (i, c) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *c != '-' {
                    return false;
                }
            }
            _ => {
                if hex_nibble(*c).is_none() {
                    return false;
                }
            }
        }
    }
    if bytes[14] != '4' {
        return false;
    }
    matches!(bytes[19], '8' | '9' | 'a' | 'b')
}

/// `valid_contest_id`: literal `"test"`, or a lowercase-folded v4-shaped UUID.
pub fn valid_contest_id(id: &str) -> bool {
    if id == "test" {
        return true;
    }
    let folded = id.to_ascii_lowercase();
    let ok = is_uuid_v4_shaped(&folded);
    if !ok {
        tracing::debug!("valid_contest_id: rejected");
        tracing::trace!(id, "valid_contest_id: rejected value");
    }
    ok
}

/// `test_email`: empty is legal (withheld); else one `@`, not leading/trailing.
pub fn test_email(email: &str) -> bool {
    if email.is_empty() {
        return true;
    }
    if email.len() > MAX_EMAIL_LEN {
        tracing::debug!("test_email: too long");
        return false;
    }
    let at_count = email.matches('@').count();
    let ok = at_count == 1 && !email.starts_with('@') && !email.ends_with('@');
    if !ok {
        tracing::debug!("test_email: rejected");
        tracing::trace!(email, "test_email: rejected value");
    }
    ok
}

fn test_url_like(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    if url.len() > MAX_URL_LEN {
        return false;
    }
    let rest = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.starts_with('/'),
        None => false,
    }
}

/// `test_url`: empty is legal; else `http(s)://` plus a non-`/` first char.
pub fn test_url(url: &str) -> bool {
    let ok = test_url_like(url);
    if !ok {
        tracing::debug!("test_url: rejected");
        tracing::trace!(url, "test_url: rejected value");
    }
    ok
}

/// `test_alt_url`: identical rule to `test_url`, distinct field.
pub fn test_alt_url(url: &str) -> bool {
    let ok = test_url_like(url);
    if !ok {
        tracing::debug!("test_alt_url: rejected");
        tracing::trace!(url, "test_alt_url: rejected value");
    }
    ok
}

/// `test_mastodon`: empty is legal; else `@user@instance`, exactly two `@`.
pub fn test_mastodon(handle: &str) -> bool {
    if handle.is_empty() {
        return true;
    }
    if handle.len() > MAX_MASTODON_LEN {
        tracing::debug!("test_mastodon: too long");
        return false;
    }
    let at_count = handle.matches('@').count();
    let ok = at_count == 2
        && handle.starts_with('@')
        && !handle.ends_with('@')
        && !handle.contains("@@")
        && handle.len() > 1;
    if !ok {
        tracing::debug!("test_mastodon: rejected");
        tracing::trace!(handle, "test_mastodon: rejected value");
    }
    ok
}

/// `test_github`: empty is legal; else `@handle`, exactly one `@`, leading.
pub fn test_github(handle: &str) -> bool {
    if handle.is_empty() {
        return true;
    }
    if handle.len() > MAX_GITHUB_LEN {
        tracing::debug!("test_github: too long");
        return false;
    }
    let at_count = handle.matches('@').count();
    let ok = at_count == 1 && handle.starts_with('@') && handle.len() > 1;
    if !ok {
        tracing::debug!("test_github: rejected");
        tracing::trace!(handle, "test_github: rejected value");
    }
    ok
}

/// `test_location_code`: two uppercase ASCII letters present in the table.
pub fn test_location_code(code: &str) -> bool {
    let shape_ok = code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase());
    let ok = shape_ok && LOCATION_CODES.contains(&code);
    if !ok {
        tracing::debug!("test_location_code: rejected");
        tracing::trace!(code, "test_location_code: rejected value");
    }
    ok
}

/// `test_author_handle`: same safe-component shape as `canon_path`'s regexp,
/// capped at `MAX_HANDLE`.
pub fn test_author_handle(handle: &str) -> bool {
    if handle.is_empty() || handle.len() > MAX_HANDLE {
        tracing::debug!("test_author_handle: rejected (length)");
        return false;
    }
    let mut chars = handle.chars();
    let first_ok = chars.next().map(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_').unwrap_or(false);
    let ok = first_ok && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'));
    if !ok {
        tracing::debug!("test_author_handle: rejected");
        tracing::trace!(handle, "test_author_handle: rejected value");
    }
    ok
}

/// `test_author_number`: `0 <= n < MAX_AUTHORS`.
pub fn test_author_number(n: i64) -> bool {
    let ok = (0..MAX_AUTHORS).contains(&n);
    if !ok {
        tracing::debug!(n, "test_author_number: rejected");
    }
    ok
}

/// `test_submit_slot`: `0 <= n <= MAX_SUBMIT_SLOT`.
pub fn test_submit_slot(n: i64) -> bool {
    let ok = (0..=MAX_SUBMIT_SLOT).contains(&n);
    if !ok {
        tracing::debug!(n, "test_submit_slot: rejected");
    }
    ok
}

/// `test_formed_timestamp`: `MIN_TIMESTAMP <= t <= now + FUTURE_CLOCK_SKEW_LIMIT`.
pub fn test_formed_timestamp(t: i64, now: i64) -> bool {
    let ok = t >= MIN_TIMESTAMP && t <= now + FUTURE_CLOCK_SKEW_LIMIT;
    if !ok {
        tracing::debug!(t, now, "test_formed_timestamp: rejected");
    }
    ok
}

fn eq_ascii_ci(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// `is_mandatory_filename`: case-insensitive match against the 5 fixed names.
pub fn is_mandatory_filename(name: &str) -> bool {
    MANDATORY_FILENAMES.iter().any(|m| eq_ascii_ci(m, name))
}

/// `is_executable_filename`: case-insensitive match against the executable
/// list, or a `.sh` suffix with content before it (a bare `.sh` never counts).
pub fn is_executable_filename(name: &str) -> bool {
    if EXECUTABLE_FILENAMES.iter().any(|m| eq_ascii_ci(m, name)) {
        return true;
    }
    name.len() > 3 && name.ends_with(".sh")
}

/// Parse a dotted-integer version string into its numeric levels, skipping
/// any leading non-digit run per level (mirrors `verge.c`'s tolerant parse).
fn parse_version_levels(v: &str) -> Option<Vec<u64>> {
    if v.is_empty() {
        return None;
    }
    let mut levels = Vec::new();
    for part in v.split('.') {
        let digits: String = part.chars().skip_while(|c| !c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        levels.push(digits.parse::<u64>().ok()?);
    }
    Some(levels)
}

/// `vercmp`: 0 if `v1 >= v2`, 1 if `v1 < v2`, 4 if either is unparseable.
///
/// Compares level by level over the shared prefix; if the prefix is equal but
/// one version has fewer levels, the *shorter* one sorts lower — `"1.2"` is
/// less than `"1.2.0"` even though the missing third level would be zero.
pub fn vercmp(v1: &str, v2: &str) -> i32 {
    let (Some(a), Some(b)) = (parse_version_levels(v1), parse_version_levels(v2)) else {
        return 4;
    };
    let min_len = a.len().min(b.len());
    for i in 0..min_len {
        if a[i] > b[i] {
            return 0;
        }
        if a[i] < b[i] {
            return 1;
        }
    }
    if a.len() < b.len() {
        1
    } else {
        0
    }
}

/// `test_version`: `vercmp(version, minimum) == 0`, i.e. `version >= minimum`.
pub fn test_version(version: &str, minimum: &str) -> bool {
    vercmp(version, minimum) == 0
}

/// `test_poison`: case-insensitive exact match against a poison list.
pub fn test_poison(value: &str, poison_list: &[&str]) -> bool {
    let poisoned = poison_list.iter().any(|p| eq_ascii_ci(p, value));
    if poisoned {
        tracing::debug!("test_poison: value is poisoned");
        tracing::trace!(value, "test_poison: poisoned value");
    }
    !poisoned
}

/// `form_tar_filename`: `submit.<id>-<slot>.<epoch>.txz`.
pub fn form_tar_filename(contest_id: &str, submit_slot: i64, epoch: i64) -> String {
    format!("submit.{contest_id}-{submit_slot}.{epoch}.txz")
}

/// `test_tarball`: `name` matches what `form_tar_filename` would produce for
/// the given fields.
pub fn test_tarball(name: &str, contest_id: &str, submit_slot: i64, epoch: i64) -> bool {
    name == form_tar_filename(contest_id, submit_slot, epoch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_id_accepts_test_literal_and_uuid() {
        assert!(valid_contest_id("test"));
        assert!(valid_contest_id("a3bb189e-8bf9-4888-9912-ace4e6543002"));
        assert!(valid_contest_id("A3BB189E-8BF9-4888-9912-ACE4E6543002"));
        assert!(!valid_contest_id("a3bb189e-8bf9-1888-9912-ace4e6543002"));
        assert!(!valid_contest_id("not-a-uuid"));
    }

    #[test]
    fn email_rules() {
        assert!(test_email(""));
        assert!(test_email("a@b.com"));
        assert!(!test_email("@b.com"));
        assert!(!test_email("a@"));
        assert!(!test_email("a@b@c"));
    }

    #[test]
    fn url_rules() {
        assert!(test_url(""));
        assert!(test_url("https://example.com"));
        assert!(test_url("http://x"));
        assert!(!test_url("ftp://example.com"));
        assert!(!test_url("https://"));
    }

    #[test]
    fn mastodon_rules() {
        assert!(test_mastodon(""));
        assert!(test_mastodon("@user@instance.social"));
        assert!(!test_mastodon("user@instance.social"));
        assert!(!test_mastodon("@user@@instance"));
        assert!(!test_mastodon("@useronly"));
    }

    #[test]
    fn github_rules() {
        assert!(test_github(""));
        assert!(test_github("@chongo"));
        assert!(!test_github("chongo"));
        assert!(!test_github("@a@b"));
    }

    #[test]
    fn location_code_rules() {
        assert!(test_location_code("US"));
        assert!(!test_location_code("us"));
        assert!(!test_location_code("ZZ"));
        assert!(!test_location_code("USA"));
    }

    #[test]
    fn author_handle_rules() {
        assert!(test_author_handle("chongo"));
        assert!(test_author_handle("_left.right-plus+"));
        assert!(!test_author_handle("-bad"));
        assert!(!test_author_handle(""));
    }

    #[test]
    fn author_number_and_submit_slot_bounds() {
        assert!(test_author_number(0));
        assert!(test_author_number(MAX_AUTHORS - 1));
        assert!(!test_author_number(MAX_AUTHORS));
        assert!(!test_author_number(-1));
        assert!(test_submit_slot(0));
        assert!(test_submit_slot(MAX_SUBMIT_SLOT));
        assert!(!test_submit_slot(MAX_SUBMIT_SLOT + 1));
    }

    #[test]
    fn formed_timestamp_bounds() {
        let now = MIN_TIMESTAMP + 1_000_000;
        assert!(test_formed_timestamp(MIN_TIMESTAMP, now));
        assert!(!test_formed_timestamp(MIN_TIMESTAMP - 1, now));
        assert!(test_formed_timestamp(now + FUTURE_CLOCK_SKEW_LIMIT, now));
        assert!(!test_formed_timestamp(now + FUTURE_CLOCK_SKEW_LIMIT + 1, now));
    }

    #[test]
    fn mandatory_and_executable_filenames() {
        assert!(is_mandatory_filename("prog.c"));
        assert!(is_mandatory_filename("PROG.C"));
        assert!(!is_mandatory_filename("prog.alt.c"));
        assert!(is_executable_filename("try.sh"));
        assert!(is_executable_filename("whatever.sh"));
        assert!(!is_executable_filename(".sh"));
        assert!(!is_executable_filename("prog.c"));
    }

    #[test]
    fn vercmp_fewer_levels_sorts_lower() {
        // boundary scenario 5: fewer levels is smaller, not zero-padded-equal
        assert_eq!(vercmp("1.2", "1.2.0"), 1);
        assert_eq!(vercmp("1.2.0", "1.2"), 0);
        assert_eq!(vercmp("1.2.3", "1.2.3"), 0);
        assert_eq!(vercmp("1.10", "1.2"), 0);
        assert_eq!(vercmp("1.3", "1.2.9"), 0);
        assert_eq!(vercmp("1.2", "1.3"), 1);
        assert_eq!(vercmp("", "1.0"), 4);
        assert!(test_version("2.1.0", "2.1.0"));
        assert!(!test_version("2.0.9", "2.1.0"));
        assert!(!test_version("2.1", "2.1.0"));
    }

    #[test]
    fn poison_list_rejects_case_insensitively() {
        assert!(!test_poison("ADMIN", &["admin", "root"]));
        assert!(test_poison("safe_name", &["admin", "root"]));
    }

    #[test]
    fn tarball_name_formation_and_check() {
        let name = form_tar_filename("test", 3, 1_700_000_000);
        assert_eq!(name, "submit.test-3.1700000000.txz");
        assert!(test_tarball(&name, "test", 3, 1_700_000_000));
        assert!(!test_tarball(&name, "test", 4, 1_700_000_000));
    }
}
