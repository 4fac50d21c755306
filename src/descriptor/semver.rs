//! Semantic version check (SemVer 2.0.0).
//!
//! `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`. Numeric identifiers carry no
//! leading zeros; build metadata has no numeric restriction. Only ASCII digits
//! count as digits.

use regex::Regex;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
        r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
        r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
        r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    ))
    .unwrap()
});

/// Message attached to a version that fails [`is_valid`].
pub fn invalid_version_message(version: &str) -> String {
    format!(
        "Version '{version}' does not follow semantic versioning specification \
         (MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD])"
    )
}

/// Whether `version` is a well-formed semantic version. No normalisation is applied.
pub fn is_valid(version: &str) -> bool {
    !version.is_empty() && SEMVER_RE.is_match(version)
}
