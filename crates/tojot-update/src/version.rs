//! Version parsing and comparison

use semver::Version;
use std::cmp::Ordering;
use std::env;

use crate::error::{Result, UpdateError};

/// Environment variable that overrides the build-time version (for testing)
pub const VERSION_OVERRIDE_ENV: &str = "APP_VERSION";

/// Resolve the running application's version.
///
/// A non-empty `APP_VERSION` takes precedence over `build_version`.
pub fn resolve_current_version(build_version: &str) -> String {
    match env::var(VERSION_OVERRIDE_ENV) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => build_version.to_string(),
    }
}

/// Strip a leading `v`/`V` from a release tag
pub fn strip_tag_prefix(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
}

/// Parse a `MAJOR.MINOR.PATCH[-pre]` string, tolerating a `v` prefix
pub fn parse_version(input: &str) -> Result<Version> {
    Version::parse(strip_tag_prefix(input)).map_err(|e| UpdateError::parse(input, e))
}

/// Compare `current` against `latest`.
///
/// Both sides must parse; a malformed string is an error, never "no update".
pub fn compare(current: &str, latest: &str) -> Result<Ordering> {
    let current = parse_version(current)?;
    let latest = parse_version(latest)?;
    Ok(current.cmp(&latest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(compare("1.2.0", "1.10.0").unwrap(), Ordering::Less);
        assert_eq!(compare("1.10.0", "1.2.0").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_prefix_is_ignored() {
        assert_eq!(compare("v2.0.0", "2.0.0").unwrap(), Ordering::Equal);
        assert_eq!(compare("1.0.0", "v1.0.1").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        assert_eq!(compare("1.0.0-beta.1", "1.0.0").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_antisymmetry() {
        let pairs = [
            ("0.0.1", "0.1.0"),
            ("1.2.3", "1.2.3"),
            ("3.0.0", "2.99.99"),
            ("1.0.0-alpha", "1.0.0-beta"),
        ];
        for (a, b) in pairs {
            let forward = compare(a, b).unwrap();
            let backward = compare(b, a).unwrap();
            assert_eq!(forward, backward.reverse(), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_parse_failure_is_error() {
        let err = compare("1.0.0", "latest").unwrap_err();
        assert!(matches!(err, UpdateError::Parse { ref input, .. } if input == "latest"));

        assert!(compare("not-a-version", "1.0.0").is_err());
        assert!(compare("", "1.0.0").is_err());
    }

    #[test]
    #[serial]
    fn test_env_override_wins() {
        env::set_var(VERSION_OVERRIDE_ENV, "9.9.9");
        assert_eq!(resolve_current_version("0.1.0"), "9.9.9");

        env::set_var(VERSION_OVERRIDE_ENV, "  ");
        assert_eq!(resolve_current_version("0.1.0"), "0.1.0");

        env::remove_var(VERSION_OVERRIDE_ENV);
        assert_eq!(resolve_current_version("0.1.0"), "0.1.0");
    }
}
