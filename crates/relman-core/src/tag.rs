use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)(?:\.(\d+))?$").expect("valid pattern"));

/// A release tag with three required numeric segments and an optional
/// fourth (hotfix) segment.
///
/// Ordering is lexicographic over `(major, minor, patch, fix)`, where a
/// missing fix segment sorts below any present one. The derived `Ord`
/// gives exactly that because `None < Some(_)` for `Option<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub fix: Option<u32>,
}

impl Tag {
    #[must_use]
    pub fn new(major: u32, minor: u32, patch: u32, fix: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
            fix,
        }
    }

    /// Parses a tag name in the canonical `v1.2.3` / `v1.2.3.4` form.
    ///
    /// Returns `None` for anything else, so it doubles as the filter for
    /// host-reported tag listings.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let captures = TAG_PATTERN.captures(name)?;
        let segment = |index: usize| {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        };
        Some(Self {
            major: segment(1)?,
            minor: segment(2)?,
            patch: segment(3)?,
            fix: segment(4),
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(fix) = self.fix {
            write!(f, ".{fix}")?;
        }
        Ok(())
    }
}
