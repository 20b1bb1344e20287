//! Reports printed by the `nuget-version` binary

use std::fmt;

use serde::Serialize;

use crate::version::{NuGetVersion, VersionRange};

/// Everything the parser knows about one version string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionReport {
    pub input: String,
    pub normalized: String,
    pub full: String,
    pub original: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub revision: u32,
    pub release_labels: Vec<String>,
    pub metadata: Option<String>,
    pub is_prerelease: bool,
    pub is_semver2: bool,
    pub is_legacy_version: bool,
}

impl VersionReport {
    pub fn new(input: &str, version: &NuGetVersion) -> Self {
        Self {
            input: input.to_string(),
            normalized: version.to_normalized_string(),
            full: version.to_full_string(),
            original: version.original_version().to_string(),
            major: version.major(),
            minor: version.minor(),
            patch: version.patch(),
            revision: version.revision(),
            release_labels: version.release_labels().to_vec(),
            metadata: version.metadata().map(str::to_string),
            is_prerelease: version.is_prerelease(),
            is_semver2: version.is_semver2(),
            is_legacy_version: version.is_legacy_version(),
        }
    }
}

impl fmt::Display for VersionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input)?;
        writeln!(f, "  normalized: {}", self.normalized)?;
        writeln!(f, "  full:       {}", self.full)?;
        writeln!(f, "  original:   {}", self.original)?;
        writeln!(f, "  prerelease: {}", self.is_prerelease)?;
        writeln!(f, "  semver2:    {}", self.is_semver2)?;
        write!(f, "  legacy:     {}", self.is_legacy_version)
    }
}

/// Canonical, descriptive and non-snapshot forms of a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    pub input: String,
    pub canonical: String,
    pub pretty: String,
    pub non_snapshot: String,
    pub float: String,
    pub min_version: Option<String>,
    pub include_min: bool,
    pub max_version: Option<String>,
    pub include_max: bool,
}

impl RangeReport {
    pub fn new(input: &str, range: &VersionRange) -> Self {
        Self {
            input: input.to_string(),
            canonical: range.to_string(),
            pretty: range.pretty_print(),
            non_snapshot: range.to_non_snapshot_range().to_string(),
            float: range.float().to_string(),
            min_version: range.min_version().map(NuGetVersion::to_normalized_string),
            include_min: range.include_min(),
            max_version: range.max_version().map(NuGetVersion::to_normalized_string),
            include_max: range.include_max(),
        }
    }
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input)?;
        writeln!(f, "  canonical:    {}", self.canonical)?;
        writeln!(f, "  description:  {}", self.pretty)?;
        writeln!(f, "  non-snapshot: {}", self.non_snapshot)?;
        write!(f, "  float:        {}", self.float)
    }
}
