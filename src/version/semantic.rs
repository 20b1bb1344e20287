//! SemVer 2.0 shaped version: `Major.Minor.Patch[-labels][+metadata]`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::version::error::ParseError;
use crate::version::legacy::Version;
use crate::version::semver::{
    compare_release_labels, is_valid_metadata_label, is_valid_release_label,
};

/// Three-component version with prerelease labels and build metadata.
///
/// Build metadata is carried for display only; it does not take part in
/// equality, hashing or ordering.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
    release_labels: Vec<String>,
    metadata: Option<String>,
}

impl SemanticVersion {
    /// Build a semantic version, validating every label and the numeric
    /// range of each component.
    pub fn new(
        major: u32,
        minor: u32,
        patch: u32,
        release_labels: Vec<String>,
        metadata: Option<String>,
    ) -> Result<Self, ParseError> {
        Version::new(major, minor, patch, 0).check_bounds()?;
        let version = Self::from_validated(major, minor, patch, release_labels, metadata);

        if let Some(label) = version
            .release_labels
            .iter()
            .find(|l| !is_valid_release_label(l))
        {
            return Err(ParseError::InvalidReleaseLabel {
                input: version.to_string(),
                label: label.clone(),
            });
        }

        let invalid_metadata = version
            .metadata
            .as_deref()
            .and_then(|m| m.split('.').find(|l| !is_valid_metadata_label(l)));
        if let Some(label) = invalid_metadata {
            return Err(ParseError::InvalidBuildMetadata {
                input: version.to_string(),
                label: label.to_string(),
            });
        }

        Ok(version)
    }

    /// Build a semantic version from labels the scanner already checked.
    pub(crate) fn from_validated(
        major: u32,
        minor: u32,
        patch: u32,
        release_labels: Vec<String>,
        metadata: Option<String>,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
            release_labels,
            metadata,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn release_labels(&self) -> &[String] {
        &self.release_labels
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.release_labels.is_empty()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// NuGet's SemVer 1 vs 2 marker: dotted release labels or any metadata.
    pub fn is_semver2(&self) -> bool {
        self.release_labels.len() > 1 || self.has_metadata()
    }

    /// Release labels joined with `.`, empty for a release version.
    pub fn release(&self) -> String {
        self.release_labels.join(".")
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.release_labels.hash(state);
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| compare_release_labels(&self.release_labels, &other.release_labels))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.release())?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, "+{metadata}")?;
        }
        Ok(())
    }
}
