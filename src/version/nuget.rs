//! The public NuGet version type
//!
//! A `NuGetVersion` is both a legacy four-segment [`Version`] and a
//! [`SemanticVersion`] at once. The two views share major and minor; the
//! semantic patch is the legacy build segment and the legacy revision is kept
//! alongside.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::error::ParseError;
use crate::version::legacy::Version;
use crate::version::semantic::SemanticVersion;
use crate::version::semver::compare_release_labels;

#[derive(Debug, Clone)]
pub struct NuGetVersion {
    version: Version,
    semver: SemanticVersion,
    original_version: String,
}

impl NuGetVersion {
    /// Build a release version from its four numeric segments.
    ///
    /// Segments above [`crate::version::legacy::MAX_COMPONENT`] are
    /// rejected, matching what the parser accepts.
    pub fn new(major: u32, minor: u32, patch: u32, revision: u32) -> Result<Self, ParseError> {
        Self::with_labels(Version::new(major, minor, patch, revision), Vec::new(), None)
    }

    /// Build a version with release labels and metadata, validating them.
    pub fn with_labels(
        version: Version,
        release_labels: Vec<String>,
        metadata: Option<String>,
    ) -> Result<Self, ParseError> {
        version.check_bounds()?;
        let semver = SemanticVersion::new(
            version.major,
            version.minor,
            version.build,
            release_labels,
            metadata,
        )?;
        Ok(Self::from_parts(version, semver, None))
    }

    /// Assemble a version from already validated parts.
    ///
    /// Without an original string the full normalized form stands in for it.
    pub(crate) fn from_parts(
        version: Version,
        semver: SemanticVersion,
        original_version: Option<String>,
    ) -> Self {
        let mut nuget = Self {
            version,
            semver,
            original_version: String::new(),
        };
        nuget.original_version = original_version.unwrap_or_else(|| nuget.to_full_string());
        nuget
    }

    /// Parse with the process-wide default parser.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::version::parser::parse(input)
    }

    /// Parse with the process-wide default parser, discarding the error.
    pub fn try_parse(input: &str) -> Option<Self> {
        crate::version::parser::try_parse(input)
    }

    pub fn major(&self) -> u32 {
        self.version.major
    }

    pub fn minor(&self) -> u32 {
        self.version.minor
    }

    /// Third segment, named `build` in the legacy scheme.
    pub fn patch(&self) -> u32 {
        self.version.build
    }

    pub fn revision(&self) -> u32 {
        self.version.revision
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn semantic_version(&self) -> &SemanticVersion {
        &self.semver
    }

    pub fn release_labels(&self) -> &[String] {
        self.semver.release_labels()
    }

    pub fn release(&self) -> String {
        self.semver.release()
    }

    pub fn metadata(&self) -> Option<&str> {
        self.semver.metadata()
    }

    /// Trimmed input this version was parsed from, internal spaces removed.
    pub fn original_version(&self) -> &str {
        &self.original_version
    }

    pub fn is_prerelease(&self) -> bool {
        self.semver.is_prerelease()
    }

    pub fn is_semver2(&self) -> bool {
        self.semver.is_semver2()
    }

    pub fn has_metadata(&self) -> bool {
        self.semver.has_metadata()
    }

    /// True when the legacy fourth segment is in use.
    pub fn is_legacy_version(&self) -> bool {
        self.version.revision > 0
    }

    /// Copy of this version with the release labels dropped.
    pub fn to_release(&self) -> Self {
        Self::new(self.major(), self.minor(), self.patch(), self.revision())
            .expect("segments of an existing version are within bounds")
    }

    /// Copy of this version with build metadata dropped.
    pub fn without_metadata(&self) -> Self {
        let semver = SemanticVersion::from_validated(
            self.major(),
            self.minor(),
            self.patch(),
            self.release_labels().to_vec(),
            None,
        );
        Self::from_parts(self.version, semver, None)
    }

    /// `major.minor.patch[.revision][-labels]`, revision only when non-zero.
    pub fn to_normalized_string(&self) -> String {
        let mut out = format!("{}.{}.{}", self.major(), self.minor(), self.patch());
        if self.is_legacy_version() {
            out.push_str(&format!(".{}", self.revision()));
        }
        if self.is_prerelease() {
            out.push('-');
            out.push_str(&self.release());
        }
        out
    }

    /// Normalized form followed by `+metadata` when present.
    pub fn to_full_string(&self) -> String {
        match self.metadata() {
            Some(metadata) => format!("{}+{}", self.to_normalized_string(), metadata),
            None => self.to_normalized_string(),
        }
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NuGetVersion {}

impl Hash for NuGetVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.version.hash(state);
        self.release_labels().hash(state);
    }
}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| compare_release_labels(self.release_labels(), other.release_labels()))
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_full_string())
    }
}

impl FromStr for NuGetVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NuGetVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_full_string())
    }
}

impl<'de> Deserialize<'de> for NuGetVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::legacy::MAX_COMPONENT;
    use rstest::rstest;
    use std::collections::HashSet;

    fn v(s: &str) -> NuGetVersion {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("1.0.0", "1.0.0")]
    #[case("1.0", "1.0.0")]
    #[case("1.0.0.0", "1.0.0")]
    #[case("1.2.3.4", "1.2.3.4")]
    #[case("01.002.3", "1.2.3")]
    #[case("1.0.0-Beta.1+sha", "1.0.0-Beta.1")]
    fn to_normalized_string_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(v(input).to_normalized_string(), expected);
    }

    #[test]
    fn display_keeps_metadata() {
        assert_eq!(v("1.0.0-rc.1+build.5").to_string(), "1.0.0-rc.1+build.5");
    }

    #[test]
    fn original_version_is_preserved() {
        assert_eq!(v("01.2").original_version(), "01.2");
    }

    #[test]
    fn constructed_version_uses_normalized_original() {
        assert_eq!(
            NuGetVersion::new(1, 2, 3, 0).unwrap().original_version(),
            "1.2.3"
        );
    }

    #[test]
    fn new_accepts_largest_component_and_round_trips() {
        let version = NuGetVersion::new(MAX_COMPONENT, 0, 0, MAX_COMPONENT).unwrap();

        assert_eq!(v(&version.to_string()), version);
    }

    #[rstest]
    #[case(MAX_COMPONENT + 1, 0, 0, 0)]
    #[case(0, u32::MAX, 0, 0)]
    #[case(0, 0, 0, MAX_COMPONENT + 1)]
    fn new_rejects_components_the_parser_rejects(
        #[case] major: u32,
        #[case] minor: u32,
        #[case] patch: u32,
        #[case] revision: u32,
    ) {
        let err = NuGetVersion::new(major, minor, patch, revision).unwrap_err();

        assert!(matches!(err, ParseError::MalformedVersionCore { .. }));
    }

    #[test]
    fn with_labels_validates_labels() {
        let err = NuGetVersion::with_labels(Version::new(1, 0, 0, 0), vec!["a_b".into()], None)
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidReleaseLabel { .. }));
    }

    #[test]
    fn equal_versions_hash_alike_regardless_of_metadata() {
        let set: HashSet<NuGetVersion> = [v("1.0.0+a"), v("1.0.0+b"), v("1.0.0.0")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn revision_participates_in_ordering() {
        assert!(v("1.0.0.1") > v("1.0.0"));
        assert!(v("1.0.0.1-beta") < v("1.0.0.1"));
        assert!(v("1.0.0.1").is_legacy_version());
    }

    #[test]
    fn without_metadata_and_to_release_strip_parts() {
        let version = v("1.2.3-beta+sha");
        assert_eq!(version.without_metadata().to_string(), "1.2.3-beta");
        assert_eq!(version.to_release().to_string(), "1.2.3");
    }

    #[test]
    fn serde_round_trips_through_strings() {
        let version = v("2.1.0-preview.3+abc");
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"2.1.0-preview.3+abc\"");

        let back: NuGetVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert_eq!(back.metadata(), Some("abc"));
    }

    #[test]
    fn deserialize_rejects_invalid_version() {
        assert!(serde_json::from_str::<NuGetVersion>("\"not-a-version\"").is_err());
    }
}
