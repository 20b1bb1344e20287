//! Comparison modes for NuGet versions

use std::cmp::Ordering;

use crate::version::nuget::NuGetVersion;

/// Which parts of a version take part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionComparison {
    /// Numeric segments and release labels (the `Ord` order)
    #[default]
    Default,
    /// Numeric segments only
    Version,
    /// Numeric segments and release labels
    VersionRelease,
    /// Numeric segments, release labels, then build metadata
    VersionReleaseMetadata,
}

pub fn compare_versions(a: &NuGetVersion, b: &NuGetVersion, mode: VersionComparison) -> Ordering {
    match mode {
        VersionComparison::Version => a.version().cmp(b.version()),
        VersionComparison::Default | VersionComparison::VersionRelease => a.cmp(b),
        VersionComparison::VersionReleaseMetadata => {
            a.cmp(b).then_with(|| a.metadata().cmp(&b.metadata()))
        }
    }
}

pub fn versions_equal(a: &NuGetVersion, b: &NuGetVersion, mode: VersionComparison) -> bool {
    compare_versions(a, b, mode) == Ordering::Equal
}

/// Sort versions ascending under the given mode
pub fn sort_versions(versions: &mut [NuGetVersion], mode: VersionComparison) {
    versions.sort_by(|a, b| compare_versions(a, b, mode));
}
