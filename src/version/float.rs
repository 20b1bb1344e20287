//! Floating range behavior (`*`, `*-`, `1.0.0-*`, `~1.2.3`, `^1.2.3`)

use std::fmt;

use crate::version::nuget::NuGetVersion;

/// How a floating range moves relative to its minimum version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatBehavior {
    /// Not floating: the bounds alone decide satisfaction
    #[default]
    None,
    /// `*-` or `1.0.0-*`: prerelease versions only
    Prerelease,
    /// `~1.2.3`: same major and minor
    Patch,
    /// `^1.2.3`: same major (same minor for 0.x)
    Minor,
    /// `*`: anything, prereleases included
    Major,
}

impl FloatBehavior {
    pub fn is_floating(self) -> bool {
        self != FloatBehavior::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FloatBehavior::None => "none",
            FloatBehavior::Prerelease => "prerelease",
            FloatBehavior::Patch => "patch",
            FloatBehavior::Minor => "minor",
            FloatBehavior::Major => "major",
        }
    }

    /// Exclusive upper bound implied by a tilde or caret float
    ///
    /// Examples:
    /// - Patch, 1.2.3 -> 1.3.0
    /// - Minor, 1.2.3 -> 2.0.0
    /// - Minor, 0.2.3 -> 0.3.0
    ///
    /// `None` for the other floats, and when the bound would pass the
    /// largest segment value.
    pub fn upper_bound(self, min: &NuGetVersion) -> Option<NuGetVersion> {
        match self {
            FloatBehavior::Patch => next_minor(min),
            FloatBehavior::Minor if min.major() == 0 => next_minor(min),
            FloatBehavior::Minor => min
                .major()
                .checked_add(1)
                .and_then(|major| NuGetVersion::new(major, 0, 0, 0).ok()),
            FloatBehavior::None | FloatBehavior::Prerelease | FloatBehavior::Major => None,
        }
    }

    /// Float-specific satisfaction test
    ///
    /// `min` is the range's minimum version and `include_min` its
    /// inclusivity; only the prerelease float consults the inclusivity.
    /// `None` places no constraint.
    pub fn accepts(
        self,
        min: Option<&NuGetVersion>,
        include_min: bool,
        version: &NuGetVersion,
    ) -> bool {
        match self {
            FloatBehavior::None | FloatBehavior::Major => true,
            FloatBehavior::Prerelease => {
                version.is_prerelease()
                    && min.is_none_or(|min| {
                        if include_min {
                            version >= min
                        } else {
                            version > min
                        }
                    })
            }
            FloatBehavior::Patch => min.is_some_and(|min| same_minor_line(min, version)),
            FloatBehavior::Minor => min.is_some_and(|min| {
                if min.major() == 0 {
                    same_minor_line(min, version)
                } else {
                    version.major() == min.major()
                        && (version.minor(), version.patch()) >= (min.minor(), min.patch())
                }
            }),
        }
    }
}

impl fmt::Display for FloatBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn next_minor(min: &NuGetVersion) -> Option<NuGetVersion> {
    min.minor()
        .checked_add(1)
        .and_then(|minor| NuGetVersion::new(min.major(), minor, 0, 0).ok())
}

fn same_minor_line(min: &NuGetVersion, version: &NuGetVersion) -> bool {
    version.major() == min.major()
        && version.minor() == min.minor()
        && version.patch() >= min.patch()
}
