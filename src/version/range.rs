//! NuGet version ranges
//!
//! Supported syntax:
//! - `1.2.3` - exact version
//! - `[1.0.0,2.0.0]`, `(1.0.0,2.0.0)`, `[1.0.0,)`, `(,2.0.0]` - intervals,
//!   each bracket chosen independently, an empty side is unbounded
//! - `*` - any version, prereleases included
//! - `*-` - any prerelease version
//! - `1.0.0-*` - prerelease versions at or above `1.0.0-0`
//! - `~1.2.3` - >=1.2.3 <1.3.0
//! - `^1.2.3` - >=1.2.3 <2.0.0 (>=0.2.3 <0.3.0 for 0.x)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::version::error::ParseError;
use crate::version::float::FloatBehavior;
use crate::version::nuget::NuGetVersion;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    min_version: Option<NuGetVersion>,
    max_version: Option<NuGetVersion>,
    include_min: bool,
    include_max: bool,
    float: FloatBehavior,
}

impl VersionRange {
    /// Build a range from explicit parts
    ///
    /// Non-floating bounds must describe a non-empty interval. Floating ranges
    /// must have the exact shape their syntax parses to:
    /// - `~`/`^`: inclusive minimum, exclusive maximum at
    ///   [`FloatBehavior::upper_bound`]
    /// - `X-*`: inclusive minimum `X-0` and no maximum; `*-` has no bounds
    /// - `*`: no bounds
    pub fn new(
        min_version: Option<NuGetVersion>,
        include_min: bool,
        max_version: Option<NuGetVersion>,
        include_max: bool,
        float: FloatBehavior,
    ) -> Result<Self, ParseError> {
        let range = Self {
            min_version,
            max_version,
            include_min,
            include_max,
            float,
        };

        let well_formed = match float {
            FloatBehavior::None => return range.validate_interval(),
            FloatBehavior::Patch | FloatBehavior::Minor => {
                let Some(min) = &range.min_version else {
                    return Err(ParseError::float_syntax(
                        &range.to_string(),
                        "floating range needs a minimum",
                    ));
                };
                range.include_min
                    && !range.include_max
                    && range.max_version == float.upper_bound(min)
            }
            FloatBehavior::Prerelease => {
                range.max_version.is_none()
                    && !range.include_max
                    && match &range.min_version {
                        Some(min) => {
                            range.include_min
                                && !min.has_metadata()
                                && matches!(min.release_labels(), [label] if label == "0")
                        }
                        None => !range.include_min,
                    }
            }
            FloatBehavior::Major => {
                range.min_version.is_none()
                    && range.max_version.is_none()
                    && !range.include_min
                    && !range.include_max
            }
        };

        if well_formed {
            Ok(range)
        } else {
            Err(ParseError::float_syntax(
                &range.to_string(),
                format!("bounds do not match a {float} float"),
            ))
        }
    }

    /// The unbounded, non-floating range `(, )`
    pub fn all() -> Self {
        Self {
            min_version: None,
            max_version: None,
            include_min: false,
            include_max: false,
            float: FloatBehavior::None,
        }
    }

    pub fn exact(version: NuGetVersion) -> Self {
        Self {
            min_version: Some(version.clone()),
            max_version: Some(version),
            include_min: true,
            include_max: true,
            float: FloatBehavior::None,
        }
    }

    /// Parse with the process-wide default parser
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::version::parser::parse_range(input)
    }

    /// Parse a range, resolving each version through `parse_version`
    pub fn parse_with<F>(input: &str, parse_version: F) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Result<NuGetVersion, ParseError>,
    {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let result = match trimmed.as_bytes()[0] {
            b'[' | b'(' => Self::parse_interval(trimmed, &parse_version),
            b'~' => Self::parse_anchored_float(trimmed, FloatBehavior::Patch, &parse_version),
            b'^' => Self::parse_anchored_float(trimmed, FloatBehavior::Minor, &parse_version),
            _ if trimmed == "*" => Ok(Self {
                float: FloatBehavior::Major,
                ..Self::all()
            }),
            _ if trimmed == "*-" => Ok(Self {
                float: FloatBehavior::Prerelease,
                ..Self::all()
            }),
            _ if trimmed.ends_with("-*") => Self::parse_prerelease_float(trimmed, &parse_version),
            _ if trimmed.contains('*') => Err(ParseError::float_syntax(
                trimmed,
                "'*' is only valid as '*', '*-' or '<version>-*'",
            )),
            _ if trimmed.ends_with([']', ')']) => Err(ParseError::range_syntax(
                trimmed,
                "missing opening bracket",
            )),
            _ if trimmed.contains(',') => Err(ParseError::range_syntax(
                trimmed,
                "interval must be enclosed in brackets",
            )),
            _ => parse_version(trimmed).map(Self::exact),
        };

        result.inspect_err(|e| debug!("Rejected version range '{}': {}", trimmed, e))
    }

    fn parse_interval<F>(input: &str, parse_version: &F) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Result<NuGetVersion, ParseError>,
    {
        let include_max = match input.as_bytes()[input.len() - 1] {
            b']' if input.len() > 1 => true,
            b')' if input.len() > 1 => false,
            _ => return Err(ParseError::range_syntax(input, "missing closing bracket")),
        };
        let include_min = input.starts_with('[');

        let body = &input[1..input.len() - 1];
        let mut parts = body.split(',');
        let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::range_syntax(
                input,
                "interval must contain exactly one comma",
            ));
        };

        let bound = |s: &str| -> Result<Option<NuGetVersion>, ParseError> {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                parse_version(s).map(Some)
            }
        };

        Self {
            min_version: bound(min)?,
            max_version: bound(max)?,
            include_min,
            include_max,
            float: FloatBehavior::None,
        }
        .validate_interval()
    }

    fn parse_anchored_float<F>(
        input: &str,
        float: FloatBehavior,
        parse_version: &F,
    ) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Result<NuGetVersion, ParseError>,
    {
        let operand = input[1..].trim();
        if operand.is_empty() {
            return Err(ParseError::float_syntax(input, "missing version after operator"));
        }
        if operand.contains('*') {
            return Err(ParseError::float_syntax(
                input,
                "wildcards cannot follow '~' or '^'",
            ));
        }

        let min = parse_version(operand)
            .map_err(|e| ParseError::float_syntax(input, e.to_string()))?;
        let max = float.upper_bound(&min);

        Ok(Self {
            min_version: Some(min),
            max_version: max,
            include_min: true,
            include_max: false,
            float,
        })
    }

    fn parse_prerelease_float<F>(input: &str, parse_version: &F) -> Result<Self, ParseError>
    where
        F: Fn(&str) -> Result<NuGetVersion, ParseError>,
    {
        let base = input[..input.len() - 2].trim();
        if base.is_empty() || base.contains('*') {
            return Err(ParseError::float_syntax(
                input,
                "prerelease float needs a version before '-*'",
            ));
        }

        let base = parse_version(base).map_err(|e| ParseError::float_syntax(input, e.to_string()))?;
        if base.is_prerelease() || base.has_metadata() {
            return Err(ParseError::float_syntax(
                input,
                "prerelease float base must be a release version",
            ));
        }

        let min = NuGetVersion::with_labels(*base.version(), vec!["0".to_string()], None)?;
        Ok(Self {
            min_version: Some(min),
            max_version: None,
            include_min: true,
            include_max: false,
            float: FloatBehavior::Prerelease,
        })
    }

    fn validate_interval(self) -> Result<Self, ParseError> {
        if let (Some(min), Some(max)) = (&self.min_version, &self.max_version) {
            if min > max {
                return Err(ParseError::range_syntax(
                    &self.to_string(),
                    "minimum is greater than maximum",
                ));
            }
            if min == max && !(self.include_min && self.include_max) {
                return Err(ParseError::range_syntax(
                    &self.to_string(),
                    "interval excludes its only version",
                ));
            }
        }
        Ok(self)
    }

    pub fn min_version(&self) -> Option<&NuGetVersion> {
        self.min_version.as_ref()
    }

    pub fn max_version(&self) -> Option<&NuGetVersion> {
        self.max_version.as_ref()
    }

    pub fn include_min(&self) -> bool {
        self.include_min
    }

    pub fn include_max(&self) -> bool {
        self.include_max
    }

    pub fn float(&self) -> FloatBehavior {
        self.float
    }

    pub fn is_floating(&self) -> bool {
        self.float.is_floating()
    }

    pub fn has_lower_bound(&self) -> bool {
        self.min_version.is_some()
    }

    pub fn has_upper_bound(&self) -> bool {
        self.max_version.is_some()
    }

    pub fn has_lower_and_upper_bounds(&self) -> bool {
        self.has_lower_bound() && self.has_upper_bound()
    }

    fn is_exact(&self) -> bool {
        !self.is_floating()
            && self.include_min
            && self.include_max
            && self.min_version.is_some()
            && self.min_version == self.max_version
    }

    fn bounds(&self) -> impl Iterator<Item = &NuGetVersion> {
        self.min_version.iter().chain(self.max_version.iter())
    }

    /// Check if a version satisfies this range
    pub fn satisfies(&self, version: &NuGetVersion) -> bool {
        match self.float {
            FloatBehavior::None => self.satisfies_bounds(version),
            float => float.accepts(self.min_version.as_ref(), self.include_min, version),
        }
    }

    fn satisfies_bounds(&self, version: &NuGetVersion) -> bool {
        let above_min = self.min_version.as_ref().is_none_or(|min| {
            if self.include_min {
                version >= min
            } else {
                version > min
            }
        });
        let below_max = self.max_version.as_ref().is_none_or(|max| {
            if self.include_max {
                version <= max
            } else {
                version < max
            }
        });
        above_min && below_max
    }

    /// Approximate overlap test
    ///
    /// With both bounds present, reports whether either bound of `other`
    /// lies within the closed interval `[min, max]` of this range. Otherwise
    /// each bound of `other` is checked with [`VersionRange::satisfies`].
    /// Two ranges that straddle each other without either bound landing
    /// inside the other are reported as not overlapping.
    pub fn does_range_satisfy(&self, other: &VersionRange) -> bool {
        match (&self.min_version, &self.max_version) {
            (Some(min), Some(max)) => other.bounds().any(|bound| bound >= min && bound <= max),
            _ => other.bounds().any(|bound| self.satisfies(bound)),
        }
    }

    /// Pick the best version for this range
    ///
    /// Bounded ranges prefer the lowest satisfying version, floating ranges
    /// the highest. Returns `None` when no candidate is acceptable.
    pub fn find_best_match<'a, I>(&self, versions: I) -> Option<&'a NuGetVersion>
    where
        I: IntoIterator<Item = &'a NuGetVersion>,
    {
        versions.into_iter().fold(None, |best, candidate| {
            if self.is_better(best, candidate) {
                Some(candidate)
            } else {
                best
            }
        })
    }

    /// Decide whether `considering` should replace `current` as best match
    pub fn is_better(&self, current: Option<&NuGetVersion>, considering: &NuGetVersion) -> bool {
        if !self.is_candidate(considering) {
            return false;
        }
        let Some(current) = current else {
            return true;
        };
        if !self.is_candidate(current) {
            return true;
        }

        match (self.satisfies(current), self.satisfies(considering)) {
            (true, false) => false,
            (false, true) => true,
            (true, true) if self.is_floating() => considering > current,
            (true, true) => considering < current,
            (false, false) => self.is_nearer_min(current, considering),
        }
    }

    /// Floating `*` and prerelease floats may fall back to versions outside
    /// the range.
    fn accepts_out_of_range(&self) -> bool {
        matches!(self.float, FloatBehavior::Major | FloatBehavior::Prerelease)
    }

    fn allows_prerelease(&self) -> bool {
        self.accepts_out_of_range() || self.bounds().any(NuGetVersion::is_prerelease)
    }

    fn is_candidate(&self, version: &NuGetVersion) -> bool {
        (self.accepts_out_of_range() || self.satisfies(version))
            && (!version.is_prerelease() || self.allows_prerelease())
    }

    /// Tie-break between two out-of-range candidates by distance to the
    /// minimum boundary
    fn is_nearer_min(&self, current: &NuGetVersion, considering: &NuGetVersion) -> bool {
        let Some(min) = &self.min_version else {
            return considering > current;
        };
        match (current >= min, considering >= min) {
            (true, true) => considering < current,
            (false, false) => considering > current,
            (true, false) => false,
            (false, true) => true,
        }
    }

    /// Equivalent range without snapshot markers or floating behavior
    ///
    /// Examples:
    /// - `[1.0.0-0, 2.0.0)` -> `[1.0.0, 2.0.0)`
    /// - `1.0.0-*` -> `[1.0.0, )`
    /// - `~1.2.3` -> `[1.2.3, 1.3.0)`
    /// - `^1.0.0` -> `[1.0.0, 2.0.0)`
    pub fn to_non_snapshot_range(&self) -> VersionRange {
        let min_version = self.min_version.as_ref().map(strip_snapshot);
        let max_version = self.max_version.as_ref().map(strip_snapshot);

        match self.float {
            FloatBehavior::None | FloatBehavior::Patch | FloatBehavior::Minor => Self {
                min_version,
                max_version,
                float: FloatBehavior::None,
                ..self.clone()
            }
            .settle_stripped(self),
            FloatBehavior::Major => Self::all(),
            FloatBehavior::Prerelease => Self {
                min_version,
                include_min: self.include_min,
                ..Self::all()
            },
        }
    }

    /// Keep a stripped interval non-empty
    ///
    /// Bounds that meet become an exact range when either side was
    /// inclusive. Otherwise the unstripped bounds are kept.
    fn settle_stripped(self, original: &VersionRange) -> VersionRange {
        let (Some(min), Some(max)) = (&self.min_version, &self.max_version) else {
            return self;
        };

        if min < max {
            self
        } else if min == max && (self.include_min || self.include_max) {
            Self {
                include_min: true,
                include_max: true,
                ..self
            }
        } else {
            Self {
                float: FloatBehavior::None,
                ..original.clone()
            }
        }
    }

    /// Human readable description, e.g. `>= 1.0.0 and < 2.0.0`
    pub fn pretty_print(&self) -> String {
        match self.float {
            FloatBehavior::Major => return "any version".to_string(),
            FloatBehavior::Prerelease => {
                return match &self.min_version {
                    Some(min) => format!(
                        "prerelease versions {} {}",
                        if self.include_min { ">=" } else { ">" },
                        min.to_normalized_string()
                    ),
                    None => "any prerelease version".to_string(),
                };
            }
            _ => {}
        }

        if self.is_exact() {
            if let Some(version) = &self.min_version {
                return format!("= {}", version.to_normalized_string());
            }
        }

        let min = self.min_version.as_ref().map(|min| {
            let op = if self.include_min { ">=" } else { ">" };
            format!("{op} {}", min.to_normalized_string())
        });
        let max = self.max_version.as_ref().map(|max| {
            let op = if self.include_max { "<=" } else { "<" };
            format!("{op} {}", max.to_normalized_string())
        });

        let parts: Vec<String> = min.into_iter().chain(max).collect();
        if parts.is_empty() {
            "any version".to_string()
        } else {
            parts.join(" and ")
        }
    }
}

/// Drop a snapshot marker from the last release label
///
/// A lone `-0` label, a trailing `-0` and trailing `-` characters are
/// removed; a version left without labels becomes the release form.
fn strip_snapshot(version: &NuGetVersion) -> NuGetVersion {
    let Some((last, rest)) = version.release_labels().split_last() else {
        return version.clone();
    };

    let kept = if rest.is_empty() && last == "0" {
        ""
    } else if let Some(prefix) = last.strip_suffix("-0") {
        prefix
    } else if last.ends_with('-') {
        last.trim_end_matches('-')
    } else {
        return version.clone();
    };

    let mut labels = rest.to_vec();
    if !kept.is_empty() {
        labels.push(kept.to_string());
    }

    NuGetVersion::with_labels(
        *version.version(),
        labels,
        version.metadata().map(str::to_string),
    )
    .unwrap_or_else(|_| version.clone())
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min_version.as_ref().map(NuGetVersion::to_normalized_string);
        let max = self.max_version.as_ref().map(NuGetVersion::to_normalized_string);

        match self.float {
            FloatBehavior::Major => f.write_str("*"),
            FloatBehavior::Prerelease => match &self.min_version {
                Some(min) => write!(f, "{}-*", min.to_release().to_normalized_string()),
                None => f.write_str("*-"),
            },
            FloatBehavior::Patch => write!(f, "~{}", min.unwrap_or_default()),
            FloatBehavior::Minor => write!(f, "^{}", min.unwrap_or_default()),
            FloatBehavior::None if self.is_exact() => f.write_str(&min.unwrap_or_default()),
            FloatBehavior::None => write!(
                f,
                "{}{}, {}{}",
                if self.include_min { '[' } else { '(' },
                min.unwrap_or_default(),
                max.unwrap_or_default(),
                if self.include_max { ']' } else { ')' },
            ),
        }
    }
}

impl FromStr for VersionRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
