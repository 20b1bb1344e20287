//! Hand-written version scanner and the caching parser service
//!
//! Accepted shape: `N[.N[.N[.N]]][-label(.label)*][+meta(.meta)*]`
//!
//! - One to four numeric groups; missing trailing groups default to `0`.
//! - Each group may start with spaces, must contain ASCII digits only and
//!   must fit a signed 32-bit integer.
//! - The first `-` starts the release labels, the first `+` after it (or a
//!   `+` with no `-` before it) starts the build metadata.

use std::sync::LazyLock;

use tracing::debug;

use crate::config::ParserConfig;
use crate::version::cache::{ParseCache, VersionCache};
use crate::version::error::ParseError;
use crate::version::legacy::Version;
use crate::version::nuget::NuGetVersion;
use crate::version::range::VersionRange;
use crate::version::semantic::SemanticVersion;
use crate::version::semver::{is_valid_metadata_label, is_valid_release_label};

const MAX_NUMERIC_SEGMENTS: usize = 4;

/// Raw slices of a trimmed version string
struct Sections<'a> {
    core: &'a str,
    release: Option<&'a str>,
    metadata: Option<&'a str>,
}

/// Split into core, release and metadata in one forward scan
fn split_sections(input: &str) -> Sections<'_> {
    let mut dash = None;
    let mut plus = None;

    for (i, b) in input.bytes().enumerate() {
        match b {
            b'-' if dash.is_none() => dash = Some(i),
            b'+' => {
                plus = Some(i);
                break;
            }
            _ => {}
        }
    }

    let core_end = dash.or(plus).unwrap_or(input.len());
    Sections {
        core: &input[..core_end],
        release: dash.map(|d| &input[d + 1..plus.unwrap_or(input.len())]),
        metadata: plus.map(|p| &input[p + 1..]),
    }
}

fn parse_core(input: &str, core: &str) -> Result<Version, ParseError> {
    let mut segments = [0u32; MAX_NUMERIC_SEGMENTS];
    let mut count = 0;

    for group in core.split('.') {
        if count == MAX_NUMERIC_SEGMENTS {
            return Err(ParseError::malformed_core(
                input,
                "more than four numeric segments",
            ));
        }

        let digits = group.trim_start_matches(' ');
        if digits.is_empty() {
            return Err(ParseError::malformed_core(input, "empty numeric segment"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::malformed_core(
                input,
                format!("segment '{group}' is not numeric"),
            ));
        }

        // All digits, so the only possible failure is overflow
        let value: i32 = digits.parse().map_err(|_| {
            ParseError::malformed_core(
                input,
                format!("segment '{digits}' overflows a 32-bit integer"),
            )
        })?;
        segments[count] = value as u32;
        count += 1;
    }

    let [major, minor, build, revision] = segments;
    Ok(Version::new(major, minor, build, revision))
}

fn parse_release_labels(input: &str, section: &str) -> Result<Vec<String>, ParseError> {
    section
        .split('.')
        .map(|label| {
            if is_valid_release_label(label) {
                Ok(label.to_string())
            } else {
                Err(ParseError::InvalidReleaseLabel {
                    input: input.to_string(),
                    label: label.to_string(),
                })
            }
        })
        .collect()
}

fn validate_metadata(input: &str, section: &str) -> Result<(), ParseError> {
    match section.split('.').find(|label| !is_valid_metadata_label(label)) {
        Some(label) => Err(ParseError::InvalidBuildMetadata {
            input: input.to_string(),
            label: label.to_string(),
        }),
        None => Ok(()),
    }
}

/// Parse without touching any cache
pub fn parse_uncached(input: &str) -> Result<NuGetVersion, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let sections = split_sections(trimmed);
    let version = parse_core(trimmed, sections.core)?;

    let release_labels = match sections.release {
        Some(section) => parse_release_labels(trimmed, section)?,
        None => Vec::new(),
    };

    if let Some(section) = sections.metadata {
        validate_metadata(trimmed, section)?;
    }

    let semver = SemanticVersion::from_validated(
        version.major,
        version.minor,
        version.build,
        release_labels,
        sections.metadata.map(str::to_string),
    );
    let original: String = trimmed.chars().filter(|c| *c != ' ').collect();

    Ok(NuGetVersion::from_parts(version, semver, Some(original)))
}

/// Version parsing service owning its memoization cache
pub struct VersionParser<C: ParseCache = VersionCache> {
    cache: C,
}

impl VersionParser<VersionCache> {
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(VersionCache::from_config(&config.cache))
    }
}

impl Default for VersionParser<VersionCache> {
    fn default() -> Self {
        Self::new(VersionCache::default())
    }
}

impl<C: ParseCache> VersionParser<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Parse a version, consulting the cache first
    ///
    /// Only successful parses are memoized.
    pub fn parse(&self, input: &str) -> Result<NuGetVersion, ParseError> {
        let key = input.trim();
        if let Some(hit) = self.cache.get(key) {
            return Ok(hit);
        }

        let version = parse_uncached(key)?;
        self.cache.insert(key, &version);
        Ok(version)
    }

    /// Recoverable variant of [`VersionParser::parse`]
    pub fn try_parse(&self, input: &str) -> Option<NuGetVersion> {
        self.parse(input)
            .inspect_err(|e| debug!("Rejected version '{}': {}", input, e))
            .ok()
    }

    /// Parse a range expression, resolving its bounds through this parser
    pub fn parse_range(&self, input: &str) -> Result<VersionRange, ParseError> {
        VersionRange::parse_with(input, |s| self.parse(s))
    }
}

static DEFAULT_PARSER: LazyLock<VersionParser> = LazyLock::new(VersionParser::default);

/// Process-wide parser backing the free functions
pub fn default_parser() -> &'static VersionParser {
    &DEFAULT_PARSER
}

pub fn parse(input: &str) -> Result<NuGetVersion, ParseError> {
    default_parser().parse(input)
}

pub fn try_parse(input: &str) -> Option<NuGetVersion> {
    default_parser().try_parse(input)
}

pub fn parse_range(input: &str) -> Result<VersionRange, ParseError> {
    default_parser().parse_range(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, EvictionPolicy};
    use crate::version::cache::MockParseCache;
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[case("1", (1, 0, 0, 0))]
    #[case("1.2", (1, 2, 0, 0))]
    #[case("1.2.3", (1, 2, 3, 0))]
    #[case("1.2.3.4", (1, 2, 3, 4))]
    #[case("  1.2.3  ", (1, 2, 3, 0))]
    #[case("1. 2. 3", (1, 2, 3, 0))]
    #[case("007.0.1", (7, 0, 1, 0))]
    #[case("2147483647.0.0", (2147483647, 0, 0, 0))]
    fn parse_accepts_numeric_core(#[case] input: &str, #[case] expected: (u32, u32, u32, u32)) {
        let version = parse_uncached(input).unwrap();
        assert_eq!(
            (
                version.major(),
                version.minor(),
                version.patch(),
                version.revision()
            ),
            expected
        );
    }

    #[rstest]
    #[case("x.0.0")]
    #[case("1.x")]
    #[case("1..2")]
    #[case("1.")]
    #[case(".1")]
    #[case("1.2.3.4.5")]
    #[case("2147483648.0.0")]
    #[case("1.0 .0")]
    #[case("-beta")]
    #[case("+meta")]
    #[case("v1.0.0")]
    fn parse_rejects_malformed_core(#[case] input: &str) {
        assert!(matches!(
            parse_uncached(input),
            Err(ParseError::MalformedVersionCore { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn parse_rejects_empty_input(#[case] input: &str) {
        assert_eq!(parse_uncached(input), Err(ParseError::EmptyInput));
    }

    #[rstest]
    #[case("1.0.0-", "")]
    #[case("1.0.0-alpha..1", "")]
    #[case("1.0.0-01", "01")]
    #[case("1.0.0-beta_2", "beta_2")]
    #[case("1.0.0-rc.1.02+meta", "02")]
    fn parse_rejects_invalid_release_label(#[case] input: &str, #[case] label: &str) {
        assert_eq!(
            parse_uncached(input),
            Err(ParseError::InvalidReleaseLabel {
                input: input.to_string(),
                label: label.to_string(),
            })
        );
    }

    #[rstest]
    #[case("1.0.0+")]
    #[case("1.0.0+a..b")]
    #[case("1.0.0-rc+a+b")]
    #[case("1.0.0+meta_data")]
    fn parse_rejects_invalid_metadata(#[case] input: &str) {
        assert!(matches!(
            parse_uncached(input),
            Err(ParseError::InvalidBuildMetadata { .. })
        ));
    }

    #[rstest]
    #[case("1.0.0-alpha", &["alpha"], None)]
    #[case("1.0.0-alpha.1", &["alpha", "1"], None)]
    #[case("1.0.0-x-y-z.--", &["x-y-z", "--"], None)]
    #[case("1.0.0+build.001", &[], Some("build.001"))]
    #[case("1.0.0+sha-1", &[], Some("sha-1"))]
    #[case("1.0.0-rc.1+sha.5", &["rc", "1"], Some("sha.5"))]
    #[case("1.0.0+meta-with-dash", &[], Some("meta-with-dash"))]
    fn parse_splits_labels_and_metadata(
        #[case] input: &str,
        #[case] labels: &[&str],
        #[case] metadata: Option<&str>,
    ) {
        let version = parse_uncached(input).unwrap();
        assert_eq!(version.release_labels(), labels);
        assert_eq!(version.metadata(), metadata);
    }

    #[test]
    fn parse_keeps_trimmed_original_without_internal_spaces() {
        let version = parse_uncached("  1. 02.3-beta  ").unwrap();
        assert_eq!(version.original_version(), "1.02.3-beta");
    }

    #[test]
    fn parse_inserts_successful_result_into_cache() {
        let mut cache = MockParseCache::new();
        cache
            .expect_get()
            .with(eq("1.2.3"))
            .times(1)
            .returning(|_| None);
        cache
            .expect_insert()
            .withf(|input, version| input == "1.2.3" && version.to_string() == "1.2.3")
            .times(1)
            .return_const(());

        let parser = VersionParser::new(cache);
        assert_eq!(parser.parse(" 1.2.3 ").unwrap().to_string(), "1.2.3");
    }

    #[test]
    fn parse_returns_cached_version_without_rescanning() {
        let mut cache = MockParseCache::new();
        cache
            .expect_get()
            .returning(|_| NuGetVersion::new(9, 9, 9, 0).ok());
        cache.expect_insert().times(0);

        let parser = VersionParser::new(cache);
        assert_eq!(
            parser.parse("1.0.0").unwrap(),
            NuGetVersion::new(9, 9, 9, 0).unwrap()
        );
    }

    #[test]
    fn parse_does_not_cache_failures() {
        let mut cache = MockParseCache::new();
        cache.expect_get().returning(|_| None);
        cache.expect_insert().times(0);

        let parser = VersionParser::new(cache);
        assert!(parser.parse("not.a.version").is_err());
        assert_eq!(parser.try_parse("not.a.version"), None);
    }

    #[test]
    fn parse_results_are_stable_across_evictions() {
        let parser = VersionParser::from_config(&ParserConfig {
            cache: CacheConfig {
                capacity: 2,
                eviction: EvictionPolicy::ClearOnOverflow,
            },
        });

        let first = parser.parse("1.0.0-beta+a").unwrap();
        for i in 0..10 {
            parser.parse(&format!("{i}.0.0")).unwrap();
        }
        let second = parser.parse("1.0.0-beta+a").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert!(parser.cache().len() <= 2);
    }

    #[test]
    fn parse_range_uses_the_same_parser() {
        let parser = VersionParser::default();
        let range = parser.parse_range("[1.0.0, 2.0.0)").unwrap();

        assert!(range.satisfies(&parser.parse("1.5.0").unwrap()));
        assert_eq!(parser.cache().len(), 3);
    }
}
