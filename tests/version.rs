use std::collections::HashSet;

use nuget_version::version::comparer::{VersionComparison, sort_versions};
use nuget_version::{NuGetVersion, ParseError, Version, parse, try_parse};
use rstest::rstest;

fn v(s: &str) -> NuGetVersion {
    parse(s).unwrap()
}

#[rstest]
#[case("1.0.0-alpha", "1.0.0-alpha.1")]
#[case("1.0.0-alpha.1", "1.0.0-alpha.beta")]
#[case("1.0.0-alpha.beta", "1.0.0-beta")]
#[case("1.0.0-beta", "1.0.0-beta.2")]
#[case("1.0.0-beta.2", "1.0.0-beta.11")]
#[case("1.0.0-beta.11", "1.0.0-rc.1")]
#[case("1.0.0-rc.1", "1.0.0")]
#[case("1.0.0", "1.0.0.1")]
#[case("1.0.0.1", "1.0.1")]
#[case("1.9.0", "1.10.0")]
fn versions_follow_semver_precedence(#[case] lower: &str, #[case] higher: &str) {
    assert!(v(lower) < v(higher), "{lower} < {higher}");
}

#[test]
fn metadata_does_not_affect_equality_or_hash() {
    let a = v("1.0.0+build.1");
    let b = v("1.0.0+build.2");

    assert_eq!(a, b);
    let set: HashSet<NuGetVersion> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn missing_segments_default_to_zero() {
    assert_eq!(v("1"), v("1.0.0"));
    assert_eq!(v("1.2"), v("1.2.0.0"));
    assert_eq!(v("1.2").to_normalized_string(), "1.2.0");
}

#[rstest]
#[case("1.0.0", "1.0.0", "1.0.0")]
#[case("1.0.0.0", "1.0.0", "1.0.0")]
#[case("1.0.0.4-rc.1+sha.9", "1.0.0.4-rc.1", "1.0.0.4-rc.1+sha.9")]
#[case("  2.1-beta ", "2.1.0-beta", "2.1.0-beta")]
fn string_forms(#[case] input: &str, #[case] normalized: &str, #[case] full: &str) {
    let version = v(input);

    assert_eq!(version.to_normalized_string(), normalized);
    assert_eq!(version.to_full_string(), full);
}

#[test]
fn original_string_is_preserved() {
    assert_eq!(v("01.002.3").original_version(), "01.002.3");
    assert_eq!(v("01.002.3"), v("1.2.3"));
}

#[test]
fn flags_reflect_parsed_parts() {
    let legacy = v("1.0.0.1");
    assert!(legacy.is_legacy_version());
    assert!(!legacy.is_prerelease());
    assert!(!legacy.is_semver2());

    let semver2 = v("1.0.0-rc.1");
    assert!(semver2.is_prerelease());
    assert!(semver2.is_semver2());

    let with_metadata = v("1.0.0+sha");
    assert!(with_metadata.is_semver2());
    assert!(with_metadata.has_metadata());
}

#[rstest]
#[case("", ParseError::EmptyInput)]
#[case("   ", ParseError::EmptyInput)]
fn empty_input_is_rejected(#[case] input: &str, #[case] expected: ParseError) {
    assert_eq!(parse(input).unwrap_err(), expected);
}

#[rstest]
#[case("a.b.c")]
#[case("1..0")]
#[case("1.0.0.0.0")]
#[case("1.0.0.")]
#[case("2147483648.0.0")]
fn malformed_core_is_rejected(#[case] input: &str) {
    assert!(matches!(
        parse(input),
        Err(ParseError::MalformedVersionCore { .. })
    ));
}

#[rstest]
#[case("1.0.0-")]
#[case("1.0.0-beta..1")]
#[case("1.0.0-01")]
#[case("1.0.0-beta_1")]
fn invalid_release_label_is_rejected(#[case] input: &str) {
    assert!(matches!(
        parse(input),
        Err(ParseError::InvalidReleaseLabel { .. })
    ));
}

#[rstest]
#[case("1.0.0+")]
#[case("1.0.0+a..b")]
#[case("1.0.0+a$b")]
fn invalid_metadata_is_rejected(#[case] input: &str) {
    assert!(matches!(
        parse(input),
        Err(ParseError::InvalidBuildMetadata { .. })
    ));
}

#[test]
fn try_parse_returns_none_for_invalid_input() {
    assert!(try_parse("not-a-version").is_none());
    assert_eq!(try_parse("1.2.3"), Some(NuGetVersion::new(1, 2, 3, 0).unwrap()));
}

#[test]
fn negative_components_are_rejected() {
    assert_eq!(
        Version::try_from_signed(1, -2, 0, 0).unwrap_err(),
        ParseError::NegativeComponent {
            component: "minor",
            value: -2
        }
    );
}

#[test]
fn sort_modes_order_versions() {
    let mut versions: Vec<NuGetVersion> = ["2.0.0", "1.0.0+b", "1.0.0-beta", "1.0.0+a"]
        .into_iter()
        .map(v)
        .collect();

    sort_versions(&mut versions, VersionComparison::VersionReleaseMetadata);

    let sorted: Vec<String> = versions.iter().map(NuGetVersion::to_full_string).collect();
    assert_eq!(sorted, ["1.0.0-beta", "1.0.0+a", "1.0.0+b", "2.0.0"]);
}

#[test]
fn versions_round_trip_through_json() {
    let version = v("1.2.3-rc.1+sha");
    let json = serde_json::to_string(&version).unwrap();

    assert_eq!(json, "\"1.2.3-rc.1+sha\"");
    let back: NuGetVersion = serde_json::from_str(&json).unwrap();
    assert_eq!(back.metadata(), Some("sha"));
}
