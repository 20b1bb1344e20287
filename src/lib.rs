//! NuGet version parsing, ordering and range matching
//!
//! ```
//! use nuget_version::{parse, parse_range};
//!
//! let range = parse_range("[1.0.0, 2.0.0)").unwrap();
//! let candidates = ["0.9.0", "1.2.0", "1.5.0", "2.0.0"].map(|s| parse(s).unwrap());
//!
//! assert!(range.satisfies(&candidates[1]));
//! assert_eq!(range.find_best_match(&candidates).unwrap().to_string(), "1.2.0");
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod version;

pub use version::{
    FloatBehavior, NuGetVersion, ParseError, SemanticVersion, Version, VersionParser,
    VersionRange, parse, parse_range, try_parse,
};
