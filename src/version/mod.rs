//! NuGet versioning engine
//!
//! This module parses NuGet version strings, orders them by SemVer 2.0
//! precedence (extended with the legacy fourth segment) and matches them
//! against version ranges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │   Parser    │────▶│    Cache    │     │ VersionRange │
//! │  (scanner)  │     │  (memoize)  │     │ (match/best) │
//! └─────────────┘     └─────────────┘     └──────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │NuGetVersion │◀────────────────────────│    Float    │
//! │(legacy+semv)│                         │ (~, ^, *)   │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`legacy`]: Four-segment .NET `Version`
//! - [`semantic`]: SemVer 2.0 shaped `SemanticVersion`
//! - [`nuget`]: `NuGetVersion`, the composite of both
//! - [`semver`]: Shared label validation and precedence rules
//! - [`parser`]: Hand-written scanner and the caching `VersionParser`
//! - [`cache`]: Bounded parse cache
//! - [`range`]: `VersionRange` grammar, satisfaction, overlap and best match
//! - [`float`]: Floating range behavior
//! - [`comparer`]: Comparison modes
//! - [`error`]: Parse error taxonomy

pub mod cache;
pub mod comparer;
pub mod error;
pub mod float;
pub mod legacy;
pub mod nuget;
pub mod parser;
pub mod range;
pub mod semantic;
pub mod semver;

pub use error::ParseError;
pub use float::FloatBehavior;
pub use legacy::Version;
pub use nuget::NuGetVersion;
pub use parser::{VersionParser, parse, parse_range, try_parse};
pub use range::VersionRange;
pub use semantic::SemanticVersion;
