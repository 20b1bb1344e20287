use thiserror::Error;

/// Failure to parse a version or a version range.
///
/// Every variant is a permanent input error; parsing is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Version string is empty")]
    EmptyInput,

    #[error("Malformed version core '{input}': {reason}")]
    MalformedVersionCore { input: String, reason: String },

    #[error("Invalid release label '{label}' in '{input}'")]
    InvalidReleaseLabel { input: String, label: String },

    #[error("Invalid build metadata '{label}' in '{input}'")]
    InvalidBuildMetadata { input: String, label: String },

    #[error("Invalid range syntax '{input}': {reason}")]
    InvalidRangeSyntax { input: String, reason: String },

    #[error("Invalid float syntax '{input}': {reason}")]
    InvalidFloatSyntax { input: String, reason: String },

    #[error("Version component {component} must not be negative: {value}")]
    NegativeComponent { component: &'static str, value: i64 },
}

impl ParseError {
    pub(crate) fn malformed_core(input: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedVersionCore {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range_syntax(input: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidRangeSyntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn float_syntax(input: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidFloatSyntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
