//! Legacy four-segment .NET version (`Major.Minor.Build.Revision`)

use std::fmt;

use crate::version::error::ParseError;

/// Largest segment value; segments are signed 32-bit integers on the wire
pub const MAX_COMPONENT: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Build a version from signed components, rejecting negative values.
    ///
    /// Components above [`MAX_COMPONENT`] are rejected too.
    pub fn try_from_signed(
        major: i64,
        minor: i64,
        build: i64,
        revision: i64,
    ) -> Result<Self, ParseError> {
        fn component(name: &'static str, value: i64) -> Result<u32, ParseError> {
            if value < 0 {
                return Err(ParseError::NegativeComponent {
                    component: name,
                    value,
                });
            }
            u32::try_from(value)
                .ok()
                .filter(|v| *v <= MAX_COMPONENT)
                .ok_or_else(|| ParseError::MalformedVersionCore {
                    input: value.to_string(),
                    reason: format!("{name} component overflows a 32-bit integer"),
                })
        }

        Ok(Self {
            major: component("major", major)?,
            minor: component("minor", minor)?,
            build: component("build", build)?,
            revision: component("revision", revision)?,
        })
    }

    /// Reject components the parser could never have produced
    pub fn check_bounds(&self) -> Result<(), ParseError> {
        let segments = [
            ("major", self.major),
            ("minor", self.minor),
            ("build", self.build),
            ("revision", self.revision),
        ];
        match segments.iter().find(|(_, value)| *value > MAX_COMPONENT) {
            Some((name, _)) => Err(ParseError::MalformedVersionCore {
                input: self.to_string(),
                reason: format!("{name} component overflows a 32-bit integer"),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}
