use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coverage must be between 0 and 100 percent, got {0}")]
pub struct CoverageError(pub u8);

/// Percentage of the monthly lead volume that gets analyzed.
///
/// Always within `0..=100`; the slider in the widget moves in steps of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Coverage(u8);

impl Coverage {
    pub const MAX: u8 = 100;

    /// Coverage selected before the user touches the slider.
    pub const DEFAULT: Coverage = Coverage(10);

    pub fn new(percent: u8) -> Result<Self, CoverageError> {
        if percent > Self::MAX {
            return Err(CoverageError(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Coverage {
    type Error = CoverageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Coverage> for u8 {
    fn from(value: Coverage) -> Self {
        value.0
    }
}

impl fmt::Display for Coverage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
