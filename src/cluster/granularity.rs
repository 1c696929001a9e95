//! The 0-100 granularity control and the distance threshold it maps to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IntentifyError, Result};

/// Granularity of a classification run, in `0..=100`.
///
/// Higher values request more, finer-grained intents. The value maps
/// inversely onto the clustering distance threshold:
/// `threshold = 1 - granularity / 100`, so `0` merges almost everything and
/// `100` merges almost nothing.
///
/// # Examples
///
/// ```
/// use intentify::cluster::Granularity;
///
/// assert_eq!(Granularity::new(0).unwrap().distance_threshold(), 1.0);
/// assert_eq!(Granularity::new(100).unwrap().distance_threshold(), 0.0);
/// assert!(Granularity::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Granularity(u8);

impl Granularity {
    pub const MIN: Granularity = Granularity(0);
    pub const MAX: Granularity = Granularity(100);
    /// Granularity used when none is requested.
    pub const DEFAULT: Granularity = Granularity(16);

    pub fn new(value: u32) -> Result<Self> {
        if value > 100 {
            return Err(IntentifyError::invalid_argument(format!(
                "granularity must be in 0..=100, got {value}"
            )));
        }
        Ok(Granularity(value as u8))
    }

    pub fn value(&self) -> u32 {
        u32::from(self.0)
    }

    /// Distance below which clusters keep merging.
    pub fn distance_threshold(&self) -> f64 {
        1.0 - f64::from(self.0) / 100.0
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::DEFAULT
    }
}

impl TryFrom<u32> for Granularity {
    type Error = IntentifyError;

    fn try_from(value: u32) -> Result<Self> {
        Granularity::new(value)
    }
}

impl From<Granularity> for u32 {
    fn from(granularity: Granularity) -> Self {
        granularity.value()
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
