//! Item quantity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How many of an item to buy.
///
/// Any finite JSON number is accepted. Whole values serialize as JSON
/// integers so `1` stays `1` on the wire instead of becoming `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quantity(f64);

impl Quantity {
    /// Largest magnitude that still serializes as an exact integer.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    /// Create a quantity, rejecting NaN and infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Serialize for Quantity {
    #[allow(clippy::float_cmp)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() <= Self::MAX_EXACT {
            #[allow(clippy::cast_possible_truncation)] // bounded by MAX_EXACT above
            return serializer.serialize_i64(self.0 as i64);
        }
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| serde::de::Error::custom("quantity must be finite"))
    }
}
