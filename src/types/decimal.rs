//! Fixed-point decimal parameter values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-point decimal stored as `(mantissa, scale)`.
///
/// The represented number is `mantissa / 10^scale`, so `Decimal::new(12345, 2)`
/// is `123.45`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    /// Largest scale accepted; larger scales are clamped.
    pub const MAX_SCALE: u8 = 28;

    /// Creates a decimal from a mantissa and a scale.
    #[must_use]
    pub fn new(mantissa: i128, scale: u8) -> Self {
        Decimal {
            mantissa,
            scale: scale.min(Self::MAX_SCALE),
        }
    }

    /// Returns the unscaled integer value.
    #[must_use]
    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub fn scale(&self) -> u8 {
        self.scale
    }

    /// Lossy conversion to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 / 10f64.powi(i32::from(self.scale))
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Decimal::new(i128::from(v), 0)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal::new(i128::from(v), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = usize::from(self.scale);

        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() <= scale {
            write!(f, "0.{}{digits}", "0".repeat(scale - digits.len()))
        } else {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        }
    }
}
