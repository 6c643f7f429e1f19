// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel weighting for the greyscale conversion.

use crate::error::CarveError;

const MAX_WEIGHT: u32 = 100;

/// Per-channel contributions to a grey value, plus the divisor that
/// brings their weighted sum back into channel range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RgbWeights {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub amount: u32,
}

impl RgbWeights {
    /// Weights whose divisor is their own sum.  The sum saturates, so
    /// out-of-range weights are left for `validate` to report.
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        RgbWeights {
            red,
            green,
            blue,
            amount: red.saturating_add(green).saturating_add(blue),
        }
    }

    /// Weights with an explicitly declared divisor.
    pub fn with_amount(red: u32, green: u32, blue: u32, amount: u32) -> Self {
        RgbWeights {
            red,
            green,
            blue,
            amount,
        }
    }

    /// The largest of the three weights; the hue operation scales by it.
    pub fn max_weight(&self) -> u32 {
        self.red.max(self.green).max(self.blue)
    }

    pub fn validate(&self) -> Result<(), CarveError> {
        for &(channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
        ]
        .iter()
        {
            if value > MAX_WEIGHT {
                return Err(CarveError::InvalidWeight { channel, value });
            }
        }
        if self.amount == 0 {
            return Err(CarveError::ZeroDivisor);
        }
        Ok(())
    }

    /// Weighted grey value of one `[r, g, b]` triple.
    #[inline]
    pub fn grey(&self, rgb: [u32; 3]) -> u32 {
        (self.red * rgb[0] + self.green * rgb[1] + self.blue * rgb[2]) / self.amount
    }
}

impl Default for RgbWeights {
    /// The usual luma approximation, in percent.
    fn default() -> Self {
        RgbWeights::new(30, 59, 11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_valid() {
        let weights = RgbWeights::default();
        assert_eq!(weights.amount, 100);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn weight_over_one_hundred_is_rejected() {
        assert_eq!(
            RgbWeights::new(10, 101, 0).validate(),
            Err(CarveError::InvalidWeight {
                channel: "green",
                value: 101
            })
        );
    }

    #[test]
    fn huge_weights_are_rejected_not_wrapped() {
        let weights = RgbWeights::new(u32::MAX, 1, 0);
        assert_eq!(weights.amount, u32::MAX);
        assert_eq!(
            weights.validate(),
            Err(CarveError::InvalidWeight {
                channel: "red",
                value: u32::MAX
            })
        );
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(RgbWeights::new(0, 0, 0).validate(), Err(CarveError::ZeroDivisor));
        assert_eq!(
            RgbWeights::with_amount(1, 1, 1, 0).validate(),
            Err(CarveError::ZeroDivisor)
        );
    }

    #[test]
    fn grey_is_the_weighted_mean() {
        let weights = RgbWeights::new(1, 1, 1);
        assert_eq!(weights.grey([30, 60, 90]), 60);
        let red_only = RgbWeights::with_amount(100, 0, 0, 100);
        assert_eq!(red_only.grey([77, 255, 255]), 77);
    }
}
