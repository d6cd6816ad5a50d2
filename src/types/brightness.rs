// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global strip brightness.

use std::fmt;
use std::num::IntErrorKind;

use serde::Serialize;

use crate::error::ValueError;

/// Global brightness on the device's 0-255 scale.
///
/// Every `u8` is a valid brightness, so the interesting constructor is
/// [`Brightness::parse_clamped`], which accepts any integer text and clamps it
/// into range.
///
/// # Examples
///
/// ```
/// use tmcc_wled::types::Brightness;
///
/// assert_eq!(Brightness::parse_clamped("128").unwrap().value(), 128);
/// assert_eq!(Brightness::parse_clamped("999").unwrap(), Brightness::MAX);
/// assert_eq!(Brightness::parse_clamped("-4").unwrap(), Brightness::MIN);
/// assert!(Brightness::parse_clamped("bright").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Fully dark.
    pub const MIN: Self = Self(0);

    /// Full brightness.
    pub const MAX: Self = Self(255);

    /// Creates a brightness value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Creates a brightness from any integer, clamping into `[0, 255]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self::MIN
        } else if value > 255 {
            Self::MAX
        } else {
            Self(value as u8)
        }
    }

    /// Parses integer text and clamps it into `[0, 255]`.
    ///
    /// Surrounding whitespace and a leading sign are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidInteger` if the text is not an integer.
    pub fn parse_clamped(text: &str) -> Result<Self, ValueError> {
        match text.trim().parse::<i64>() {
            Ok(value) => Ok(Self::clamped(value)),
            // Integers too wide for i64 are still integers.
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Self::MAX),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(Self::MIN),
            Err(_) => Err(ValueError::InvalidInteger {
                field: "brightness",
                value: text.to_string(),
            }),
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_bounds() {
        assert_eq!(Brightness::clamped(-1), Brightness::MIN);
        assert_eq!(Brightness::clamped(0).value(), 0);
        assert_eq!(Brightness::clamped(255).value(), 255);
        assert_eq!(Brightness::clamped(256), Brightness::MAX);
        assert_eq!(Brightness::clamped(999).value(), 255);
    }

    #[test]
    fn parse_clamps_integers_wider_than_i64() {
        assert_eq!(
            Brightness::parse_clamped("99999999999999999999").unwrap(),
            Brightness::MAX
        );
        assert_eq!(
            Brightness::parse_clamped("-99999999999999999999").unwrap(),
            Brightness::MIN
        );
        assert!(Brightness::parse_clamped("9999999999999999999x").is_err());
    }

    #[test]
    fn parse_accepts_whitespace_and_sign() {
        assert_eq!(Brightness::parse_clamped(" 42 ").unwrap().value(), 42);
        assert_eq!(Brightness::parse_clamped("+42").unwrap().value(), 42);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!(
            Brightness::parse_clamped("12.5"),
            Err(ValueError::InvalidInteger {
                field: "brightness",
                value: "12.5".to_string(),
            })
        );
        assert!(Brightness::parse_clamped("").is_err());
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_value(Brightness::MAX).unwrap(), 255);
    }
}
