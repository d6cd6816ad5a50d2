// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing and interpolation.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// Serializes as the `[r, g, b]` triple the WLED JSON API expects inside a
/// segment's `col` list.
///
/// # Examples
///
/// ```
/// use tmcc_wled::types::RgbColor;
///
/// let color = RgbColor::from_hex("#FF8000").unwrap();
/// assert_eq!(color, RgbColor::new(255, 128, 0));
/// assert_eq!(color.to_string(), "#FF8000");
///
/// assert!(RgbColor::from_hex("zzzzzz").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a color from six hex digits, with an optional leading `#`.
    ///
    /// Digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string is not exactly six
    /// hex digits after the optional `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        // from_str_radix tolerates a leading '+', so validate digits up front.
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        let r = parse_hex_pair(&digits[0..2], hex)?;
        let g = parse_hex_pair(&digits[2..4], hex)?;
        let b = parse_hex_pair(&digits[4..6], hex)?;
        Ok(Self::new(r, g, b))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Linearly interpolates each channel towards `other`.
    ///
    /// `t` is expected in `[0, 1]`. Each channel is truncated toward zero,
    /// so `t = 0` returns `self` exactly.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            lerp_channel(self.red, other.red, t),
            lerp_channel(self.green, other.green, t),
            lerp_channel(self.blue, other.blue, t),
        )
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.red)?;
        triple.serialize_element(&self.green)?;
        triple.serialize_element(&self.blue)?;
        triple.end()
    }
}

fn parse_hex_pair(pair: &str, original: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(pair, 16).map_err(|_| ValueError::InvalidHexColor(original.to_string()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = f64::from(from);
    let value = from + (f64::from(to) - from) * t;
    value.trunc().clamp(0.0, 255.0) as u8
}
