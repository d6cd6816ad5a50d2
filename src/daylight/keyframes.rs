// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sky color keyframes and interpolation.

use crate::error::ValueError;
use crate::types::RgbColor;

/// An `(hour, color)` anchor of the sky color curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Virtual hour in `[0, 24]`.
    pub hour: f64,
    /// Sky color at that hour.
    pub color: RgbColor,
}

/// Keyframes sorted by hour.
///
/// # Examples
///
/// ```
/// use tmcc_wled::daylight::KeyframeTable;
/// use tmcc_wled::types::RgbColor;
///
/// let table = KeyframeTable::default();
/// assert_eq!(table.sky_color(12.0), RgbColor::new(255, 255, 240));
/// assert_eq!(table.sky_color(0.0), table.sky_color(24.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTable {
    frames: Vec<Keyframe>,
}

impl KeyframeTable {
    /// Builds a table from `(hour, color)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidSetting` if the table is empty, an hour
    /// lies outside `[0, 24]` or is not finite, or two keyframes share an
    /// hour.
    pub fn new(pairs: impl IntoIterator<Item = (f64, RgbColor)>) -> Result<Self, ValueError> {
        let mut frames: Vec<Keyframe> = pairs
            .into_iter()
            .map(|(hour, color)| Keyframe { hour, color })
            .collect();

        if frames.is_empty() {
            return Err(invalid("at least one keyframe is required".to_string()));
        }
        if let Some(bad) = frames.iter().find(|k| !(0.0..=24.0).contains(&k.hour)) {
            return Err(invalid(format!("hour {} is outside [0, 24]", bad.hour)));
        }

        frames.sort_by(|a, b| a.hour.total_cmp(&b.hour));
        if let Some(pair) = frames.windows(2).find(|w| w[0].hour == w[1].hour) {
            return Err(invalid(format!("hour {} appears twice", pair[0].hour)));
        }

        Ok(Self { frames })
    }

    /// Returns the keyframes in ascending hour order.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Resolves the sky color at a virtual hour.
    ///
    /// The lower bound is the last keyframe at or before `hour`, the upper
    /// bound the first keyframe at or after it. When both are the same
    /// keyframe its color is returned unchanged; otherwise the channels are
    /// interpolated linearly. Hours outside the table clamp to the nearest
    /// end.
    #[must_use]
    pub fn sky_color(&self, hour: f64) -> RgbColor {
        let first = self.frames[0];
        let last = self.frames[self.frames.len() - 1];

        let lower = self
            .frames
            .iter()
            .rev()
            .find(|k| k.hour <= hour)
            .copied()
            .unwrap_or(first);
        let upper = self
            .frames
            .iter()
            .find(|k| k.hour >= hour)
            .copied()
            .unwrap_or(last);

        if lower.hour >= upper.hour {
            return lower.color;
        }

        let t = (hour - lower.hour) / (upper.hour - lower.hour);
        lower.color.lerp(&upper.color, t)
    }
}

impl Default for KeyframeTable {
    /// Midnight blue through sunrise orange, noon white, sunset and dusk
    /// purple, back to midnight blue at hour 24.
    fn default() -> Self {
        let frames = [
            (0.0, RgbColor::new(40, 40, 100)),
            (5.0, RgbColor::new(50, 50, 120)),
            (6.0, RgbColor::new(255, 150, 80)),
            (8.0, RgbColor::new(255, 220, 180)),
            (12.0, RgbColor::new(255, 255, 240)),
            (16.0, RgbColor::new(255, 240, 220)),
            (18.0, RgbColor::new(255, 140, 60)),
            (20.0, RgbColor::new(80, 60, 120)),
            (21.0, RgbColor::new(60, 60, 130)),
            (24.0, RgbColor::new(40, 40, 100)),
        ]
        .map(|(hour, color)| Keyframe { hour, color })
        .to_vec();

        Self { frames }
    }
}

fn invalid(reason: String) -> ValueError {
    ValueError::InvalidSetting {
        name: "keyframes",
        reason,
    }
}
