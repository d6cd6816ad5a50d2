// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Day/night ambient lighting cycle.
//!
//! A full simulated day is compressed into a configurable wall-clock
//! duration. Every update interval the background loop maps elapsed time to a
//! virtual hour, resolves the sky color from a [`KeyframeTable`] and pushes a
//! two-segment state: the whole strip in sky color plus a small "moon"
//! segment that glows pale blue-white at night.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use tmcc_wled::daylight::{DaylightConfig, VirtualClock, is_night};
//!
//! let config = DaylightConfig::new()
//!     .with_cycle_duration(Duration::from_secs(240))
//!     .with_led_count(60);
//!
//! // 30 s into a 4 minute day is 03:00.
//! let clock = VirtualClock::at(30.0, config.cycle_duration().as_secs_f64());
//! assert_eq!(clock.hour, 3.0);
//! assert!(is_night(clock.hour));
//! ```

mod keyframes;
mod simulator;

use std::time::Duration;

pub use keyframes::{Keyframe, KeyframeTable};
pub use simulator::{DaylightSimulator, STOP_TIMEOUT};

use crate::error::ValueError;
use crate::state::{LightingState, Segment};
use crate::types::RgbColor;

/// Moon color while [`is_night`] holds.
pub const MOON_COLOR: RgbColor = RgbColor::new(180, 180, 200);

/// Returns `true` between 21:00 and 05:00.
#[must_use]
pub fn is_night(hour: f64) -> bool {
    hour < 5.0 || hour >= 21.0
}

/// Returns `true` between 20:00 and 04:00, when lightning looks plausible.
///
/// The loop never triggers lightning on its own; callers combine this with
/// [`DaylightConfig::lightning_every_n_cycles`] and
/// [`DaylightSimulator::flash`] if they want storms.
#[must_use]
pub fn is_lightning_window(hour: f64) -> bool {
    hour >= 20.0 || hour < 4.0
}

/// Simulated time of day derived from elapsed wall-clock seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualClock {
    /// Virtual hour in `[0, 24)`.
    pub hour: f64,
    /// Number of completed simulated days.
    pub cycle: u64,
}

impl VirtualClock {
    /// Maps `elapsed` seconds onto a day lasting `cycle_duration` seconds.
    ///
    /// `cycle_duration` must be positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn at(elapsed: f64, cycle_duration: f64) -> Self {
        let progress = elapsed.rem_euclid(cycle_duration) / cycle_duration;
        Self {
            hour: progress * 24.0,
            cycle: (elapsed / cycle_duration).floor().max(0.0) as u64,
        }
    }
}

/// Tuning parameters of the daylight cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DaylightConfig {
    cycle_duration: Duration,
    led_count: u16,
    moon_start: u16,
    moon_length: u16,
    lightning_every_n_cycles: u32,
    update_interval: Duration,
    start_hour: f64,
    keyframes: KeyframeTable,
}

impl DaylightConfig {
    /// Default wall-clock length of one simulated day (30 minutes).
    pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_secs(1800);
    /// Default strip length.
    pub const DEFAULT_LED_COUNT: u16 = 100;
    /// Default moon segment length.
    pub const DEFAULT_MOON_LENGTH: u16 = 5;
    /// Default lightning cadence in cycles.
    pub const DEFAULT_LIGHTNING_EVERY_N_CYCLES: u32 = 3;
    /// Default tick period.
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);
    /// Default virtual hour at start: afternoon, so the strip is never dark
    /// right after power-up.
    pub const DEFAULT_START_HOUR: f64 = 14.0;

    /// Creates a configuration with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock duration of one simulated day.
    #[must_use]
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    /// Sets the number of LEDs on the strip.
    #[must_use]
    pub fn with_led_count(mut self, count: u16) -> Self {
        self.led_count = count;
        self
    }

    /// Sets the moon segment `[start, start + length)`. A zero length disables it.
    #[must_use]
    pub fn with_moon(mut self, start: u16, length: u16) -> Self {
        self.moon_start = start;
        self.moon_length = length;
        self
    }

    /// Sets the lightning cadence in cycles.
    #[must_use]
    pub fn with_lightning_every_n_cycles(mut self, cycles: u32) -> Self {
        self.lightning_every_n_cycles = cycles;
        self
    }

    /// Sets the tick period.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Sets the virtual hour the cycle starts at.
    #[must_use]
    pub fn with_start_hour(mut self, hour: f64) -> Self {
        self.start_hour = hour;
        self
    }

    /// Replaces the keyframe table.
    #[must_use]
    pub fn with_keyframes(mut self, keyframes: KeyframeTable) -> Self {
        self.keyframes = keyframes;
        self
    }

    /// Returns the wall-clock duration of one simulated day.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    /// Returns the strip length.
    #[must_use]
    pub fn led_count(&self) -> u16 {
        self.led_count
    }

    /// Returns the moon segment as `(start, length)`.
    #[must_use]
    pub fn moon(&self) -> (u16, u16) {
        (self.moon_start, self.moon_length)
    }

    /// Returns the lightning cadence in cycles.
    #[must_use]
    pub fn lightning_every_n_cycles(&self) -> u32 {
        self.lightning_every_n_cycles
    }

    /// Returns the tick period.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the starting virtual hour.
    #[must_use]
    pub fn start_hour(&self) -> f64 {
        self.start_hour
    }

    /// Returns the keyframe table.
    #[must_use]
    pub fn keyframes(&self) -> &KeyframeTable {
        &self.keyframes
    }

    /// Returns the wall-clock offset that makes the cycle begin at
    /// [`start_hour`](Self::start_hour).
    #[must_use]
    pub fn start_offset(&self) -> Duration {
        self.cycle_duration.mul_f64(self.start_hour / 24.0)
    }

    /// Checks that the configuration can drive the loop.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidSetting` for a zero cycle duration or
    /// update interval, a start hour outside `[0, 24)`, or a moon segment
    /// whose end does not fit in `u16`.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.cycle_duration.is_zero() {
            return Err(ValueError::InvalidSetting {
                name: "cycle_duration",
                reason: "must be positive".to_string(),
            });
        }
        if self.update_interval.is_zero() {
            return Err(ValueError::InvalidSetting {
                name: "update_interval",
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..24.0).contains(&self.start_hour) {
            return Err(ValueError::InvalidSetting {
                name: "start_hour",
                reason: format!("{} is outside [0, 24)", self.start_hour),
            });
        }
        if self.moon_start.checked_add(self.moon_length).is_none() {
            return Err(ValueError::InvalidSetting {
                name: "moon",
                reason: format!("{} + {} overflows", self.moon_start, self.moon_length),
            });
        }
        Ok(())
    }

    /// State pushed once when the cycle starts: the whole strip as one
    /// powered segment, made the main segment.
    #[must_use]
    pub fn baseline_state(&self) -> LightingState {
        LightingState::power(true).with_main_segment(0).with_segment(
            Segment::new(0)
                .with_range(0, self.led_count)
                .with_power(true),
        )
    }

    /// Segments for a virtual hour: the sky over the whole strip, then the
    /// moon if it has a length.
    #[must_use]
    pub fn segments(&self, sky: RgbColor, hour: f64) -> Vec<Segment> {
        let mut segments = vec![
            Segment::new(0)
                .with_range(0, self.led_count)
                .with_color(sky)
                .with_effect(Segment::EFFECT_SOLID)
                .with_power(true)
                .selected(),
        ];

        if self.moon_length > 0 {
            // Mirroring the sky by day keeps the strip uniform.
            let moon = if is_night(hour) { MOON_COLOR } else { sky };
            segments.push(
                Segment::new(1)
                    .with_range(
                        self.moon_start,
                        self.moon_start.saturating_add(self.moon_length),
                    )
                    .with_color(moon)
                    .with_effect(Segment::EFFECT_SOLID)
                    .with_power(true),
            );
        }

        segments
    }

    /// Full state posted by one tick at a virtual hour.
    #[must_use]
    pub fn tick_state(&self, hour: f64) -> LightingState {
        let sky = self.keyframes.sky_color(hour);
        self.segments(sky, hour)
            .into_iter()
            .fold(LightingState::power(true), LightingState::with_segment)
    }
}

impl Default for DaylightConfig {
    fn default() -> Self {
        Self {
            cycle_duration: Self::DEFAULT_CYCLE_DURATION,
            led_count: Self::DEFAULT_LED_COUNT,
            moon_start: 0,
            moon_length: Self::DEFAULT_MOON_LENGTH,
            lightning_every_n_cycles: Self::DEFAULT_LIGHTNING_EVERY_N_CYCLES,
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            start_hour: Self::DEFAULT_START_HOUR,
            keyframes: KeyframeTable::default(),
        }
    }
}
