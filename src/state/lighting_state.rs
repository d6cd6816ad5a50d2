// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LightingState` payload and its segments.
//!
//! Every field is optional on the wire: the device merges a partial state
//! into its current one, so a payload only names what it changes.

use serde::Serialize;

use crate::types::{Brightness, PresetId, RgbColor};

/// A state update for the WLED `/json/state` endpoint.
///
/// # Examples
///
/// ```
/// use tmcc_wled::state::{LightingState, Segment};
/// use tmcc_wled::types::{Brightness, RgbColor};
///
/// let state = LightingState::new()
///     .with_power(true)
///     .with_brightness(Brightness::MAX)
///     .with_segment(Segment::new(0).with_color(RgbColor::WHITE));
///
/// assert_eq!(
///     serde_json::to_value(&state).unwrap(),
///     serde_json::json!({"on": true, "bri": 255, "seg": [{"id": 0, "col": [[255, 255, 255]]}]})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LightingState {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bri: Option<Brightness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ps: Option<PresetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mainseg: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    seg: Vec<Segment>,
}

impl LightingState {
    /// Creates an empty state update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state that only switches the strip on or off.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self::new().with_power(on)
    }

    /// Creates a state that only loads a preset.
    #[must_use]
    pub fn preset(id: PresetId) -> Self {
        Self::new().with_preset(id)
    }

    /// Creates a state that only sets the global brightness.
    #[must_use]
    pub fn brightness(value: Brightness) -> Self {
        Self::new().with_brightness(value)
    }

    /// Creates a state that only recolors segment 0.
    #[must_use]
    pub fn main_color(color: RgbColor) -> Self {
        Self::new().with_segment(Segment::new(0).with_color(color))
    }

    /// Sets the power flag.
    #[must_use]
    pub fn with_power(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the global brightness.
    #[must_use]
    pub fn with_brightness(mut self, value: Brightness) -> Self {
        self.bri = Some(value);
        self
    }

    /// Sets the preset to load.
    #[must_use]
    pub fn with_preset(mut self, id: PresetId) -> Self {
        self.ps = Some(id);
        self
    }

    /// Sets the main segment id.
    #[must_use]
    pub fn with_main_segment(mut self, id: u8) -> Self {
        self.mainseg = Some(id);
        self
    }

    /// Appends a segment.
    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.seg.push(segment);
        self
    }

    /// Returns the power flag.
    #[must_use]
    pub fn on(&self) -> Option<bool> {
        self.on
    }

    /// Returns the global brightness.
    #[must_use]
    pub fn bri(&self) -> Option<Brightness> {
        self.bri
    }

    /// Returns the preset id.
    #[must_use]
    pub fn ps(&self) -> Option<PresetId> {
        self.ps
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.seg
    }
}

/// A contiguous LED range with its own color, effect and power state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    col: Vec<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fx: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sel: Option<bool>,
}

impl Segment {
    /// Solid color effect id.
    pub const EFFECT_SOLID: u8 = 0;

    /// Creates a segment update that only names its id.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self {
            id,
            start: None,
            stop: None,
            col: Vec::new(),
            fx: None,
            on: None,
            sel: None,
        }
    }

    /// Sets the LED range `[start, stop)`.
    #[must_use]
    pub fn with_range(mut self, start: u16, stop: u16) -> Self {
        self.start = Some(start);
        self.stop = Some(stop);
        self
    }

    /// Appends a color slot.
    #[must_use]
    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.col.push(color);
        self
    }

    /// Sets the effect id.
    #[must_use]
    pub fn with_effect(mut self, fx: u8) -> Self {
        self.fx = Some(fx);
        self
    }

    /// Sets the segment power flag.
    #[must_use]
    pub fn with_power(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Marks the segment as selected.
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.sel = Some(true);
        self
    }

    /// Returns the segment id.
    #[must_use]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Returns the LED range, if set.
    #[must_use]
    pub fn range(&self) -> Option<(u16, u16)> {
        self.start.zip(self.stop)
    }

    /// Returns the color slots.
    #[must_use]
    pub fn colors(&self) -> &[RgbColor] {
        &self.col
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_state_serializes_to_empty_object() {
        assert_eq!(serde_json::to_value(LightingState::new()).unwrap(), json!({}));
    }

    #[test]
    fn power_only() {
        assert_eq!(
            serde_json::to_value(LightingState::power(false)).unwrap(),
            json!({"on": false})
        );
    }

    #[test]
    fn preset_and_brightness_only() {
        assert_eq!(
            serde_json::to_value(LightingState::preset(PresetId::new(3))).unwrap(),
            json!({"ps": 3})
        );
        assert_eq!(
            serde_json::to_value(LightingState::brightness(Brightness::new(10))).unwrap(),
            json!({"bri": 10})
        );
    }

    #[test]
    fn main_color_payload() {
        let state = LightingState::main_color(RgbColor::new(1, 2, 3));
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"seg": [{"id": 0, "col": [[1, 2, 3]]}]})
        );
    }

    #[test]
    fn full_segment_field_order_and_names() {
        let state = LightingState::new().with_power(true).with_segment(
            Segment::new(0)
                .with_range(0, 100)
                .with_color(RgbColor::new(40, 40, 100))
                .with_effect(Segment::EFFECT_SOLID)
                .with_power(true)
                .selected(),
        );
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"on":true,"seg":[{"id":0,"start":0,"stop":100,"col":[[40,40,100]],"fx":0,"on":true,"sel":true}]}"#
        );
    }

    #[test]
    fn main_segment_is_serialized() {
        let state = LightingState::power(true)
            .with_main_segment(0)
            .with_segment(Segment::new(0).with_range(0, 30).with_power(true));
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"on": true, "mainseg": 0, "seg": [{"id": 0, "start": 0, "stop": 30, "on": true}]})
        );
    }

    #[test]
    fn accessors() {
        let segment = Segment::new(1).with_range(5, 10).with_color(RgbColor::WHITE);
        assert_eq!(segment.id(), 1);
        assert_eq!(segment.range(), Some((5, 10)));
        assert_eq!(segment.colors(), &[RgbColor::WHITE]);
        assert_eq!(Segment::new(2).range(), None);

        let state = LightingState::preset(PresetId::new(2)).with_segment(segment);
        assert_eq!(state.ps(), Some(PresetId::new(2)));
        assert_eq!(state.on(), None);
        assert_eq!(state.bri(), None);
        assert_eq!(state.segments().len(), 1);
    }
}
