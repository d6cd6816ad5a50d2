// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for lighting control.
//!
//! - [`RgbColor`] - 8-bit RGB color, parsed from `#RRGGBB`
//! - [`Brightness`] - global brightness (0-255), clamped on parse
//! - [`PresetId`] - device-stored preset number

mod brightness;
mod preset;
mod rgb_color;

pub use brightness::Brightness;
pub use preset::PresetId;
pub use rgb_color::RgbColor;
