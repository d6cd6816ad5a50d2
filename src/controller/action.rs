// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Symbolic lighting actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A lighting action bound to an accessory key.
///
/// Actions are written as short text in configuration (`"on"`,
/// `"color:#FF8000"`, `"brightness:128"`...). Argument-bearing variants keep
/// the raw argument: it is validated when the action is applied, so a
/// malformed argument is logged and dropped at that point rather than
/// rejecting the whole mapping.
///
/// # Examples
///
/// ```
/// use tmcc_wled::controller::Action;
///
/// assert_eq!(Action::parse("off"), Action::Off);
/// assert_eq!(Action::parse("color:#00FF00"), Action::SetColor("#00FF00".to_string()));
/// assert_eq!(Action::parse("cycle").to_string(), "cycle");
/// assert!(matches!(Action::parse("sparkle"), Action::Unrecognized(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Switch the strip on.
    On,
    /// Stop the daylight cycle, then switch the strip off.
    Off,
    /// Stop the daylight cycle, then go full-brightness white.
    FullWhite,
    /// Start the daylight cycle.
    DaylightStart,
    /// Stop the daylight cycle.
    DaylightStop,
    /// Recolor segment 0 from a hex string.
    SetColor(String),
    /// Set global brightness from integer text.
    SetBrightness(String),
    /// Load a preset from integer text.
    SetPreset(String),
    /// Advance to the next configured preset.
    CyclePreset,
    /// Anything else; applying it only logs a warning.
    Unrecognized(String),
}

impl Action {
    /// Parses the textual action form. Never fails: unknown text becomes
    /// [`Action::Unrecognized`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "on" => Self::On,
            "off" => Self::Off,
            "full_white" => Self::FullWhite,
            "daylight_start" => Self::DaylightStart,
            "daylight_stop" => Self::DaylightStop,
            "cycle" => Self::CyclePreset,
            _ => match text.split_once(':') {
                Some(("color", arg)) => Self::SetColor(arg.to_string()),
                Some(("brightness", arg)) => Self::SetBrightness(arg.to_string()),
                Some(("preset", arg)) => Self::SetPreset(arg.to_string()),
                _ => Self::Unrecognized(text.to_string()),
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::FullWhite => f.write_str("full_white"),
            Self::DaylightStart => f.write_str("daylight_start"),
            Self::DaylightStop => f.write_str("daylight_stop"),
            Self::SetColor(arg) => write!(f, "color:{arg}"),
            Self::SetBrightness(arg) => write!(f, "brightness:{arg}"),
            Self::SetPreset(arg) => write!(f, "preset:{arg}"),
            Self::CyclePreset => f.write_str("cycle"),
            Self::Unrecognized(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Action {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Action {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}
