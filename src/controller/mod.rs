// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory frame to lighting action dispatch.
//!
//! An [`ActionController`] owns:
//! - an [`ActionMapping`] from `(address, data)` keys to [`Action`]s,
//! - the ordered preset list and the cursor `cycle` actions advance,
//! - the optional [`DaylightSimulator`](crate::daylight::DaylightSimulator).
//!
//! # Supported actions
//!
//! | Text | Effect |
//! |------|--------|
//! | `on` / `off` | power the strip (`off` stops the daylight cycle first) |
//! | `full_white` | stop the daylight cycle, full brightness white |
//! | `daylight_start` / `daylight_stop` | control the daylight cycle |
//! | `color:#RRGGBB` | recolor segment 0 |
//! | `brightness:<0-255>` | global brightness, clamped |
//! | `preset:<id>` | load a device preset |
//! | `cycle` | advance through the configured presets |

mod action;
mod action_controller;
mod config;
mod mapping;

pub use action::Action;
pub use action_controller::ActionController;
pub use config::ControllerConfig;
pub use mapping::{ActionMapping, ActionMappingBuilder};
