// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `tmcc_wled` - drive a WLED strip from TMCC accessory commands.
//!
//! This library decodes 3-byte TMCC switch/accessory frames, maps their
//! `(address, data)` fields to lighting actions and applies those actions
//! through the WLED JSON HTTP API. An optional day/night cycle keeps the
//! strip changing color in the background and yields to manual commands.
//!
//! # Components
//!
//! - [`frame`]: bit-exact frame decoding
//! - [`protocol`]: HTTP transport to the device's `/json/state` endpoint
//! - [`daylight`]: the background day/night color cycle
//! - [`controller`]: the action mapping and dispatch policy
//!
//! # Quick Start
//!
//! ```no_run
//! use tmcc_wled::controller::{ActionController, ActionMapping, ControllerConfig};
//! use tmcc_wled::daylight::DaylightConfig;
//! use tmcc_wled::protocol::HttpConfig;
//! use tmcc_wled::types::PresetId;
//!
//! #[tokio::main]
//! async fn main() -> tmcc_wled::Result<()> {
//!     let mapping = ActionMapping::builder()
//!         .bind(50, 1, "on")
//!         .bind(50, 2, "off")
//!         .bind(50, 3, "cycle")
//!         .bind(50, 4, "daylight_start")
//!         .build()?;
//!
//!     let config = ControllerConfig::new(HttpConfig::new("192.168.0.10"))
//!         .with_mapping(mapping)
//!         .with_presets([1, 2, 3].map(PresetId::new))
//!         .with_daylight(DaylightConfig::new());
//!
//!     // Starts the daylight cycle.
//!     let mut controller = ActionController::connect(config).await?;
//!
//!     // In the bus reader loop, for every accessory frame (here ACC 50, key 3):
//!     controller.handle_frame(&[0xFE, 0b1101_1001, 0b0000_0011], None).await;
//!
//!     controller.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Nothing here stalls the caller's frame loop: malformed frames, unmapped
//! keys, bad action arguments and device errors are logged through
//! `tracing` and reported, at most, as a `false` return.

pub mod controller;
pub mod daylight;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod state;
pub mod types;

pub use controller::{Action, ActionController, ActionMapping, ControllerConfig};
pub use daylight::{DaylightConfig, DaylightSimulator};
pub use error::{ConfigError, Error, FrameError, ProtocolError, Result, ValueError};
pub use frame::{AccessoryFrame, FrameType};
pub use protocol::{HttpClient, HttpConfig};
pub use state::{LightingState, Segment};
pub use types::{Brightness, PresetId, RgbColor};
