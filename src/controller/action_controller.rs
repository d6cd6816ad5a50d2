// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame dispatch and action application.

use crate::daylight::DaylightSimulator;
use crate::error::Result;
use crate::frame;
use crate::protocol::HttpClient;
use crate::state::LightingState;
use crate::types::{Brightness, PresetId, RgbColor};

use super::{Action, ActionMapping, ControllerConfig};

/// Resolves accessory frames to lighting actions and applies them.
///
/// Methods that touch the preset cursor or the daylight cycle take
/// `&mut self`: the controller has a single owner, the frame dispatch loop.
/// A multi-producer integration wraps the controller in a mutex.
///
/// # Examples
///
/// ```no_run
/// use tmcc_wled::controller::{ActionController, ActionMapping, ControllerConfig};
/// use tmcc_wled::protocol::HttpConfig;
///
/// # async fn example() -> tmcc_wled::Result<()> {
/// let mapping = ActionMapping::builder()
///     .bind(50, 1, "on")
///     .bind(50, 2, "off")
///     .build()?;
/// let config = ControllerConfig::new(HttpConfig::new("192.168.0.10")).with_mapping(mapping);
/// let mut controller = ActionController::connect(config).await?;
///
/// // ACC 50, key 1
/// let handled = controller.handle_frame(&[0xFE, 0b1101_1001, 0b0000_0001], None).await;
/// assert!(handled);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ActionController {
    client: HttpClient,
    mapping: ActionMapping,
    presets: Vec<PresetId>,
    preset_cursor: usize,
    daylight: Option<DaylightSimulator>,
}

impl ActionController {
    /// Builds a controller without contacting the device.
    ///
    /// The daylight simulator is created (stopped) if the configuration
    /// enables it.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or the daylight
    /// tuning is invalid.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        let ControllerConfig {
            device,
            mapping,
            presets,
            daylight,
            ..
        } = config;

        let client = device.into_client()?;
        let daylight = daylight
            .map(|tuning| DaylightSimulator::new(client.clone(), tuning))
            .transpose()?;

        Ok(Self {
            client,
            mapping,
            presets,
            preset_cursor: 0,
            daylight,
        })
    }

    /// Builds a controller and starts the daylight cycle when it is enabled
    /// and set to autostart.
    ///
    /// # Errors
    ///
    /// See [`ActionController::new`].
    pub async fn connect(config: ControllerConfig) -> Result<Self> {
        let autostart = config.autostart_daylight();
        let mut controller = Self::new(config)?;
        if autostart && let Some(daylight) = controller.daylight.as_mut() {
            daylight.start().await;
        }
        Ok(controller)
    }

    /// Stops the daylight cycle, if any, and consumes the controller.
    pub async fn shutdown(mut self) {
        if let Some(daylight) = self.daylight.as_mut() {
            daylight.stop().await;
        }
    }

    /// Returns the daylight simulator, if configured.
    #[must_use]
    pub fn daylight(&self) -> Option<&DaylightSimulator> {
        self.daylight.as_ref()
    }

    /// Returns the daylight simulator mutably, if configured.
    pub fn daylight_mut(&mut self) -> Option<&mut DaylightSimulator> {
        self.daylight.as_mut()
    }

    /// Returns the action mapping.
    #[must_use]
    pub fn mapping(&self) -> &ActionMapping {
        &self.mapping
    }

    /// Returns the cursor into the preset list.
    ///
    /// It starts at 0; [`Action::CyclePreset`] advances it before posting.
    #[must_use]
    pub fn preset_cursor(&self) -> usize {
        self.preset_cursor
    }

    /// Decodes a raw frame and applies the action bound to it.
    ///
    /// Returns `false` when the frame is rejected or nothing is bound to its
    /// `(address, data)` key, `true` once an action was applied (whether or
    /// not the device accepted it).
    pub async fn handle_frame(&mut self, bytes: &[u8], frame_type: Option<u8>) -> bool {
        let frame = match frame::decode(bytes, frame_type) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(reason = %e, ?bytes, "Ignoring frame");
                return false;
            }
        };

        let Some(action) = self.mapping.get(frame.address(), frame.data()).cloned() else {
            tracing::debug!(
                address = frame.address(),
                data = frame.data(),
                frame_type = %frame.frame_type(),
                "No action bound"
            );
            return false;
        };

        tracing::info!(
            %action,
            address = frame.address(),
            data = frame.data(),
            "Applying action"
        );
        self.apply_action(&action).await;
        true
    }

    /// Applies an action.
    ///
    /// `Off` and `FullWhite` stop the daylight cycle before posting, so a
    /// pending tick cannot repaint over the manual state. Invalid arguments
    /// are logged and no request is made.
    pub async fn apply_action(&mut self, action: &Action) {
        match action {
            Action::On => {
                self.client.post_state(&LightingState::power(true)).await;
            }
            Action::Off => {
                self.stop_daylight().await;
                self.client.post_state(&LightingState::power(false)).await;
            }
            Action::FullWhite => {
                self.stop_daylight().await;
                let state = LightingState::main_color(RgbColor::WHITE)
                    .with_power(true)
                    .with_brightness(Brightness::MAX);
                self.client.post_state(&state).await;
            }
            Action::DaylightStart => match self.daylight.as_mut() {
                Some(daylight) => daylight.start().await,
                None => tracing::warn!("Daylight cycle not configured"),
            },
            Action::DaylightStop => match self.daylight.as_mut() {
                Some(daylight) => daylight.stop().await,
                None => tracing::warn!("Daylight cycle not configured"),
            },
            Action::SetColor(hex) => match RgbColor::from_hex(hex) {
                Ok(color) => {
                    self.client.post_state(&LightingState::main_color(color)).await;
                }
                Err(e) => tracing::warn!(error = %e, "Invalid color action"),
            },
            Action::SetBrightness(text) => match Brightness::parse_clamped(text) {
                Ok(value) => {
                    self.client.post_state(&LightingState::brightness(value)).await;
                }
                Err(e) => tracing::warn!(error = %e, "Invalid brightness action"),
            },
            Action::SetPreset(text) => match text.parse::<PresetId>() {
                Ok(id) => {
                    self.client.post_state(&LightingState::preset(id)).await;
                }
                Err(e) => tracing::warn!(error = %e, "Invalid preset action"),
            },
            Action::CyclePreset => self.cycle_preset().await,
            Action::Unrecognized(text) => {
                tracing::warn!(action = %text, "Unrecognized action");
            }
        }
    }

    async fn cycle_preset(&mut self) {
        if self.presets.is_empty() {
            tracing::warn!("No presets configured for cycle action");
            return;
        }

        self.preset_cursor = (self.preset_cursor + 1) % self.presets.len();
        let id = self.presets[self.preset_cursor];
        self.client.post_state(&LightingState::preset(id)).await;
        tracing::info!(preset = %id, "Cycled preset");
    }

    async fn stop_daylight(&mut self) {
        if let Some(daylight) = self.daylight.as_mut() {
            daylight.stop().await;
        }
    }
}
