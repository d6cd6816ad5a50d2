// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration and its JSON form.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::daylight::DaylightConfig;
use crate::error::{ConfigError, Result, ValueError};
use crate::protocol::HttpConfig;
use crate::types::PresetId;

use super::{Action, ActionMapping};

/// Everything an [`ActionController`](super::ActionController) is built from.
///
/// Fixed at construction; there is no way to change a running controller's
/// configuration.
///
/// # Examples
///
/// ```
/// use tmcc_wled::controller::{ActionMapping, ControllerConfig};
/// use tmcc_wled::daylight::DaylightConfig;
/// use tmcc_wled::protocol::HttpConfig;
/// use tmcc_wled::types::PresetId;
///
/// let config = ControllerConfig::new(HttpConfig::new("192.168.0.10"))
///     .with_mapping(ActionMapping::builder().bind(50, 3, "cycle").build().unwrap())
///     .with_presets([1, 2, 3].map(PresetId::new))
///     .with_daylight(DaylightConfig::new());
///
/// assert!(config.daylight().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub(super) device: HttpConfig,
    pub(super) mapping: ActionMapping,
    pub(super) presets: Vec<PresetId>,
    pub(super) daylight: Option<DaylightConfig>,
    pub(super) autostart_daylight: bool,
}

impl ControllerConfig {
    /// Creates a configuration with an empty mapping, no presets and the
    /// daylight cycle disabled.
    #[must_use]
    pub fn new(device: HttpConfig) -> Self {
        Self {
            device,
            mapping: ActionMapping::new(),
            presets: Vec::new(),
            daylight: None,
            autostart_daylight: true,
        }
    }

    /// Sets the action mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: ActionMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Sets the ordered preset list used by [`Action::CyclePreset`].
    #[must_use]
    pub fn with_presets(mut self, presets: impl IntoIterator<Item = PresetId>) -> Self {
        self.presets = presets.into_iter().collect();
        self
    }

    /// Enables the daylight cycle with the given tuning.
    #[must_use]
    pub fn with_daylight(mut self, daylight: DaylightConfig) -> Self {
        self.daylight = Some(daylight);
        self
    }

    /// Controls whether `ActionController::connect` starts the cycle.
    #[must_use]
    pub fn with_autostart_daylight(mut self, autostart: bool) -> Self {
        self.autostart_daylight = autostart;
        self
    }

    /// Returns the device connection parameters.
    #[must_use]
    pub fn device(&self) -> &HttpConfig {
        &self.device
    }

    /// Returns the action mapping.
    #[must_use]
    pub fn mapping(&self) -> &ActionMapping {
        &self.mapping
    }

    /// Returns the preset list.
    #[must_use]
    pub fn presets(&self) -> &[PresetId] {
        &self.presets
    }

    /// Returns the daylight tuning, if the cycle is enabled.
    #[must_use]
    pub fn daylight(&self) -> Option<&DaylightConfig> {
        self.daylight.as_ref()
    }

    /// Returns whether the cycle starts on connect.
    #[must_use]
    pub fn autostart_daylight(&self) -> bool {
        self.autostart_daylight
    }

    /// Parses a JSON configuration document.
    ///
    /// ```json
    /// {
    ///   "device": { "host": "192.168.0.10", "port": 80, "timeout_ms": 2000 },
    ///   "mapping": [
    ///     { "address": 50, "data": 1, "action": "on" },
    ///     { "address": 50, "data": 3, "action": "cycle" }
    ///   ],
    ///   "presets": [1, 2, 3],
    ///   "daylight": { "enabled": true, "cycle_duration_secs": 1800, "led_count": 100 }
    /// }
    /// ```
    ///
    /// Only `device.host` is required.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed JSON, and the mapping or
    /// daylight validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json).map_err(ConfigError::Json)?;
        file.into_config()
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise see
    /// [`from_json`](Self::from_json).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

// ============================================================================
// JSON document
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    device: DeviceSection,
    #[serde(default)]
    mapping: Vec<MappingEntry>,
    #[serde(default)]
    presets: Vec<PresetId>,
    #[serde(default)]
    daylight: Option<DaylightSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceSection {
    host: String,
    port: Option<u16>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingEntry {
    address: u8,
    data: u8,
    action: Action,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DaylightSection {
    #[serde(default)]
    enabled: bool,
    autostart: Option<bool>,
    cycle_duration_secs: Option<f64>,
    led_count: Option<u16>,
    moon_start: Option<u16>,
    moon_length: Option<u16>,
    lightning_every_n_cycles: Option<u32>,
    update_interval_ms: Option<u64>,
    start_hour: Option<f64>,
}

impl ConfigFile {
    fn into_config(self) -> Result<ControllerConfig> {
        let mut device = HttpConfig::new(self.device.host);
        if let Some(port) = self.device.port {
            device = device.with_port(port);
        }
        if let Some(ms) = self.device.timeout_ms {
            device = device.with_timeout(Duration::from_millis(ms));
        }

        let mapping = ActionMapping::from_entries(
            self.mapping
                .into_iter()
                .map(|entry| (entry.address, entry.data, entry.action)),
        )?;

        let mut config = ControllerConfig::new(device)
            .with_mapping(mapping)
            .with_presets(self.presets);

        if let Some(section) = self.daylight {
            if let Some(autostart) = section.autostart {
                config = config.with_autostart_daylight(autostart);
            }
            if section.enabled {
                let daylight = section.into_daylight()?;
                config = config.with_daylight(daylight);
            }
        }

        Ok(config)
    }
}

impl DaylightSection {
    fn into_daylight(self) -> Result<DaylightConfig> {
        let mut daylight = DaylightConfig::new();
        if let Some(secs) = self.cycle_duration_secs {
            let duration =
                Duration::try_from_secs_f64(secs).map_err(|e| ValueError::InvalidSetting {
                    name: "cycle_duration_secs",
                    reason: e.to_string(),
                })?;
            daylight = daylight.with_cycle_duration(duration);
        }
        if let Some(count) = self.led_count {
            daylight = daylight.with_led_count(count);
        }
        let (default_start, default_length) = daylight.moon();
        daylight = daylight.with_moon(
            self.moon_start.unwrap_or(default_start),
            self.moon_length.unwrap_or(default_length),
        );
        if let Some(cycles) = self.lightning_every_n_cycles {
            daylight = daylight.with_lightning_every_n_cycles(cycles);
        }
        if let Some(ms) = self.update_interval_ms {
            daylight = daylight.with_update_interval(Duration::from_millis(ms));
        }
        if let Some(hour) = self.start_hour {
            daylight = daylight.with_start_hour(hour);
        }

        daylight.validate()?;
        Ok(daylight)
    }
}
