// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Every failure in this crate is non-fatal: the dispatch path logs and moves
//! on. These types exist so that the places that *do* want detail (config
//! loading, `try_post_state`, tests) get a precise reason.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw frame was rejected by the decoder.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Communication with the lighting device failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a raw accessory frame is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The frame is not exactly three bytes long.
    #[error("expected 3 bytes, got {0}")]
    InvalidLength(usize),

    /// The first byte is not the frame sentinel.
    #[error("first byte 0x{0:02X} is not the 0xFE sentinel")]
    MissingSentinel(u8),

    /// The frame type code is neither switch nor accessory.
    #[error("unsupported frame type code 0b{0:02b}")]
    UnsupportedFrameType(u8),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// An integer argument could not be parsed.
    #[error("invalid {field}: {value:?} is not an integer")]
    InvalidInteger {
        /// What the integer was meant to be.
        field: &'static str,
        /// The text that was provided.
        value: String,
    },

    /// A tuning setting is unusable.
    #[error("invalid {name}: {reason}")]
    InvalidSetting {
        /// The setting name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors related to HTTP communication with the lighting device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-2xx status.
    #[error("HTTP {status} {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors raised while loading a controller configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration document is not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// Two mapping entries share the same key.
    #[error("duplicate mapping for address {address} data {data}")]
    DuplicateMapping {
        /// Accessory address.
        address: u8,
        /// Data field.
        data: u8,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
