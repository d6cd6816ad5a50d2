// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TMCC switch/accessory frame decoding.
//!
//! Frame format:
//! ```text
//! byte0: 1111_1110                 sentinel (0xFE)
//! byte1: TTAA_AAAA                 T = frame type, A = address bits 6..1
//! byte2: ACCD_DDDD                 A = address bit 0, C = command, D = data
//! ```
//!
//! # Examples
//!
//! ```
//! use tmcc_wled::frame::{FrameType, decode};
//!
//! let frame = decode(&[0xFE, 0b1100_0001, 0b1000_0101], None).unwrap();
//! assert_eq!(frame.frame_type(), FrameType::Accessory);
//! assert_eq!(frame.address(), 3);
//! assert_eq!(frame.command(), 0);
//! assert_eq!(frame.data(), 5);
//!
//! assert!(decode(&[0x00, 0xC0, 0x00], None).is_err());
//! ```

use std::fmt;

use crate::error::FrameError;

/// First byte of every accepted frame.
pub const SENTINEL: u8 = 0xFE;

/// Length of a frame in bytes.
pub const FRAME_LEN: usize = 3;

/// The two frame types this bridge consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Switch (turnout) command, code `0b10`.
    Switch,
    /// Accessory command, code `0b11`.
    Accessory,
}

impl FrameType {
    /// Returns the 2-bit wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Switch => 0b10,
            Self::Accessory => 0b11,
        }
    }

    /// Maps a 2-bit wire code to a frame type.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::UnsupportedFrameType` for any other code.
    pub const fn from_code(code: u8) -> Result<Self, FrameError> {
        match code {
            0b10 => Ok(Self::Switch),
            0b11 => Ok(Self::Accessory),
            other => Err(FrameError::UnsupportedFrameType(other)),
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Accessory => f.write_str("accessory"),
        }
    }
}

/// A decoded switch or accessory frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessoryFrame {
    frame_type: FrameType,
    address: u8,
    command: u8,
    data: u8,
}

impl AccessoryFrame {
    /// Returns the frame type.
    #[must_use]
    pub const fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Returns the 7-bit accessory address.
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Returns the 2-bit command field.
    #[must_use]
    pub const fn command(&self) -> u8 {
        self.command
    }

    /// Returns the 5-bit data field.
    #[must_use]
    pub const fn data(&self) -> u8 {
        self.data
    }

    /// Returns the `(address, data)` key used for action lookup.
    #[must_use]
    pub const fn key(&self) -> (u8, u8) {
        (self.address, self.data)
    }
}

/// Decodes a raw frame.
///
/// `frame_type` lets a caller that already classified the frame out of band
/// supply the 2-bit type code instead of extracting it from byte 1. The
/// supplied code is still validated.
///
/// # Errors
///
/// Checked in order: length, sentinel, frame type. The first violation wins.
pub fn decode(bytes: &[u8], frame_type: Option<u8>) -> Result<AccessoryFrame, FrameError> {
    let &[sentinel, high, low] = bytes else {
        return Err(FrameError::InvalidLength(bytes.len()));
    };
    if sentinel != SENTINEL {
        return Err(FrameError::MissingSentinel(sentinel));
    }

    let code = frame_type.unwrap_or((high >> 6) & 0b11);
    let frame_type = FrameType::from_code(code)?;

    Ok(AccessoryFrame {
        frame_type,
        address: ((high & 0x3F) << 1) | ((low & 0x80) >> 7),
        command: (low & 0x60) >> 5,
        data: low & 0x1F,
    })
}
