// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-stored preset identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Numeric id of a preset stored on the lighting device.
///
/// No range is enforced here; the device decides which ids exist.
///
/// # Examples
///
/// ```
/// use tmcc_wled::types::PresetId;
///
/// let id: PresetId = "3".parse().unwrap();
/// assert_eq!(id.value(), 3);
/// assert!("three".parse::<PresetId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(i32);

impl PresetId {
    /// Creates a preset id.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl FromStr for PresetId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| ValueError::InvalidInteger {
                field: "preset",
                value: s.to_string(),
            })
    }
}

impl From<i32> for PresetId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!("12".parse::<PresetId>().unwrap(), PresetId::new(12));
        assert_eq!(" 7\n".parse::<PresetId>().unwrap(), PresetId::new(7));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(
            "x1".parse::<PresetId>(),
            Err(ValueError::InvalidInteger {
                field: "preset",
                value: "x1".to_string(),
            })
        );
    }

    #[test]
    fn serde_transparent() {
        assert_eq!(serde_json::to_value(PresetId::new(4)).unwrap(), 4);
        let ids: Vec<PresetId> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(ids, vec![PresetId::new(1), PresetId::new(2), PresetId::new(3)]);
    }
}
