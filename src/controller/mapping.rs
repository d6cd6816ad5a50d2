// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `(address, data)` to action lookup table.

use std::collections::HashMap;

use crate::error::{ConfigError, Error, ValueError};

use super::Action;

/// Highest 7-bit accessory address.
const MAX_ADDRESS: u8 = 127;
/// Highest 5-bit data field.
const MAX_DATA: u8 = 31;

/// Immutable table binding accessory keys to actions.
///
/// # Examples
///
/// ```
/// use tmcc_wled::controller::{Action, ActionMapping};
///
/// let mapping = ActionMapping::builder()
///     .bind(50, 1, "on")
///     .bind(50, 2, "off")
///     .build()
///     .unwrap();
///
/// assert_eq!(mapping.get(50, 1), Some(&Action::On));
/// assert_eq!(mapping.get(50, 3), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMapping {
    actions: HashMap<(u8, u8), Action>,
}

impl ActionMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ActionMappingBuilder {
        ActionMappingBuilder::default()
    }

    /// Builds a mapping from `(address, data, action)` entries.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for an address above 127 or a data
    /// field above 31 (no frame can carry them), and
    /// `ConfigError::DuplicateMapping` when a key appears twice.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (u8, u8, Action)>,
    ) -> Result<Self, Error> {
        let mut actions = HashMap::new();
        for (address, data, action) in entries {
            check_range(address, MAX_ADDRESS)?;
            check_range(data, MAX_DATA)?;
            if actions.insert((address, data), action).is_some() {
                return Err(ConfigError::DuplicateMapping { address, data }.into());
            }
        }
        Ok(Self { actions })
    }

    /// Looks up the action bound to a key.
    #[must_use]
    pub fn get(&self, address: u8, data: u8) -> Option<&Action> {
        self.actions.get(&(address, data))
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Builder for [`ActionMapping`].
#[derive(Debug, Default)]
pub struct ActionMappingBuilder {
    entries: Vec<(u8, u8, Action)>,
}

impl ActionMappingBuilder {
    /// Binds a key to an action.
    #[must_use]
    pub fn bind(mut self, address: u8, data: u8, action: impl Into<Action>) -> Self {
        self.entries.push((address, data, action.into()));
        self
    }

    /// Builds the mapping.
    ///
    /// # Errors
    ///
    /// See [`ActionMapping::from_entries`].
    pub fn build(self) -> Result<ActionMapping, Error> {
        ActionMapping::from_entries(self.entries)
    }
}

fn check_range(value: u8, max: u8) -> Result<(), ValueError> {
    if value > max {
        return Err(ValueError::OutOfRange {
            min: 0,
            max: u16::from(max),
            actual: u16::from(value),
        });
    }
    Ok(())
}
