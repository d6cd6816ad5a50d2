// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport to the lighting device.
//!
//! - [`HttpConfig`]: host, port and timeout of the device
//! - [`HttpClient`]: posts a [`LightingState`](crate::state::LightingState)
//!   to the device's JSON state endpoint

mod http;

pub use http::{HttpClient, HttpConfig, STATE_PATH};
