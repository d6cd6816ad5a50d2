// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manual harness: feed hex frames on stdin to a configured controller.
//!
//! ```text
//! $ echo "FE D9 01" | RUST_LOG=debug cargo run --example tmcc_wled -- bridge.json
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use tmcc_wled::{ActionController, ControllerConfig};

#[tokio::main]
async fn main() -> tmcc_wled::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: tmcc_wled <config.json>");
        std::process::exit(2);
    };

    let config = ControllerConfig::from_file(&path)?;
    let mut controller = ActionController::connect(config).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_hex_frame(&line) {
                        Some(bytes) => {
                            let handled = controller.handle_frame(&bytes, None).await;
                            tracing::debug!(handled, "Frame dispatched");
                        }
                        None => tracing::warn!(%line, "Not a hex frame"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}

/// Parses `FE D9 01`, `0xFE,0xD9,0x01` or `fed901` into bytes.
fn parse_hex_frame(line: &str) -> Option<Vec<u8>> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if let [packed] = tokens.as_slice()
        && packed.len() > 2
    {
        if packed.len() % 2 != 0 || !packed.is_ascii() {
            return None;
        }
        return (0..packed.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&packed[i..i + 2], 16).ok())
            .collect();
    }

    tokens
        .iter()
        .map(|t| u8::from_str_radix(t, 16).ok())
        .collect()
}
