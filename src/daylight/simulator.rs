// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background loop driving the daylight cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::ValueError;
use crate::protocol::HttpClient;
use crate::state::LightingState;
use crate::types::RgbColor;

use super::{DaylightConfig, VirtualClock};

/// Longest time [`DaylightSimulator::stop`] waits for the loop to exit.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Bounds of the randomized flash hold, in milliseconds.
const FLASH_HOLD_MS: std::ops::RangeInclusive<u64> = 50..=150;

/// Owns the daylight loop and its start/stop lifecycle.
///
/// The simulator is either stopped or running exactly one loop task. Both
/// transitions are idempotent. The completed-cycle counter survives
/// `stop()`/`start()` pairs.
///
/// Dropping a running simulator drops the loop's stop sender, which ends the
/// loop at its next tick boundary.
///
/// # Examples
///
/// ```no_run
/// use tmcc_wled::daylight::{DaylightConfig, DaylightSimulator};
/// use tmcc_wled::protocol::HttpConfig;
///
/// # async fn example() -> tmcc_wled::Result<()> {
/// let client = HttpConfig::new("192.168.0.10").into_client()?;
/// let mut daylight = DaylightSimulator::new(client, DaylightConfig::new())?;
///
/// daylight.start().await;
/// assert!(daylight.is_running());
/// daylight.stop().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DaylightSimulator {
    client: HttpClient,
    config: Arc<DaylightConfig>,
    cycle_count: Arc<AtomicU64>,
    running: Option<RunningLoop>,
}

#[derive(Debug)]
struct RunningLoop {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl DaylightSimulator {
    /// Creates a stopped simulator.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidSetting` if the configuration fails
    /// [`DaylightConfig::validate`].
    pub fn new(client: HttpClient, config: DaylightConfig) -> Result<Self, ValueError> {
        config.validate()?;
        Ok(Self {
            client,
            config: Arc::new(config),
            cycle_count: Arc::new(AtomicU64::new(0)),
            running: None,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DaylightConfig {
        &self.config
    }

    /// Returns whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Returns the highest completed-cycle count observed by the loop.
    #[must_use]
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count.load(Ordering::Relaxed)
    }

    /// Starts the cycle. Does nothing if it is already running.
    ///
    /// Posts the baseline state before the loop exists, so the first thing
    /// the device sees is deterministic regardless of loop timing.
    pub async fn start(&mut self) {
        if self.running.is_some() {
            tracing::debug!("Daylight cycle already running");
            return;
        }

        self.client.post_state(&self.config.baseline_state()).await;

        let (stop_tx, stop_rx) = watch::channel(false);
        let ticker = DaylightLoop {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            cycle_count: Arc::clone(&self.cycle_count),
            started: Instant::now(),
            offset: self.config.start_offset(),
        };
        let handle = tokio::spawn(ticker.run(stop_rx));

        self.running = Some(RunningLoop { stop_tx, handle });
        tracing::info!(
            cycle_secs = self.config.cycle_duration().as_secs_f64(),
            start_hour = self.config.start_hour(),
            "Daylight cycle started"
        );
    }

    /// Stops the cycle. Does nothing if it is already stopped.
    ///
    /// Waits at most [`STOP_TIMEOUT`] for the loop to finish its current
    /// tick. A loop that does not finish in time is aborted and left to
    /// unwind on its own; the simulator is stopped either way.
    pub async fn stop(&mut self) {
        let Some(RunningLoop {
            stop_tx,
            mut handle,
        }) = self.running.take()
        else {
            return;
        };

        // Err only means the loop already dropped its receiver.
        let _ = stop_tx.send(true);

        match tokio::time::timeout(STOP_TIMEOUT, &mut handle).await {
            Ok(Ok(())) => tracing::info!("Daylight cycle stopped"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Daylight loop ended abnormally"),
            Err(_) => {
                tracing::warn!(
                    timeout_secs = STOP_TIMEOUT.as_secs(),
                    "Daylight loop did not stop in time, abandoning it"
                );
                handle.abort();
            }
        }
    }

    /// Flashes segment 0 white for 50-150 ms.
    ///
    /// The flash is not restored here: the next tick repaints the sky. It is
    /// not synchronized with the loop, so a tick landing mid-flash cuts it
    /// short.
    pub async fn flash(&self) {
        self.client
            .post_state(&LightingState::main_color(RgbColor::WHITE))
            .await;
        let hold = Duration::from_millis(rand::thread_rng().gen_range(FLASH_HOLD_MS));
        tokio::time::sleep(hold).await;
    }
}

/// State moved into the spawned loop task.
struct DaylightLoop {
    client: HttpClient,
    config: Arc<DaylightConfig>,
    cycle_count: Arc<AtomicU64>,
    started: Instant,
    offset: Duration,
}

impl DaylightLoop {
    async fn run(self, mut stop_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.update_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // A closed channel means the simulator was dropped: exit too.
            tokio::select! {
                biased;
                _ = stop_rx.changed() => break,
                _ = ticker.tick() => {}
            }
            self.tick().await;
        }

        tracing::debug!("Daylight loop exited");
    }

    async fn tick(&self) {
        let elapsed = (self.started.elapsed() + self.offset).as_secs_f64();
        let clock = VirtualClock::at(elapsed, self.config.cycle_duration().as_secs_f64());

        let previous = self.cycle_count.fetch_max(clock.cycle, Ordering::Relaxed);
        if clock.cycle > previous {
            tracing::info!(cycle = clock.cycle, "Daylight cycle wrapped");
        }

        tracing::trace!(hour = clock.hour, "Daylight tick");
        self.client
            .post_state(&self.config.tick_state(clock.hour))
            .await;
    }
}
