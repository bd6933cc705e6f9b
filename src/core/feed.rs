//! Background feed refresh service.
//!
//! A worker thread fetches every outlook layer and the daycast once per
//! refresh interval and reports results as [`FeedUpdate`] messages. Each
//! source is fetched on its own scoped thread so one slow endpoint does not
//! hold up the others.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use super::nbm::{self, Daycast};
use super::spc::{self, OutlookLayer, RiskReading};
use super::http;
use crate::config::{Config, Location};
use crate::constants;

/// Feed update messages sent from the worker to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    /// A refresh cycle has begun.
    CycleStarted,
    /// Fresh reading for one outlook layer.
    Risk(OutlookLayer, RiskReading),
    /// Fresh daycast temperatures.
    Daycast(Daycast),
    /// One source failed; other sources are unaffected.
    Error {
        /// Which source failed (layer name or `daycast`).
        source: &'static str,
        message: String,
    },
    /// A refresh cycle has finished.
    CycleComplete { ok: usize, failed: usize },
}

/// Where and how often the worker fetches.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub location: Location,
    pub refresh: Duration,
    pub arcgis_base: String,
    pub nbm_base: String,
}

impl FeedSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            location: config.location.clone(),
            refresh: Duration::from_secs(config.refresh_secs),
            arcgis_base: constants::ARCGIS_BASE_URL.to_string(),
            nbm_base: constants::NBM_TEXT_URL.to_string(),
        }
    }
}

/// Handle to a running feed worker.
pub struct FeedHandle {
    wake: Sender<()>,
    #[allow(dead_code)]
    handle: thread::JoinHandle<()>,
}

impl FeedHandle {
    /// Asks the worker to start a new cycle without waiting for the interval.
    pub fn refresh_now(&self) {
        let _ = self.wake.send(());
    }
}

/// Spawns the feed worker.
///
/// Updates are converted into the caller's message type so the worker can
/// share a channel with other event sources. The worker stops as soon as a
/// send fails, i.e. once the receiving side has been dropped.
pub fn spawn_feed_worker<T>(settings: FeedSettings, sink: Sender<T>) -> FeedHandle
where
    T: From<FeedUpdate> + Send + 'static,
{
    let (wake, wake_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        let mut client: Option<Client> = None;
        loop {
            if client.is_none() {
                match http::build_client() {
                    Ok(c) => client = Some(c),
                    Err(e) => {
                        let update = FeedUpdate::Error {
                            source: "http",
                            message: e.to_string(),
                        };
                        if sink.send(update.into()).is_err() {
                            return;
                        }
                    }
                }
            }

            if let Some(ref c) = client {
                if !run_cycle(c, &settings, &sink) {
                    tracing::debug!("feed receiver dropped, stopping worker");
                    return;
                }
            }

            match wake_rx.recv_timeout(settings.refresh) {
                Ok(()) => {
                    // Collapse repeated refresh requests into one cycle.
                    while wake_rx.try_recv().is_ok() {}
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    });

    FeedHandle { wake, handle }
}

/// Fetches every source once. Returns `false` if the receiver is gone.
fn run_cycle<T>(client: &Client, settings: &FeedSettings, sink: &Sender<T>) -> bool
where
    T: From<FeedUpdate> + Send,
{
    if sink.send(FeedUpdate::CycleStarted.into()).is_err() {
        return false;
    }
    tracing::info!(location = %settings.location.name, "feed cycle started");

    let results: Vec<FeedUpdate> = thread::scope(|scope| {
        let mut jobs = Vec::new();
        for layer in OutlookLayer::ALL {
            jobs.push(scope.spawn(move || {
                match spc::fetch_risk(client, &settings.arcgis_base, layer, &settings.location) {
                    Ok(reading) => FeedUpdate::Risk(layer, reading),
                    Err(e) => FeedUpdate::Error {
                        source: layer.common_name(),
                        message: e.to_string(),
                    },
                }
            }));
        }
        jobs.push(scope.spawn(move || {
            match nbm::fetch_daycast(client, &settings.nbm_base, &settings.location.station) {
                Ok(daycast) => FeedUpdate::Daycast(daycast),
                Err(e) => FeedUpdate::Error {
                    source: "daycast",
                    message: e.to_string(),
                },
            }
        }));

        jobs.into_iter()
            .map(|job| {
                job.join().unwrap_or_else(|_| FeedUpdate::Error {
                    source: "feed",
                    message: "fetch thread panicked".to_string(),
                })
            })
            .collect()
    });

    let failed = results
        .iter()
        .filter(|u| matches!(u, FeedUpdate::Error { .. }))
        .count();
    let ok = results.len() - failed;

    for update in results {
        if let FeedUpdate::Error { source, ref message } = update {
            tracing::warn!(source, %message, "feed source failed");
        }
        if sink.send(update.into()).is_err() {
            return false;
        }
    }

    tracing::info!(ok, failed, "feed cycle complete");
    sink.send(FeedUpdate::CycleComplete { ok, failed }.into())
        .is_ok()
}
