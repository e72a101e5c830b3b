//! Weather container: fetches on address change and on a fixed interval
//!
//! Fetches run one at a time inside [`WeatherContainer::run`]. When the
//! address changes while a fetch is in flight, that fetch is abandoned and
//! a new one starts for the new address, so a slow response can never
//! overwrite data for a newer location.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use chrono::Utc;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use super::Dashboard;
use crate::models::AddressContext;
use crate::weather::WeatherSource;

/// Sink for fetch errors that would otherwise only flip the error flag
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &Error, address: &AddressContext);
}

/// Reports errors through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture(&self, error: &Error, address: &AddressContext) {
        error!(
            city = address.city_name().unwrap_or("<unresolved>"),
            "Failed to fetch weather: {error:#}"
        );
    }
}

pub struct WeatherContainer {
    source: Arc<dyn WeatherSource>,
    reporter: Arc<dyn ErrorReporter>,
    dashboard: Arc<RwLock<Dashboard>>,
    updates: watch::Sender<u64>,
}

impl WeatherContainer {
    pub fn new(source: Arc<dyn WeatherSource>, dashboard: Arc<RwLock<Dashboard>>) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            source,
            reporter: Arc::new(TracingReporter),
            dashboard,
            updates,
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<RwLock<Dashboard>> {
        Arc::clone(&self.dashboard)
    }

    /// Counter bumped after every completed fetch
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Fetch weather for `address` and apply the outcome to the dashboard
    #[instrument(skip_all, fields(city = address.city_name().unwrap_or_default()))]
    pub async fn refresh(&self, address: &AddressContext) {
        {
            let mut dashboard = self.dashboard.write().await;
            dashboard.set_address(address.clone());
            dashboard.begin_fetch();
        }

        let result = self.source.fetch(address).await;

        {
            let mut dashboard = self.dashboard.write().await;
            match result {
                Ok(bundle) => {
                    info!("Weather updated ({} days)", bundle.forecast.days.len());
                    dashboard.apply_bundle(bundle, Utc::now());
                }
                Err(e) => {
                    self.reporter.capture(&e, address);
                    dashboard.apply_error();
                }
            }
        }

        self.updates.send_modify(|n| *n += 1);
    }

    /// Fetch now, then on every `period` and on every address change until
    /// `shutdown` fires or the address sender is dropped.
    pub async fn run(
        &self,
        mut address_rx: watch::Receiver<AddressContext>,
        period: Duration,
        shutdown: CancellationToken,
    ) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut fetch_now = true;

        loop {
            if !fetch_now {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    _ = ticker.tick() => debug!("Poll interval elapsed"),
                    changed = address_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        debug!("Address changed");
                        ticker.reset();
                    }
                }
            }
            fetch_now = false;

            let address = address_rx.borrow_and_update().clone();
            if address.latlong.is_none() {
                debug!("No location resolved yet, skipping fetch");
                let mut dashboard = self.dashboard.write().await;
                dashboard.set_address(address);
                dashboard.end_fetch();
                continue;
            }

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                changed = address_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    debug!("Address changed during fetch, restarting");
                    self.dashboard.write().await.end_fetch();
                    fetch_now = true;
                    ticker.reset();
                }
                () = self.refresh(&address) => {}
            }
        }

        debug!("Weather container stopped");
    }

    /// Run the container on its own task
    pub fn spawn(
        self: Arc<Self>,
        address_rx: watch::Receiver<AddressContext>,
        period: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(address_rx, period, shutdown).await })
    }
}
