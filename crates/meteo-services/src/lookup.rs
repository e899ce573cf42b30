//! Province weather lookup workflow.
//!
//! Resolves a slug through the province directory, geocodes the capital,
//! fetches current weather and publishes each step as a `LookupState`.
//! Every invocation runs under a `LookupTicket`; starting a new lookup
//! cancels the previous ticket so a slow, stale response can never
//! overwrite the state of a newer selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use meteo_provinces::{ProvinceDirectory, ProvinceRecord};
use meteo_weather::{WeatherError, WeatherLookup};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::lookup_state::{LookupResult, LookupState, LookupTicket};
use crate::slug_list::SlugList;
use crate::storage::KeyValueStore;

pub struct ProvinceLookup<S> {
    directory: &'static ProvinceDirectory,
    weather: Arc<dyn WeatherLookup>,
    recents: SlugList<S>,
    state_tx: watch::Sender<LookupState>,
    current: Mutex<Option<LookupTicket>>,
    generation: AtomicU64,
}

impl<S: KeyValueStore> ProvinceLookup<S> {
    pub fn new(
        directory: &'static ProvinceDirectory,
        weather: Arc<dyn WeatherLookup>,
        recents: SlugList<S>,
    ) -> Self {
        let (state_tx, _) = watch::channel(LookupState::Idle);
        Self {
            directory,
            weather,
            recents,
            state_tx,
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LookupState {
        self.state_tx.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state_tx.subscribe()
    }

    pub fn recents(&self) -> &SlugList<S> {
        &self.recents
    }

    pub fn directory(&self) -> &'static ProvinceDirectory {
        self.directory
    }

    /// Start a lookup for `slug`: cancel the one in flight, enter `Loading`.
    pub fn begin(&self, slug: &str) -> LookupTicket {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            previous.cancel();
            tracing::debug!(
                "Cancelled lookup #{} for {}",
                previous.generation(),
                previous.slug()
            );
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = LookupTicket::new(generation, slug);
        *current = Some(ticket.clone());

        self.state_tx.send_replace(LookupState::Loading {
            slug: slug.to_string(),
        });
        tracing::debug!("Lookup #{} started for {}", generation, slug);
        ticket
    }

    /// Run the lookup owned by `ticket` and return the resulting state.
    ///
    /// A cancelled invocation changes nothing and returns whatever state the
    /// newer invocation has produced so far.
    pub async fn run(&self, ticket: LookupTicket) -> LookupState {
        if ticket.is_cancelled() {
            return self.state();
        }

        let Some(province) = self.directory.find_by_slug(ticket.slug()) else {
            tracing::info!("Unknown province slug: {}", ticket.slug());
            self.apply(
                &ticket,
                LookupState::NotFound {
                    slug: ticket.slug().to_string(),
                },
            );
            return self.state();
        };

        let geo = match self.weather.geocode(province.capital).await {
            Ok(geo) => geo,
            Err(e) => {
                self.fail(&ticket, e);
                return self.state();
            }
        };

        if ticket.is_cancelled() {
            tracing::debug!(
                "Lookup #{} cancelled after geocoding, skipping weather fetch",
                ticket.generation()
            );
            return self.state();
        }

        let weather = match self.weather.fetch_current_weather(geo.lat, geo.lon).await {
            Ok(weather) => weather,
            Err(e) => {
                self.fail(&ticket, e);
                return self.state();
            }
        };

        let result = LookupResult {
            province: *province,
            display_label: province.display_label(),
            geo,
            weather,
            fetched_at: chrono::Utc::now(),
        };

        if self.apply(&ticket, LookupState::Success(result)) {
            self.remember(province);
        }
        self.state()
    }

    /// `begin` followed by `run`.
    pub async fn navigate(&self, slug: &str) -> LookupState {
        let ticket = self.begin(slug);
        self.run(ticket).await
    }

    /// Abandon the lookup in flight. A pending `Loading` goes back to `Idle`.
    pub fn cancel(&self) {
        let mut current = self.current.lock();
        if let Some(ticket) = current.take() {
            ticket.cancel();
            tracing::debug!("Lookup #{} cancelled", ticket.generation());
        }
        self.state_tx.send_if_modified(|state| {
            if state.is_loading() {
                *state = LookupState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Publish `next` if `ticket` still owns the lookup.
    fn apply(&self, ticket: &LookupTicket, next: LookupState) -> bool {
        let current = self.current.lock();
        let owns = !ticket.is_cancelled()
            && current
                .as_ref()
                .is_some_and(|c| c.generation() == ticket.generation());

        if !owns {
            tracing::debug!(
                "Dropping stale result of lookup #{} for {}",
                ticket.generation(),
                ticket.slug()
            );
            return false;
        }

        self.state_tx.send_replace(next);
        true
    }

    fn fail(&self, ticket: &LookupTicket, error: WeatherError) {
        tracing::warn!("Lookup for {} failed: {}", ticket.slug(), error);
        self.apply(
            ticket,
            LookupState::Error {
                slug: ticket.slug().to_string(),
                kind: error.kind(),
                message: error.to_string(),
            },
        );
    }

    fn remember(&self, province: &ProvinceRecord) {
        if let Err(e) = self.recents.add(province.slug) {
            tracing::warn!("Failed to update recents with {}: {}", province.slug, e);
        }
    }
}
