//! Effects - side effects declared by the reducer
//!
//! The reducer stays synchronous; anything that touches the network or the
//! disk is described here and carried out by [`EffectHandler`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use skycast_core::{
    ApiClient, LocalStore, LocationQuery, PersistedState, RequestId, ResolverClient, Surface,
    WeatherClient, WeatherRequest,
};
use tokio_util::sync::CancellationToken;
use tui_dispatch::{EffectContext, TaskKey, TaskManager};

use crate::action::Action;

/// Work the reducer asks the runtime to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Resolve a validated query into a place
    Resolve(LocationQuery),
    /// Fetch one surface; the result is tagged with `id`
    Fetch {
        surface: Surface,
        id: RequestId,
        request: WeatherRequest,
    },
    /// Stop any in-flight fetch for a surface
    CancelFetch(Surface),
    /// Write the saved state to disk
    Persist(PersistedState),
}

pub const RESOLVE_TASK: &str = "resolve";
pub const PERSIST_TASK: &str = "persist";

/// Task key for a surface's fetch. Spawning under it aborts the previous fetch.
pub fn fetch_task(surface: Surface) -> TaskKey {
    TaskKey::new(format!("fetch.{}", surface.key()))
}

/// Runs effects against the API and local storage.
///
/// Each surface's fetch carries its own [`CancellationToken`]. Starting a
/// new fetch cancels the previous token before the new task is spawned, so
/// a superseded request stops at its next suspension point.
#[derive(Debug)]
pub struct EffectHandler {
    resolver: ResolverClient,
    weather: WeatherClient,
    storage: LocalStore,
    fetches: HashMap<Surface, CancellationToken>,
    /// Generation of the newest saved state written to disk.
    written: Arc<Mutex<u64>>,
    issued: u64,
}

impl EffectHandler {
    /// Create a new handler talking to `api` and saving into `storage`.
    pub fn new(api: ApiClient, storage: LocalStore) -> Self {
        Self {
            resolver: ResolverClient::new(api.clone()),
            weather: WeatherClient::new(api),
            storage,
            fetches: HashMap::new(),
            written: Arc::new(Mutex::new(0)),
            issued: 0,
        }
    }

    /// Entry point for the runtime's effect callback.
    pub fn handle(&mut self, effect: Effect, ctx: &mut EffectContext<'_, Action>) {
        self.apply(effect, ctx.tasks());
    }

    /// Carry out one effect by spawning keyed tasks on `tasks`.
    pub fn apply(&mut self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::Resolve(query) => {
                let resolver = self.resolver.clone();
                tasks.spawn(RESOLVE_TASK, async move {
                    match resolver.resolve(&query).await {
                        Ok(location) => Action::LocationDidResolve(location),
                        Err(e) => Action::LocationDidError(e),
                    }
                });
            }

            Effect::Fetch {
                surface,
                id,
                request,
            } => {
                let token = self.renew_token(surface);
                let weather = self.weather.clone();
                tracing::debug!(%surface, %id, units = %request.units, "fetching");
                match surface {
                    Surface::Current => {
                        tasks.spawn(fetch_task(surface), async move {
                            let result = weather.fetch_current(&request, &token).await;
                            Action::CurrentDidFetch(id, result)
                        });
                    }
                    Surface::Extended => {
                        tasks.spawn(fetch_task(surface), async move {
                            let result = weather.fetch_extended(&request, &token).await;
                            Action::ExtendedDidFetch(id, result)
                        });
                    }
                }
            }

            Effect::CancelFetch(surface) => {
                if let Some(token) = self.fetches.remove(&surface) {
                    token.cancel();
                }
                tasks.cancel(&fetch_task(surface));
            }

            Effect::Persist(saved) => {
                self.issued += 1;
                let generation = self.issued;
                let storage = self.storage.clone();
                let written = Arc::clone(&self.written);
                tasks.spawn(PERSIST_TASK, async move {
                    let write = tokio::task::spawn_blocking(move || {
                        save_in_order(&saved, &storage, &written, generation)
                    });
                    let result = match write.await {
                        Ok(result) => result,
                        Err(e) => Err(e.to_string()),
                    };
                    match result {
                        Ok(()) => Action::PersistDidSave,
                        Err(message) => {
                            tracing::warn!(error = %message, "failed to save state");
                            let message = format!("Could not save locations: {message}");
                            Action::PersistDidError(message)
                        }
                    }
                });
            }
        }
    }

    /// Cancel the surface's previous fetch and hand out a token for the next.
    fn renew_token(&mut self, surface: Surface) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.fetches.insert(surface, token.clone()) {
            previous.cancel();
        }
        token
    }
}

/// Write `saved` unless a newer generation already reached the disk.
fn save_in_order(
    saved: &PersistedState,
    storage: &LocalStore,
    written: &Mutex<u64>,
    generation: u64,
) -> Result<(), String> {
    let mut newest = written.lock().map_err(|e| e.to_string())?;
    if *newest > generation {
        tracing::debug!(generation, newest = *newest, "skipping superseded save");
        return Ok(());
    }
    saved.save(storage).map_err(|e| e.to_string())?;
    *newest = generation;
    Ok(())
}
