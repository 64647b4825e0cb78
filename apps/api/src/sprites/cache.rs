//! Process-wide sprite cache with single-flight loading.
//!
//! # Concurrency
//! - One `Mutex<HashMap>` guards the slot table. It is held only long enough to
//!   look up or swap a slot, never across a store read or a decode.
//! - A cold name gets a `Loading` slot owned by the first caller (the leader).
//!   Everyone else asking for that name parks on the slot's condvar and receives
//!   the leader's result, so N concurrent misses cost exactly one store read.
//! - Success replaces the slot with `Ready` for the life of the process.
//!   Failure removes the slot, so a later request retries the store.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::sprites::{load_sprite, AssetError, AssetStore, Sprite, SpriteName};

type LoadResult = Result<Arc<Sprite>, AssetError>;

enum Slot {
    Ready(Arc<Sprite>),
    Loading(Arc<InFlight>),
}

/// Rendezvous between the leader of a load and its waiters.
struct InFlight {
    outcome: Mutex<Option<LoadResult>>,
    done: Condvar,
}

impl InFlight {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> LoadResult {
        let mut outcome = lock(&self.outcome);
        loop {
            if let Some(result) = outcome.as_ref() {
                return result.clone();
            }
            outcome = self
                .done
                .wait(outcome)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn publish(&self, result: LoadResult) {
        *lock(&self.outcome) = Some(result);
        self.done.notify_all();
    }
}

enum Role {
    Lead(Arc<InFlight>),
    Wait(Arc<InFlight>),
}

pub struct SpriteCache {
    store: Arc<dyn AssetStore>,
    slots: Mutex<HashMap<SpriteName, Slot>>,
}

impl SpriteCache {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Parses and normalizes `raw`, then resolves it. `water:deep` and
    /// `water_deep` share one entry.
    pub fn resolve(&self, raw: &str) -> LoadResult {
        let name = SpriteName::parse(raw)?;
        self.resolve_name(&name)
    }

    pub fn resolve_name(&self, name: &SpriteName) -> LoadResult {
        let role = {
            let mut slots = lock(&self.slots);
            match slots.get(name) {
                Some(Slot::Ready(sprite)) => {
                    debug!("Sprite cache hit: {name}");
                    return Ok(Arc::clone(sprite));
                }
                Some(Slot::Loading(flight)) => Role::Wait(Arc::clone(flight)),
                None => {
                    let flight = Arc::new(InFlight::new());
                    slots.insert(name.clone(), Slot::Loading(Arc::clone(&flight)));
                    Role::Lead(flight)
                }
            }
        };

        match role {
            Role::Wait(flight) => {
                debug!("Waiting on in-flight load of {name}");
                flight.wait()
            }
            Role::Lead(flight) => {
                let mut lead = Leader {
                    cache: self,
                    name,
                    flight,
                    finished: false,
                };
                let result = load_sprite(self.store.as_ref(), name).map(Arc::new);
                lead.finish(result.clone());
                result
            }
        }
    }

    /// Number of successfully loaded sprites.
    pub fn len(&self) -> usize {
        lock(&self.slots)
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `name` has been loaded successfully.
    pub fn contains(&self, name: &SpriteName) -> bool {
        matches!(lock(&self.slots).get(name), Some(Slot::Ready(_)))
    }
}

/// Completes a load exactly once, even if the leader unwinds mid-load.
struct Leader<'a> {
    cache: &'a SpriteCache,
    name: &'a SpriteName,
    flight: Arc<InFlight>,
    finished: bool,
}

impl Leader<'_> {
    fn finish(&mut self, result: LoadResult) {
        {
            let mut slots = lock(&self.cache.slots);
            match &result {
                Ok(sprite) => {
                    slots.insert(self.name.clone(), Slot::Ready(Arc::clone(sprite)));
                }
                Err(e) => {
                    warn!("Failed to load sprite {}: {e}", self.name);
                    slots.remove(self.name);
                }
            }
        }
        self.flight.publish(result);
        self.finished = true;
    }
}

impl Drop for Leader<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(Err(AssetError::Abandoned(self.name.to_string())));
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
