//! The game store: one owner of the canonical [`GameState`], wired to a
//! key-value backend for snapshots and a clock for timestamps.
use crate::clock::SystemClock;
use crate::constants::SAVE_KEY;
use crate::interaction::{Interaction, Reaction};
use crate::state::GameState;
use crate::storage::StorageError;
use crate::weather::WeatherPatch;
use crate::{Clock, KeyValueStore};

/// Owns the game state for a session and persists it under [`SAVE_KEY`].
///
/// Persistence never fails loudly: backend and serialization errors are logged
/// and reported as a `false` return, and the in-memory state stays usable.
pub struct GameStore<S, C = SystemClock>
where
    S: KeyValueStore,
    C: Clock,
{
    storage: S,
    clock: C,
    state: GameState,
}

#[cfg(not(target_arch = "wasm32"))]
impl<S> GameStore<S, SystemClock>
where
    S: KeyValueStore,
{
    /// Open a store on the system clock and load any saved snapshot.
    ///
    /// Not available on wasm targets, where the system clock panics; use
    /// [`GameStore::with_clock`] with a host clock there.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S, C> GameStore<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    /// Open a store and load any saved snapshot, falling back to a fresh session.
    pub fn with_clock(storage: S, clock: C) -> Self {
        let state = GameState::new_session(clock.now_ms());
        let mut store = Self {
            storage,
            clock,
            state,
        };
        store.load_progress();
        store
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn update_weather(&mut self, patch: &WeatherPatch) {
        self.state.update_weather(patch);
    }

    pub fn feed_animal(&mut self, animal_id: &str) -> bool {
        let now = self.clock.now_ms();
        self.state.feed_animal(animal_id, now)
    }

    pub fn water_plant(&mut self, plant_id: &str) -> bool {
        let now = self.clock.now_ms();
        self.state.water_plant(plant_id, now)
    }

    pub fn discover_creature(&mut self, creature_id: &str) -> bool {
        self.state.discover_creature(creature_id)
    }

    pub fn update_mission_progress(&mut self, mission_id: &str, progress: u32) -> bool {
        self.state.update_mission_progress(mission_id, progress)
    }

    /// Returns the ids of badges unlocked by this call.
    pub fn check_badges(&mut self) -> Vec<String> {
        let now = self.clock.now_ms();
        self.state.check_badges(now)
    }

    /// Apply one interaction with its quest bookkeeping, then unlock any badge
    /// that crossed its threshold.
    pub fn dispatch(&mut self, interaction: &Interaction) -> Reaction {
        let now = self.clock.now_ms();
        let mut reaction = self.state.apply_interaction(interaction, now);
        reaction.earned_badges = self.state.check_badges(now);
        if reaction.celebrates() {
            log::debug!(
                "{} unlocked badges: {}",
                interaction.label(),
                reaction.earned_badges.join(", ")
            );
        }
        reaction
    }

    /// Write the whole state under [`SAVE_KEY`], stamped with the current time.
    ///
    /// Returns whether the snapshot was written. `last_played` only moves when
    /// it was.
    pub fn save_progress(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.write_snapshot(now) {
            Ok(()) => {
                self.state.last_played = now;
                log::debug!("saved progress at {now}");
                true
            }
            Err(err) => {
                log::warn!("failed to save progress: {err}");
                false
            }
        }
    }

    /// Replace the state with the saved snapshot, if there is a readable one.
    ///
    /// Returns whether a snapshot was loaded. A missing or unreadable snapshot
    /// leaves the current state in place.
    pub fn load_progress(&mut self) -> bool {
        match self.read_snapshot() {
            Ok(Some(state)) => {
                self.state = state;
                log::debug!("loaded progress last played at {}", self.state.last_played);
                true
            }
            Ok(None) => {
                log::debug!("no saved progress under {SAVE_KEY}");
                false
            }
            Err(err) => {
                log::warn!("failed to load progress: {err}");
                false
            }
        }
    }

    /// Forget the saved snapshot and start over from the default catalog.
    pub fn reset_progress(&mut self) {
        if let Err(err) = self.storage.clear(SAVE_KEY) {
            log::warn!("failed to clear saved progress: {err}");
        }
        self.state = GameState::new_session(self.clock.now_ms());
        log::debug!("progress reset");
    }

    fn write_snapshot(&self, now_ms: u64) -> Result<(), StorageError<S::Error>> {
        let snapshot = GameState {
            last_played: now_ms,
            ..self.state.clone()
        };
        let json = snapshot.to_json()?;
        self.storage
            .save(SAVE_KEY, &json)
            .map_err(StorageError::Backend)
    }

    fn read_snapshot(&self) -> Result<Option<GameState>, StorageError<S::Error>> {
        let Some(json) = self.storage.load(SAVE_KEY).map_err(StorageError::Backend)? else {
            return Ok(None);
        };
        Ok(Some(GameState::from_json(&json)?))
    }
}
