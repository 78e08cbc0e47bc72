//! Nature Explorer Game Core
//!
//! Platform-agnostic game state for the Nature Explorer kids' game: the scene's
//! animals, plants and weather, the badges and missions the player earns, and
//! a store that persists snapshots through a pluggable key-value backend.
//! Rendering, audio playback and animation live with the caller.

pub mod animals;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod interaction;
pub mod plants;
pub mod progress;
pub mod sound;
pub mod state;
pub mod storage;
pub mod store;
pub mod weather;

// Re-export commonly used types
pub use animals::{AnimalKind, AnimalState, Mood, Position};
pub use catalog::{FOODS, Food, HIDDEN_CREATURES, HiddenCreature, food, hidden_creature};
pub use clock::{FixedClock, SystemClock};
pub use interaction::{Interaction, Reaction};
pub use plants::{PlantKind, PlantState};
pub use progress::{Badge, Mission, evaluate_badges};
pub use sound::SoundKind;
pub use state::GameState;
pub use storage::{MemoryStore, StorageError};
pub use store::GameStore;
pub use weather::{Sky, TimeOfDay, WeatherPatch, WeatherState};

/// Trait for abstracting string persistence
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Fetch the value under `key`, `None` when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Remove the value under `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn clear(&self, key: &str) -> Result<(), Self::Error>;
}

/// Source of wall-clock time in milliseconds since the Unix epoch
pub trait Clock {
    fn now_ms(&self) -> u64;
}
