//! Catalog identifiers and tuning limits for the Nature Explorer core.
//!
//! Badge and mission ids double as the keys the presentation layer uses, so
//! they are spelled exactly as they appear in saved snapshots.

// Persistence ---------------------------------------------------------------
pub const SAVE_KEY: &str = "gameState";
pub const GUEST_USER_ID: &str = "guest";

// Growth and weather limits -------------------------------------------------
pub const MAX_PLANT_STAGE: u8 = 4;
pub const MAX_CLOUD_COUNT: u8 = 10;
pub const DEFAULT_CLOUD_COUNT: u8 = 2;

// Badges --------------------------------------------------------------------
pub const BADGE_RAIN_MAKER: &str = "rain-maker";
pub const BADGE_SUPER_FEEDER: &str = "super-feeder";
pub const BADGE_PLANT_HERO: &str = "plant-hero";
pub const BADGE_SKY_WIZARD: &str = "sky-wizard";
pub const BADGE_NIGHT_EXPLORER: &str = "night-explorer";

// Missions ------------------------------------------------------------------
pub const MISSION_FIND_BUTTERFLIES: &str = "find-butterflies";
pub const MISSION_WATER_FLOWER: &str = "water-flower";
pub const MISSION_MAKE_RAINBOW: &str = "make-rainbow";

// Hidden creatures ----------------------------------------------------------
pub const BUTTERFLY_CREATURE_ID: &str = "butterfly";

// Audio ---------------------------------------------------------------------
pub const DEFAULT_SOUND_VOLUME: f32 = 0.5;
