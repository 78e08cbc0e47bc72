//! User intents coming from the scene and the quest progress they drive.
//!
//! Each [`Interaction`] maps onto one or more [`GameState`] transitions plus
//! the badge and mission bookkeeping the scene buttons used to do by hand.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BADGE_NIGHT_EXPLORER, BADGE_RAIN_MAKER, BADGE_SKY_WIZARD, BUTTERFLY_CREATURE_ID,
    MISSION_FIND_BUTTERFLIES, MISSION_MAKE_RAINBOW, MISSION_WATER_FLOWER,
};
use crate::catalog::food;
use crate::plants::PlantKind;
use crate::sound::SoundKind;
use crate::state::GameState;
use crate::weather::{Sky, WeatherPatch};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Interaction {
    FeedAnimal(String),
    /// Feeding-game attempt: only food suited to the animal's kind is eaten.
    FeedWith { animal: String, food: String },
    WaterPlant(String),
    ChangeSky(Sky),
    ToggleTimeOfDay,
    AddCloud,
    RemoveCloud,
    DiscoverCreature(String),
    SpotButterfly,
}

impl Interaction {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FeedAnimal(_) => "feed-animal",
            Self::FeedWith { .. } => "feed-with",
            Self::WaterPlant(_) => "water-plant",
            Self::ChangeSky(_) => "change-sky",
            Self::ToggleTimeOfDay => "toggle-time-of-day",
            Self::AddCloud => "add-cloud",
            Self::RemoveCloud => "remove-cloud",
            Self::DiscoverCreature(_) => "discover-creature",
            Self::SpotButterfly => "spot-butterfly",
        }
    }
}

/// What the presentation layer should do after an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub cue: SoundKind,
    pub earned_badges: Vec<String>,
    /// Feeding-game verdict, present only for [`Interaction::FeedWith`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_matched: Option<bool>,
}

impl Reaction {
    #[must_use]
    pub const fn new(cue: SoundKind) -> Self {
        Self {
            cue,
            earned_badges: Vec::new(),
            food_matched: None,
        }
    }

    #[must_use]
    pub fn celebrates(&self) -> bool {
        !self.earned_badges.is_empty()
    }

    /// Cues to play, in order: the interaction's own cue, then the fanfare if
    /// any badge was unlocked.
    #[must_use]
    pub fn cues(&self) -> Vec<SoundKind> {
        let mut cues = vec![self.cue];
        if self.celebrates() {
            cues.push(SoundKind::BadgeEarn);
        }
        cues
    }
}

impl GameState {
    /// Apply one interaction and its quest bookkeeping. Badge unlocking is left
    /// to the caller's follow-up [`GameState::check_badges`], so the returned
    /// reaction never lists earned badges.
    pub fn apply_interaction(&mut self, interaction: &Interaction, now_ms: u64) -> Reaction {
        let cue = match interaction {
            Interaction::FeedAnimal(animal_id) => {
                self.feed_animal(animal_id, now_ms);
                SoundKind::AnimalFeed
            }
            Interaction::FeedWith { animal, food } => {
                let matched = self.feed_with(animal, food, now_ms);
                return Reaction {
                    food_matched: Some(matched),
                    ..Reaction::new(if matched {
                        SoundKind::AnimalFeed
                    } else {
                        SoundKind::ButtonTap
                    })
                };
            }
            Interaction::WaterPlant(plant_id) => {
                self.water_plant(plant_id, now_ms);
                let flower_waterings = self.flower_water_count();
                self.advance_mission(MISSION_WATER_FLOWER, flower_waterings);
                SoundKind::PlantWater
            }
            Interaction::ChangeSky(sky) => {
                self.update_weather(&WeatherPatch::sky(*sky));
                if let Some(badge) = self.badge_mut(BADGE_RAIN_MAKER) {
                    badge.bump_progress();
                }
                if *sky == Sky::Rainbow {
                    if let Some(badge) = self.badge_mut(BADGE_SKY_WIZARD) {
                        badge.record_progress(1);
                    }
                    self.advance_mission(MISSION_MAKE_RAINBOW, 1);
                }
                SoundKind::WeatherChange
            }
            Interaction::ToggleTimeOfDay => {
                let patch = WeatherPatch::toggle_time(&self.weather);
                self.update_weather(&patch);
                if self.weather.is_night() {
                    if let Some(badge) = self.badge_mut(BADGE_NIGHT_EXPLORER) {
                        badge.record_progress(1);
                    }
                }
                SoundKind::WeatherChange
            }
            Interaction::AddCloud => {
                let patch = WeatherPatch::add_cloud(&self.weather);
                self.update_weather(&patch);
                SoundKind::WeatherChange
            }
            Interaction::RemoveCloud => {
                let patch = WeatherPatch::remove_cloud(&self.weather);
                self.update_weather(&patch);
                SoundKind::WeatherChange
            }
            Interaction::DiscoverCreature(creature_id) => {
                if self.discover_creature(creature_id) && creature_id == BUTTERFLY_CREATURE_ID {
                    self.spot_butterfly();
                }
                SoundKind::CreatureDiscovery
            }
            Interaction::SpotButterfly => {
                self.spot_butterfly();
                SoundKind::ButtonTap
            }
        };
        Reaction::new(cue)
    }

    /// Feed only when the food suits the animal. A wrong pairing, an unknown
    /// food or an unknown animal leaves the state untouched.
    fn feed_with(&mut self, animal_id: &str, food_id: &str, now_ms: u64) -> bool {
        let suits = match (self.animal(animal_id), food(food_id)) {
            (Some(animal), Some(food)) => food.suits(animal.kind),
            _ => false,
        };
        if suits {
            self.feed_animal(animal_id, now_ms);
        }
        suits
    }

    fn flower_water_count(&self) -> u32 {
        self.plants
            .iter()
            .filter(|plant| plant.kind == PlantKind::Flower)
            .fold(0u32, |sum, plant| sum.saturating_add(plant.water_count))
    }

    fn spot_butterfly(&mut self) {
        let next = self
            .mission(MISSION_FIND_BUTTERFLIES)
            .map_or(0, |mission| mission.progress.saturating_add(1));
        self.advance_mission(MISSION_FIND_BUTTERFLIES, next);
    }

    fn advance_mission(&mut self, mission_id: &str, value: u32) {
        if let Some(mission) = self.mission_mut(mission_id) {
            mission.advance_to(value);
        }
    }
}
