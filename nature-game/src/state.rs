use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::animals::AnimalState;
use crate::catalog;
use crate::constants::{
    BADGE_PLANT_HERO, BADGE_SUPER_FEEDER, GUEST_USER_ID, MAX_CLOUD_COUNT, MAX_PLANT_STAGE,
};
use crate::plants::{PlantKind, PlantState};
use crate::progress::{Badge, Mission, evaluate_badges};
use crate::weather::{WeatherPatch, WeatherState};

/// Everything a play session knows about the scene and the player's progress.
///
/// Serialized as-is to form the saved snapshot, so field names follow the
/// camelCase layout of the browser save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub user_id: String,
    pub animals: Vec<AnimalState>,
    pub plants: Vec<PlantState>,
    pub weather: WeatherState,
    pub badges: Vec<Badge>,
    pub missions: Vec<Mission>,
    pub total_interactions: u64,
    pub hidden_creatures_found: Vec<String>,
    pub last_played: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            user_id: GUEST_USER_ID.to_string(),
            animals: catalog::default_animals(),
            plants: catalog::default_plants(),
            weather: WeatherState::default(),
            badges: catalog::default_badges(),
            missions: catalog::default_missions(),
            total_interactions: 0,
            hidden_creatures_found: Vec::new(),
            last_played: 0,
        }
    }
}

impl GameState {
    /// Fresh default state for a session starting at `now_ms`.
    #[must_use]
    pub fn new_session(now_ms: u64) -> Self {
        Self {
            last_played: now_ms,
            ..Self::default()
        }
    }

    /// Parse a saved snapshot and [`normalize`](Self::normalize) it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a game state.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        state.normalize();
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Re-establish the derived invariants on data from outside the store:
    /// clamp stages and clouds, re-derive fruit, collapse duplicate finds.
    /// A state produced by the store is left untouched.
    pub fn normalize(&mut self) {
        for plant in &mut self.plants {
            plant.normalize();
        }
        self.weather.normalize();
        let mut seen = HashSet::new();
        self.hidden_creatures_found.retain(|id| seen.insert(id.clone()));
    }

    #[must_use]
    pub fn animal(&self, id: &str) -> Option<&AnimalState> {
        self.animals.iter().find(|animal| animal.id == id)
    }

    pub fn animal_mut(&mut self, id: &str) -> Option<&mut AnimalState> {
        self.animals.iter_mut().find(|animal| animal.id == id)
    }

    #[must_use]
    pub fn plant(&self, id: &str) -> Option<&PlantState> {
        self.plants.iter().find(|plant| plant.id == id)
    }

    pub fn plant_mut(&mut self, id: &str) -> Option<&mut PlantState> {
        self.plants.iter_mut().find(|plant| plant.id == id)
    }

    #[must_use]
    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.id == id)
    }

    pub fn badge_mut(&mut self, id: &str) -> Option<&mut Badge> {
        self.badges.iter_mut().find(|badge| badge.id == id)
    }

    #[must_use]
    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    pub fn mission_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|mission| mission.id == id)
    }

    #[must_use]
    pub fn has_found_creature(&self, creature_id: &str) -> bool {
        self.hidden_creatures_found
            .iter()
            .any(|found| found == creature_id)
    }

    #[must_use]
    pub fn total_feed_count(&self) -> u32 {
        self.animals
            .iter()
            .fold(0u32, |sum, animal| sum.saturating_add(animal.feed_count))
    }

    /// Highest stage among tree plants, `None` when the scene has no trees.
    #[must_use]
    pub fn tallest_tree_stage(&self) -> Option<u8> {
        self.plants
            .iter()
            .filter(|plant| plant.kind == PlantKind::Tree)
            .map(|plant| plant.stage)
            .max()
    }

    #[must_use]
    pub fn earned_badge_count(&self) -> usize {
        self.badges.iter().filter(|badge| badge.earned).count()
    }

    #[must_use]
    pub fn completed_mission_count(&self) -> usize {
        self.missions.iter().filter(|mission| mission.completed).count()
    }

    fn record_interaction(&mut self) {
        self.total_interactions = self.total_interactions.saturating_add(1);
    }

    pub fn update_weather(&mut self, patch: &WeatherPatch) {
        self.weather.apply(patch);
        self.record_interaction();
    }

    /// Feed an animal and refresh the feeder badge from the total feed count.
    /// Unknown ids feed nothing but still count as an interaction.
    ///
    /// Returns whether an animal was fed.
    pub fn feed_animal(&mut self, animal_id: &str, now_ms: u64) -> bool {
        let fed = if let Some(animal) = self.animal_mut(animal_id) {
            animal.feed(now_ms);
            true
        } else {
            false
        };
        self.record_interaction();
        let total = self.total_feed_count();
        if let Some(badge) = self.badge_mut(BADGE_SUPER_FEEDER) {
            badge.record_progress(total);
        }
        fed
    }

    /// Water a plant and refresh the plant-hero badge from the tallest tree.
    /// With no trees in the scene the badge is left alone.
    ///
    /// Returns whether a plant was watered.
    pub fn water_plant(&mut self, plant_id: &str, now_ms: u64) -> bool {
        let watered = if let Some(plant) = self.plant_mut(plant_id) {
            plant.water(now_ms);
            true
        } else {
            false
        };
        self.record_interaction();
        let Some(stage) = self.tallest_tree_stage() else {
            return watered;
        };
        if let Some(badge) = self.badge_mut(BADGE_PLANT_HERO) {
            badge.record_progress(u32::from(stage));
        }
        watered
    }

    /// Record a hidden creature. Repeat finds are not appended again but
    /// still count as an interaction.
    ///
    /// Returns whether this was a new find.
    pub fn discover_creature(&mut self, creature_id: &str) -> bool {
        let new_find = !self.has_found_creature(creature_id);
        if new_find {
            self.hidden_creatures_found.push(creature_id.to_string());
        }
        self.record_interaction();
        new_find
    }

    /// Overwrite a mission's progress with an absolute value.
    ///
    /// Returns whether the mission exists.
    pub fn update_mission_progress(&mut self, mission_id: &str, progress: u32) -> bool {
        let Some(mission) = self.mission_mut(mission_id) else {
            return false;
        };
        mission.set_progress(progress);
        true
    }

    /// Unlock every badge whose threshold is met. Safe to call repeatedly.
    ///
    /// Returns the ids of badges unlocked by this call.
    pub fn check_badges(&mut self, now_ms: u64) -> Vec<String> {
        evaluate_badges(&mut self.badges, now_ms)
    }

    /// Describe every broken invariant. An empty list means the state is sound.
    #[must_use]
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for plant in &self.plants {
            if plant.stage > MAX_PLANT_STAGE {
                violations.push(format!("plant {} stage {} above max", plant.id, plant.stage));
            }
            if plant.has_fruit != plant.is_fully_grown() {
                violations.push(format!(
                    "plant {} fruit flag {} disagrees with stage {}",
                    plant.id, plant.has_fruit, plant.stage
                ));
            }
        }

        if self.weather.cloud_count > MAX_CLOUD_COUNT {
            violations.push(format!("cloud count {} above max", self.weather.cloud_count));
        }

        for badge in &self.badges {
            if badge.earned && badge.earned_at.is_none() {
                violations.push(format!("badge {} earned without timestamp", badge.id));
            }
        }

        for mission in &self.missions {
            if mission.completed != (mission.progress >= mission.target) {
                violations.push(format!(
                    "mission {} completed={} with progress {}/{}",
                    mission.id, mission.completed, mission.progress, mission.target
                ));
            }
        }

        let mut seen = HashSet::new();
        for id in &self.hidden_creatures_found {
            if !seen.insert(id.as_str()) {
                violations.push(format!("creature {id} recorded twice"));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::Mood;
    use crate::constants::{MISSION_MAKE_RAINBOW, MISSION_WATER_FLOWER};
    use crate::weather::Sky;

    #[test]
    fn default_state_is_sound() {
        let state = GameState::default();
        assert_eq!(state.user_id, GUEST_USER_ID);
        assert_eq!(state.total_interactions, 0);
        assert!(state.hidden_creatures_found.is_empty());
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn feed_unknown_animal_still_counts() {
        let mut state = GameState::default();
        assert!(state.feed_animal("bird1", 10));
        assert!(!state.feed_animal("nonexistent", 20));

        let bird = state.animal("bird1").unwrap();
        assert_eq!(bird.feed_count, 1);
        assert_eq!(bird.mood, Mood::Happy);
        assert_eq!(bird.last_fed, 10);
        assert_eq!(state.total_interactions, 2);
        assert_eq!(state.badge(BADGE_SUPER_FEEDER).unwrap().progress, 1);
    }

    #[test]
    fn feeder_badge_tracks_total_across_animals() {
        let mut state = GameState::default();
        state.feed_animal("bird1", 1);
        state.feed_animal("deer1", 2);
        state.feed_animal("deer1", 3);
        assert_eq!(state.total_feed_count(), 3);
        assert_eq!(state.badge(BADGE_SUPER_FEEDER).unwrap().progress, 3);
    }

    #[test]
    fn watering_tree_drives_plant_hero() {
        let mut state = GameState::default();
        for _ in 0..4 {
            state.water_plant("tree1", 100);
        }
        let tree = state.plant("tree1").unwrap();
        assert_eq!(tree.stage, MAX_PLANT_STAGE);
        assert!(tree.has_fruit);
        assert_eq!(tree.water_count, 4);
        assert_eq!(state.badge(BADGE_PLANT_HERO).unwrap().progress, 4);
        assert_eq!(state.total_interactions, 4);
    }

    #[test]
    fn watering_without_trees_leaves_plant_hero_alone() {
        let mut state = GameState::default();
        state.plants.retain(|plant| plant.kind != PlantKind::Tree);
        state.badge_mut(BADGE_PLANT_HERO).unwrap().progress = 2;

        assert!(state.water_plant("flower1", 5));
        assert_eq!(state.tallest_tree_stage(), None);
        assert_eq!(state.badge(BADGE_PLANT_HERO).unwrap().progress, 2);
    }

    #[test]
    fn watering_a_flower_reports_tree_stage() {
        let mut state = GameState::default();
        state.water_plant("flower1", 5);
        assert_eq!(state.badge(BADGE_PLANT_HERO).unwrap().progress, 1);
    }

    #[test]
    fn discovery_has_set_semantics() {
        let mut state = GameState::default();
        assert!(state.discover_creature("firefly"));
        assert!(!state.discover_creature("firefly"));
        assert_eq!(state.hidden_creatures_found, vec!["firefly".to_string()]);
        assert_eq!(state.total_interactions, 2);
    }

    #[test]
    fn mission_progress_is_absolute_and_uncounted() {
        let mut state = GameState::default();
        assert!(state.update_mission_progress(MISSION_MAKE_RAINBOW, 1));
        assert!(state.mission(MISSION_MAKE_RAINBOW).unwrap().completed);

        assert!(state.update_mission_progress(MISSION_WATER_FLOWER, 7));
        assert_eq!(state.mission(MISSION_WATER_FLOWER).unwrap().progress, 7);

        assert!(!state.update_mission_progress("slay-dragon", 1));
        assert_eq!(state.total_interactions, 0);
    }

    #[test]
    fn weather_update_counts_even_when_empty() {
        let mut state = GameState::default();
        state.update_weather(&WeatherPatch::default());
        state.update_weather(&WeatherPatch::sky(Sky::Cloudy));
        assert_eq!(state.weather.current, Sky::Cloudy);
        assert_eq!(state.total_interactions, 2);
    }

    #[test]
    fn check_badges_is_idempotent() {
        let mut state = GameState::default();
        state.badge_mut(BADGE_PLANT_HERO).unwrap().record_progress(4);
        assert_eq!(state.check_badges(50), vec![BADGE_PLANT_HERO.to_string()]);
        let after_first = state.badges.clone();
        assert!(state.check_badges(60).is_empty());
        assert_eq!(state.badges, after_first);
        assert_eq!(state.total_interactions, 0);
    }

    #[test]
    fn normalize_repairs_foreign_snapshot() {
        let mut state = GameState::default();
        state.plants[0].stage = 9;
        state.weather.cloud_count = 40;
        state.hidden_creatures_found = vec!["ladybug".into(), "firefly".into(), "ladybug".into()];
        assert!(!state.invariant_violations().is_empty());

        state.normalize();
        assert_eq!(state.plants[0].stage, MAX_PLANT_STAGE);
        assert!(state.plants[0].has_fruit);
        assert_eq!(state.weather.cloud_count, MAX_CLOUD_COUNT);
        assert_eq!(
            state.hidden_creatures_found,
            vec!["ladybug".to_string(), "firefly".to_string()]
        );
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn normalize_is_identity_on_sound_state() {
        let mut state = GameState::new_session(1_000);
        state.water_plant("tree1", 1_001);
        state.discover_creature("chameleon");
        let before = state.clone();
        state.normalize();
        assert_eq!(state, before);
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let mut state = GameState::new_session(7);
        state.feed_animal("rabbit1", 8);
        state.badge_mut(BADGE_SUPER_FEEDER).unwrap().record_progress(20);
        state.check_badges(9);
        let json = state.to_json().unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn counts_summarize_progress() {
        let mut state = GameState::default();
        state.update_mission_progress(MISSION_MAKE_RAINBOW, 1);
        state.badge_mut(BADGE_PLANT_HERO).unwrap().record_progress(4);
        state.check_badges(1);
        assert_eq!(state.completed_mission_count(), 1);
        assert_eq!(state.earned_badge_count(), 1);
    }
}
