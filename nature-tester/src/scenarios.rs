use anyhow::{Result, ensure};
use nature_game::constants::{
    BADGE_NIGHT_EXPLORER, BADGE_PLANT_HERO, BADGE_RAIN_MAKER, BADGE_SKY_WIZARD,
    BADGE_SUPER_FEEDER, MISSION_FIND_BUTTERFLIES, MISSION_MAKE_RAINBOW, MISSION_WATER_FLOWER,
};
use nature_game::{GameState, HIDDEN_CREATURES, Interaction, Sky, SoundKind};

use crate::player::{PlayPlan, PlaySummary};

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub plan: PlayPlan,
}

impl TestScenario {
    fn new(key: &'static str, name: &'static str, plan: PlayPlan) -> Self {
        Self { key, name, plan }
    }
}

const CATALOG: [(&str, &str); 11] = [
    ("smoke", "Smoke Test"),
    ("plant-hero", "Grow the Tree to Fruit"),
    ("super-feeder", "Feed Twenty Times"),
    ("picky-eaters", "Match Food to Animals"),
    ("creature-hunt", "Find Every Hidden Creature"),
    ("rainbow-quest", "Make a Rainbow"),
    ("night-explorer", "Explore at Night"),
    ("rain-maker", "Ten Weather Changes"),
    ("persistence-roundtrip", "Save and Reload Round Trip"),
    ("corrupt-snapshot", "Corrupt Save Falls Back to Defaults"),
    ("random-play", "Seeded Random Play"),
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.to_vec()
}

pub fn all_scenario_keys() -> Vec<String> {
    CATALOG.iter().map(|(key, _)| (*key).to_string()).collect()
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    let key = key.to_lowercase();
    let (key, name) = CATALOG.iter().copied().find(|(k, _)| *k == key)?;
    let plan = match key {
        "smoke" => smoke_plan(),
        "plant-hero" => plant_hero_plan(),
        "super-feeder" => super_feeder_plan(),
        "picky-eaters" => picky_eaters_plan(),
        "creature-hunt" => creature_hunt_plan(),
        "rainbow-quest" => rainbow_plan(),
        "night-explorer" => night_plan(),
        "rain-maker" => rain_maker_plan(),
        "persistence-roundtrip" => PlayPlan::random(120)
            .with_reload()
            .with_expectation(no_violations)
            .with_expectation(reload_matches),
        "corrupt-snapshot" => PlayPlan::scripted(Vec::new())
            .with_preloaded_save("{\"userId\": \"guest\", \"animals\": [")
            .with_expectation(corrupt_save_expectation),
        _ => PlayPlan::random(400).with_expectation(no_violations),
    };
    Some(TestScenario::new(key, name, plan))
}

fn no_violations(summary: &PlaySummary) -> Result<()> {
    ensure!(
        summary.violations.is_empty(),
        "invariants broken: {}",
        summary.violations.join("; ")
    );
    Ok(())
}

fn badge_earned(state: &GameState, badge_id: &str) -> Result<()> {
    let badge = state
        .badge(badge_id)
        .ok_or_else(|| anyhow::anyhow!("badge {badge_id} missing"))?;
    ensure!(
        badge.earned,
        "badge {badge_id} not earned ({}/{})",
        badge.progress,
        badge.requirement
    );
    ensure!(badge.earned_at.is_some(), "badge {badge_id} has no earned time");
    Ok(())
}

fn mission_completed(state: &GameState, mission_id: &str) -> Result<()> {
    let mission = state
        .mission(mission_id)
        .ok_or_else(|| anyhow::anyhow!("mission {mission_id} missing"))?;
    ensure!(
        mission.completed,
        "mission {mission_id} at {}/{}",
        mission.progress,
        mission.target
    );
    Ok(())
}

fn smoke_plan() -> PlayPlan {
    PlayPlan::scripted(vec![
        Interaction::FeedAnimal("bird1".into()),
        Interaction::WaterPlant("flower1".into()),
        Interaction::AddCloud,
        Interaction::DiscoverCreature("firefly".into()),
        Interaction::SpotButterfly,
    ])
    .with_expectation(no_violations)
    .with_expectation(|summary: &PlaySummary| {
        let state = &summary.final_state;
        ensure!(
            state.total_interactions == 4,
            "expected 4 counted interactions, got {}",
            state.total_interactions
        );
        ensure!(state.weather.cloud_count == 3, "cloud count {}", state.weather.cloud_count);
        ensure!(state.has_found_creature("firefly"), "firefly not recorded");
        let cues: Vec<SoundKind> = summary.reactions.iter().map(|r| r.cue).collect();
        ensure!(
            cues == [
                SoundKind::AnimalFeed,
                SoundKind::PlantWater,
                SoundKind::WeatherChange,
                SoundKind::CreatureDiscovery,
                SoundKind::ButtonTap,
            ],
            "unexpected cues {cues:?}"
        );
        Ok(())
    })
}

fn plant_hero_plan() -> PlayPlan {
    PlayPlan::scripted(vec![Interaction::WaterPlant("tree1".into()); 5])
        .with_expectation(no_violations)
        .with_expectation(|summary: &PlaySummary| {
            let tree = summary
                .final_state
                .plant("tree1")
                .ok_or_else(|| anyhow::anyhow!("tree1 missing"))?;
            ensure!(tree.stage == 4 && tree.has_fruit, "tree at stage {}", tree.stage);
            ensure!(tree.water_count == 5, "tree watered {} times", tree.water_count);
            badge_earned(&summary.final_state, BADGE_PLANT_HERO)
        })
}

fn super_feeder_plan() -> PlayPlan {
    let animals = ["bird1", "rabbit1", "deer1", "butterfly1"];
    let feeds = (0..20)
        .map(|i| Interaction::FeedAnimal(animals[i % animals.len()].to_string()))
        .collect();
    PlayPlan::scripted(feeds)
        .with_expectation(no_violations)
        .with_expectation(|summary: &PlaySummary| {
            ensure!(
                summary.final_state.total_feed_count() == 20,
                "fed {} times",
                summary.final_state.total_feed_count()
            );
            badge_earned(&summary.final_state, BADGE_SUPER_FEEDER)
        })
}

fn picky_eaters_plan() -> PlayPlan {
    let feed = |animal: &str, food: &str| Interaction::FeedWith {
        animal: animal.to_string(),
        food: food.to_string(),
    };
    PlayPlan::scripted(vec![
        feed("deer1", "seeds"),
        feed("deer1", "leaves"),
        feed("butterfly1", "berries"),
        feed("butterfly1", "nectar"),
        feed("bird1", "seeds"),
    ])
    .with_expectation(no_violations)
    .with_expectation(|summary: &PlaySummary| {
        let verdicts: Vec<Option<bool>> =
            summary.reactions.iter().map(|r| r.food_matched).collect();
        ensure!(
            verdicts == [Some(false), Some(true), Some(false), Some(true), Some(true)],
            "unexpected verdicts {verdicts:?}"
        );
        let state = &summary.final_state;
        ensure!(state.total_feed_count() == 3, "fed {} times", state.total_feed_count());
        ensure!(
            state.total_interactions == 3,
            "wrong food counted: {} interactions",
            state.total_interactions
        );
        Ok(())
    })
}

fn creature_hunt_plan() -> PlayPlan {
    let finds: Vec<Interaction> = HIDDEN_CREATURES
        .iter()
        .chain(HIDDEN_CREATURES.iter())
        .map(|creature| Interaction::DiscoverCreature(creature.id.to_string()))
        .collect();
    PlayPlan::scripted(finds)
        .with_expectation(no_violations)
        .with_expectation(|summary: &PlaySummary| {
            let state = &summary.final_state;
            ensure!(
                state.hidden_creatures_found.len() == HIDDEN_CREATURES.len(),
                "found {:?}",
                state.hidden_creatures_found
            );
            ensure!(state.total_interactions == 8, "interactions {}", state.total_interactions);
            let butterflies = state
                .mission(MISSION_FIND_BUTTERFLIES)
                .map_or(0, |mission| mission.progress);
            ensure!(butterflies == 1, "butterfly mission at {butterflies}");
            Ok(())
        })
}

fn rainbow_plan() -> PlayPlan {
    PlayPlan::scripted(vec![
        Interaction::ChangeSky(Sky::Rainy),
        Interaction::ChangeSky(Sky::Rainbow),
    ])
    .with_expectation(no_violations)
    .with_expectation(|summary: &PlaySummary| {
        let state = &summary.final_state;
        ensure!(!state.weather.is_raining, "rain flag left on under a rainbow");
        badge_earned(state, BADGE_SKY_WIZARD)?;
        mission_completed(state, MISSION_MAKE_RAINBOW)?;
        ensure!(
            summary
                .reactions
                .last()
                .is_some_and(|reaction| reaction.cues().contains(&SoundKind::BadgeEarn)),
            "rainbow did not celebrate"
        );
        Ok(())
    })
}

fn night_plan() -> PlayPlan {
    PlayPlan::scripted(vec![
        Interaction::ToggleTimeOfDay,
        Interaction::ToggleTimeOfDay,
        Interaction::ToggleTimeOfDay,
    ])
    .with_expectation(no_violations)
    .with_expectation(|summary: &PlaySummary| {
        ensure!(summary.final_state.weather.is_night(), "should end at night");
        ensure!(
            summary.earned_badges().filter(|id| *id == BADGE_NIGHT_EXPLORER).count() == 1,
            "night explorer should be reported once"
        );
        badge_earned(&summary.final_state, BADGE_NIGHT_EXPLORER)
    })
}

fn rain_maker_plan() -> PlayPlan {
    let skies = [Sky::Rainy, Sky::Cloudy, Sky::Sunny, Sky::Night];
    let changes = (0..10)
        .map(|i| Interaction::ChangeSky(skies[i % skies.len()]))
        .collect();
    PlayPlan::scripted(changes)
        .with_expectation(no_violations)
        .with_expectation(|summary: &PlaySummary| {
            badge_earned(&summary.final_state, BADGE_RAIN_MAKER)?;
            let water = summary
                .final_state
                .mission(MISSION_WATER_FLOWER)
                .map_or(0, |mission| mission.progress);
            ensure!(water == 0, "weather should not water flowers");
            Ok(())
        })
}

fn reload_matches(summary: &PlaySummary) -> Result<()> {
    ensure!(summary.saved, "save did not happen");
    let reloaded = summary
        .reloaded
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no reloaded state"))?;
    ensure!(
        reloaded == &summary.final_state,
        "reloaded state differs from saved state"
    );
    Ok(())
}

fn corrupt_save_expectation(summary: &PlaySummary) -> Result<()> {
    ensure!(!summary.loaded_save, "corrupt save should not load");
    let mut fresh = GameState::default();
    fresh.last_played = summary.final_state.last_played;
    ensure!(
        summary.final_state == fresh,
        "state should fall back to defaults"
    );
    Ok(())
}
