//! Drives a [`GameStore`] through a play plan and records what happened.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use nature_game::constants::SAVE_KEY;
use nature_game::{
    FOODS, FixedClock, GameState, GameStore, HIDDEN_CREATURES, Interaction, KeyValueStore, MemoryStore,
    Reaction, Sky,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::file_store::FileStore;

/// Clock start for every simulated session, so runs are reproducible.
pub const SESSION_START_MS: u64 = 1_700_000_000_000;
/// Simulated time between two interactions.
pub const STEP_MS: u64 = 1_500;

const ANIMAL_IDS: [&str; 5] = ["bird1", "rabbit1", "deer1", "butterfly1", "owl1"];
const PLANT_IDS: [&str; 4] = ["tree1", "flower1", "bush1", "fern1"];
const SKIES: [Sky; 5] = [Sky::Sunny, Sky::Rainy, Sky::Cloudy, Sky::Rainbow, Sky::Night];

#[derive(Debug, Clone)]
pub enum PlaySteps {
    Scripted(Vec<Interaction>),
    Random { steps: usize },
}

/// Assertion hook run after a session completes.
type PlayExpectationFn = Arc<dyn Fn(&PlaySummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct PlayExpectation(PlayExpectationFn);

impl std::fmt::Debug for PlayExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayExpectation").finish()
    }
}

impl PlayExpectation {
    /// # Errors
    /// Returns the expectation's failure.
    pub fn check(&self, summary: &PlaySummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for PlayExpectation
where
    F: Fn(&PlaySummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

#[derive(Debug, Clone)]
pub struct PlayPlan {
    pub steps: PlaySteps,
    /// Raw blob placed under the save key before the store opens.
    pub preloaded_save: Option<String>,
    /// Save after playing and reopen a second store on the same backend.
    pub reload: bool,
    pub expectations: Vec<PlayExpectation>,
}

impl PlayPlan {
    #[must_use]
    pub fn scripted(interactions: Vec<Interaction>) -> Self {
        Self {
            steps: PlaySteps::Scripted(interactions),
            preloaded_save: None,
            reload: false,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn random(steps: usize) -> Self {
        Self {
            steps: PlaySteps::Random { steps },
            preloaded_save: None,
            reload: false,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_preloaded_save(mut self, blob: impl Into<String>) -> Self {
        self.preloaded_save = Some(blob.into());
        self
    }

    #[must_use]
    pub const fn with_reload(mut self) -> Self {
        self.reload = true;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<PlayExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct PlaySummary {
    pub seed: u64,
    pub loaded_save: bool,
    pub interactions: Vec<Interaction>,
    pub reactions: Vec<Reaction>,
    pub final_state: GameState,
    pub saved: bool,
    pub reloaded: Option<GameState>,
    /// Broken invariants and regressions noticed after any step.
    pub violations: Vec<String>,
}

impl PlaySummary {
    pub fn earned_badges(&self) -> impl Iterator<Item = &str> {
        self.reactions
            .iter()
            .flat_map(|reaction| reaction.earned_badges.iter().map(String::as_str))
    }
}

/// Draw one interaction. Ids include a few that match nothing in the scene.
pub fn random_interaction(rng: &mut ChaCha20Rng) -> Interaction {
    match rng.gen_range(0..9) {
        0 => Interaction::FeedAnimal(pick(rng, &ANIMAL_IDS)),
        7 => Interaction::FeedWith {
            animal: pick(rng, &ANIMAL_IDS),
            food: FOODS[rng.gen_range(0..FOODS.len())].id.to_string(),
        },
        1 => Interaction::WaterPlant(pick(rng, &PLANT_IDS)),
        2 => Interaction::ChangeSky(SKIES[rng.gen_range(0..SKIES.len())]),
        3 => Interaction::ToggleTimeOfDay,
        4 => Interaction::AddCloud,
        5 => Interaction::RemoveCloud,
        6 => {
            let creature = &HIDDEN_CREATURES[rng.gen_range(0..HIDDEN_CREATURES.len())];
            Interaction::DiscoverCreature(creature.id.to_string())
        }
        _ => Interaction::SpotButterfly,
    }
}

fn pick(rng: &mut ChaCha20Rng, ids: &[&str]) -> String {
    ids.choose(rng).copied().unwrap_or_default().to_string()
}

pub struct GamePlayer {
    verbose: bool,
    save_dir: Option<PathBuf>,
}

impl GamePlayer {
    pub const fn new(verbose: bool, save_dir: Option<PathBuf>) -> Self {
        Self { verbose, save_dir }
    }

    /// Play `plan` once. Saves go to a directory per run under the save dir,
    /// or to memory when none is configured.
    ///
    /// # Errors
    /// Returns an error if the preloaded save cannot be written.
    pub fn run_plan(&self, label: &str, plan: &PlayPlan, seed: u64) -> Result<PlaySummary> {
        match &self.save_dir {
            Some(dir) => {
                let store = FileStore::new(dir.join(label).join(format!("seed-{seed}")));
                store
                    .clear(SAVE_KEY)
                    .with_context(|| format!("clearing save in {}", store.dir().display()))?;
                self.play(store, plan, seed)
            }
            None => self.play(MemoryStore::new(), plan, seed),
        }
    }

    fn play<S>(&self, storage: S, plan: &PlayPlan, seed: u64) -> Result<PlaySummary>
    where
        S: KeyValueStore + Clone,
    {
        if let Some(blob) = &plan.preloaded_save {
            storage
                .save(SAVE_KEY, blob)
                .context("writing preloaded save")?;
        }

        let clock = FixedClock::new(SESSION_START_MS);
        let mut store = GameStore::with_clock(storage.clone(), clock.clone());
        let loaded_save = store.load_progress();

        let interactions = match &plan.steps {
            PlaySteps::Scripted(script) => script.clone(),
            PlaySteps::Random { steps } => {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                (0..*steps).map(|_| random_interaction(&mut rng)).collect()
            }
        };

        let mut reactions = Vec::with_capacity(interactions.len());
        let mut violations = Vec::new();
        let mut earned: Vec<String> = Vec::new();
        let mut previous = store.state().clone();

        for (step, interaction) in interactions.iter().enumerate() {
            clock.advance(STEP_MS);
            let reaction = store.dispatch(interaction);
            log::debug!("step {step}: {} -> {}", interaction.label(), reaction.cue);
            earned.extend(reaction.earned_badges.iter().cloned());
            reactions.push(reaction);

            let state = store.state();
            violations.extend(
                state
                    .invariant_violations()
                    .into_iter()
                    .map(|violation| format!("step {step}: {violation}")),
            );
            violations.extend(regressions(&previous, state, &earned, step));
            previous = state.clone();
        }

        let (saved, reloaded) = if plan.reload {
            clock.advance(STEP_MS);
            let saved = store.save_progress();
            let reopened = GameStore::with_clock(storage, clock);
            (saved, Some(reopened.into_state()))
        } else {
            (false, None)
        };

        let summary = PlaySummary {
            seed,
            loaded_save,
            interactions,
            reactions,
            final_state: store.into_state(),
            saved,
            reloaded,
            violations,
        };

        if self.verbose {
            println!(
                "    seed {} | {} interactions | {} badges | {} missions done",
                summary.seed,
                summary.final_state.total_interactions,
                summary.final_state.earned_badge_count(),
                summary.final_state.completed_mission_count()
            );
        }

        Ok(summary)
    }
}

fn regressions(before: &GameState, after: &GameState, earned: &[String], step: usize) -> Vec<String> {
    let mut found = Vec::new();
    for id in earned {
        if !after.badge(id).is_some_and(|badge| badge.earned) {
            found.push(format!("step {step}: badge {id} lost its earned flag"));
        }
    }
    for mission in &after.missions {
        let Some(old) = before.mission(&mission.id) else {
            continue;
        };
        if mission.progress < old.progress {
            found.push(format!(
                "step {step}: mission {} fell from {} to {}",
                mission.id, old.progress, mission.progress
            ));
        }
    }
    for plant in &after.plants {
        let Some(old) = before.plant(&plant.id) else {
            continue;
        };
        if plant.stage < old.stage {
            found.push(format!(
                "step {step}: plant {} shrank from {} to {}",
                plant.id, old.stage, plant.stage
            ));
        }
    }
    found
}
