//! Hard-coded starting catalog: the animals, plants, badges and missions every
//! new session begins with, plus the hidden creatures tucked into the scene.
use crate::animals::{AnimalKind, AnimalState, Mood, Position};
use crate::constants::{
    BADGE_NIGHT_EXPLORER, BADGE_PLANT_HERO, BADGE_RAIN_MAKER, BADGE_SKY_WIZARD,
    BADGE_SUPER_FEEDER, BUTTERFLY_CREATURE_ID, MISSION_FIND_BUTTERFLIES, MISSION_MAKE_RAINBOW,
    MISSION_WATER_FLOWER,
};
use crate::plants::{PlantKind, PlantState};
use crate::progress::{Badge, Mission};

#[must_use]
pub fn default_animals() -> Vec<AnimalState> {
    vec![
        AnimalState::new("bird1", AnimalKind::Bird, Mood::Playful, Position::new(30.0, 20.0)),
        AnimalState::new("rabbit1", AnimalKind::Rabbit, Mood::Happy, Position::new(60.0, 70.0)),
        AnimalState::new("deer1", AnimalKind::Deer, Mood::Playful, Position::new(80.0, 60.0)),
        AnimalState::new(
            "butterfly1",
            AnimalKind::Butterfly,
            Mood::Playful,
            Position::new(40.0, 35.0),
        ),
    ]
}

#[must_use]
pub fn default_plants() -> Vec<PlantState> {
    vec![
        PlantState::new("tree1", PlantKind::Tree, 1),
        PlantState::new("flower1", PlantKind::Flower, 2),
        PlantState::new("bush1", PlantKind::Bush, 2),
    ]
}

#[must_use]
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::new(BADGE_RAIN_MAKER, "Rain Maker", "Changed weather 10 times", "🌧️", 10),
        Badge::new(BADGE_SUPER_FEEDER, "Super Feeder", "Fed animals 20 times", "🍎", 20),
        Badge::new(BADGE_PLANT_HERO, "Plant Hero", "Grew tree to stage 4", "🌳", 4),
        Badge::new(BADGE_SKY_WIZARD, "Sky Wizard", "Created a rainbow", "🌈", 1),
        Badge::new(BADGE_NIGHT_EXPLORER, "Night Explorer", "Explored at night", "🌙", 1),
    ]
}

#[must_use]
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            MISSION_FIND_BUTTERFLIES,
            "Find Butterflies!",
            "Tap to find 3 butterflies",
            "⭐",
            3,
        ),
        Mission::new(
            MISSION_WATER_FLOWER,
            "Help Flower Drink!",
            "Water the flower 3 times",
            "🌻",
            3,
        ),
        Mission::new(
            MISSION_MAKE_RAINBOW,
            "Make a Rainbow!",
            "Create a beautiful rainbow",
            "🌈",
            1,
        ),
    ]
}

/// A creature hidden in the scene. The catalog is reference data; only the ids
/// of found creatures live in the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenCreature {
    pub id: &'static str,
    pub emoji: &'static str,
    pub fact: &'static str,
}

pub static HIDDEN_CREATURES: [HiddenCreature; 4] = [
    HiddenCreature {
        id: "firefly",
        emoji: "✨",
        fact: "Fireflies light up to talk to each other!",
    },
    HiddenCreature {
        id: "ladybug",
        emoji: "🐞",
        fact: "Ladybugs help protect leaves!",
    },
    HiddenCreature {
        id: "chameleon",
        emoji: "🦎",
        fact: "Chameleons can change colors!",
    },
    HiddenCreature {
        id: BUTTERFLY_CREATURE_ID,
        emoji: "🦋",
        fact: "Butterflies taste with their feet!",
    },
];

#[must_use]
pub fn hidden_creature(id: &str) -> Option<&'static HiddenCreature> {
    HIDDEN_CREATURES.iter().find(|creature| creature.id == id)
}

/// Food offered by the feeding game. An animal only eats food listed for its
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
    pub correct_for: &'static [AnimalKind],
}

impl Food {
    #[must_use]
    pub fn suits(&self, kind: AnimalKind) -> bool {
        self.correct_for.contains(&kind)
    }
}

pub static FOODS: [Food; 4] = [
    Food {
        id: "seeds",
        emoji: "🌰",
        name: "Seeds",
        correct_for: &[AnimalKind::Bird, AnimalKind::Rabbit],
    },
    Food {
        id: "berries",
        emoji: "🫐",
        name: "Berries",
        correct_for: &[AnimalKind::Bird, AnimalKind::Deer, AnimalKind::Rabbit],
    },
    Food {
        id: "leaves",
        emoji: "🍃",
        name: "Leaves",
        correct_for: &[AnimalKind::Deer, AnimalKind::Rabbit, AnimalKind::Butterfly],
    },
    Food {
        id: "nectar",
        emoji: "🌺",
        name: "Nectar",
        correct_for: &[AnimalKind::Butterfly],
    },
];

#[must_use]
pub fn food(id: &str) -> Option<&'static Food> {
    FOODS.iter().find(|food| food.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique<'a>(ids: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for id in ids {
            assert!(seen.insert(id), "duplicate catalog id {id}");
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        assert_unique(default_animals().iter().map(|a| a.id.as_str()));
        assert_unique(default_plants().iter().map(|p| p.id.as_str()));
        assert_unique(default_badges().iter().map(|b| b.id.as_str()));
        assert_unique(default_missions().iter().map(|m| m.id.as_str()));
        assert_unique(HIDDEN_CREATURES.iter().map(|c| c.id));
        assert_unique(FOODS.iter().map(|f| f.id));
    }

    #[test]
    fn default_badges_start_unearned() {
        for badge in default_badges() {
            assert!(!badge.earned);
            assert!(badge.earned_at.is_none());
            assert_eq!(badge.progress, 0);
            assert!(badge.requirement > 0);
        }
    }

    #[test]
    fn catalog_has_a_single_tree() {
        let trees = default_plants()
            .into_iter()
            .filter(|p| p.kind == PlantKind::Tree)
            .count();
        assert_eq!(trees, 1);
    }

    #[test]
    fn hidden_creature_lookup() {
        let firefly = hidden_creature("firefly").expect("firefly in catalog");
        assert_eq!(firefly.emoji, "✨");
        assert!(hidden_creature("dragon").is_none());
    }

    #[test]
    fn food_lookup_and_matching() {
        let nectar = food("nectar").expect("nectar in catalog");
        assert!(nectar.suits(AnimalKind::Butterfly));
        assert!(!nectar.suits(AnimalKind::Bird));
        assert!(food("berries").unwrap().suits(AnimalKind::Deer));
        assert!(!food("seeds").unwrap().suits(AnimalKind::Deer));
        assert!(food("pizza").is_none());
    }

    #[test]
    fn every_default_animal_has_a_food() {
        for animal in default_animals() {
            assert!(
                FOODS.iter().any(|food| food.suits(animal.kind)),
                "{} would go hungry",
                animal.id
            );
        }
    }
}
