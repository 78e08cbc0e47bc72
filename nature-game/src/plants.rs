//! Plants and their growth stages.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_PLANT_STAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    Tree,
    Flower,
    Bush,
}

impl PlantKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Flower => "flower",
            Self::Bush => "bush",
        }
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "flower" => Ok(Self::Flower),
            "bush" => Ok(Self::Bush),
            _ => Err(()),
        }
    }
}

/// A plant in the scene.
///
/// `stage` runs from 0 (seed) to [`MAX_PLANT_STAGE`] (fully grown) and
/// `has_fruit` always mirrors whether that top stage was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantState {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PlantKind,
    pub stage: u8,
    pub last_watered: u64,
    pub water_count: u32,
    pub has_fruit: bool,
}

impl PlantState {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: PlantKind, stage: u8) -> Self {
        let stage = stage.min(MAX_PLANT_STAGE);
        Self {
            id: id.into(),
            kind,
            stage,
            last_watered: 0,
            water_count: 0,
            has_fruit: stage == MAX_PLANT_STAGE,
        }
    }

    /// Grow one stage. Watering a fully grown plant still counts.
    pub fn water(&mut self, now_ms: u64) {
        self.stage = self.stage.saturating_add(1).min(MAX_PLANT_STAGE);
        self.last_watered = now_ms;
        self.water_count = self.water_count.saturating_add(1);
        self.has_fruit = self.is_fully_grown();
    }

    #[must_use]
    pub const fn is_fully_grown(&self) -> bool {
        self.stage >= MAX_PLANT_STAGE
    }

    /// Clamp the stage and re-derive fruit after loading foreign data.
    pub fn normalize(&mut self) {
        self.stage = self.stage.min(MAX_PLANT_STAGE);
        self.has_fruit = self.is_fully_grown();
    }
}
