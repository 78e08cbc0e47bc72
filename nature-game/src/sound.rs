//! Sound cues handed to the audio collaborator.
//!
//! The core never plays anything; it only names the cue that fits an
//! interaction and leaves playback to whoever owns the speakers.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundKind {
    AnimalFeed,
    PlantWater,
    WeatherChange,
    BadgeEarn,
    CreatureDiscovery,
    ButtonTap,
    Rain,
    Sunshine,
    Night,
    Celebration,
}

impl SoundKind {
    pub const ALL: [Self; 10] = [
        Self::AnimalFeed,
        Self::PlantWater,
        Self::WeatherChange,
        Self::BadgeEarn,
        Self::CreatureDiscovery,
        Self::ButtonTap,
        Self::Rain,
        Self::Sunshine,
        Self::Night,
        Self::Celebration,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnimalFeed => "animalFeed",
            Self::PlantWater => "plantWater",
            Self::WeatherChange => "weatherChange",
            Self::BadgeEarn => "badgeEarn",
            Self::CreatureDiscovery => "creatureDiscovery",
            Self::ButtonTap => "buttonTap",
            Self::Rain => "rain",
            Self::Sunshine => "sunshine",
            Self::Night => "night",
            Self::Celebration => "celebration",
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}
