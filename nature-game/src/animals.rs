//! Animals living in the scene and their moods.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Bird,
    Rabbit,
    Deer,
    Butterfly,
    Owl,
    Bat,
}

impl AnimalKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bird => "bird",
            Self::Rabbit => "rabbit",
            Self::Deer => "deer",
            Self::Butterfly => "butterfly",
            Self::Owl => "owl",
            Self::Bat => "bat",
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bird" => Ok(Self::Bird),
            "rabbit" => Ok(Self::Rabbit),
            "deer" => Ok(Self::Deer),
            "butterfly" => Ok(Self::Butterfly),
            "owl" => Ok(Self::Owl),
            "bat" => Ok(Self::Bat),
            _ => Err(()),
        }
    }
}

/// Transient display attribute, overwritten by interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sleepy,
    #[default]
    Playful,
    Surprised,
    Hungry,
}

impl Mood {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sleepy => "sleepy",
            Self::Playful => "playful",
            Self::Surprised => "surprised",
            Self::Hungry => "hungry",
        }
    }

    /// Glyph the scene floats above an animal in this mood.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Happy => "❤️",
            Self::Sleepy => "😴",
            Self::Playful => "✨",
            Self::Surprised => "😮",
            Self::Hungry => "🍎",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Self::Happy),
            "sleepy" => Ok(Self::Sleepy),
            "playful" => Ok(Self::Playful),
            "surprised" => Ok(Self::Surprised),
            "hungry" => Ok(Self::Hungry),
            _ => Err(()),
        }
    }
}

/// Percentage coordinates inside the scene. Only the renderer reads these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalState {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnimalKind,
    pub mood: Mood,
    /// Millisecond timestamp of the last feed, 0 when never fed.
    pub last_fed: u64,
    pub feed_count: u32,
    pub position: Position,
}

impl AnimalState {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: AnimalKind, mood: Mood, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            mood,
            last_fed: 0,
            feed_count: 0,
            position,
        }
    }

    /// Feeding always leaves the animal happy, whatever its previous mood.
    pub fn feed(&mut self, now_ms: u64) {
        self.mood = Mood::Happy;
        self.last_fed = now_ms;
        self.feed_count = self.feed_count.saturating_add(1);
    }

    #[must_use]
    pub const fn has_been_fed(&self) -> bool {
        self.feed_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeding_overwrites_mood_and_counts() {
        let mut deer = AnimalState::new("deer1", AnimalKind::Deer, Mood::Hungry, Position::default());
        assert!(!deer.has_been_fed());

        deer.feed(42);
        deer.feed(99);

        assert_eq!(deer.mood, Mood::Happy);
        assert_eq!(deer.last_fed, 99);
        assert_eq!(deer.feed_count, 2);
        assert!(deer.has_been_fed());
    }

    #[test]
    fn feed_count_saturates() {
        let mut bat = AnimalState::new("bat1", AnimalKind::Bat, Mood::Sleepy, Position::new(5.0, 5.0));
        bat.feed_count = u32::MAX;
        bat.feed(1);
        assert_eq!(bat.feed_count, u32::MAX);
    }

    #[test]
    fn kinds_round_trip_through_strings() {
        for kind in [
            AnimalKind::Bird,
            AnimalKind::Rabbit,
            AnimalKind::Deer,
            AnimalKind::Butterfly,
            AnimalKind::Owl,
            AnimalKind::Bat,
        ] {
            assert_eq!(kind.as_str().parse::<AnimalKind>(), Ok(kind));
        }
        assert!("unicorn".parse::<AnimalKind>().is_err());
    }

    #[test]
    fn animal_serializes_with_type_field() {
        let bird = AnimalState::new("bird1", AnimalKind::Bird, Mood::Playful, Position::new(30.0, 20.0));
        let value = serde_json::to_value(&bird).unwrap();
        assert_eq!(value["type"], "bird");
        assert_eq!(value["mood"], "playful");
        assert_eq!(value["feedCount"], 0);
        assert_eq!(value["lastFed"], 0);
    }

    #[test]
    fn mood_glyphs_are_distinct() {
        let glyphs = [
            Mood::Happy.glyph(),
            Mood::Sleepy.glyph(),
            Mood::Playful.glyph(),
            Mood::Surprised.glyph(),
            Mood::Hungry.glyph(),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn moods_round_trip_through_strings() {
        for mood in [Mood::Happy, Mood::Sleepy, Mood::Playful, Mood::Surprised, Mood::Hungry] {
            assert_eq!(mood.as_str().parse::<Mood>(), Ok(mood));
            assert_eq!(mood.to_string(), mood.as_str());
        }
        assert!("grumpy".parse::<Mood>().is_err());
    }
}
