//! Sky conditions, clouds and the day/night cycle.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_CLOUD_COUNT, MAX_CLOUD_COUNT};

/// What the sky is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sky {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
    Rainbow,
    Night,
}

impl Sky {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Rainbow => "rainbow",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for Sky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sky {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(Self::Sunny),
            "rainy" => Ok(Self::Rainy),
            "cloudy" => Ok(Self::Cloudy),
            "rainbow" => Ok(Self::Rainbow),
            "night" => Ok(Self::Night),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(()),
        }
    }
}

/// Current weather.
///
/// `is_raining` and `time_of_day` are stored alongside `current` and can be
/// changed independently through a [`WeatherPatch`]; nothing here forces the
/// combination to agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherState {
    pub current: Sky,
    pub cloud_count: u8,
    pub is_raining: bool,
    pub time_of_day: TimeOfDay,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: Sky::Sunny,
            cloud_count: DEFAULT_CLOUD_COUNT,
            is_raining: false,
            time_of_day: TimeOfDay::Day,
        }
    }
}

impl WeatherState {
    /// Shallow-merge a patch. Cloud counts are clamped to the sky's capacity.
    pub fn apply(&mut self, patch: &WeatherPatch) {
        if let Some(current) = patch.current {
            self.current = current;
        }
        if let Some(clouds) = patch.cloud_count {
            self.cloud_count = clouds.min(MAX_CLOUD_COUNT);
        }
        if let Some(raining) = patch.is_raining {
            self.is_raining = raining;
        }
        if let Some(time) = patch.time_of_day {
            self.time_of_day = time;
        }
    }

    /// Whether the rain flag agrees with the sky.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.is_raining == (self.current == Sky::Rainy)
    }

    #[must_use]
    pub const fn is_night(&self) -> bool {
        matches!(self.time_of_day, TimeOfDay::Night)
    }

    pub(crate) fn normalize(&mut self) {
        self.cloud_count = self.cloud_count.min(MAX_CLOUD_COUNT);
    }
}

/// Partial weather update; absent fields are left untouched. Unknown keys in
/// serialized patches are ignored, and any numeric `cloudCount` is accepted and
/// clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Sky>,
    #[serde(
        default,
        deserialize_with = "clamped_cloud_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_raining: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
}

fn clamped_cloud_count<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|clouds| {
        if clouds.is_nan() {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clamped = clouds.clamp(0.0, f64::from(MAX_CLOUD_COUNT)) as u8;
        clamped
    }))
}

impl WeatherPatch {
    /// Sky change as the weather buttons issue it: the rain flag follows the sky.
    #[must_use]
    pub fn sky(sky: Sky) -> Self {
        Self {
            current: Some(sky),
            is_raining: Some(sky == Sky::Rainy),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn time_of_day(time: TimeOfDay) -> Self {
        Self {
            time_of_day: Some(time),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cloud_count(clouds: u8) -> Self {
        Self {
            cloud_count: Some(clouds),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn toggle_time(weather: &WeatherState) -> Self {
        Self::time_of_day(weather.time_of_day.toggled())
    }

    #[must_use]
    pub fn add_cloud(weather: &WeatherState) -> Self {
        Self::cloud_count(weather.cloud_count.saturating_add(1).min(MAX_CLOUD_COUNT))
    }

    #[must_use]
    pub fn remove_cloud(weather: &WeatherState) -> Self {
        Self::cloud_count(weather.cloud_count.saturating_sub(1))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current.is_none()
            && self.cloud_count.is_none()
            && self.is_raining.is_none()
            && self.time_of_day.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_only_present_fields() {
        let mut weather = WeatherState::default();
        weather.apply(&WeatherPatch {
            is_raining: Some(true),
            ..WeatherPatch::default()
        });
        assert_eq!(weather.current, Sky::Sunny);
        assert!(weather.is_raining);
        assert_eq!(weather.cloud_count, DEFAULT_CLOUD_COUNT);
        assert!(!weather.is_consistent());
    }

    #[test]
    fn apply_clamps_clouds() {
        let mut weather = WeatherState::default();
        weather.apply(&WeatherPatch::cloud_count(200));
        assert_eq!(weather.cloud_count, MAX_CLOUD_COUNT);
    }

    #[test]
    fn sky_patch_keeps_rain_consistent() {
        let mut weather = WeatherState::default();
        weather.apply(&WeatherPatch::sky(Sky::Rainy));
        assert!(weather.is_raining);
        assert!(weather.is_consistent());

        weather.apply(&WeatherPatch::sky(Sky::Rainbow));
        assert!(!weather.is_raining);
        assert_eq!(weather.current, Sky::Rainbow);
    }

    #[test]
    fn cloud_buttons_stay_in_range() {
        let mut weather = WeatherState {
            cloud_count: MAX_CLOUD_COUNT,
            ..WeatherState::default()
        };
        weather.apply(&WeatherPatch::add_cloud(&weather));
        assert_eq!(weather.cloud_count, MAX_CLOUD_COUNT);

        weather.cloud_count = 0;
        weather.apply(&WeatherPatch::remove_cloud(&weather));
        assert_eq!(weather.cloud_count, 0);
    }

    #[test]
    fn toggle_flips_day_and_night() {
        let mut weather = WeatherState::default();
        weather.apply(&WeatherPatch::toggle_time(&weather));
        assert!(weather.is_night());
        weather.apply(&WeatherPatch::toggle_time(&weather));
        assert_eq!(weather.time_of_day, TimeOfDay::Day);
    }

    #[test]
    fn patch_ignores_unknown_keys() {
        let patch: WeatherPatch =
            serde_json::from_str(r#"{"current":"cloudy","sparkles":true}"#).unwrap();
        assert_eq!(patch.current, Some(Sky::Cloudy));
        assert!(patch.cloud_count.is_none());
        assert!(!patch.is_empty());
        assert!(WeatherPatch::default().is_empty());
    }

    #[test]
    fn patch_clamps_out_of_range_cloud_numbers() {
        let parse = |json: &str| serde_json::from_str::<WeatherPatch>(json).unwrap().cloud_count;
        assert_eq!(parse(r#"{"cloudCount":300}"#), Some(MAX_CLOUD_COUNT));
        assert_eq!(parse(r#"{"cloudCount":-1}"#), Some(0));
        assert_eq!(parse(r#"{"cloudCount":2.5}"#), Some(2));
        assert_eq!(parse(r#"{"cloudCount":4}"#), Some(4));
        assert_eq!(parse(r#"{"cloudCount":null}"#), None);
        assert_eq!(parse("{}"), None);
        assert!(serde_json::from_str::<WeatherPatch>(r#"{"cloudCount":"many"}"#).is_err());
    }

    #[test]
    fn weather_serializes_camel_case() {
        let value = serde_json::to_value(WeatherState::default()).unwrap();
        assert_eq!(value["current"], "sunny");
        assert_eq!(value["cloudCount"], 2);
        assert_eq!(value["isRaining"], false);
        assert_eq!(value["timeOfDay"], "day");
    }

    #[test]
    fn sky_parses_all_names() {
        for sky in [Sky::Sunny, Sky::Rainy, Sky::Cloudy, Sky::Rainbow, Sky::Night] {
            assert_eq!(sky.as_str().parse::<Sky>(), Ok(sky));
        }
        assert!("snowy".parse::<Sky>().is_err());
    }

    #[test]
    fn time_of_day_parses_both_names() {
        for time in [TimeOfDay::Day, TimeOfDay::Night] {
            assert_eq!(time.as_str().parse::<TimeOfDay>(), Ok(time));
        }
        assert!("dusk".parse::<TimeOfDay>().is_err());
    }
}
