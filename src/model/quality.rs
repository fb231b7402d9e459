// Use 3rd party
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Use built-in library
use std::str::FromStr;

static TIERS: [AudioQuality; 3] = AudioQuality::ALL;

/// Key of the quality-tiered media map in playlist payloads.
pub const AUDIO_URL_MAP: &str = "audioUrlMap";

// Media map example:
//{
    //"highQuality": {
        //"bitrate": "64",
        //"encoding": "aacplus",
        //"audioUrl": "http://audio-sv5-t1-1.pandora.com/access/...",
        //"protocol": "http"
    //},
    //"mediumQuality": { ... },
    //"lowQuality": { ... }
//}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioQuality {
    #[serde(rename = "highQuality")]
    High,
    #[serde(rename = "mediumQuality")]
    Medium,
    #[serde(rename = "lowQuality")]
    Low,
}

impl AudioQuality {
    /// Tiers from best to worst.
    pub const ALL: [AudioQuality; 3] = [Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "highQuality",
            Self::Medium => "mediumQuality",
            Self::Low => "lowQuality",
        }
    }

    /// Tiers to search for `preferred`: itself and everything below it.
    pub fn at_or_below(preferred: Option<Self>) -> &'static [Self] {
        match preferred {
            Some(quality) => {
                let start = TIERS.iter().position(|&tier| tier == quality).unwrap_or(0);
                &TIERS[start..]
            }
            None => &TIERS,
        }
    }
}

impl FromStr for AudioQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|quality| quality.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// Picks `field` from the best tier of `audioUrlMap` at or below `preferred`.
///
/// Never reaches above the preferred tier, so a listener on a slow
/// connection does not get a stream heavier than they asked for. Returns
/// `None` when the map is missing or empty, or when no searched tier
/// carries the field.
pub fn audio_field(data: &Map<String, Value>, field: &str, preferred: Option<AudioQuality>) -> Option<Value> {
    let url_map = data.get(AUDIO_URL_MAP).and_then(Value::as_object)?;

    AudioQuality::at_or_below(preferred)
        .iter()
        .filter_map(|quality| url_map.get(quality.as_str()))
        .filter_map(|descriptor| descriptor.get(field))
        .find(|value| !value.is_null())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(url_map: Value) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(AUDIO_URL_MAP.to_owned(), url_map);
        data
    }

    #[test]
    fn falls_through_to_lower_tier() {
        let data = data(json!({
            "highQuality": {"audioUrl": "h"},
            "lowQuality": {"audioUrl": "l"}
        }));
        let url = audio_field(&data, "audioUrl", Some(AudioQuality::Medium));
        assert_eq!(url, Some(json!("l")));
    }

    #[test]
    fn never_reaches_above_preferred() {
        let data = data(json!({"highQuality": {"audioUrl": "h"}}));
        assert_eq!(audio_field(&data, "audioUrl", Some(AudioQuality::Low)), None);
    }

    #[test]
    fn preferred_tier_wins() {
        let data = data(json!({
            "highQuality": {"audioUrl": "h", "bitrate": "128"},
            "mediumQuality": {"audioUrl": "m", "bitrate": "64"},
            "lowQuality": {"audioUrl": "l", "bitrate": "32"}
        }));
        assert_eq!(
            audio_field(&data, "bitrate", Some(AudioQuality::Medium)),
            Some(json!("64"))
        );
        assert_eq!(
            audio_field(&data, "audioUrl", Some(AudioQuality::High)),
            Some(json!("h"))
        );
    }

    #[test]
    fn unknown_preference_searches_from_high() {
        let data = data(json!({
            "highQuality": {"audioUrl": "h"},
            "lowQuality": {"audioUrl": "l"}
        }));
        assert_eq!(audio_field(&data, "audioUrl", None), Some(json!("h")));
    }

    #[test]
    fn missing_or_empty_map() {
        assert_eq!(audio_field(&Map::new(), "audioUrl", Some(AudioQuality::High)), None);
        assert_eq!(audio_field(&data(json!({})), "audioUrl", None), None);
    }

    #[test]
    fn parse_quality() {
        assert_eq!("lowQuality".parse::<AudioQuality>(), Ok(AudioQuality::Low));
        assert!("LOW".parse::<AudioQuality>().is_err());
    }

    #[test]
    fn tier_order() {
        assert_eq!(
            AudioQuality::at_or_below(Some(AudioQuality::Medium)),
            &[AudioQuality::Medium, AudioQuality::Low]
        );
        assert_eq!(AudioQuality::at_or_below(None).len(), 3);
    }
}
