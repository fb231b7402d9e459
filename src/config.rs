// Use 3rd party
use log::warn;
use serde::{Deserialize, Deserializer};

// Use local
use crate::client::ClientResult;
use crate::model::quality::AudioQuality;

/// Client settings that influence how models are built.
//{
    //"audio_quality": "highQuality"
//}
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred quality tier, `None` when the configured name is unknown.
    #[serde(deserialize_with = "lenient_quality")]
    pub audio_quality: Option<AudioQuality>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_quality: Some(AudioQuality::Medium),
        }
    }
}

impl Config {
    pub fn from_json(input: &str) -> ClientResult<Self> {
        serde_json::from_str(input).map_err(Into::into)
    }

    pub fn audio_quality(&self) -> Option<AudioQuality> {
        self.audio_quality
    }
}

// Unknown names are reported once, when the settings are loaded.
fn lenient_quality<'de, D>(deserializer: D) -> Result<Option<AudioQuality>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    let quality = name.parse().ok();
    if quality.is_none() {
        warn!("unknown audio quality {:?}, searching from the highest", name);
    }
    Ok(quality)
}
