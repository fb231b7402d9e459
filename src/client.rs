// Use 3rd party
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// Use internal modules
use crate::model::quality::AudioQuality;
use crate::request::*;

// Possible errors returned from the model layer and its client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("pandora error: {0}")]
    Api(#[from] ApiError),
    #[error("expected {expected} at `{key}`")]
    Shape {
        key: String,
        expected: &'static str,
    },
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("no item with key {0}")]
    NotFound(String),
    #[error("no field named `{0}`")]
    UnknownField(&'static str),
    #[error("json parse error: {0}")]
    ParseJSON(#[from] serde_json::Error),
    #[error("request error: {0}")]
    Request(Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    pub(crate) fn shape(key: &str, expected: &'static str) -> Self {
        Self::Shape {
            key: key.to_owned(),
            expected,
        }
    }
}

// Pandora error payload:
//{
    //"stat": "fail",
    //"message": "An unexpected error occurred",
    //"code": 9
//}
#[derive(Debug, Error, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Handle to the Pandora API the models were built from.
///
/// Implementors provide transport, authentication and the configured audio
/// quality. Everything else is expressed in terms of [`Client::call`], so the
/// provided methods only decide which API method to call with which
/// parameters.
pub trait Client {
    /// Preferred audio quality, `None` if unset or unrecognized.
    fn audio_quality(&self) -> Option<AudioQuality>;

    /// Performs one API round trip and returns the `result` object.
    fn call(&self, method: &str, params: Value) -> ClientResult<Value>;

    /// Checks whether a media URL is reachable.
    fn test_url(&self, url: &str) -> bool;

    fn get_playlist(&self, station_token: &str) -> ClientResult<Value> {
        send(self, &GetPlaylist { station_token })
    }

    fn get_station_list_checksum(&self) -> ClientResult<String> {
        let result = send(self, &GetStationListChecksum {})?;
        let checksum = result
            .get("checksum")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::shape("checksum", "string"))?;
        Ok(checksum.to_owned())
    }

    fn add_feedback(&self, track_token: &str, is_positive: bool) -> ClientResult<()> {
        send(self, &AddFeedback { track_token, is_positive }).map(drop)
    }

    fn add_song_bookmark(&self, track_token: &str) -> ClientResult<()> {
        send(self, &AddSongBookmark { track_token }).map(drop)
    }

    fn add_artist_bookmark(&self, track_token: &str) -> ClientResult<()> {
        send(self, &AddArtistBookmark { track_token }).map(drop)
    }

    fn sleep_song(&self, track_token: &str) -> ClientResult<()> {
        send(self, &SleepSong { track_token }).map(drop)
    }

    fn register_ad(&self, station_id: &str, ad_tracking_tokens: &[String]) -> ClientResult<()> {
        let request = RegisterAd {
            station_id,
            ad_tracking_tokens,
        };
        send(self, &request).map(drop)
    }

    fn delete_song_bookmark(&self, bookmark_token: &str) -> ClientResult<()> {
        send(self, &DeleteSongBookmark { bookmark_token }).map(drop)
    }

    fn delete_artist_bookmark(&self, bookmark_token: &str) -> ClientResult<()> {
        send(self, &DeleteArtistBookmark { bookmark_token }).map(drop)
    }

    fn create_station(&self, request: &CreateStation) -> ClientResult<Value> {
        send(self, request)
    }

    fn get_ad_metadata(&self, ad_token: &str) -> ClientResult<Value> {
        let request = GetAdMetadata {
            ad_token,
            return_ad_tracking_tokens: true,
            support_audio_ads: true,
        };
        send(self, &request)
    }
}

fn send<C, R>(client: &C, request: &R) -> ClientResult<Value>
where
    C: Client + ?Sized,
    R: Method + Serialize,
{
    let params = serde_json::to_value(request)?;
    debug!("calling {} with {}", R::METHOD, params);
    client.call(R::METHOD, params)
}
