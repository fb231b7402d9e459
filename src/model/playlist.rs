//! Playable items and the playlist they come in.
//!
//! Pandora omits `audioUrl` and `bitrate` from most payloads and sends an
//! `audioUrlMap` of quality tiers instead. Both playable types fill these two
//! fields from the map, honoring the client's preferred audio quality.

// Use 3rd party
use serde_json::{Map, Value};

// Use local
use crate::client::{Client, ClientError, ClientResult};
use crate::model::list::{List, ListFields};
use crate::model::quality::audio_field;
use crate::model::{number_from_string, set, set_formatted, Field, Fields, Model, Schema};

pub const AUDIO_URL: &str = "audioUrl";
pub const BITRATE: &str = "bitrate";

pub type PlaylistItem<'a> = Model<'a, PlaylistItemData>;
pub type AdItem<'a> = Model<'a, AdItemData>;
pub type Playlist<'a> = List<'a, PlaylistData>;

/// Slots shared by every playable data struct.
pub trait PlaybackFields {
    fn audio_url_mut(&mut self) -> &mut Option<String>;
    fn bitrate_mut(&mut self) -> &mut Option<u32>;
    fn station_id_mut(&mut self) -> &mut Option<String>;
}

fn playback_schema<'a, D: PlaybackFields>() -> Schema<'a, D> {
    Schema::new(vec![
        Field::new("audio_url", AUDIO_URL, |d: &mut D, _, v| set(d.audio_url_mut(), v)),
        Field::new("bitrate", BITRATE, |d: &mut D, _, v| set_formatted(d.bitrate_mut(), v))
            .formatter(number_from_string),
        Field::new("station_id", "stationId", |d: &mut D, _, v| set(d.station_id_mut(), v)),
    ])
}

fn playback_value<D>(client: &dyn Client, field: &Field<'_, D>, data: &Map<String, Value>) -> Option<Value> {
    let raw = field.lookup(data);
    match field.key() {
        AUDIO_URL | BITRATE if raw.as_ref().map_or(true, Value::is_null) => {
            audio_field(data, field.key(), client.audio_quality())
        }
        _ => raw,
    }
}

/// Actions on something the listener is about to hear.
///
/// Anything not supported by an item type fails with
/// [`ClientError::Unsupported`].
pub trait Playback {
    fn is_ad(&self) -> bool;

    /// Media URL picked for this item, if any.
    fn audio_url(&self) -> Option<&str>;

    fn is_playable(&self) -> bool;

    /// Must be called right before playback starts.
    fn prepare_playback(&self) -> ClientResult<()> {
        Ok(())
    }

    fn thumbs_up(&self) -> ClientResult<()> {
        Err(ClientError::Unsupported("thumbs_up"))
    }

    fn thumbs_down(&self) -> ClientResult<()> {
        Err(ClientError::Unsupported("thumbs_down"))
    }

    fn bookmark_song(&self) -> ClientResult<()> {
        Err(ClientError::Unsupported("bookmark_song"))
    }

    fn bookmark_artist(&self) -> ClientResult<()> {
        Err(ClientError::Unsupported("bookmark_artist"))
    }

    fn sleep(&self) -> ClientResult<()> {
        Err(ClientError::Unsupported("sleep"))
    }
}

fn reachable(client: &dyn Client, audio_url: Option<&str>) -> bool {
    audio_url.map_or(false, |url| client.test_url(url))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaylistItemData {
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub song_name: Option<String>,
    pub song_rating: Option<u32>,
    pub track_gain: Option<f64>,
    pub track_length: u32,
    pub track_token: Option<String>,
    pub audio_url: Option<String>,
    pub bitrate: Option<u32>,
    pub album_art_url: Option<String>,
    pub allow_feedback: bool,
    pub station_id: Option<String>,
    pub ad_token: Option<String>,
    pub album_detail_url: Option<String>,
    pub album_explore_url: Option<String>,
    pub amazon_album_asin: Option<String>,
    pub amazon_album_digital_asin: Option<String>,
    pub amazon_album_url: Option<String>,
    pub amazon_song_digital_asin: Option<String>,
    pub artist_detail_url: Option<String>,
    pub artist_explore_url: Option<String>,
    pub itunes_song_url: Option<String>,
    pub song_detail_url: Option<String>,
    pub song_explore_url: Option<String>,
}

impl PlaybackFields for PlaylistItemData {
    fn audio_url_mut(&mut self) -> &mut Option<String> {
        &mut self.audio_url
    }

    fn bitrate_mut(&mut self) -> &mut Option<u32> {
        &mut self.bitrate
    }

    fn station_id_mut(&mut self) -> &mut Option<String> {
        &mut self.station_id
    }
}

impl<'a> Fields<'a> for PlaylistItemData {
    fn schema() -> Schema<'a, Self> {
        playback_schema::<Self>().extend(vec![
            Field::new("artist_name", "artistName", |d: &mut Self, _, v| set(&mut d.artist_name, v)),
            Field::new("album_name", "albumName", |d: &mut Self, _, v| set(&mut d.album_name, v)),
            Field::new("song_name", "songName", |d: &mut Self, _, v| set(&mut d.song_name, v)),
            Field::new("song_rating", "songRating", |d: &mut Self, _, v| set(&mut d.song_rating, v)),
            Field::new("track_gain", "trackGain", |d: &mut Self, _, v| {
                set_formatted(&mut d.track_gain, v)
            })
            .formatter(number_from_string),
            Field::new("track_length", "trackLength", |d: &mut Self, _, v| set(&mut d.track_length, v))
                .with_default(0),
            Field::new("track_token", "trackToken", |d: &mut Self, _, v| set(&mut d.track_token, v)),
            Field::new("album_art_url", "albumArtUrl", |d: &mut Self, _, v| set(&mut d.album_art_url, v)),
            Field::new("allow_feedback", "allowFeedback", |d: &mut Self, _, v| {
                set(&mut d.allow_feedback, v)
            })
            .with_default(true),
            Field::new("ad_token", "adToken", |d: &mut Self, _, v| set(&mut d.ad_token, v)),
            Field::new("album_detail_url", "albumDetailUrl", |d: &mut Self, _, v| {
                set(&mut d.album_detail_url, v)
            }),
            Field::new("album_explore_url", "albumExplorerUrl", |d: &mut Self, _, v| {
                set(&mut d.album_explore_url, v)
            }),
            Field::new("amazon_album_asin", "amazonAlbumAsin", |d: &mut Self, _, v| {
                set(&mut d.amazon_album_asin, v)
            }),
            Field::new("amazon_album_digital_asin", "amazonAlbumDigitalAsin", |d: &mut Self, _, v| {
                set(&mut d.amazon_album_digital_asin, v)
            }),
            Field::new("amazon_album_url", "amazonAlbumUrl", |d: &mut Self, _, v| {
                set(&mut d.amazon_album_url, v)
            }),
            Field::new("amazon_song_digital_asin", "amazonSongDigitalAsin", |d: &mut Self, _, v| {
                set(&mut d.amazon_song_digital_asin, v)
            }),
            Field::new("artist_detail_url", "artistDetailUrl", |d: &mut Self, _, v| {
                set(&mut d.artist_detail_url, v)
            }),
            Field::new("artist_explore_url", "artistExplorerUrl", |d: &mut Self, _, v| {
                set(&mut d.artist_explore_url, v)
            }),
            Field::new("itunes_song_url", "itunesSongUrl", |d: &mut Self, _, v| {
                set(&mut d.itunes_song_url, v)
            }),
            Field::new("song_detail_url", "songDetailUrl", |d: &mut Self, _, v| {
                set(&mut d.song_detail_url, v)
            }),
            Field::new("song_explore_url", "songExplorerUrl", |d: &mut Self, _, v| {
                set(&mut d.song_explore_url, v)
            }),
        ])
    }

    fn raw_value(client: &'a dyn Client, field: &Field<'a, Self>, data: &Map<String, Value>) -> Option<Value> {
        playback_value(client, field, data)
    }
}

impl<'a> PlaylistItem<'a> {
    fn track_token(&self) -> ClientResult<&str> {
        self.track_token
            .as_deref()
            .ok_or_else(|| ClientError::shape("trackToken", "string"))
    }

    /// Fetches the ad this playlist slot stands for.
    pub fn get_ad_item(&self) -> ClientResult<AdItem<'a>> {
        let ad_token = self
            .ad_token
            .as_deref()
            .ok_or(ClientError::Unsupported("get_ad_item on a song"))?;
        let station_id = self
            .station_id
            .as_deref()
            .ok_or_else(|| ClientError::shape("stationId", "string"))?;
        AdItem::from_metadata(self.client(), station_id, ad_token)
    }
}

impl Playback for PlaylistItem<'_> {
    fn is_ad(&self) -> bool {
        self.ad_token.is_some()
    }

    fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    fn is_playable(&self) -> bool {
        reachable(self.client(), Playback::audio_url(self))
    }

    fn thumbs_up(&self) -> ClientResult<()> {
        self.client().add_feedback(self.track_token()?, true)
    }

    fn thumbs_down(&self) -> ClientResult<()> {
        self.client().add_feedback(self.track_token()?, false)
    }

    fn bookmark_song(&self) -> ClientResult<()> {
        self.client().add_song_bookmark(self.track_token()?)
    }

    fn bookmark_artist(&self) -> ClientResult<()> {
        self.client().add_artist_bookmark(self.track_token()?)
    }

    fn sleep(&self) -> ClientResult<()> {
        self.client().sleep_song(self.track_token()?)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdItemData {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub tracking_tokens: Vec<String>,
    pub audio_url: Option<String>,
    pub bitrate: Option<u32>,
    pub station_id: Option<String>,
    pub ad_token: Option<String>,
}

impl PlaybackFields for AdItemData {
    fn audio_url_mut(&mut self) -> &mut Option<String> {
        &mut self.audio_url
    }

    fn bitrate_mut(&mut self) -> &mut Option<u32> {
        &mut self.bitrate
    }

    fn station_id_mut(&mut self) -> &mut Option<String> {
        &mut self.station_id
    }
}

impl<'a> Fields<'a> for AdItemData {
    fn schema() -> Schema<'a, Self> {
        playback_schema::<Self>().extend(vec![
            Field::new("title", "title", |d: &mut Self, _, v| set(&mut d.title, v)),
            Field::new("company_name", "companyName", |d: &mut Self, _, v| set(&mut d.company_name, v)),
            Field::new("tracking_tokens", "adTrackingTokens", |d: &mut Self, _, v| {
                set(&mut d.tracking_tokens, v)
            })
            .with_default(Vec::<String>::new()),
            Field::new("ad_token", "adToken", |d: &mut Self, _, v| set(&mut d.ad_token, v)),
        ])
    }

    fn raw_value(client: &'a dyn Client, field: &Field<'a, Self>, data: &Map<String, Value>) -> Option<Value> {
        playback_value(client, field, data)
    }
}

impl<'a> AdItem<'a> {
    /// Builds the ad behind `ad_token` as played on `station_id`.
    pub fn from_metadata(client: &'a dyn Client, station_id: &str, ad_token: &str) -> ClientResult<Self> {
        let mut metadata = client.get_ad_metadata(ad_token)?;
        let data = metadata
            .as_object_mut()
            .ok_or_else(|| ClientError::shape("$", "object"))?;
        data.insert("adToken".to_owned(), Value::from(ad_token));
        data.insert("stationId".to_owned(), Value::from(station_id));
        Self::from_json(client, &metadata)
    }

    pub fn register_ad(&self, station_id: &str) -> ClientResult<()> {
        self.client().register_ad(station_id, &self.tracking_tokens)
    }
}

impl Playback for AdItem<'_> {
    fn is_ad(&self) -> bool {
        true
    }

    fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    fn is_playable(&self) -> bool {
        reachable(self.client(), Playback::audio_url(self))
    }

    fn prepare_playback(&self) -> ClientResult<()> {
        let station_id = self
            .station_id
            .as_deref()
            .ok_or_else(|| ClientError::shape("stationId", "string"))?;
        self.register_ad(station_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaylistData;

impl<'a> Fields<'a> for PlaylistData {
    fn schema() -> Schema<'a, Self> {
        Schema::default()
    }
}

impl<'a> ListFields<'a> for PlaylistData {
    type Item = PlaylistItemData;
    const LIST_KEY: &'static str = "items";
}
